use serde::{Deserialize, Serialize};

/// Canonical form of a license plate: spaces and hyphens removed, uppercased.
///
/// Total function, empty input stays empty. Every storage read and write keyed
/// by plate goes through this so that "abc 123" and "ABC-123" collide.
pub fn normalize_plate(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect::<String>()
        .to_uppercase()
}

/// A license plate that is guaranteed to be in normalized form.
/// Acts as the partition key of the toll record store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlateNumber(String);

impl PlateNumber {
    /// Normalizes `raw` and wraps it.
    pub fn normalized(raw: &str) -> Self {
        Self(normalize_plate(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for PlateNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
