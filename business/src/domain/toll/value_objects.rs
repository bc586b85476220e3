use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::TollError;

/// Location of the source image in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    pub bucket: String,
    pub key: String,
}

impl ImageReference {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// Toll metadata carried by an image's object key:
/// `<tollBoothId>/<RFC3339 timestamp>.<extension>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TollObjectKey {
    pub toll_booth_id: String,
    pub timestamp: DateTime<Utc>,
}

static OBJECT_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<booth>[^/]+)/(?P<timestamp>[^/]+)\.(?P<ext>[A-Za-z0-9]+)$")
        .expect("Invalid regex pattern for object key")
});

impl TollObjectKey {
    /// Parses an already decoded object key.
    pub fn parse(key: &str) -> Result<Self, TollError> {
        let captures = OBJECT_KEY_REGEX
            .captures(key)
            .ok_or(TollError::MalformedKey)?;

        let toll_booth_id = captures["booth"].to_string();
        let timestamp = DateTime::parse_from_rfc3339(&captures["timestamp"])
            .map_err(|_| TollError::MalformedKey)?
            .with_timezone(&Utc);

        Ok(Self {
            toll_booth_id,
            timestamp,
        })
    }
}

/// Decodes an object key as delivered in change notifications, which are
/// form-url-encoded (`+` for spaces, `%XX` escapes).
pub fn decode_object_key(encoded: &str) -> Result<String, TollError> {
    let spaced = encoded.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| TollError::MalformedKey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn should_parse_booth_and_timestamp_from_key() {
        let key = TollObjectKey::parse("5/2023-01-01T12:00:00Z.jpg").unwrap();
        assert_eq!(key.toll_booth_id, "5");
        assert_eq!(
            key.timestamp,
            Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn should_convert_offset_timestamps_to_utc() {
        let key = TollObjectKey::parse("north-7/2023-06-01T14:30:00+02:00.png").unwrap();
        assert_eq!(key.toll_booth_id, "north-7");
        assert_eq!(
            key.timestamp,
            Utc.with_ymd_and_hms(2023, 6, 1, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn should_keep_fractional_seconds_before_extension() {
        let key = TollObjectKey::parse("5/2023-01-01T12:00:00.250Z.jpg").unwrap();
        assert_eq!(key.timestamp.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn should_reject_key_without_booth_segment() {
        assert!(matches!(
            TollObjectKey::parse("2023-01-01T12:00:00Z.jpg"),
            Err(TollError::MalformedKey)
        ));
    }

    #[test]
    fn should_reject_key_with_extra_segments() {
        assert!(matches!(
            TollObjectKey::parse("5/extra/2023-01-01T12:00:00Z.jpg"),
            Err(TollError::MalformedKey)
        ));
    }

    #[test]
    fn should_reject_key_with_invalid_timestamp() {
        assert!(matches!(
            TollObjectKey::parse("5/yesterday.jpg"),
            Err(TollError::MalformedKey)
        ));
    }

    #[test]
    fn should_reject_key_without_extension() {
        assert!(matches!(
            TollObjectKey::parse("5/2023-01-01T12:00:00Z"),
            Err(TollError::MalformedKey)
        ));
    }

    #[test]
    fn should_decode_percent_escapes_and_plus_signs() {
        assert_eq!(
            decode_object_key("5/2023-01-01T12%3A00%3A00Z.jpg").unwrap(),
            "5/2023-01-01T12:00:00Z.jpg"
        );
        assert_eq!(decode_object_key("booth+one/x.jpg").unwrap(), "booth one/x.jpg");
        assert_eq!(decode_object_key("a%2Bb/x.jpg").unwrap(), "a+b/x.jpg");
    }

    #[test]
    fn should_keep_ampersands_and_equals_signs_in_key() {
        assert_eq!(
            decode_object_key("a&&b=c/2023-01-01T12%3A00%3A00Z.jpg").unwrap(),
            "a&&b=c/2023-01-01T12:00:00Z.jpg"
        );
    }

    #[test]
    fn should_leave_plain_keys_untouched() {
        assert_eq!(
            decode_object_key("5/2023-01-01T12:00:00Z.jpg").unwrap(),
            "5/2023-01-01T12:00:00Z.jpg"
        );
    }

    #[test]
    fn should_reject_key_that_decodes_to_invalid_utf8() {
        assert!(matches!(
            decode_object_key("5/%FF%FE.jpg"),
            Err(TollError::MalformedKey)
        ));
    }

    #[test]
    fn should_parse_repeatedly_with_shared_pattern() {
        for _ in 0..3 {
            assert!(TollObjectKey::parse("5/2023-01-01T12:00:00Z.jpg").is_ok());
        }
    }
}
