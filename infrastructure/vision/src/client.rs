use std::time::Duration;

use reqwest::Client;

/// Shared HTTP client configuration for the text-detection service.
pub struct VisionClient {
    pub client: Client,
    pub api_key: Option<String>,
    pub base_url: String,
}

impl VisionClient {
    pub fn new(base_url: String, api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds the authorization header value, if a key is configured.
    pub fn auth_header(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| format!("Bearer {}", key))
    }

    /// Returns the text detection endpoint URL.
    pub fn detect_text_url(&self) -> String {
        format!("{}/detect-text", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_endpoint_without_double_slash() {
        let client = VisionClient::new(
            "http://vision.local/".to_string(),
            None,
            Duration::from_secs(5),
        );
        assert_eq!(client.detect_text_url(), "http://vision.local/detect-text");
        assert_eq!(client.auth_header(), None);
    }

    #[test]
    fn should_build_bearer_header_when_key_present() {
        let client = VisionClient::new(
            "http://vision.local".to_string(),
            Some("secret".to_string()),
            Duration::from_secs(5),
        );
        assert_eq!(client.auth_header().as_deref(), Some("Bearer secret"));
    }
}
