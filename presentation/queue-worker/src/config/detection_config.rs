use std::time::Duration;

use business::domain::toll::services::{DetectionFilter, RegionOfInterest};

use super::worker_config::parse_or;

/// Text detection endpoint and the filter applied to its results
///
/// Environment variables:
/// - TEXT_DETECTION_URL: base URL of the detection service (required)
/// - TEXT_DETECTION_API_KEY: bearer token (optional)
/// - TEXT_DETECTION_TIMEOUT_SECS (default: 30)
/// - DETECTION_MIN_CONFIDENCE (default: 90)
/// - DETECTION_MIN_BOX_WIDTH (default: 0.5)
/// - DETECTION_ROI_LEFT / TOP / WIDTH / HEIGHT (default: 0 / 0.25 / 1.0 / 0.6)
pub struct DetectionConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub filter: DetectionFilter,
}

impl DetectionConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var("TEXT_DETECTION_URL")
            .map_err(|_| anyhow::anyhow!("TEXT_DETECTION_URL must be set"))?;
        let api_key = std::env::var("TEXT_DETECTION_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let defaults = DetectionFilter::default();
        let roi = defaults.region_of_interest;
        let filter = DetectionFilter {
            min_confidence: parse_or("DETECTION_MIN_CONFIDENCE", defaults.min_confidence),
            min_bounding_box_width: parse_or(
                "DETECTION_MIN_BOX_WIDTH",
                defaults.min_bounding_box_width,
            ),
            region_of_interest: RegionOfInterest {
                left: parse_or("DETECTION_ROI_LEFT", roi.left),
                top: parse_or("DETECTION_ROI_TOP", roi.top),
                width: parse_or("DETECTION_ROI_WIDTH", roi.width),
                height: parse_or("DETECTION_ROI_HEIGHT", roi.height),
            },
        };

        Ok(Self {
            base_url,
            api_key,
            timeout: Duration::from_secs(parse_or("TEXT_DETECTION_TIMEOUT_SECS", 30)),
            filter,
        })
    }
}
