use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::TollError;
use super::value_objects::ImageReference;

/// Granularity of a text detection.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionType {
    Line,
    Word,
}

impl std::str::FromStr for DetectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LINE" => Ok(DetectionType::Line),
            "WORD" => Ok(DetectionType::Word),
            _ => Err(format!("Invalid detection type: {}", s)),
        }
    }
}

/// A piece of text found in an image.
#[derive(Debug, Clone)]
pub struct TextDetection {
    pub text: String,
    pub confidence: f32,
    pub detection_type: DetectionType,
}

/// Box in image-relative coordinates (0.0 to 1.0).
#[derive(Debug, Clone, PartialEq)]
pub struct RegionOfInterest {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Filters applied by the text-detection service before returning results.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionFilter {
    pub min_confidence: f32,
    pub min_bounding_box_width: f32,
    pub region_of_interest: RegionOfInterest,
}

impl Default for DetectionFilter {
    /// Middle band of the frame, where plates sit for the roadside cameras.
    fn default() -> Self {
        Self {
            min_confidence: 90.0,
            min_bounding_box_width: 0.5,
            region_of_interest: RegionOfInterest {
                left: 0.0,
                top: 0.25,
                width: 1.0,
                height: 0.6,
            },
        }
    }
}

/// Service port for optical text detection over stored images.
#[async_trait]
pub trait TextDetectionService: Send + Sync {
    async fn detect_text(
        &self,
        image: &ImageReference,
        filter: &DetectionFilter,
    ) -> Result<Vec<TextDetection>, TollError>;
}

/// Picks the highest-confidence line detection as the plate text.
///
/// Word detections are ignored. Returns `None` when no line was detected.
pub fn select_plate_text(detections: &[TextDetection]) -> Option<&str> {
    detections
        .iter()
        .filter(|d| d.detection_type == DetectionType::Line)
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        .map(|d| d.text.as_str())
}

/// Service port for toll pricing.
#[async_trait]
pub trait PricingService: Send + Sync {
    async fn toll_cost(
        &self,
        toll_booth_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<f64, TollError>;
}
