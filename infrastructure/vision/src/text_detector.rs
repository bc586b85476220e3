use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use business::domain::toll::errors::TollError;
use business::domain::toll::services::{
    DetectionFilter, DetectionType, TextDetection, TextDetectionService,
};
use business::domain::toll::value_objects::ImageReference;

use crate::client::VisionClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectTextRequest<'a> {
    image: ImageLocation<'a>,
    filters: Filters,
}

#[derive(Debug, Serialize)]
struct ImageLocation<'a> {
    bucket: &'a str,
    key: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Filters {
    min_confidence: f32,
    min_bounding_box_width: f32,
    region_of_interest: Region,
}

#[derive(Debug, Serialize)]
struct Region {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

#[derive(Debug, Deserialize)]
struct DetectTextResponse {
    #[serde(default)]
    detections: Vec<Detection>,
}

#[derive(Debug, Deserialize)]
struct Detection {
    text: String,
    confidence: f32,
    #[serde(rename = "type")]
    detection_type: String,
}

/// Text detection over an HTTP service that reads images straight from
/// object storage.
pub struct TextDetectorHttp {
    client: VisionClient,
}

impl TextDetectorHttp {
    pub fn new(client: VisionClient) -> Self {
        Self { client }
    }

    fn build_request<'a>(image: &'a ImageReference, filter: &DetectionFilter) -> DetectTextRequest<'a> {
        DetectTextRequest {
            image: ImageLocation {
                bucket: &image.bucket,
                key: &image.key,
            },
            filters: Filters {
                min_confidence: filter.min_confidence,
                min_bounding_box_width: filter.min_bounding_box_width,
                region_of_interest: Region {
                    left: filter.region_of_interest.left,
                    top: filter.region_of_interest.top,
                    width: filter.region_of_interest.width,
                    height: filter.region_of_interest.height,
                },
            },
        }
    }

    /// Unknown detection types are dropped rather than failing the image.
    fn parse_response(body: &str) -> Result<Vec<TextDetection>, TollError> {
        let parsed: DetectTextResponse =
            serde_json::from_str(body).map_err(|_| TollError::DetectionFailed)?;

        Ok(parsed
            .detections
            .into_iter()
            .filter_map(|d| {
                let detection_type = d.detection_type.parse::<DetectionType>().ok()?;
                Some(TextDetection {
                    text: d.text,
                    confidence: d.confidence,
                    detection_type,
                })
            })
            .collect())
    }
}

#[async_trait]
impl TextDetectionService for TextDetectorHttp {
    async fn detect_text(
        &self,
        image: &ImageReference,
        filter: &DetectionFilter,
    ) -> Result<Vec<TextDetection>, TollError> {
        let mut request = self
            .client
            .client
            .post(self.client.detect_text_url())
            .json(&Self::build_request(image, filter));
        if let Some(auth) = self.client.auth_header() {
            request = request.header("Authorization", auth);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("text detection request for {} failed: {}", image, e);
            TollError::DetectionFailed
        })?;

        if !response.status().is_success() {
            tracing::error!(
                "text detection for {} returned {}",
                image,
                response.status()
            );
            return Err(TollError::DetectionFailed);
        }

        let body = response
            .text()
            .await
            .map_err(|_| TollError::DetectionFailed)?;
        let detections = Self::parse_response(&body)?;

        if detections.is_empty() {
            tracing::warn!("no text detected in {}", image);
        }
        Ok(detections)
    }
}
