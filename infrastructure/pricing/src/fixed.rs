use async_trait::async_trait;
use chrono::{DateTime, Utc};

use business::domain::toll::errors::TollError;
use business::domain::toll::services::PricingService;

/// Charges the same amount at every booth and hour.
pub struct FixedTollPricing {
    cost: f64,
}

impl FixedTollPricing {
    pub const DEFAULT_COST: f64 = 2.50;

    pub fn new(cost: f64) -> Self {
        Self { cost }
    }
}

impl Default for FixedTollPricing {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}

#[async_trait]
impl PricingService for FixedTollPricing {
    async fn toll_cost(
        &self,
        toll_booth_id: &str,
        _timestamp: DateTime<Utc>,
    ) -> Result<f64, TollError> {
        if !self.cost.is_finite() || self.cost < 0.0 {
            tracing::error!(
                "refusing to price booth {} with cost {}",
                toll_booth_id,
                self.cost
            );
            return Err(TollError::PricingFailed);
        }
        Ok(self.cost)
    }
}
