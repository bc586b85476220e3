use pricing::fixed::FixedTollPricing;

use super::worker_config::parse_or;

/// Environment variables:
/// - TOLL_BASE_COST: amount charged per crossing (default: 2.50)
pub struct PricingConfig {
    pub base_cost: f64,
}

impl PricingConfig {
    pub fn from_env() -> Self {
        Self {
            base_cost: parse_or("TOLL_BASE_COST", FixedTollPricing::DEFAULT_COST),
        }
    }
}
