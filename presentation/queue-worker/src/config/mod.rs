pub mod database_config;
pub mod detection_config;
pub mod pricing_config;
pub mod worker_config;
