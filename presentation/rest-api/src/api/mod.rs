pub mod error;
pub mod health;
pub mod payment;
pub mod tags;
pub mod toll;
