pub mod dashboard;
pub mod metrics;
