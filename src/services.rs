pub mod calculator;
pub mod classifier;
pub mod dashboard_service;
pub mod render;
pub mod selection;
pub mod view_service;
