pub mod common;
pub mod config;
pub mod dashboards;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;
