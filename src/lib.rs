pub mod analysis;
pub mod app_state;
pub mod config;
pub mod health;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod scoring;
pub mod url_trust;
