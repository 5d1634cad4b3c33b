pub mod analysis;
pub mod app_service;
pub mod orchestrator;
pub mod replacement;
