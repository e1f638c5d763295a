// Application layer - Reading generation and state ownership
pub mod dashboard_service;
pub mod reading_source;
pub mod ticker;
