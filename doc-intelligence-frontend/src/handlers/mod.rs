pub mod app;
pub mod documents;
pub mod metrics;
pub mod upload;
