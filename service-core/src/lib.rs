//! service-core: Shared infrastructure for the document intelligence front-end.
pub mod error;
pub mod middleware;
pub mod observability;
