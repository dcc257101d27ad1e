//! Roster lookup service
//!
//! Wraps a [`roster_core::SearchEngine`] in a bounded admission queue and a
//! TTL result cache, and exposes it over HTTP.
//!
//! ```text
//! HTTP handler -> SearchService::lookup -> ResultCache -> AdmissionQueue -> SearchEngine
//! ```

pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod queue;
pub mod service;

pub use app::build_service;
pub use config::Config;
pub use error::{ServerError, ServerResult};
pub use http::router;
pub use service::{HealthReport, LookupError, SearchService, ServiceConfig};
