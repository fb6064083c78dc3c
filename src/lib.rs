//! External Data Service Library
//!
//! Serves a directory of training artifacts (metrics log, prediction table,
//! probe document) named by an environment variable as one JSON document.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod source;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use source::{DataError, DataSource, ExternalData};
