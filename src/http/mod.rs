//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, request span)
//!     → external.rs (query validation → source::DataSource::collect)
//!     → response.rs (DataError → status + {"detail": ...})
//!     → Send to client
//! ```

pub mod external;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::{ApiError, ErrorBody};
pub use server::{AppState, HttpServer, EXTERNAL_DATA_PATH};
