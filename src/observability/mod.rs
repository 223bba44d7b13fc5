//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! resolver / driver / client
//!     → tracing events with structured fields
//!     → logging.rs subscriber (pretty or JSON, stderr)
//! ```
//!
//! Each invocation runs inside a span carrying its `invocation_id`.

pub mod logging;

pub use logging::{init_logging, LogFormat};
