//! Load balancing provider integration.
//!
//! # Data Flow
//! ```text
//! Parameters / environment (access key, secret key)
//!     → credentials.rs (explicit → env → default chain)
//!     → client.rs (regional session, authentication check)
//!     → api.rs (ElbApi: enumerate, register, deregister, health)
//! ```
//!
//! # Security Constraints
//! - Secret keys never logged
//! - Authentication failures are fatal and reported with the provider's text

pub mod api;
pub mod client;
pub mod credentials;
pub mod types;

pub use api::ElbApi;
pub use client::ElbClient;
pub use credentials::StaticCredentials;
pub use types::{Direction, ElbError, ElbResult, LoadBalancer, MembershipState};
