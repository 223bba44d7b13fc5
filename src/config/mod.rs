//! Invocation parameters.
//!
//! # Data Flow
//! ```text
//! args file (JSON or TOML)          command-line flags
//!     → loader.rs (parse)               │
//!     → ModuleParams ◀──── merge ───────┘
//!     → validation.rs (required params, defaults, endpoint)
//!     → ModuleArgs (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Raw and validated shapes are separate types
//! - Flags override the args file field by field
//! - Validation reports every problem at once and never touches the network

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::{clean_names, DesiredState, ModuleArgs, ModuleParams, DEFAULT_REGION};
pub use validation::ValidationError;
