//! Plugin entry points and result contract.
//!
//! # Data Flow
//! ```text
//! ModuleArgs
//!     → runner.rs (credentials → session → resolve → converge)
//!     → output.rs
//!         success: {"changed": bool, "ansible_facts": {"ec2_elbs": [...]}}
//!         failure: {"failed": true, "msg": "..."}
//! ```

pub mod output;
pub mod runner;

pub use output::{Facts, ModuleFailure, ModuleOutcome};
pub use runner::{invoke, run, PluginError};
