//! Register or deregister an EC2 instance with classic Elastic Load Balancers.

pub mod cloud;
pub mod config;
pub mod membership;
pub mod observability;
pub mod plugin;

pub use cloud::{ElbApi, ElbClient, ElbError};
pub use config::ModuleArgs;
pub use plugin::{ModuleFailure, ModuleOutcome};
