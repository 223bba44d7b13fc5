//! Load balancer membership subsystem.
//!
//! # Data Flow
//! ```text
//! instance_id (+ optional ec2_elbs)
//!     → resolver.rs (explicit names, or reverse lookup by membership)
//!     → ResolvedTargets (ordered, immutable)
//!     → driver.rs, for each target in order:
//!         register/deregister → poll.rs policy → poll health until converged
//! ```
//!
//! # Design Decisions
//! - Strictly sequential; no overlap between load balancers
//! - The provider session is borrowed, never owned or global
//! - Unbounded polling by default, deadline opt-in

pub mod driver;
pub mod poll;
pub mod resolver;

pub use driver::ConvergenceDriver;
pub use poll::{PollPolicy, DEFAULT_POLL_INTERVAL};
pub use resolver::{resolve, ResolvedTargets};
