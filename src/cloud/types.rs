//! Load balancer types and error definitions.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Reported health of one instance behind one load balancer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MembershipState {
    /// Instance is registered and passing health checks.
    InService,
    /// Instance is deregistered or failing health checks.
    OutOfService,
    /// Any other provider state (e.g. `Unknown`). Never a terminal state.
    Other(String),
}

impl MembershipState {
    pub fn as_str(&self) -> &str {
        match self {
            MembershipState::InService => "InService",
            MembershipState::OutOfService => "OutOfService",
            MembershipState::Other(s) => s,
        }
    }
}

impl From<&str> for MembershipState {
    fn from(state: &str) -> Self {
        match state {
            "InService" => MembershipState::InService,
            "OutOfService" => MembershipState::OutOfService,
            other => MembershipState::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MembershipState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which way an instance's membership is being moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Register,
    Deregister,
}

impl Direction {
    /// The state the load balancer must report before the instance counts as converged.
    pub fn expected_state(self) -> MembershipState {
        match self {
            Direction::Register => MembershipState::InService,
            Direction::Deregister => MembershipState::OutOfService,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Register => f.write_str("register"),
            Direction::Deregister => f.write_str("deregister"),
        }
    }
}

/// A load balancer as enumerated by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadBalancer {
    /// Unique name within the region.
    pub name: String,
    /// Member instance identifiers, in provider order.
    pub instances: Vec<String>,
}

impl LoadBalancer {
    pub fn new(name: impl Into<String>, instances: Vec<String>) -> Self {
        Self {
            name: name.into(),
            instances,
        }
    }

    /// Whether the given instance is currently a member.
    pub fn has_member(&self, instance_id: &str) -> bool {
        self.instances.iter().any(|id| id == instance_id)
    }
}

/// Errors that can occur while talking to the load balancing API.
#[derive(Debug, Error)]
pub enum ElbError {
    /// No usable credentials could be established for the session.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A provider call failed.
    #[error("{operation} failed: {message}")]
    Provider {
        operation: &'static str,
        message: String,
    },

    /// The load balancer did not report the expected state before the deadline.
    #[error(
        "Instance {instance_id} did not reach {expected} on {load_balancer} within {}s",
        .waited.as_secs()
    )]
    ConvergenceTimeout {
        load_balancer: String,
        instance_id: String,
        expected: MembershipState,
        waited: Duration,
    },
}

impl ElbError {
    pub fn provider(operation: &'static str, message: impl Into<String>) -> Self {
        ElbError::Provider {
            operation,
            message: message.into(),
        }
    }
}

/// Result type for load balancer operations.
pub type ElbResult<T> = Result<T, ElbError>;
