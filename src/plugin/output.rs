//! Result documents written to stdout.

use serde::Serialize;

use crate::membership::ResolvedTargets;

/// Facts returned to the caller for reuse by a later invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facts {
    /// Load balancers acted on, in processing order.
    pub ec2_elbs: Vec<String>,
}

/// Successful invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleOutcome {
    /// True iff at least one load balancer was targeted.
    pub changed: bool,
    pub ansible_facts: Facts,
}

impl ModuleOutcome {
    pub fn from_targets(targets: &ResolvedTargets) -> Self {
        Self {
            changed: !targets.is_empty(),
            ansible_facts: Facts {
                ec2_elbs: targets.names(),
            },
        }
    }
}

/// Failed invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleFailure {
    pub failed: bool,
    pub msg: String,
}

impl ModuleFailure {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            failed: true,
            msg: msg.into(),
        }
    }
}
