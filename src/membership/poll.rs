//! Convergence polling policy.

use std::time::Duration;

/// Delay between health queries while an instance has not converged.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How the driver waits for a load balancer to report the expected state.
///
/// The default polls every second with no deadline, so a load balancer that
/// never converges blocks forever. Callers wanting bounded latency set
/// `deadline` or impose an external timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Fixed sleep between queries. No backoff.
    pub interval: Duration,
    /// Maximum time to wait per load balancer; `None` waits forever.
    pub deadline: Option<Duration>,
    /// When false, calls are issued without waiting for convergence.
    pub wait: bool,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            deadline: None,
            wait: true,
        }
    }
}

impl PollPolicy {
    /// Whether `elapsed` has used up the deadline, if there is one.
    pub fn expired(&self, elapsed: Duration) -> bool {
        self.deadline.is_some_and(|deadline| elapsed >= deadline)
    }
}
