//! Membership convergence driver.
//!
//! # States (per load balancer)
//! ```text
//! Pending → (register/deregister issued) → Polling → (state matches) → Converged
//! ```
//!
//! # Design Decisions
//! - Load balancers are processed one at a time, in resolved order
//! - The first failure stops the run; earlier load balancers keep their new
//!   membership and later ones are never touched. There is no rollback.
//! - Time comes from tokio's clock so tests can run it paused

use tokio::time::{sleep, Instant};

use crate::cloud::{Direction, ElbApi, ElbError, ElbResult, MembershipState};
use crate::membership::poll::PollPolicy;
use crate::membership::resolver::ResolvedTargets;

/// Drives each target load balancer to the expected membership state.
pub struct ConvergenceDriver<'a, A: ?Sized> {
    api: &'a A,
    policy: PollPolicy,
}

impl<'a, A> ConvergenceDriver<'a, A>
where
    A: ElbApi + ?Sized,
{
    pub fn new(api: &'a A, policy: PollPolicy) -> Self {
        Self { api, policy }
    }

    /// Register or deregister the instance on every target, in order.
    pub async fn apply(
        &self,
        targets: &ResolvedTargets,
        direction: Direction,
        instance_id: &str,
    ) -> ElbResult<()> {
        let expected = direction.expected_state();

        for lb in targets {
            tracing::info!(
                load_balancer = %lb.name,
                instance_id = %instance_id,
                action = %direction,
                "Updating load balancer membership"
            );

            match direction {
                Direction::Register => self.api.register_instance(&lb.name, instance_id).await?,
                Direction::Deregister => self.api.deregister_instance(&lb.name, instance_id).await?,
            }

            if !self.policy.wait {
                tracing::debug!(load_balancer = %lb.name, "Not waiting for convergence");
                continue;
            }

            let polls = self.wait_for_state(&lb.name, instance_id, &expected).await?;
            tracing::info!(
                load_balancer = %lb.name,
                instance_id = %instance_id,
                state = %expected,
                polls,
                "Membership converged"
            );
        }

        Ok(())
    }

    /// Poll the instance's health on one load balancer until it reports `expected`.
    ///
    /// Returns the number of health queries made.
    pub async fn wait_for_state(
        &self,
        load_balancer: &str,
        instance_id: &str,
        expected: &MembershipState,
    ) -> ElbResult<u32> {
        let started = Instant::now();
        let mut polls = 0u32;

        loop {
            let state = self.api.instance_state(load_balancer, instance_id).await?;
            polls += 1;

            if state == *expected {
                return Ok(polls);
            }

            let waited = started.elapsed();
            if self.policy.expired(waited) {
                tracing::warn!(
                    load_balancer = %load_balancer,
                    instance_id = %instance_id,
                    state = %state,
                    expected = %expected,
                    waited_secs = waited.as_secs(),
                    "Gave up waiting for membership to converge"
                );
                return Err(ElbError::ConvergenceTimeout {
                    load_balancer: load_balancer.to_string(),
                    instance_id: instance_id.to_string(),
                    expected: expected.clone(),
                    waited,
                });
            }

            tracing::debug!(
                load_balancer = %load_balancer,
                state = %state,
                expected = %expected,
                attempt = polls,
                "Waiting for membership state"
            );
            sleep(self.policy.interval).await;
        }
    }
}
