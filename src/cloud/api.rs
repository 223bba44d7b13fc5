//! The operations the membership logic needs from the load balancing API.

use async_trait::async_trait;

use crate::cloud::types::{ElbResult, LoadBalancer, MembershipState};

/// An authenticated session against the load balancing API for one region.
///
/// Implemented by [`crate::cloud::ElbClient`] for the real provider and by
/// in-memory fakes in tests.
#[async_trait]
pub trait ElbApi: Send + Sync {
    /// Every load balancer visible in the region, in provider order.
    async fn describe_load_balancers(&self) -> ElbResult<Vec<LoadBalancer>>;

    /// Add the instance to the load balancer's membership.
    async fn register_instance(&self, load_balancer: &str, instance_id: &str) -> ElbResult<()>;

    /// Remove the instance from the load balancer's membership.
    async fn deregister_instance(&self, load_balancer: &str, instance_id: &str) -> ElbResult<()>;

    /// The health state the load balancer currently reports for the instance.
    async fn instance_state(
        &self,
        load_balancer: &str,
        instance_id: &str,
    ) -> ElbResult<MembershipState>;
}
