//! Elastic Load Balancing client over the AWS SDK.
//!
//! # Responsibilities
//! - Build a regional session from static or discovered credentials
//! - Fail fast with an authentication error before any load balancer call
//! - Translate SDK shapes into [`LoadBalancer`] / [`MembershipState`]
//! - Tag every SDK failure with the operation that produced it

use async_trait::async_trait;
use aws_config::{BehaviorVersion, ConfigLoader, Region};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_elasticloadbalancing::config::Credentials;
use aws_sdk_elasticloadbalancing::error::DisplayErrorContext;
use aws_sdk_elasticloadbalancing::types::Instance;
use aws_sdk_elasticloadbalancing::Client;
use url::Url;

use crate::cloud::api::ElbApi;
use crate::cloud::credentials::StaticCredentials;
use crate::cloud::types::{ElbError, ElbResult, LoadBalancer, MembershipState};

const CREDENTIALS_PROVIDER_NAME: &str = "ec2-elb-static";

/// Classic ELB session for a single region.
#[derive(Debug, Clone)]
pub struct ElbClient {
    client: Client,
    region: String,
}

impl ElbClient {
    /// Open an authenticated session.
    ///
    /// # Arguments
    /// * `region` - Provider region, e.g. `us-east-1`
    /// * `credentials` - Static key pair, or `None` for the default discovery chain
    /// * `endpoint` - Optional endpoint override
    ///
    /// # Returns
    /// A ready client, or [`ElbError::Authentication`] if no credentials can be loaded
    pub async fn connect(
        region: &str,
        credentials: Option<StaticCredentials>,
        endpoint: Option<&Url>,
    ) -> ElbResult<Self> {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));

        if let Some(creds) = credentials {
            loader = loader.credentials_provider(Credentials::new(
                creds.access_key,
                creds.secret_key,
                creds.session_token,
                None,
                CREDENTIALS_PROVIDER_NAME,
            ));
        }

        if let Some(url) = endpoint {
            loader = loader.endpoint_url(url.as_str());
        }

        let client = Self::from_loader(loader, region).await?;

        tracing::info!(
            region = %region,
            endpoint = endpoint.map(Url::as_str).unwrap_or("default"),
            "Load balancing session established"
        );

        Ok(client)
    }

    /// Load the SDK configuration and prove credentials are available.
    async fn from_loader(loader: ConfigLoader, region: &str) -> ElbResult<Self> {
        let sdk_config = loader.load().await;

        let provider = sdk_config.credentials_provider().ok_or_else(|| {
            ElbError::Authentication("no credentials provider could be configured".to_string())
        })?;
        provider
            .provide_credentials()
            .await
            .map_err(|e| ElbError::Authentication(DisplayErrorContext(e).to_string()))?;

        Ok(Self::from_sdk_client(Client::new(&sdk_config), region))
    }

    fn from_sdk_client(client: Client, region: &str) -> Self {
        Self {
            client,
            region: region.to_string(),
        }
    }

    fn instance(instance_id: &str) -> Instance {
        Instance::builder().instance_id(instance_id).build()
    }
}

#[async_trait]
impl ElbApi for ElbClient {
    async fn describe_load_balancers(&self) -> ElbResult<Vec<LoadBalancer>> {
        const OPERATION: &str = "DescribeLoadBalancers";

        let mut load_balancers = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let page = self
                .client
                .describe_load_balancers()
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|e| ElbError::provider(OPERATION, DisplayErrorContext(e).to_string()))?;

            for description in page.load_balancer_descriptions.unwrap_or_default() {
                let Some(name) = description.load_balancer_name else {
                    tracing::warn!("Skipping load balancer without a name");
                    continue;
                };
                let instances = description
                    .instances
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|instance| instance.instance_id)
                    .collect();
                load_balancers.push(LoadBalancer::new(name, instances));
            }

            match page.next_marker {
                Some(next) if !next.is_empty() => marker = Some(next),
                _ => break,
            }
        }

        tracing::debug!(
            region = %self.region,
            count = load_balancers.len(),
            "Enumerated load balancers"
        );
        Ok(load_balancers)
    }

    async fn register_instance(&self, load_balancer: &str, instance_id: &str) -> ElbResult<()> {
        self.client
            .register_instances_with_load_balancer()
            .load_balancer_name(load_balancer)
            .instances(Self::instance(instance_id))
            .send()
            .await
            .map_err(|e| {
                ElbError::provider(
                    "RegisterInstancesWithLoadBalancer",
                    DisplayErrorContext(e).to_string(),
                )
            })?;
        Ok(())
    }

    async fn deregister_instance(&self, load_balancer: &str, instance_id: &str) -> ElbResult<()> {
        self.client
            .deregister_instances_from_load_balancer()
            .load_balancer_name(load_balancer)
            .instances(Self::instance(instance_id))
            .send()
            .await
            .map_err(|e| {
                ElbError::provider(
                    "DeregisterInstancesFromLoadBalancer",
                    DisplayErrorContext(e).to_string(),
                )
            })?;
        Ok(())
    }

    async fn instance_state(
        &self,
        load_balancer: &str,
        instance_id: &str,
    ) -> ElbResult<MembershipState> {
        let output = self
            .client
            .describe_instance_health()
            .load_balancer_name(load_balancer)
            .instances(Self::instance(instance_id))
            .send()
            .await
            .map_err(|e| {
                ElbError::provider("DescribeInstanceHealth", DisplayErrorContext(e).to_string())
            })?;

        // The provider answers for exactly the instances asked about; a missing
        // entry is reported as Unknown rather than an error.
        let state = output
            .instance_states
            .unwrap_or_default()
            .into_iter()
            .find(|s| s.instance_id.as_deref().map_or(true, |id| id == instance_id))
            .and_then(|s| s.state)
            .map(|s| MembershipState::from(s.as_str()))
            .unwrap_or_else(|| MembershipState::Other("Unknown".to_string()));

        Ok(state)
    }
}
