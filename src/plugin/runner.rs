//! Invocation orchestration.
//!
//! # Responsibilities
//! - Resolve credentials and open the provider session
//! - Resolve targets, then drive each to the requested membership
//! - Report `changed` and the list of load balancers acted on

use thiserror::Error;

use crate::cloud::{credentials, ElbApi, ElbClient, ElbError, ElbResult};
use crate::config::{ConfigError, ModuleArgs};
use crate::membership::{resolve, ConvergenceDriver};
use crate::plugin::output::{ModuleFailure, ModuleOutcome};

/// Anything that ends an invocation unsuccessfully.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Elb(#[from] ElbError),
}

impl From<&PluginError> for ModuleFailure {
    fn from(err: &PluginError) -> Self {
        ModuleFailure::new(err.to_string())
    }
}

/// Run one invocation against an already-open session.
pub async fn run<A>(api: &A, args: &ModuleArgs) -> ElbResult<ModuleOutcome>
where
    A: ElbApi + ?Sized,
{
    let targets = resolve(api, &args.instance_id, args.ec2_elbs.as_deref()).await?;

    if targets.is_empty() {
        tracing::info!(instance_id = %args.instance_id, "No load balancers to update");
    }

    ConvergenceDriver::new(api, args.poll_policy())
        .apply(&targets, args.state.direction(), &args.instance_id)
        .await?;

    Ok(ModuleOutcome::from_targets(&targets))
}

/// Open a session for `args` and run the invocation.
///
/// The session lives only for the duration of this call.
pub async fn invoke(args: &ModuleArgs) -> Result<ModuleOutcome, PluginError> {
    let credentials =
        credentials::resolve(args.ec2_access_key.as_deref(), args.ec2_secret_key.as_deref())?;
    let client = ElbClient::connect(&args.region, credentials, args.ec2_url.as_ref()).await?;

    Ok(run(&client, args).await?)
}
