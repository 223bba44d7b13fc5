//! Parameter validation.
//!
//! # Responsibilities
//! - Enforce required parameters (`state`, `instance_id`)
//! - Reject registration without explicit load balancer names
//! - Parse the endpoint override
//! - Apply defaults (`region`, `wait`, `wait_timeout`)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Runs before any provider contact

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::schema::{DesiredState, ModuleArgs, ModuleParams, DEFAULT_REGION};

/// A single semantic problem with the supplied parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("region must not be empty")]
    EmptyRegion,

    #[error("ELBs are required for registration: supply ec2_elbs when state=present")]
    LoadBalancersRequired,

    #[error("invalid ec2_url '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

/// Validate raw parameters and produce the arguments the plugin runs with.
pub fn validate_params(params: ModuleParams) -> Result<ModuleArgs, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if params.state.is_none() {
        errors.push(ValidationError::MissingParameter("state"));
    }

    let instance_id = params
        .instance_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());
    if instance_id.is_none() {
        errors.push(ValidationError::MissingParameter("instance_id"));
    }

    let region = params
        .region
        .map(|r| r.trim().to_string())
        .unwrap_or_else(|| DEFAULT_REGION.to_string());
    if region.is_empty() {
        errors.push(ValidationError::EmptyRegion);
    }

    // An empty list means the same as no list: discover by membership.
    let ec2_elbs = params.ec2_elbs.filter(|names| !names.is_empty());
    if params.state == Some(DesiredState::Present) && ec2_elbs.is_none() {
        errors.push(ValidationError::LoadBalancersRequired);
    }

    let ec2_url = match params.ec2_url.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                errors.push(ValidationError::InvalidEndpoint {
                    url: raw.to_string(),
                    reason: e.to_string(),
                });
                None
            }
        },
    };

    match (params.state, instance_id) {
        (Some(state), Some(instance_id)) if errors.is_empty() => Ok(ModuleArgs {
            state,
            instance_id,
            region,
            ec2_elbs,
            ec2_access_key: params.ec2_access_key,
            ec2_secret_key: params.ec2_secret_key,
            ec2_url,
            wait: params.wait.unwrap_or(true),
            wait_timeout: params
                .wait_timeout
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }),
        _ => Err(errors),
    }
}
