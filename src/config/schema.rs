//! Parameter schema definitions.
//!
//! [`ModuleParams`] is the raw, all-optional shape read from an args file or
//! the command line. [`ModuleArgs`] is what validation produces from it and
//! what the rest of the crate consumes.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::cloud::Direction;
use crate::membership::PollPolicy;

/// Region used when none is supplied.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Requested membership of the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    /// Register the instance with the load balancers.
    Present,
    /// Deregister the instance from the load balancers.
    Absent,
}

impl DesiredState {
    pub fn direction(self) -> Direction {
        match self {
            DesiredState::Present => Direction::Register,
            DesiredState::Absent => Direction::Deregister,
        }
    }
}

/// Raw invocation parameters.
///
/// Unknown keys (such as the host's `_ansible_*` bookkeeping) are ignored.
#[derive(Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModuleParams {
    /// `present` or `absent`.
    pub state: Option<DesiredState>,

    /// Target instance identifier.
    pub instance_id: Option<String>,

    /// Provider region (default: `us-east-1`).
    pub region: Option<String>,

    /// Explicit load balancer names, as a list or a comma-separated string.
    #[serde(deserialize_with = "names")]
    pub ec2_elbs: Option<Vec<String>>,

    pub ec2_access_key: Option<String>,

    pub ec2_secret_key: Option<String>,

    /// Endpoint override for the load balancing API.
    pub ec2_url: Option<String>,

    /// Poll for convergence after each call (default: true).
    #[serde(deserialize_with = "flag")]
    pub wait: Option<bool>,

    /// Seconds to wait per load balancer; 0 waits forever (default: 0).
    #[serde(deserialize_with = "seconds")]
    pub wait_timeout: Option<u64>,
}

impl ModuleParams {
    /// Layer `overrides` on top of `self`; every value set in `overrides` wins.
    pub fn merge(self, overrides: ModuleParams) -> ModuleParams {
        ModuleParams {
            state: overrides.state.or(self.state),
            instance_id: overrides.instance_id.or(self.instance_id),
            region: overrides.region.or(self.region),
            ec2_elbs: overrides.ec2_elbs.or(self.ec2_elbs),
            ec2_access_key: overrides.ec2_access_key.or(self.ec2_access_key),
            ec2_secret_key: overrides.ec2_secret_key.or(self.ec2_secret_key),
            ec2_url: overrides.ec2_url.or(self.ec2_url),
            wait: overrides.wait.or(self.wait),
            wait_timeout: overrides.wait_timeout.or(self.wait_timeout),
        }
    }
}

impl fmt::Debug for ModuleParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleParams")
            .field("state", &self.state)
            .field("instance_id", &self.instance_id)
            .field("region", &self.region)
            .field("ec2_elbs", &self.ec2_elbs)
            .field("ec2_access_key", &self.ec2_access_key)
            .field("ec2_secret_key", &self.ec2_secret_key.as_ref().map(|_| "** redacted **"))
            .field("ec2_url", &self.ec2_url)
            .field("wait", &self.wait)
            .field("wait_timeout", &self.wait_timeout)
            .finish()
    }
}

/// Validated invocation arguments.
#[derive(Clone, PartialEq)]
pub struct ModuleArgs {
    pub state: DesiredState,
    pub instance_id: String,
    pub region: String,
    /// `None` selects reverse lookup by instance membership.
    pub ec2_elbs: Option<Vec<String>>,
    pub ec2_access_key: Option<String>,
    pub ec2_secret_key: Option<String>,
    pub ec2_url: Option<Url>,
    pub wait: bool,
    /// `None` waits without limit.
    pub wait_timeout: Option<Duration>,
}

impl ModuleArgs {
    /// Polling behaviour implied by `wait` / `wait_timeout`.
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            wait: self.wait,
            deadline: self.wait_timeout,
            ..PollPolicy::default()
        }
    }
}

impl fmt::Debug for ModuleArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleArgs")
            .field("state", &self.state)
            .field("instance_id", &self.instance_id)
            .field("region", &self.region)
            .field("ec2_elbs", &self.ec2_elbs)
            .field("ec2_access_key", &self.ec2_access_key)
            .field("ec2_secret_key", &self.ec2_secret_key.as_ref().map(|_| "** redacted **"))
            .field("ec2_url", &self.ec2_url.as_ref().map(Url::as_str))
            .field("wait", &self.wait)
            .field("wait_timeout", &self.wait_timeout)
            .finish()
    }
}

/// Split a comma-separated list of names, dropping blanks.
pub fn split_names(raw: &str) -> Vec<String> {
    clean_names(raw.split(','))
}

/// Trim load balancer names and drop blank ones.
pub fn clean_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref().trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

fn names<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Names {
        Joined(String),
        List(Vec<String>),
    }

    Ok(Option::<Names>::deserialize(deserializer)?.map(|names| match names {
        Names::Joined(raw) => split_names(&raw),
        Names::List(list) => clean_names(list),
    }))
}

fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Flag::Bool(b)) => Ok(Some(b)),
        Some(Flag::Text(text)) => match text.to_ascii_lowercase().as_str() {
            "yes" | "true" | "on" | "1" => Ok(Some(true)),
            "no" | "false" | "off" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean value '{}'",
                other
            ))),
        },
    }
}

fn seconds<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Number(u64),
        Text(String),
    }

    match Option::<Seconds>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Seconds::Number(n)) => Ok(Some(n)),
        Some(Seconds::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid number of seconds '{}'", text))),
    }
}
