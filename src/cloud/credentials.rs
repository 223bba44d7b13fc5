//! Credential resolution for the provider session.
//!
//! # Security
//! - Secrets are never logged or serialized
//! - `Debug` output redacts the secret key and session token
//!
//! # Fallback order
//! 1. Explicit `ec2_access_key` / `ec2_secret_key` parameters
//! 2. Environment variables (first match wins, see [`ACCESS_KEY_ENV_VARS`]),
//!    together with a session token from [`SESSION_TOKEN_ENV_VARS`]
//! 3. Provider default discovery (profile files, instance metadata, ...)

use std::fmt;

use crate::cloud::types::{ElbError, ElbResult};

/// Environment variables consulted for the access key, in order.
pub const ACCESS_KEY_ENV_VARS: &[&str] = &["AWS_ACCESS_KEY_ID", "AWS_ACCESS_KEY", "EC2_ACCESS_KEY"];

/// Environment variables consulted for the secret key, in order.
pub const SECRET_KEY_ENV_VARS: &[&str] = &["AWS_SECRET_ACCESS_KEY", "AWS_SECRET_KEY", "EC2_SECRET_KEY"];

/// Environment variables consulted for a temporary session token, in order.
pub const SESSION_TOKEN_ENV_VARS: &[&str] = &["AWS_SESSION_TOKEN", "AWS_SECURITY_TOKEN"];

/// A static access/secret key pair, optionally temporary.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key: String,
    pub secret_key: String,
    /// Only taken from the environment, and only when the key pair was too.
    pub session_token: Option<String>,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "** redacted **"),
            )
            .finish()
    }
}

/// Resolve credentials from explicit values, falling back to the process environment.
///
/// Returns `Ok(None)` when neither half is available anywhere, meaning the
/// provider's default discovery chain should be used.
pub fn resolve(
    access_key: Option<&str>,
    secret_key: Option<&str>,
) -> ElbResult<Option<StaticCredentials>> {
    resolve_with(access_key, secret_key, |name| std::env::var(name).ok())
}

/// Same as [`resolve`], with an injectable environment lookup.
pub fn resolve_with<F>(
    access_key: Option<&str>,
    secret_key: Option<&str>,
    lookup: F,
) -> ElbResult<Option<StaticCredentials>>
where
    F: Fn(&str) -> Option<String>,
{
    let explicit = non_empty(access_key).is_some() || non_empty(secret_key).is_some();
    let access = explicit_or_env(access_key, ACCESS_KEY_ENV_VARS, &lookup);
    let secret = explicit_or_env(secret_key, SECRET_KEY_ENV_VARS, &lookup);

    match (access, secret) {
        (Some(access_key), Some(secret_key)) => {
            // A token in the environment belongs to the environment's key pair.
            let session_token = if explicit {
                None
            } else {
                first_env(SESSION_TOKEN_ENV_VARS, &lookup)
            };
            Ok(Some(StaticCredentials {
                access_key,
                secret_key,
                session_token,
            }))
        }
        (None, None) => {
            tracing::debug!("No static credentials supplied, using provider default chain");
            Ok(None)
        }
        (Some(_), None) => Err(ElbError::Authentication(
            "access key supplied without a secret key".to_string(),
        )),
        (None, Some(_)) => Err(ElbError::Authentication(
            "secret key supplied without an access key".to_string(),
        )),
    }
}

fn explicit_or_env<F>(explicit: Option<&str>, vars: &[&str], lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match non_empty(explicit) {
        Some(value) => Some(value.to_string()),
        None => first_env(vars, lookup),
    }
}

fn first_env<F>(vars: &[&str], lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    vars.iter()
        .filter_map(|&name| lookup(name))
        .find(|value| !value.is_empty())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
