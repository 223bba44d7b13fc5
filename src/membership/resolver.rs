//! Instance-to-load-balancer resolution.
//!
//! # Modes
//! - Explicit: keep the region's load balancers whose names were requested,
//!   sorted by name. Requested names that do not exist are dropped.
//! - Reverse lookup: keep every load balancer that currently lists the
//!   instance as a member, in provider order.
//!
//! Registration needs the explicit mode since the instance is not yet a
//! member anywhere; deregistration can discover its memberships.

use std::collections::HashSet;

use crate::cloud::{ElbApi, ElbResult, LoadBalancer};

/// The load balancers one invocation acts on. Fixed once resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTargets {
    load_balancers: Vec<LoadBalancer>,
}

impl ResolvedTargets {
    pub fn is_empty(&self) -> bool {
        self.load_balancers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.load_balancers.len()
    }

    /// Names in processing order.
    pub fn names(&self) -> Vec<String> {
        self.load_balancers.iter().map(|lb| lb.name.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a ResolvedTargets {
    type Item = &'a LoadBalancer;
    type IntoIter = std::slice::Iter<'a, LoadBalancer>;

    fn into_iter(self) -> Self::IntoIter {
        self.load_balancers.iter()
    }
}

/// Enumerate the region's load balancers and select the targets.
pub async fn resolve<A>(
    api: &A,
    instance_id: &str,
    explicit: Option<&[String]>,
) -> ElbResult<ResolvedTargets>
where
    A: ElbApi + ?Sized,
{
    let all = api.describe_load_balancers().await?;
    let targets = select(all, instance_id, explicit);

    let mode = match explicit {
        Some(names) if !names.is_empty() => "explicit",
        _ => "reverse-lookup",
    };
    tracing::info!(
        instance_id = %instance_id,
        mode,
        targets = ?targets.names(),
        "Resolved target load balancers"
    );

    Ok(targets)
}

/// Pure selection over an already-enumerated region.
pub fn select(
    all: Vec<LoadBalancer>,
    instance_id: &str,
    explicit: Option<&[String]>,
) -> ResolvedTargets {
    let load_balancers = match explicit {
        Some(requested) if !requested.is_empty() => {
            let wanted: HashSet<&str> = requested.iter().map(String::as_str).collect();
            let mut selected: Vec<LoadBalancer> = all
                .into_iter()
                .filter(|lb| wanted.contains(lb.name.as_str()))
                .collect();
            selected.sort_by(|a, b| a.name.cmp(&b.name));

            for name in missing_names(requested, &selected) {
                tracing::warn!(load_balancer = %name, "Requested load balancer not found in region, ignoring");
            }
            selected
        }
        _ => all
            .into_iter()
            .filter(|lb| lb.has_member(instance_id))
            .collect(),
    };

    ResolvedTargets { load_balancers }
}

/// Requested names with no selected load balancer, in request order, each once.
fn missing_names<'r>(requested: &'r [String], selected: &[LoadBalancer]) -> Vec<&'r str> {
    let mut seen = HashSet::new();
    requested
        .iter()
        .map(String::as_str)
        .filter(|name| seen.insert(*name))
        .filter(|name| !selected.iter().any(|lb| lb.name == *name))
        .collect()
}
