//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use ec2_elb::cloud::{ElbApi, ElbError, ElbResult, LoadBalancer, MembershipState};

/// A provider call as observed by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Describe,
    Register(String),
    Deregister(String),
    Health(String),
}

/// Provider operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Describe,
    Register,
    Deregister,
    Health,
}

#[derive(Default)]
struct State {
    load_balancers: Vec<LoadBalancer>,
    /// Health polls left before a load balancer reflects its new membership.
    lag: HashMap<String, u32>,
    /// Configured lag applied after every register/deregister.
    delays: HashMap<String, u32>,
    never_converge: Vec<String>,
    failures: Vec<(Op, Option<String>)>,
    calls: Vec<Call>,
}

/// In-memory load balancing API.
///
/// Membership changes immediately on register/deregister, but health reports
/// keep showing the old state for a configurable number of polls.
#[derive(Default)]
pub struct FakeElb {
    state: Mutex<State>,
}

impl FakeElb {
    pub fn new(load_balancers: Vec<LoadBalancer>) -> Self {
        Self {
            state: Mutex::new(State {
                load_balancers,
                ..State::default()
            }),
        }
    }

    /// Report the old state for `polls` health queries after each change.
    pub fn with_delay(self, load_balancer: &str, polls: u32) -> Self {
        self.state.lock().unwrap().delays.insert(load_balancer.to_string(), polls);
        self
    }

    /// Never report the new state for this load balancer.
    pub fn never_converging(self, load_balancer: &str) -> Self {
        self.state.lock().unwrap().never_converge.push(load_balancer.to_string());
        self
    }

    /// Fail `op` (optionally only for one load balancer).
    pub fn failing(self, op: Op, load_balancer: Option<&str>) -> Self {
        self.state
            .lock()
            .unwrap()
            .failures
            .push((op, load_balancer.map(str::to_string)));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Register/deregister calls only.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Register(_) | Call::Deregister(_)))
            .collect()
    }

    pub fn health_polls(&self, load_balancer: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == Call::Health(load_balancer.to_string()))
            .count()
    }

    pub fn members(&self, load_balancer: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .load_balancers
            .iter()
            .find(|lb| lb.name == load_balancer)
            .map(|lb| lb.instances.clone())
            .unwrap_or_default()
    }
}

impl State {
    fn check(&self, op: Op, load_balancer: Option<&str>) -> ElbResult<()> {
        let fails = self.failures.iter().any(|(failing_op, target)| {
            *failing_op == op && (target.is_none() || target.as_deref() == load_balancer)
        });
        if fails {
            return Err(ElbError::provider("FakeElb", format!("{:?} rejected", op)));
        }
        Ok(())
    }

    fn lb_mut(&mut self, name: &str) -> ElbResult<&mut LoadBalancer> {
        self.load_balancers
            .iter_mut()
            .find(|lb| lb.name == name)
            .ok_or_else(|| ElbError::provider("FakeElb", format!("LoadBalancerNotFound: {}", name)))
    }

    fn start_lag(&mut self, name: &str) {
        let polls = self.delays.get(name).copied().unwrap_or(0);
        self.lag.insert(name.to_string(), polls);
    }
}

#[async_trait]
impl ElbApi for FakeElb {
    async fn describe_load_balancers(&self) -> ElbResult<Vec<LoadBalancer>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Describe);
        state.check(Op::Describe, None)?;
        Ok(state.load_balancers.clone())
    }

    async fn register_instance(&self, load_balancer: &str, instance_id: &str) -> ElbResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Register(load_balancer.to_string()));
        state.check(Op::Register, Some(load_balancer))?;
        let lb = state.lb_mut(load_balancer)?;
        if !lb.has_member(instance_id) {
            lb.instances.push(instance_id.to_string());
        }
        state.start_lag(load_balancer);
        Ok(())
    }

    async fn deregister_instance(&self, load_balancer: &str, instance_id: &str) -> ElbResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Deregister(load_balancer.to_string()));
        state.check(Op::Deregister, Some(load_balancer))?;
        let lb = state.lb_mut(load_balancer)?;
        lb.instances.retain(|id| id != instance_id);
        state.start_lag(load_balancer);
        Ok(())
    }

    async fn instance_state(
        &self,
        load_balancer: &str,
        instance_id: &str,
    ) -> ElbResult<MembershipState> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Health(load_balancer.to_string()));
        state.check(Op::Health, Some(load_balancer))?;

        let member = state.lb_mut(load_balancer)?.has_member(instance_id);
        let current = if member {
            MembershipState::InService
        } else {
            MembershipState::OutOfService
        };
        let previous = if member {
            MembershipState::OutOfService
        } else {
            MembershipState::InService
        };

        if state.never_converge.iter().any(|name| name == load_balancer) {
            return Ok(previous);
        }

        match state.lag.get_mut(load_balancer) {
            Some(left) if *left > 0 => {
                *left -= 1;
                Ok(previous)
            }
            _ => Ok(current),
        }
    }
}

/// Build a load balancer with the given members.
pub fn lb(name: &str, members: &[&str]) -> LoadBalancer {
    LoadBalancer::new(name, members.iter().map(|m| m.to_string()).collect())
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|n| n.to_string()).collect()
}
