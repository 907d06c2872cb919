//! Virtual data center: a named group of hosts.
//!
//! # Responsibilities
//! - Hold an ordered, non-empty set of hosts under one name
//! - Report aggregate health (every member healthy)
//!
//! # Design Decisions
//! - Health is recomputed on every call, never cached
//! - Members are exposed read-only; the host list cannot be swapped out

use std::slice;
use std::sync::Arc;
use thiserror::Error;

use crate::model::Host;

/// Errors raised while building a [`Vdc`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VdcError {
    #[error("a VDC requires at least one host")]
    Empty,
}

/// A named collection of hosts treated as one failure-aggregation unit.
#[derive(Debug, Clone)]
pub struct Vdc {
    name: String,
    hosts: Vec<Arc<Host>>,
}

impl Vdc {
    /// Build a VDC from host names. The VDC takes the first host's name.
    pub fn from_names<I, S>(names: I) -> Result<Self, VdcError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hosts: Vec<Arc<Host>> = names
            .into_iter()
            .map(|name| Arc::new(Host::new(name)))
            .collect();
        Self::from_hosts(hosts)
    }

    /// Build a VDC around existing hosts. The VDC takes the first host's name.
    pub fn from_hosts(hosts: Vec<Arc<Host>>) -> Result<Self, VdcError> {
        let name = hosts.first().ok_or(VdcError::Empty)?.name().to_string();
        Self::named(name, hosts)
    }

    /// Build a VDC with an explicit name.
    pub fn named(name: impl Into<String>, hosts: Vec<Arc<Host>>) -> Result<Self, VdcError> {
        if hosts.is_empty() {
            return Err(VdcError::Empty);
        }
        Ok(Self {
            name: name.into(),
            hosts,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the VDC. Membership is unaffected.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Builder-style rename.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    /// Member hosts, in construction order.
    pub fn hosts(&self) -> &[Arc<Host>] {
        &self.hosts
    }

    pub fn iter(&self) -> slice::Iter<'_, Arc<Host>> {
        self.hosts.iter()
    }

    /// True iff every member host is currently healthy.
    pub fn is_healthy(&self) -> bool {
        self.hosts.iter().all(|host| host.is_healthy())
    }
}

impl<'a> IntoIterator for &'a Vdc {
    type Item = &'a Arc<Host>;
    type IntoIter = slice::Iter<'a, Arc<Host>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
