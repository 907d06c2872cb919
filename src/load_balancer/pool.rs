//! In-memory host pool.
//!
//! # Responsibilities
//! - Hold the authoritative host set behind an atomic pointer swap
//! - Merge refreshed host lists by name so surviving hosts keep their state
//! - Report per-VDC health for hosts seeded from VDC definitions

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use arc_swap::ArcSwap;

use crate::error::InstallError;
use crate::load_balancer::LoadBalancer;
use crate::model::{Host, Vdc};

/// Lock-free host set shared between the polling daemon and routing readers.
#[derive(Debug)]
pub struct HostPool {
    hosts: ArcSwap<Vec<Arc<Host>>>,
    vdcs: Vec<Vdc>,
    /// VDC member by name, reused when a host re-enters the pool.
    vdc_members: HashMap<String, Arc<Host>>,
}

impl HostPool {
    /// Create a pool with an initial host set.
    pub fn new(hosts: Vec<Arc<Host>>) -> Self {
        Self {
            hosts: ArcSwap::from_pointee(hosts),
            vdcs: Vec::new(),
            vdc_members: HashMap::new(),
        }
    }

    /// Create a pool seeded from VDCs. Every VDC member joins the host set.
    pub fn from_vdcs(vdcs: Vec<Vdc>) -> Self {
        let hosts = vdcs
            .iter()
            .flat_map(|vdc| vdc.iter().cloned())
            .collect();
        Self::with_vdcs(hosts, vdcs)
    }

    /// Create a pool with an explicit host set and VDC grouping. VDC members
    /// should be the same `Arc`s as in `hosts` so probes show up in both.
    pub fn with_vdcs(hosts: Vec<Arc<Host>>, vdcs: Vec<Vdc>) -> Self {
        let vdc_members = vdcs
            .iter()
            .flat_map(|vdc| vdc.iter())
            .map(|host| (host.name().to_string(), Arc::clone(host)))
            .collect();
        Self {
            hosts: ArcSwap::from_pointee(hosts),
            vdcs,
            vdc_members,
        }
    }

    /// Look up a host by name.
    pub fn get(&self, name: &str) -> Option<Arc<Host>> {
        self.hosts.load().iter().find(|h| h.name() == name).cloned()
    }

    /// Hosts whose last probe succeeded.
    pub fn healthy_hosts(&self) -> Vec<Arc<Host>> {
        self.hosts
            .load()
            .iter()
            .filter(|h| h.is_healthy())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.hosts.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.load().is_empty()
    }

    pub fn vdcs(&self) -> &[Vdc] {
        &self.vdcs
    }

    /// Aggregate health per VDC, in seeding order.
    pub fn vdc_health(&self) -> Vec<(String, bool)> {
        self.vdcs
            .iter()
            .map(|vdc| (vdc.name().to_string(), vdc.is_healthy()))
            .collect()
    }
}

impl LoadBalancer for HostPool {
    fn update_hosts(&self, updated: Vec<Arc<Host>>) -> Result<(), InstallError> {
        let mut seen = HashSet::with_capacity(updated.len());
        for host in &updated {
            if !seen.insert(host.name()) {
                return Err(InstallError::DuplicateHost(host.name().to_string()));
            }
        }

        let current = self.hosts.load();
        let existing: HashMap<&str, &Arc<Host>> =
            current.iter().map(|h| (h.name(), h)).collect();

        let mut added = 0usize;
        let merged: Vec<Arc<Host>> = updated
            .into_iter()
            .map(|host| {
                if let Some(kept) = existing.get(host.name()) {
                    return Arc::clone(kept);
                }
                added += 1;
                // A VDC member coming back keeps the Arc its VDC reads.
                match self.vdc_members.get(host.name()) {
                    Some(member) => Arc::clone(member),
                    None => host,
                }
            })
            .collect();

        let removed = current.len() + added - merged.len();
        tracing::debug!(
            total = merged.len(),
            added,
            removed,
            "Host pool updated"
        );

        self.hosts.store(Arc::new(merged));
        Ok(())
    }

    fn all_hosts(&self) -> Vec<Arc<Host>> {
        self.hosts.load().as_ref().clone()
    }
}
