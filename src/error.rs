//! Collaborator error taxonomy.
//!
//! Every error here is non-fatal to the polling daemon: it is logged at the
//! call site and discarded.

use std::any::Any;
use std::io;
use thiserror::Error;

/// Failure while fetching the host list from a directory provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("directory unavailable: {0}")]
    Unavailable(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Fault(#[from] CollaboratorFault),
}

/// Failure while installing a refreshed host list into the load balancer.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("duplicate host in update: {0}")]
    DuplicateHost(String),
    #[error("refusing empty host list")]
    EmptyHostList,
    #[error("install rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Fault(#[from] CollaboratorFault),
}

/// Failure of a single-host health probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid probe address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("probe timed out after {0}ms")]
    Timeout(u64),
    #[error("connection failed: {0}")]
    Connect(#[from] io::Error),
    #[error("host reported unhealthy: {0}")]
    Unhealthy(String),
    #[error(transparent)]
    Fault(#[from] CollaboratorFault),
}

/// A collaborator panicked while the daemon was calling it.
#[derive(Debug, Error)]
#[error("collaborator panicked during {operation}: {message}")]
pub struct CollaboratorFault {
    pub operation: &'static str,
    pub message: String,
}

impl CollaboratorFault {
    /// Build a fault from a `catch_unwind` payload.
    pub fn from_panic(operation: &'static str, payload: Box<dyn Any + Send>) -> Self {
        Self {
            operation,
            message: panic_message(payload.as_ref()),
        }
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_from_str_payload() {
        let payload = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
        let fault = CollaboratorFault::from_panic("health_check", payload);
        assert_eq!(fault.operation, "health_check");
        assert_eq!(fault.message, "boom");
    }

    #[test]
    fn test_fault_from_string_payload() {
        let payload = std::panic::catch_unwind(|| panic!("bad host {}", 7)).unwrap_err();
        let fault = CollaboratorFault::from_panic("host_list", payload);
        assert_eq!(fault.message, "bad host 7");
        assert!(ProbeError::from(fault).to_string().contains("host_list"));
    }
}
