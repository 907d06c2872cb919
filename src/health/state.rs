//! Polling daemon state machine.
//!
//! # States
//! - Running: cycles keep being scheduled
//! - Stopped: terminate() was requested; no new cycle starts
//!
//! # State Transitions
//! ```text
//! Running → Stopped: terminate()
//! ```
//!
//! Stopped is terminal. Collaborator failures never move the daemon out of
//! Running.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonState {
    Running,
    Stopped,
}

impl fmt::Display for DaemonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaemonState::Running => f.write_str("running"),
            DaemonState::Stopped => f.write_str("stopped"),
        }
    }
}
