//! Connectivity
//!
//! - **probe**: How the environment is checked (HTTP reachability, manual)
//! - **monitor**: Online/offline state machine and gated controls

mod monitor;
mod probe;

pub use monitor::{
    ConnectivityHandle, ConnectivityMonitor, ConnectivityState, Control, Transition,
    OFFLINE_TOOLTIP,
};
pub use probe::{ConnectivityProbe, HttpProbe, ManualProbe};
