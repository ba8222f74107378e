//! Online/offline state machine
//!
//! Two states. Every connectivity event re-probes the environment instead of
//! flipping the flag, then updates every control that needs the network.

use super::probe::ConnectivityProbe;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Tooltip shown on network-dependent controls while offline
pub const OFFLINE_TOOLTIP: &str = "This feature requires internet connection";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityState {
    Online,
    Offline,
}

impl ConnectivityState {
    pub fn from_online(online: bool) -> Self {
        if online {
            ConnectivityState::Online
        } else {
            ConnectivityState::Offline
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, ConnectivityState::Online)
    }
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectivityState::Online => write!(f, "online"),
            ConnectivityState::Offline => write!(f, "offline"),
        }
    }
}

/// A UI affordance that only works online
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Control {
    pub id: String,
    pub enabled: bool,
    pub tooltip: String,
}

impl Control {
    fn new(id: impl Into<String>, online: bool) -> Self {
        let mut control = Self {
            id: id.into(),
            enabled: true,
            tooltip: String::new(),
        };
        control.apply(online);
        control
    }

    fn apply(&mut self, online: bool) {
        self.enabled = online;
        self.tooltip = if online {
            String::new()
        } else {
            OFFLINE_TOOLTIP.to_string()
        };
    }
}

/// Read-only view of the online flag, shared with request clients
#[derive(Debug, Clone)]
pub struct ConnectivityHandle {
    online: Arc<AtomicBool>,
}

impl ConnectivityHandle {
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> ConnectivityState {
        ConnectivityState::from_online(self.is_online())
    }
}

/// Result of a re-probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub previous: ConnectivityState,
    pub current: ConnectivityState,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Tracks connectivity and the controls gated on it
pub struct ConnectivityMonitor {
    probe: Arc<dyn ConnectivityProbe>,
    online: Arc<AtomicBool>,
    controls: Vec<Control>,
}

impl ConnectivityMonitor {
    /// Create the monitor with its initial state taken from the probe
    pub async fn start(probe: Arc<dyn ConnectivityProbe>) -> Self {
        let online = probe.is_online().await;
        tracing::info!(
            probe = probe.name(),
            state = %ConnectivityState::from_online(online),
            "Connectivity monitor started"
        );

        Self {
            probe,
            online: Arc::new(AtomicBool::new(online)),
            controls: Vec::new(),
        }
    }

    /// Gate a control on connectivity; it takes the current state immediately
    pub fn register_control(&mut self, id: impl Into<String>) {
        let id = id.into();
        if self.controls.iter().any(|c| c.id == id) {
            return;
        }
        self.controls.push(Control::new(id, self.is_online()));
    }

    pub fn handle(&self) -> ConnectivityHandle {
        ConnectivityHandle {
            online: Arc::clone(&self.online),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> ConnectivityState {
        ConnectivityState::from_online(self.is_online())
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Re-probe and propagate to every control
    pub async fn refresh(&mut self) -> Transition {
        let previous = self.state();
        let online = self.probe.is_online().await;
        self.online.store(online, Ordering::SeqCst);

        for control in &mut self.controls {
            control.apply(online);
        }

        let transition = Transition {
            previous,
            current: self.state(),
        };

        if transition.changed() {
            tracing::info!(from = %previous, to = %transition.current, "Connectivity changed");
        } else {
            tracing::debug!(state = %transition.current, "Connectivity unchanged");
        }

        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::probe::ManualProbe;

    #[tokio::test]
    async fn test_initial_state_from_probe() {
        let monitor = ConnectivityMonitor::start(Arc::new(ManualProbe::new(false))).await;
        assert_eq!(monitor.state(), ConnectivityState::Offline);

        let monitor = ConnectivityMonitor::start(Arc::new(ManualProbe::new(true))).await;
        assert_eq!(monitor.state(), ConnectivityState::Online);
    }

    #[tokio::test]
    async fn test_refresh_reprobes_instead_of_toggling() {
        let probe = ManualProbe::new(true);
        let mut monitor = ConnectivityMonitor::start(Arc::new(probe.clone())).await;

        // Two "offline" events while the probe still reports online
        assert!(!monitor.refresh().await.changed());
        assert!(!monitor.refresh().await.changed());
        assert!(monitor.is_online());

        probe.set_online(false);
        let transition = monitor.refresh().await;
        assert!(transition.changed());
        assert_eq!(transition.current, ConnectivityState::Offline);
    }

    #[tokio::test]
    async fn test_controls_follow_state() {
        let probe = ManualProbe::new(true);
        let mut monitor = ConnectivityMonitor::start(Arc::new(probe.clone())).await;
        monitor.register_control("chat");
        monitor.register_control("explain");
        monitor.register_control("chat");
        assert_eq!(monitor.controls().len(), 2);
        assert!(monitor.controls().iter().all(|c| c.enabled && c.tooltip.is_empty()));

        probe.set_online(false);
        monitor.refresh().await;
        for control in monitor.controls() {
            assert!(!control.enabled);
            assert_eq!(control.tooltip, OFFLINE_TOOLTIP);
        }

        probe.set_online(true);
        monitor.refresh().await;
        assert!(monitor.controls().iter().all(|c| c.enabled && c.tooltip.is_empty()));
    }

    #[tokio::test]
    async fn test_handle_tracks_monitor() {
        let probe = ManualProbe::new(true);
        let mut monitor = ConnectivityMonitor::start(Arc::new(probe.clone())).await;
        let handle = monitor.handle();
        assert!(handle.is_online());

        probe.set_online(false);
        monitor.refresh().await;
        assert_eq!(handle.state(), ConnectivityState::Offline);
    }
}
