//! Online/offline transitions derived from health probes.

pub const RESTORED_MESSAGE: &str = "Connection restored";
pub const LOST_MESSAGE: &str = "Connection lost. Please check your internet connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityChange {
    Lost,
    Restored,
}

impl ConnectivityChange {
    pub fn message(self) -> &'static str {
        match self {
            ConnectivityChange::Lost => LOST_MESSAGE,
            ConnectivityChange::Restored => RESTORED_MESSAGE,
        }
    }
}

/// Tracks the last known reachability. Starts online, so a healthy
/// first probe stays silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityTracker {
    online: bool,
}

impl Default for ConnectivityTracker {
    fn default() -> Self {
        Self { online: true }
    }
}

impl ConnectivityTracker {
    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Record a probe result; returns a change only on transitions.
    pub fn observe(&mut self, reachable: bool) -> Option<ConnectivityChange> {
        if reachable == self.online {
            return None;
        }
        self.online = reachable;
        Some(if reachable {
            ConnectivityChange::Restored
        } else {
            ConnectivityChange::Lost
        })
    }
}
