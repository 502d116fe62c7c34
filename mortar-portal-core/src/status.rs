//! Health classification of a proxy rule from its reported conditions.
//!
//! Stateless: the badge is recomputed from whatever snapshot was fetched last.

use mortar_portal_client::Condition;
use serde::Serialize;

const READY: &str = "Ready";
const SYNCED: &str = "Synced";

/// Display state of a proxy rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceHealth {
    Healthy,
    Unhealthy,
    Pending,
    Unknown,
}

impl ResourceHealth {
    pub fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Unhealthy => "Unhealthy",
            Self::Pending => "Pending",
            Self::Unknown => "Unknown",
        }
    }
}

/// Result of [`classify`]: the state plus the conditions that explain it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    pub health: ResourceHealth,
    ready: Option<&'a Condition>,
    synced: Option<&'a Condition>,
    /// The failing condition, set only for [`ResourceHealth::Unhealthy`].
    pub blamed: Option<&'a Condition>,
}

impl Classification<'_> {
    /// Tooltip text for the status badge.
    pub fn detail(&self) -> Option<String> {
        match self.health {
            ResourceHealth::Healthy => {
                let ready = self.ready.map(Condition::reason_text).unwrap_or_default();
                let synced = self.synced.map(Condition::reason_text).unwrap_or_default();
                Some(format!("Ready: {ready}\nSynced: {synced}"))
            }
            ResourceHealth::Unhealthy => self
                .blamed
                .map(|c| format!("{}: {}", c.condition_type, c.reason_text())),
            ResourceHealth::Pending | ResourceHealth::Unknown => None,
        }
    }
}

/// Maps a condition list to a [`ResourceHealth`].
///
/// The first `Ready` and first `Synced` conditions decide: both `True` is
/// healthy, either `False` is unhealthy (blaming `Ready` when it is the one
/// that failed), anything else is pending. No conditions at all is unknown.
pub fn classify(conditions: &[Condition]) -> Classification<'_> {
    let ready = conditions.iter().find(|c| c.condition_type == READY);
    let synced = conditions.iter().find(|c| c.condition_type == SYNCED);

    let (health, blamed) = if conditions.is_empty() {
        (ResourceHealth::Unknown, None)
    } else {
        match (ready, synced) {
            (Some(r), Some(s)) if r.is_true() && s.is_true() => (ResourceHealth::Healthy, None),
            (Some(r), _) if r.is_false() => (ResourceHealth::Unhealthy, Some(r)),
            (_, Some(s)) if s.is_false() => (ResourceHealth::Unhealthy, Some(s)),
            _ => (ResourceHealth::Pending, None),
        }
    };

    Classification {
        health,
        ready,
        synced,
        blamed,
    }
}
