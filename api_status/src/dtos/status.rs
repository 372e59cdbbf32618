use serde::{Deserialize, Serialize};

/// Snapshot of a user's entitlement at a single instant. Computed fresh on
/// every request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementStatus {
    pub is_active: bool,
    pub plan: Option<String>,
    pub trial_ends_at: Option<String>,
    pub current_period_end: Option<String>,
    pub cancel_at_period_end: bool,
}

impl EntitlementStatus {
    /// The never-subscribed state.
    pub fn none() -> Self {
        EntitlementStatus {
            is_active: false,
            plan: None,
            trial_ends_at: None,
            current_period_end: None,
            cancel_at_period_end: false,
        }
    }
}
