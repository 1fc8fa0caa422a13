//! Human-readable record of what configure changed on disk.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One recorded action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    /// Package that performed the action.
    pub package: String,
    /// Kind of action (e.g. `Install`).
    pub action: String,
    /// Summary shown to the user.
    pub message: String,
    /// When the action was recorded.
    pub at: DateTime<Utc>,
}

/// Append-only action log shared by all packages in a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActionLog {
    entries: Vec<Action>,
}

impl ActionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action.
    pub fn record(&mut self, package: &str, action: &str, message: &str) {
        tracing::info!(package, action, "{}", message);
        self.entries.push(Action {
            package: package.to_string(),
            action: action.to_string(),
            message: message.to_string(),
            at: Utc::now(),
        });
    }

    /// All actions in order.
    pub fn entries(&self) -> &[Action] {
        &self.entries
    }

    /// Number of recorded actions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
