//! Per-save memo state.
//!
//! [`MemoSession`] bundles everything scoped to one game session: the objective
//! registry, the hotkey gate, and the pending notifications. It is owned by the
//! host and passed by reference to the dispatcher and the presentation layer.

use log::info;
use serde::{Deserialize, Serialize};

use crate::MEMO_VERSION;
use crate::config::MemoConfig;
use crate::notification::NotificationQueue;
use crate::registry::ObjectiveRegistry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoSession {
    pub version: String,
    pub registry: ObjectiveRegistry,
    pub memo_key_enabled: bool,
    /// Not persisted: a loaded session starts with an empty queue.
    #[serde(skip)]
    pub notifications: NotificationQueue,
}

impl Default for MemoSession {
    fn default() -> Self {
        Self::new(&MemoConfig::default())
    }
}

impl MemoSession {
    /// Create a fresh session using the cascade policy from `config`.
    pub fn new(config: &MemoConfig) -> Self {
        let session = Self {
            version: MEMO_VERSION.to_string(),
            registry: ObjectiveRegistry::with_cascade(config.cascade),
            memo_key_enabled: true,
            notifications: NotificationQueue::new(),
        };
        info!("new, empty 'MemoSession' created");
        session
    }

    /// Discard all session state, keeping the registry's cascade policy.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.notifications.clear();
        self.memo_key_enabled = true;
        self.version = MEMO_VERSION.to_string();
        info!("memo session reset");
    }

    /// True if pressing `key` should open the memo screen.
    pub fn hotkey_opens_memo(&self, key: &str, config: &MemoConfig) -> bool {
        self.memo_key_enabled && key.trim().eq_ignore_ascii_case(config.hotkey.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memo_data::CascadePolicy;

    #[test]
    fn new_session_uses_configured_cascade() {
        let config = MemoConfig {
            cascade: CascadePolicy::Always,
            ..MemoConfig::default()
        };
        let session = MemoSession::new(&config);
        assert_eq!(session.registry.cascade(), CascadePolicy::Always);
        assert!(session.memo_key_enabled);
        assert_eq!(session.version, MEMO_VERSION);
    }

    #[test]
    fn hotkey_respects_gate() {
        let config = MemoConfig::default();
        let mut session = MemoSession::new(&config);
        assert!(session.hotkey_opens_memo("TAB", &config));
        assert!(!session.hotkey_opens_memo("escape", &config));
        session.memo_key_enabled = false;
        assert!(!session.hotkey_opens_memo("tab", &config));
    }

    #[test]
    fn reset_clears_state() {
        let mut session = MemoSession::default();
        session.registry.add_objective("q1", "Key", "Find the key");
        session.notifications.push("New memo added!");
        session.memo_key_enabled = false;
        session.reset();
        assert!(session.registry.is_empty());
        assert!(session.notifications.is_empty());
        assert!(session.memo_key_enabled);
    }

    #[test]
    fn notifications_are_not_serialized() -> anyhow::Result<()> {
        let mut session = MemoSession::default();
        session.notifications.push("New memo added!");
        let json = serde_json::to_string(&session)?;
        let back: MemoSession = serde_json::from_str(&json)?;
        assert!(back.notifications.is_empty());
        Ok(())
    }
}
