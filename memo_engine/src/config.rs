//! Memo configuration and loader.
//!
//! Options mirror what a host project can tune: the quote characters used to
//! group script arguments, the hotkey that opens the memo screen, the signal
//! written by `check*` commands, the screen title, the sub-objective cascade
//! policy, and the notification texts. Every option has a default, so a missing
//! or partial `memo.toml` is never fatal.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::{info, warn};
use memo_data::CascadePolicy;
use serde::{Deserialize, Serialize};

use crate::signals::SignalId;

/// Messages queued after a state-changing script command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationText {
    pub added: String,
    pub updated: String,
    pub completed: String,
    pub failed: String,
}

impl Default for NotificationText {
    fn default() -> Self {
        Self {
            added: "New memo added!".to_string(),
            updated: "Memo updated!".to_string(),
            completed: "Memo completed!".to_string(),
            failed: "Memo failed!".to_string(),
        }
    }
}

/// Complete memo configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoConfig {
    /// Title shown at the top of the memo screen.
    pub title: String,
    pub open_quote: char,
    pub close_quote: char,
    /// Key name that opens the memo screen while the hotkey gate is enabled.
    pub hotkey: String,
    /// Signal written by `checkmain`, `checksub` and `checksuccess`.
    pub signal_id: SignalId,
    pub cascade: CascadePolicy,
    pub notifications: NotificationText,
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            title: "Memos".to_string(),
            open_quote: '"',
            close_quote: '"',
            hotkey: "tab".to_string(),
            signal_id: 1,
            cascade: CascadePolicy::Never,
            notifications: NotificationText::default(),
        }
    }
}

impl MemoConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML for [`MemoConfig`] or the
    /// hotkey is blank.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: MemoConfig = toml::from_str(text).context("parsing memo configuration")?;
        if config.hotkey.trim().is_empty() {
            bail!("memo hotkey must not be blank");
        }
        Ok(config)
    }
}

/// Load configuration from `toml_path`, falling back to defaults on any error.
///
/// # Logging
/// - `info!` on successful load
/// - `warn!` if the file cannot be read or parsed
pub fn load_config(toml_path: &Path) -> MemoConfig {
    match try_load_config(toml_path) {
        Ok(config) => {
            info!("memo configuration loaded from '{}'", toml_path.display());
            config
        },
        Err(e) => {
            warn!(
                "Could not load memo configuration from '{}': {:#}. Using defaults.",
                toml_path.display(),
                e
            );
            MemoConfig::default()
        },
    }
}

fn try_load_config(toml_path: &Path) -> Result<MemoConfig> {
    let text = fs::read_to_string(toml_path)
        .with_context(|| format!("reading memo configuration from '{}'", toml_path.display()))?;
    MemoConfig::from_toml_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let config = MemoConfig::default();
        assert_eq!(config.open_quote, '"');
        assert_eq!(config.close_quote, '"');
        assert_eq!(config.hotkey, "tab");
        assert_eq!(config.signal_id, 1);
        assert_eq!(config.title, "Memos");
        assert_eq!(config.cascade, CascadePolicy::Never);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() -> Result<()> {
        let config = MemoConfig::from_toml_str(
            r#"
            open_quote = "["
            close_quote = "]"
            signal_id = 12
            cascade = "on_failure"

            [notifications]
            added = "A new memo!"
            "#,
        )?;
        assert_eq!(config.open_quote, '[');
        assert_eq!(config.close_quote, ']');
        assert_eq!(config.signal_id, 12);
        assert_eq!(config.cascade, CascadePolicy::OnFailure);
        assert_eq!(config.notifications.added, "A new memo!");
        assert_eq!(config.notifications.updated, "Memo updated!");
        assert_eq!(config.hotkey, "tab");
        Ok(())
    }

    #[test]
    fn multi_character_quote_is_rejected() {
        assert!(MemoConfig::from_toml_str(r#"open_quote = "<<""#).is_err());
    }

    #[test]
    fn blank_hotkey_is_rejected() {
        assert!(MemoConfig::from_toml_str(r#"hotkey = "  ""#).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = load_config(&dir.path().join("memo.toml"));
        assert_eq!(config, MemoConfig::default());
        Ok(())
    }

    #[test]
    fn file_on_disk_is_loaded() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "title = \"Journal\"\nhotkey = \"j\"")?;
        let config = load_config(file.path());
        assert_eq!(config.title, "Journal");
        assert_eq!(config.hotkey, "j");
        Ok(())
    }

    #[test]
    fn broken_file_falls_back_to_defaults() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "this is = = not toml")?;
        assert_eq!(load_config(file.path()), MemoConfig::default());
        Ok(())
    }
}
