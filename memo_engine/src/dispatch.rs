//! Command dispatch.
//!
//! Maps a parsed [`Command`] onto one registry operation, a hotkey gate change,
//! an open-screen request, or a signal write. Unknown commands fall through
//! without effect so unrelated host commands sharing the channel are harmless.

use log::info;

use crate::command::{Command, parse_command};
use crate::config::MemoConfig;
use crate::session::MemoSession;
use crate::signals::SignalStore;

/// What the presentation layer should do after a command ran.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DispatchEffect {
    None,
    OpenMemo,
}

/// Apply one command to the session.
pub fn dispatch(
    session: &mut MemoSession,
    config: &MemoConfig,
    signals: &mut impl SignalStore,
    command: &Command,
) -> DispatchEffect {
    let texts = &config.notifications;
    let registry = &mut session.registry;
    let notice = match command {
        Command::OpenMemo => {
            info!("memo screen requested by script");
            return DispatchEffect::OpenMemo;
        },
        Command::EnableMemoKey(enabled) => {
            session.memo_key_enabled = *enabled;
            info!("memo hotkey {}", if *enabled { "enabled" } else { "disabled" });
            None
        },
        Command::AddMain { id, alias, description } => {
            registry.add_objective(id, alias, description).then_some(texts.added.as_str())
        },
        Command::AddSub { id, sub_alias, data } => {
            registry.add_sub_objective(id, sub_alias, data).then_some(texts.updated.as_str())
        },
        Command::SetMain { id, alias, description } => registry
            .set_objective(id, alias.as_deref(), description.as_deref())
            .then_some(texts.updated.as_str()),
        Command::SetSub { id, sub_alias, data } => {
            registry.set_sub_objective(id, sub_alias, data).then_some(texts.updated.as_str())
        },
        Command::DoneMain { id, fail } => registry
            .complete_objective(id, *fail)
            .then(|| completion_text(config, *fail)),
        Command::DoneSub { id, sub_alias, fail } => registry
            .complete_sub_objective(id, sub_alias, *fail)
            .then(|| completion_text(config, *fail)),
        Command::CheckMain { id } => {
            signals.set_signal(config.signal_id, registry.is_objective_active(id));
            None
        },
        Command::CheckSub { id, sub_alias } => {
            signals.set_signal(config.signal_id, registry.is_sub_objective_active(id, sub_alias));
            None
        },
        Command::CheckSuccess { id } => {
            signals.set_signal(config.signal_id, registry.is_objective_successful(id));
            None
        },
        Command::Unknown => None,
    };

    if let Some(message) = notice {
        session.notifications.push(message);
    }
    DispatchEffect::None
}

/// Parse and dispatch one line of host script text.
pub fn run_script_line(
    session: &mut MemoSession,
    config: &MemoConfig,
    signals: &mut impl SignalStore,
    text: &str,
) -> DispatchEffect {
    let command = parse_command(text, config.open_quote, config.close_quote);
    dispatch(session, config, signals, &command)
}

fn completion_text(config: &MemoConfig, fail: bool) -> &str {
    if fail {
        &config.notifications.failed
    } else {
        &config.notifications.completed
    }
}
