//! REPL host.
//!
//! Stands in for the game: every line is a script instruction routed through
//! the dispatcher, except lines starting with `:`, which are host commands
//! (simulated key presses, showing the memo screen, saving and loading).
//! Pending notifications are drained and shown after every line.

mod input;
pub mod system;

pub use system::*;

use anyhow::Result;
use log::info;
use memo_data::ObjectiveFilter;

use crate::config::MemoConfig;
use crate::dispatch::{DispatchEffect, run_script_line};
use crate::session::MemoSession;
use crate::signals::Switches;
use crate::style::MemoStyle;
use crate::view::{View, ViewItem};

pub use input::HOST_COMMANDS;
use input::{InputEvent, ScriptInput};

/// Commands handled by the host rather than the memo dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Help,
    Key(String),
    Memos(ObjectiveFilter),
    Signals,
    Save(String),
    Load(String),
    ListSaves,
    NewSession,
    Quit,
    Invalid(String),
    Script(String),
}

/// Split host commands from script instructions.
pub fn parse_host_command(input: &str) -> HostCommand {
    let trimmed = input.trim();
    if !trimmed.starts_with(':') {
        return HostCommand::Script(trimmed.to_string());
    }
    let words: Vec<&str> = trimmed.split_whitespace().collect();
    match words.as_slice() {
        [":help" | ":?"] => HostCommand::Help,
        [":key", key] => HostCommand::Key((*key).to_string()),
        [":memos"] => HostCommand::Memos(ObjectiveFilter::All),
        [":memos", keyword] => ObjectiveFilter::from_keyword(keyword)
            .map_or_else(|| HostCommand::Invalid(trimmed.to_string()), HostCommand::Memos),
        [":signals"] => HostCommand::Signals,
        [":save", slot] => HostCommand::Save((*slot).to_string()),
        [":load", slot] => HostCommand::Load((*slot).to_string()),
        [":saves"] => HostCommand::ListSaves,
        [":new"] => HostCommand::NewSession,
        [":quit" | ":exit"] => HostCommand::Quit,
        _ => HostCommand::Invalid(trimmed.to_string()),
    }
}

/// Run the read–eval–print loop until the user quits.
///
/// # Errors
/// - propagates failures from handlers, such as an unwritable save directory
pub fn run_repl(session: &mut MemoSession, config: &MemoConfig, switches: &mut Switches) -> Result<()> {
    let mut view = View::new();
    let mut input = ScriptInput::new();

    loop {
        let prompt = format!(
            "[{}: {} current]>> ",
            config.title,
            session.registry.list(ObjectiveFilter::Current).len()
        )
        .prompt_style()
        .to_string();

        let Ok(input_event) = input.read_line(&prompt) else {
            view.push(ViewItem::Error("Failed to read input. Try again.".to_string()));
            view.flush();
            continue;
        };

        let line = match input_event {
            InputEvent::Line(line) => line,
            InputEvent::Eof => ":quit".to_string(),
            InputEvent::Interrupted => {
                view.push(ViewItem::EngineMessage("Command canceled.".to_string()));
                view.flush();
                continue;
            },
        };

        match parse_host_command(&line) {
            HostCommand::Script(text) if text.is_empty() => {},
            HostCommand::Script(text) => {
                if run_script_line(session, config, switches, &text) == DispatchEffect::OpenMemo {
                    view.push(ViewItem::memo_screen(&session.registry, &config.title, ObjectiveFilter::All));
                }
            },
            HostCommand::Help => view.push(ViewItem::Help),
            HostCommand::Key(key) => key_handler(session, config, &mut view, &key),
            HostCommand::Memos(filter) => {
                view.push(ViewItem::memo_screen(&session.registry, &config.title, filter));
            },
            HostCommand::Signals => view.push(ViewItem::Signals(switches.iter().collect())),
            HostCommand::Save(slot) => save_handler(session, &mut view, &slot)?,
            HostCommand::Load(slot) => load_handler(session, config, &mut view, &slot),
            HostCommand::ListSaves => list_saves_handler(&mut view),
            HostCommand::NewSession => new_session_handler(session, &mut view),
            HostCommand::Invalid(text) => {
                view.push(ViewItem::Error(format!("Unknown host command \"{text}\". Try :help.")));
            },
            HostCommand::Quit => {
                quit_handler(session);
                poll_notifications(session, &mut view);
                view.flush();
                break;
            },
        }

        poll_notifications(session, &mut view);
        view.flush();
    }
    Ok(())
}

/// Move pending notifications into the view (the per-frame poll).
pub fn poll_notifications(session: &mut MemoSession, view: &mut View) {
    for message in session.notifications.drain() {
        view.push(ViewItem::Notification(message));
    }
}

/// Simulated key press: opens the memo screen if the hotkey gate allows it.
pub fn key_handler(session: &MemoSession, config: &MemoConfig, view: &mut View, key: &str) {
    if session.hotkey_opens_memo(key, config) {
        info!("memo screen opened by hotkey '{key}'");
        view.push(ViewItem::memo_screen(&session.registry, &config.title, ObjectiveFilter::All));
    } else if session.memo_key_enabled {
        view.push(ViewItem::EngineMessage(format!("'{key}' does nothing here.")));
    } else {
        view.push(ViewItem::EngineMessage("The memo key is disabled right now.".to_string()));
    }
}
