//! `repl::system` module
//!
//! Host handlers for session management: saving, loading, and quitting.

use std::path::Path;

use anyhow::Result;
use log::{info, warn};
use memo_data::ObjectiveFilter;

use crate::config::MemoConfig;
use crate::save_files::{SAVE_DIR, build_save_entries, check_slot_name, find_slot, load_session, save_session};
use crate::session::MemoSession;
use crate::view::{View, ViewItem};

/// Save the session to a named slot. Unusable slot names are reported, not saved.
///
/// # Errors
/// - on failure to serialize the session or write the save file
pub fn save_handler(session: &MemoSession, view: &mut View, slot: &str) -> Result<()> {
    if !slot_name_usable(view, slot) {
        return Ok(());
    }
    let path = save_session(Path::new(SAVE_DIR), slot, session)?;
    view.push(ViewItem::EngineMessage(format!("Memos saved as '{slot}' ({}).", path.display())));
    Ok(())
}

/// Replace the session with a saved one. Failures are reported, never fatal.
pub fn load_handler(session: &mut MemoSession, config: &MemoConfig, view: &mut View, slot: &str) {
    if !slot_name_usable(view, slot) {
        return;
    }
    let found = match find_slot(Path::new(SAVE_DIR), slot) {
        Ok(found) => found,
        Err(err) => {
            warn!("could not search for save '{slot}': {err:#}");
            None
        },
    };
    let Some(found) = found else {
        view.push(ViewItem::Error(format!("No saved memos named '{slot}'. Load aborted.")));
        return;
    };
    match load_session(&found.path) {
        Ok(mut loaded) => {
            loaded.registry.set_cascade(config.cascade);
            *session = loaded;
            info!("session replaced from save slot '{slot}'");
            view.push(ViewItem::EngineMessage(format!("Memos '{slot}' loaded.")));
        },
        Err(err) => {
            warn!("failed to load '{slot}': {err:#}");
            view.push(ViewItem::Error(format!("Unable to load '{slot}'. The save may be damaged.")));
        },
    }
}

fn slot_name_usable(view: &mut View, slot: &str) -> bool {
    match check_slot_name(slot) {
        Ok(()) => true,
        Err(err) => {
            warn!("{err}");
            view.push(ViewItem::Error(format!("'{slot}' can't be used as a save name.")));
            false
        },
    }
}

/// List saved sessions.
pub fn list_saves_handler(view: &mut View) {
    match build_save_entries(Path::new(SAVE_DIR)) {
        Ok(entries) => view.push(ViewItem::SavedGames(entries)),
        Err(err) => {
            warn!("failed to list saves: {err:#}");
            view.push(ViewItem::Error("Unable to read the saved games folder.".to_string()));
        },
    }
}

/// Start over with an empty session.
pub fn new_session_handler(session: &mut MemoSession, view: &mut View) {
    session.reset();
    view.push(ViewItem::EngineMessage("Started a fresh session.".to_string()));
}

/// Quit the host, logging a summary of the session.
pub fn quit_handler(session: &MemoSession) {
    info!(
        "quitting with {} current and {} completed memos",
        session.registry.list(ObjectiveFilter::Current).len(),
        session.registry.list(ObjectiveFilter::Completed).len()
    );
    for objective in session.registry.iter() {
        info!("* {} [{}] active={}", objective.id, objective.alias, objective.active);
    }
}
