//! Save-slot discovery and session snapshots.
//!
//! A snapshot is the serde form of [`MemoSession`] written as RON. Slot files are
//! named `<slot>-memo-<version>.ron` so older saves stay recognizable.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result, bail};
use log::{info, warn};

use crate::{MEMO_VERSION, MemoSession};

pub const SAVE_DIR: &str = "saved_games";
const SLOT_MARKER: &str = "-memo-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlot {
    pub slot: String,
    pub version: String,
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveFileStatus {
    Ready,
    VersionMismatch { save_version: String, current_version: String },
    Corrupted { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFileEntry {
    pub slot: String,
    pub version: String,
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    /// Number of objectives in the snapshot, if it could be read.
    pub objective_count: Option<usize>,
    pub status: SaveFileStatus,
}

/// Reject slot names that could reach outside the save folder.
///
/// # Errors
/// Returns an error if `slot` is empty, contains a path separator, or is a
/// relative path component such as `..`.
pub fn check_slot_name(slot: &str) -> Result<()> {
    if slot.is_empty() || slot == "." || slot.contains(['/', '\\']) || slot.contains("..") {
        bail!("invalid save slot name '{slot}'");
    }
    Ok(())
}

/// File path for a slot saved by this version.
pub fn slot_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("{slot}{SLOT_MARKER}{MEMO_VERSION}.ron"))
}

/// Write `session` to a slot in `dir`, creating the directory if needed.
///
/// # Errors
/// Returns an error if serialization or any filesystem operation fails.
pub fn save_session(dir: &Path, slot: &str, session: &MemoSession) -> Result<PathBuf> {
    check_slot_name(slot)?;
    let ron = ron::ser::to_string(session).context("converting MemoSession to 'ron' format")?;
    fs::create_dir_all(dir).with_context(|| format!("creating save folder {}", dir.display()))?;
    let path = slot_path(dir, slot);
    fs::write(&path, ron).with_context(|| format!("writing save file {}", path.display()))?;
    info!("memo session saved to '{}'", path.display());
    Ok(path)
}

/// Read a snapshot back into a session with an empty notification queue.
///
/// Structural problems in the restored objectives are logged, not fatal.
///
/// # Errors
/// Returns an error if the file cannot be read or deserialized.
pub fn load_session(path: &Path) -> Result<MemoSession> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading save file {}", path.display()))?;
    let session =
        ron::from_str::<MemoSession>(&raw).with_context(|| format!("parsing save file {}", path.display()))?;
    if session.version != MEMO_VERSION {
        warn!(
            "save '{}' was written by v{}, current version is v{MEMO_VERSION}",
            path.display(),
            session.version
        );
    }
    for problem in session.registry.validate() {
        warn!("save '{}': {problem}", path.display());
    }
    info!(
        "memo session loaded from '{}' ({} objectives)",
        path.display(),
        session.registry.len()
    );
    Ok(session)
}

/// Find the newest file for `slot` in `dir`, preferring the current version.
///
/// # Errors
/// Returns an error if the directory cannot be enumerated.
pub fn find_slot(dir: &Path, slot: &str) -> Result<Option<SaveSlot>> {
    check_slot_name(slot)?;
    let mut matches: Vec<_> = collect_save_slots(dir)?
        .into_iter()
        .filter(|candidate| candidate.slot == slot)
        .collect();
    matches.sort_by(|a, b| {
        (a.version == MEMO_VERSION)
            .cmp(&(b.version == MEMO_VERSION))
            .then(a.modified.cmp(&b.modified))
    });
    Ok(matches.pop())
}

/// Discover save slot files stored in `dir`.
///
/// # Errors
/// Returns an error if the directory contents cannot be read or enumerated.
pub fn collect_save_slots(dir: &Path) -> Result<Vec<SaveSlot>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut slots = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry.with_context(|| format!("enumerating {}", dir.display()))?;
        if let Some(slot) = slot_from_entry(&entry) {
            slots.push(slot);
        }
    }
    slots.sort_by(|a, b| a.slot.cmp(&b.slot).then(a.version.cmp(&b.version)));
    Ok(slots)
}

/// Build descriptive entries for save files located in `dir`, newest first.
///
/// # Errors
/// Returns an error if reading the directory fails.
pub fn build_save_entries(dir: &Path) -> Result<Vec<SaveFileEntry>> {
    let slots = collect_save_slots(dir)?;
    let mut entries: Vec<_> = slots.into_iter().map(entry_for_slot).collect();
    entries.sort_by(|a, b| b.modified.cmp(&a.modified).then(a.slot.cmp(&b.slot)));
    Ok(entries)
}

fn entry_for_slot(slot: SaveSlot) -> SaveFileEntry {
    let mut version = slot.version.clone();
    let (objective_count, status) = match fs::read_to_string(&slot.path) {
        Ok(raw) => match ron::from_str::<MemoSession>(&raw) {
            Ok(session) => {
                version.clone_from(&session.version);
                let status = if session.version == MEMO_VERSION {
                    SaveFileStatus::Ready
                } else {
                    SaveFileStatus::VersionMismatch {
                        save_version: session.version.clone(),
                        current_version: MEMO_VERSION.to_string(),
                    }
                };
                (Some(session.registry.len()), status)
            },
            Err(err) => {
                warn!("failed to parse save '{}' ({}): {}", slot.slot, slot.path.display(), err);
                (
                    None,
                    SaveFileStatus::Corrupted {
                        message: format!("parse error: {}", trim_error(&err)),
                    },
                )
            },
        },
        Err(err) => {
            warn!("failed to read save '{}' ({}): {}", slot.slot, slot.path.display(), err);
            (
                None,
                SaveFileStatus::Corrupted {
                    message: format!("read error: {}", trim_error(&err)),
                },
            )
        },
    };

    SaveFileEntry {
        slot: slot.slot,
        version,
        path: slot.path,
        modified: slot.modified,
        objective_count,
        status,
    }
}

fn slot_from_entry(entry: &fs::DirEntry) -> Option<SaveSlot> {
    let path = entry.path();
    if !path.is_file() {
        return None;
    }
    if path.extension().and_then(|ext| ext.to_str()) != Some("ron") {
        return None;
    }
    let stem = path.file_stem().and_then(|stem| stem.to_str())?;
    let (slot, version) = stem.rsplit_once(SLOT_MARKER)?;
    if slot.is_empty() {
        return None;
    }
    let modified = entry.metadata().ok().and_then(|meta| meta.modified().ok());
    Some(SaveSlot {
        slot: slot.to_string(),
        version: version.to_string(),
        path,
        modified,
    })
}

/// Clamp verbose error messages to a readable length.
fn trim_error(err: &impl ToString) -> String {
    let message = err.to_string();
    if message.chars().count() <= 120 {
        return message;
    }
    let mut trimmed: String = message.chars().take(117).collect();
    trimmed.push_str("...");
    trimmed
}
