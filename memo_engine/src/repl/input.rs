//! Line input for the memo host.
//!
//! An interactive terminal gets a rustyline editor that completes script
//! command names, host commands and `:load` slot names, with history kept under
//! the user's data directory. Piped input, or an editor that breaks mid-session,
//! is read straight from stdin.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::command::SCRIPT_COMMANDS;
use crate::save_files::{SAVE_DIR, collect_save_slots};

/// One read from the terminal.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

pub const HOST_COMMANDS: &[&str] = &[
    ":help", ":key", ":memos", ":signals", ":save", ":load", ":saves", ":new", ":quit",
];

const LOAD_PREFIX: &str = ":load ";

lazy_static! {
    /// Every completable command word, sorted.
    static ref COMMAND_TERMS: Vec<&'static str> = {
        let mut terms: Vec<&'static str> = SCRIPT_COMMANDS.iter().chain(HOST_COMMANDS).copied().collect();
        terms.sort_unstable();
        terms
    };
}

type ReplEditor = rustyline::Editor<MemoHelper, DefaultHistory>;

/// Completion candidates for the text typed so far.
///
/// Returns the byte offset where the replacement starts and the candidates.
fn completions(typed: &str, slots: impl FnOnce() -> Vec<String>) -> (usize, Vec<String>) {
    let start = typed.len() - typed.trim_start().len();
    let word = &typed[start..];
    if word.is_empty() {
        return (start, Vec::new());
    }
    if let Some(partial) = word.strip_prefix(LOAD_PREFIX) {
        let partial = partial.trim_start();
        let offset = typed.len() - partial.len();
        let mut names: Vec<String> = slots().into_iter().filter(|slot| slot.starts_with(partial)).collect();
        names.dedup();
        return (offset, names);
    }
    let lower = word.to_lowercase();
    let terms = COMMAND_TERMS
        .iter()
        .filter(|term| term.starts_with(lower.as_str()))
        .map(|term| (*term).to_string())
        .collect();
    (start, terms)
}

fn saved_slot_names() -> Vec<String> {
    match collect_save_slots(Path::new(SAVE_DIR)) {
        Ok(slots) => slots.into_iter().map(|slot| slot.slot).collect(),
        Err(err) => {
            warn!("no slot completion: {err:#}");
            Vec::new()
        },
    }
}

struct MemoHelper;

impl Completer for MemoHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (offset, names) = completions(&line[..pos], saved_slot_names);
        let pairs = names
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
            })
            .collect();
        Ok((offset, pairs))
    }
}

impl Hinter for MemoHelper {
    type Hint = String;
}
impl Highlighter for MemoHelper {}
impl Validator for MemoHelper {}
impl Helper for MemoHelper {}

/// Reads host lines, preferring the line editor while it keeps working.
pub struct ScriptInput {
    editor: Option<ReplEditor>,
    history: Option<PathBuf>,
}

impl Default for ScriptInput {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptInput {
    pub fn new() -> Self {
        let history = history_file();
        let editor = if io::stdin().is_terminal() {
            open_editor(history.as_deref())
        } else {
            info!("stdin is not a terminal, reading plain lines");
            None
        };
        Self { editor, history }
    }

    /// Read one line, dropping to plain stdin if the editor fails.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        if let Some(editor) = self.editor.as_mut() {
            match editor.readline(prompt) {
                Ok(line) => {
                    self.remember(&line);
                    return Ok(InputEvent::Line(line));
                },
                Err(ReadlineError::Interrupted) => return Ok(InputEvent::Interrupted),
                Err(ReadlineError::Eof) => return Ok(InputEvent::Eof),
                Err(err) => {
                    warn!("line editor failed ({err}), reading plain stdin from now on");
                    self.editor = None;
                },
            }
        }
        read_plain_line(prompt)
    }

    fn remember(&mut self, line: &str) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        if line.trim().is_empty() {
            return;
        }
        if let Err(err) = editor.add_history_entry(line) {
            warn!("history entry dropped: {err}");
        }
        if let Some(path) = self.history.as_deref()
            && let Err(err) = editor.save_history(path)
        {
            warn!("could not write history to {}: {err}", path.display());
        }
    }
}

fn open_editor(history: Option<&Path>) -> Option<ReplEditor> {
    let mut editor = match ReplEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            warn!("line editor unavailable ({err}), reading plain stdin");
            return None;
        },
    };
    editor.set_helper(Some(MemoHelper));
    if let Some(path) = history.filter(|path| path.exists())
        && let Err(err) = editor.load_history(path)
    {
        warn!("could not read history from {}: {err}", path.display());
    }
    info!("line editor ready");
    Some(editor)
}

fn read_plain_line(prompt: &str) -> io::Result<InputEvent> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(InputEvent::Eof);
    }
    Ok(InputEvent::Line(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// History lives in `<data dir>/memo_engine/history.txt`; the folder is created on demand.
fn history_file() -> Option<PathBuf> {
    let dir = dirs::data_dir().or_else(dirs::data_local_dir)?.join("memo_engine");
    if let Err(err) = fs::create_dir_all(&dir) {
        warn!("no command history, cannot create {}: {err}", dir.display());
        return None;
    }
    Some(dir.join("history.txt"))
}
