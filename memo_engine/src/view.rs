//! View module.
//!
//! Handlers push [`ViewItem`]s while a line is processed; [`View::flush`] renders
//! them together afterwards. Notifications always come last so they read like
//! the transient toasts a game would show over the screen.

use colored::Colorize;
use memo_data::{Objective, ObjectiveFilter};
use variantly::Variantly;

use crate::registry::ObjectiveRegistry;
use crate::save_files::{SaveFileEntry, SaveFileStatus};
use crate::signals::SignalId;
use crate::style::MemoStyle;

const ICON_NOTICE: &str = "\u{270E}"; // ✎
const ICON_ERROR: &str = "⚠︎"; // U+26A0 U+FE0E
const ICON_ENGINE: &str = "⚙";
const SUB_BULLET: &str = "»";

/// Display snapshot of one sub-objective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubLine {
    pub text: String,
    pub active: bool,
}

/// Display snapshot of one objective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoLine {
    pub alias: String,
    pub description: String,
    pub active: bool,
    pub subs: Vec<SubLine>,
}

impl From<&Objective> for MemoLine {
    fn from(objective: &Objective) -> Self {
        Self {
            alias: objective.alias.clone(),
            description: objective.description.clone(),
            active: objective.active,
            subs: objective
                .sub_objectives
                .values()
                .map(|sub| SubLine {
                    text: sub.data.clone(),
                    active: sub.active,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Variantly)]
pub enum ViewItem {
    MemoScreen {
        title: String,
        filter: ObjectiveFilter,
        memos: Vec<MemoLine>,
    },
    Notification(String),
    Signals(Vec<(SignalId, bool)>),
    SavedGames(Vec<SaveFileEntry>),
    EngineMessage(String),
    Error(String),
    Help,
}

impl ViewItem {
    /// Snapshot the registry as a memo screen.
    pub fn memo_screen(registry: &ObjectiveRegistry, title: &str, filter: ObjectiveFilter) -> Self {
        ViewItem::MemoScreen {
            title: title.to_string(),
            filter,
            memos: registry.list(filter).into_iter().map(MemoLine::from).collect(),
        }
    }
}

/// Frame buffer for terminal output.
#[derive(Debug, Clone, Default)]
pub struct View {
    pub items: Vec<ViewItem>,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Compose the current frame without printing it.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        for item in self.items.iter().filter(|item| !item.is_notification()) {
            match item {
                ViewItem::MemoScreen { title, filter, memos } => memo_screen(&mut lines, title, *filter, memos),
                ViewItem::Signals(values) => signals(&mut lines, values),
                ViewItem::SavedGames(entries) => saved_games(&mut lines, entries),
                ViewItem::EngineMessage(msg) => lines.push(format!("{ICON_ENGINE:<4}{msg}")),
                ViewItem::Error(msg) => lines.push(format!("{:<4}{}", ICON_ERROR.error_style(), msg.error_style())),
                ViewItem::Help => help(&mut lines),
                ViewItem::Notification(_) => {},
            }
        }

        let notices: Vec<_> = self
            .items
            .iter()
            .filter_map(|item| match item {
                ViewItem::Notification(msg) => Some(msg),
                _ => None,
            })
            .collect();
        if !notices.is_empty() {
            lines.push(String::new());
            for msg in notices {
                lines.push(format!("{:<4}{}", ICON_NOTICE.yellow(), msg.notification_style()));
            }
        }
        lines.join("\n")
    }

    /// Print the frame and clear the buffer.
    pub fn flush(&mut self) {
        if self.items.is_empty() {
            return;
        }
        println!("{}\n", self.render());
        self.items.clear();
    }
}

fn memo_screen(lines: &mut Vec<String>, title: &str, filter: ObjectiveFilter, memos: &[MemoLine]) {
    let filter_name = match filter {
        ObjectiveFilter::Current => "current",
        ObjectiveFilter::Completed => "completed",
        ObjectiveFilter::All => "all",
    };
    lines.push(format!("{} {}", title.title_style(), filter_name.section_style()));
    if memos.is_empty() {
        lines.push("    (nothing to show)".inactive_style().to_string());
        return;
    }
    for memo in memos {
        lines.push(String::new());
        if memo.active {
            lines.push(memo.alias.alias_style().to_string());
            lines.push(format!("  {}", memo.description.description_style()));
        } else {
            lines.push(memo.alias.alias_done_style().to_string());
            lines.push(format!("  {}", memo.description.inactive_style()));
        }
        for sub in &memo.subs {
            let text = format!("{SUB_BULLET} {}", sub.text);
            if sub.active && memo.active {
                lines.push(format!("    {}", text.sub_objective_style()));
            } else {
                lines.push(format!("    {}", text.inactive_style()));
            }
        }
    }
}

fn signals(lines: &mut Vec<String>, values: &[(SignalId, bool)]) {
    lines.push("signals".section_style().to_string());
    if values.is_empty() {
        lines.push("    (no signals written)".inactive_style().to_string());
    }
    for (id, value) in values {
        let shown = if *value { "ON".green() } else { "OFF".red() };
        lines.push(format!("    #{id:<4} {shown}"));
    }
}

fn saved_games(lines: &mut Vec<String>, entries: &[SaveFileEntry]) {
    lines.push("saved games".section_style().to_string());
    if entries.is_empty() {
        lines.push("    (no saved games found)".inactive_style().to_string());
    }
    for entry in entries {
        let status = match &entry.status {
            SaveFileStatus::Ready => "ready".green().to_string(),
            SaveFileStatus::VersionMismatch { save_version, .. } => {
                format!("from v{save_version}").yellow().to_string()
            },
            SaveFileStatus::Corrupted { message } => message.error_style().to_string(),
        };
        let count = entry
            .objective_count
            .map_or_else(|| "?".to_string(), |count| count.to_string());
        lines.push(format!("    {:<16} {count:>3} memos  {status}", entry.slot));
    }
}

fn help(lines: &mut Vec<String>) {
    lines.push("help".section_style().to_string());
    for (usage, effect) in HELP_LINES {
        lines.push(format!("    {usage:<44}{}", effect.inactive_style()));
    }
}

const HELP_LINES: &[(&str, &str)] = &[
    ("openmemo", "open the memo screen"),
    ("enablememokey true|false", "allow the hotkey to open the memo screen"),
    ("addmain id alias \"description\"", "add an objective"),
    ("addsub id sub_alias \"text\"", "add a sub-objective"),
    ("donemain id [fail]", "complete an objective"),
    ("donesub id sub_alias [fail]", "complete a sub-objective"),
    ("setmain id alias|= \"description\"|=", "change alias and/or description"),
    ("setsub id sub_alias \"text\"", "change sub-objective text"),
    ("checkmain id", "write the active flag to the signal"),
    ("checksub id sub_alias", "write the sub-objective active flag"),
    ("checksuccess id", "write the success flag to the signal"),
    (":key name", "press a key"),
    (":memos [current|completed|all]", "show the memo screen"),
    (":signals", "list written signals"),
    (":save slot / :load slot / :saves", "manage saved sessions"),
    (":new", "start a fresh session"),
    (":quit", "leave"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    fn sample_registry() -> ObjectiveRegistry {
        let mut registry = ObjectiveRegistry::new();
        registry.add_objective("q1", "Find the key", "Explore the dungeon");
        registry.add_sub_objective("q1", "s1", "Find a torch");
        registry.add_objective("q2", "Smith", "Talk to the smith");
        registry.complete_objective("q2", false);
        registry
    }

    #[test]
    fn memo_screen_lists_newest_first_with_bullets() {
        plain();
        let mut view = View::new();
        view.push(ViewItem::memo_screen(&sample_registry(), "Memos", ObjectiveFilter::All));
        let text = view.render();
        let smith = text.find("Smith").unwrap();
        let key = text.find("Find the key").unwrap();
        assert!(smith < key);
        assert!(text.contains("» Find a torch"));
        assert!(text.contains("Talk to the smith \u{2713}"));
    }

    #[test]
    fn notifications_render_last() {
        plain();
        let mut view = View::new();
        view.push(ViewItem::Notification("New memo added!".into()));
        view.push(ViewItem::EngineMessage("Saved.".into()));
        let text = view.render();
        assert!(text.find("Saved.").unwrap() < text.find("New memo added!").unwrap());
    }

    #[test]
    fn empty_screen_says_so() {
        plain();
        let mut view = View::new();
        view.push(ViewItem::memo_screen(&ObjectiveRegistry::new(), "Memos", ObjectiveFilter::Current));
        assert!(view.render().contains("nothing to show"));
    }

    #[test]
    fn flush_clears_items() {
        plain();
        let mut view = View::new();
        view.push(ViewItem::Help);
        view.flush();
        assert!(view.is_empty());
    }
}
