#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const MEMO_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod command;
pub mod config;
pub mod data_paths;
pub mod dispatch;
pub mod notification;
pub mod registry;
pub mod repl;
pub mod save_files;
pub mod session;
pub mod signals;
pub mod style;
pub mod view;

// Re-exports for convenience
pub use command::{Command, ScriptLine, parse_command, tokenize};
pub use config::{MemoConfig, load_config};
pub use dispatch::{DispatchEffect, dispatch, run_script_line};
pub use memo_data::{CascadePolicy, Objective, ObjectiveFilter, Outcome, SubObjective};
pub use notification::NotificationQueue;
pub use registry::ObjectiveRegistry;
pub use repl::run_repl;
pub use session::MemoSession;
pub use signals::{SignalStore, Switches};
pub use view::{View, ViewItem};
