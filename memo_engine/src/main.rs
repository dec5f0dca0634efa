#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Memo **
//! Terminal host for the objective tracker: type script commands, watch memos change.

use memo_engine::data_paths::data_path;
use memo_engine::style::MemoStyle;
use memo_engine::{MEMO_VERSION, MemoSession, Switches, load_config, run_repl};

use anyhow::Result;
use log::info;

fn main() -> Result<()> {
    env_logger::init();
    info!("Start: memo engine v{MEMO_VERSION}");

    let config = load_config(&data_path("memo.toml"));
    let mut session = MemoSession::new(&config);
    let mut switches = Switches::new();

    println!("{:^60}", config.title.title_style());
    println!("Type script commands (e.g. addmain q1 \"Find the key\" \"Explore the dungeon\") or :help.\n");

    run_repl(&mut session, &config, &mut switches)
}
