//! End-to-end script runs through the public dispatcher.

use memo_engine::{
    CascadePolicy, DispatchEffect, MemoConfig, MemoSession, ObjectiveFilter, SignalStore, Switches, run_script_line,
};

fn run_all(session: &mut MemoSession, config: &MemoConfig, switches: &mut Switches, script: &[&str]) -> Vec<DispatchEffect> {
    script
        .iter()
        .map(|line| run_script_line(session, config, switches, line))
        .collect()
}

#[test]
fn chapter_script_drives_registry_and_signals() {
    let config = MemoConfig::default();
    let mut session = MemoSession::new(&config);
    let mut switches = Switches::new();

    let effects = run_all(
        &mut session,
        &config,
        &mut switches,
        &[
            r#"addmain q1 "Find the key" "Explore the dungeon""#,
            r#"addsub q1 s1 "Find a torch""#,
            r#"addsub q1 s2 "Light the torch""#,
            "donesub q1 s1",
            "checksub q1 s1",
            "openmemo",
        ],
    );
    assert_eq!(effects.last(), Some(&DispatchEffect::OpenMemo));
    assert!(!switches.signal(config.signal_id));

    run_script_line(&mut session, &config, &mut switches, "checksub q1 s2");
    assert!(switches.signal(config.signal_id));

    run_script_line(&mut session, &config, &mut switches, "donemain q1");
    run_script_line(&mut session, &config, &mut switches, "checksuccess q1");
    assert!(switches.signal(config.signal_id));

    assert_eq!(
        session.notifications.drain(),
        vec![
            "New memo added!",
            "Memo updated!",
            "Memo updated!",
            "Memo completed!",
            "Memo completed!",
        ]
    );
    assert_eq!(session.registry.list(ObjectiveFilter::Completed).len(), 1);
}

#[test]
fn checks_against_unknown_ids_write_false() {
    let config = MemoConfig::default();
    let mut session = MemoSession::new(&config);
    let mut switches = Switches::new();
    switches.set_signal(config.signal_id, true);

    run_script_line(&mut session, &config, &mut switches, "checkmain ghost");
    assert!(!switches.signal(config.signal_id));

    switches.set_signal(config.signal_id, true);
    run_script_line(&mut session, &config, &mut switches, "checksuccess ghost");
    assert!(!switches.signal(config.signal_id));

    switches.set_signal(config.signal_id, true);
    run_script_line(&mut session, &config, &mut switches, "checksub ghost s1");
    assert!(!switches.signal(config.signal_id));

    run_script_line(&mut session, &config, &mut switches, r#"addmain q1 "Find the key" "Explore""#);
    run_script_line(&mut session, &config, &mut switches, "checkmain q1");
    assert!(switches.signal(config.signal_id));
    run_script_line(&mut session, &config, &mut switches, "checkmain");
    assert!(!switches.signal(config.signal_id));
}

#[test]
fn cascade_toggle_from_config() {
    let config = MemoConfig::from_toml_str(r#"cascade = "on_failure""#).unwrap();
    let mut session = MemoSession::new(&config);
    let mut switches = Switches::new();

    run_all(
        &mut session,
        &config,
        &mut switches,
        &[
            r#"addmain q1 "Find the key" "Explore the dungeon""#,
            r#"addsub q1 s1 "Find a torch""#,
            "donemain q1 fail",
            "checksub q1 s1",
        ],
    );
    assert!(!switches.signal(config.signal_id));
    assert_eq!(session.registry.cascade(), CascadePolicy::OnFailure);
}

#[test]
fn malformed_lines_never_disturb_state() {
    let config = MemoConfig::default();
    let mut session = MemoSession::new(&config);
    let mut switches = Switches::new();

    run_script_line(&mut session, &config, &mut switches, r#"addmain q1 "Find the key" "Explore""#);
    let before = session.registry.clone();

    let effects = run_all(
        &mut session,
        &config,
        &mut switches,
        &[
            "",
            "   ",
            "donemain",
            "setsub q1",
            "ShowText \"hello there",
            "\"\"\"",
            "donesub q1 nope fail",
            "setmain nope = =",
        ],
    );
    assert!(effects.iter().all(|effect| *effect == DispatchEffect::None));
    assert_eq!(session.registry, before);
}
