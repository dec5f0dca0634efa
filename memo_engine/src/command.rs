//! Command module
//!
//! Turns one line of host script text into a typed [`Command`].
//! Parsing is permissive: malformed input degrades to [`Command::Unknown`]
//! instead of failing the script that issued it.
use log::{debug, warn};
use thiserror::Error;
use variantly::Variantly;

/// Literal used by `setmain` to leave a field unchanged.
pub const KEEP_FIELD: &str = "=";

/// Script command names understood by the dispatcher.
pub const SCRIPT_COMMANDS: &[&str] = &[
    "openmemo",
    "enablememokey",
    "addmain",
    "addsub",
    "donemain",
    "donesub",
    "setmain",
    "setsub",
    "checkmain",
    "checksub",
    "checksuccess",
];

/// A tokenized script instruction: command name plus positional arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptLine {
    pub command: String,
    pub args: Vec<String>,
}

/// Split `text` into a command name and arguments.
///
/// Spaces separate tokens unless they fall between quote characters. The quote
/// characters toggle the quoted span and are dropped from the output. Empty
/// tokens are never emitted, so runs of spaces collapse. An unbalanced quote
/// simply leaves the rest of the line in one token.
pub fn tokenize(text: &str, open_quote: char, close_quote: char) -> ScriptLine {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut quoted = false;

    for ch in text.chars() {
        if ch == ' ' && !quoted {
            if !word.is_empty() {
                tokens.push(std::mem::take(&mut word));
            }
        } else if ch == open_quote || ch == close_quote {
            quoted = !quoted;
        } else {
            word.push(ch);
        }
    }
    if !word.is_empty() {
        tokens.push(word);
    }

    let mut tokens = tokens.into_iter();
    ScriptLine {
        command: tokens.next().unwrap_or_default(),
        args: tokens.collect(),
    }
}

/// Reasons a script line could not be turned into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unrecognized command '{0}'")]
    UnknownCommand(String),
    #[error("'{command}' is missing its {argument} argument")]
    MissingArgument { command: String, argument: &'static str },
}

/// Commands a host script can issue.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Command {
    OpenMemo,
    EnableMemoKey(bool),
    AddMain {
        id: String,
        alias: String,
        description: String,
    },
    AddSub {
        id: String,
        sub_alias: String,
        data: String,
    },
    DoneMain {
        id: String,
        fail: bool,
    },
    DoneSub {
        id: String,
        sub_alias: String,
        fail: bool,
    },
    /// `None` leaves the field as it is.
    SetMain {
        id: String,
        alias: Option<String>,
        description: Option<String>,
    },
    SetSub {
        id: String,
        sub_alias: String,
        data: String,
    },
    CheckMain {
        id: String,
    },
    CheckSub {
        id: String,
        sub_alias: String,
    },
    CheckSuccess {
        id: String,
    },
    Unknown,
}

impl Command {
    /// Build a command from a tokenized line.
    ///
    /// # Errors
    /// - the command name is not one of [`SCRIPT_COMMANDS`]
    /// - a required key argument (`id` or sub-objective alias) of a mutating command is absent
    pub fn from_line(line: &ScriptLine) -> Result<Command, CommandError> {
        let args = Args { line };
        let command = match line.command.as_str() {
            "openmemo" => Command::OpenMemo,
            "enablememokey" => Command::EnableMemoKey(args.get(0) == Some("true")),
            "addmain" => Command::AddMain {
                id: args.key(0, "id")?,
                alias: args.text(1),
                description: args.text(2),
            },
            "addsub" => Command::AddSub {
                id: args.key(0, "id")?,
                sub_alias: args.key(1, "sub-objective alias")?,
                data: args.text(2),
            },
            "donemain" => Command::DoneMain {
                id: args.key(0, "id")?,
                fail: args.fail_flag(1),
            },
            "donesub" => Command::DoneSub {
                id: args.key(0, "id")?,
                sub_alias: args.key(1, "sub-objective alias")?,
                fail: args.fail_flag(2),
            },
            "setmain" => Command::SetMain {
                id: args.key(0, "id")?,
                alias: args.field(1),
                description: args.field(2),
            },
            "setsub" => Command::SetSub {
                id: args.key(0, "id")?,
                sub_alias: args.key(1, "sub-objective alias")?,
                data: args.text(2),
            },
            // Queries always answer: a missing key asks about nothing and reads false.
            "checkmain" => Command::CheckMain { id: args.text(0) },
            "checksub" => Command::CheckSub {
                id: args.text(0),
                sub_alias: args.text(1),
            },
            "checksuccess" => Command::CheckSuccess { id: args.text(0) },
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

/// Positional argument access for one script line.
struct Args<'a> {
    line: &'a ScriptLine,
}

impl Args<'_> {
    fn get(&self, idx: usize) -> Option<&str> {
        self.line.args.get(idx).map(String::as_str)
    }

    fn key(&self, idx: usize, argument: &'static str) -> Result<String, CommandError> {
        self.get(idx)
            .map(str::to_string)
            .ok_or_else(|| CommandError::MissingArgument {
                command: self.line.command.clone(),
                argument,
            })
    }

    /// Missing text arguments read as empty.
    fn text(&self, idx: usize) -> String {
        self.get(idx).unwrap_or_default().to_string()
    }

    fn field(&self, idx: usize) -> Option<String> {
        self.get(idx).filter(|value| *value != KEEP_FIELD).map(str::to_string)
    }

    /// Any present value other than `false` (in any case) marks a failure,
    /// including `0`, `no` and `off`. Absence is success.
    fn fail_flag(&self, idx: usize) -> bool {
        self.get(idx).is_some_and(|value| !value.eq_ignore_ascii_case("false"))
    }
}

/// Tokenize and parse a script instruction, falling back to [`Command::Unknown`].
pub fn parse_command(text: &str, open_quote: char, close_quote: char) -> Command {
    let line = tokenize(text, open_quote, close_quote);
    match Command::from_line(&line) {
        Ok(command) => command,
        Err(err @ CommandError::UnknownCommand(_)) => {
            debug!("ignoring script line \"{text}\": {err}");
            Command::Unknown
        },
        Err(err) => {
            warn!("ignoring script line \"{text}\": {err}");
            Command::Unknown
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> ScriptLine {
        tokenize(text, '"', '"')
    }

    #[test]
    fn quoted_arguments_keep_spaces() {
        let parsed = line(r#"addmain "m1" "Alias One" "Go there""#);
        assert_eq!(parsed.command, "addmain");
        assert_eq!(parsed.args, vec!["m1", "Alias One", "Go there"]);
    }

    #[test]
    fn consecutive_spaces_collapse() {
        let parsed = line("  donemain   q1    fail  ");
        assert_eq!(parsed.command, "donemain");
        assert_eq!(parsed.args, vec!["q1", "fail"]);
    }

    #[test]
    fn unbalanced_quote_runs_to_end_of_line() {
        let parsed = line(r#"setsub m1 s1 "unterminated text here"#);
        assert_eq!(parsed.command, "setsub");
        assert_eq!(parsed.args, vec!["m1", "s1", "unterminated text here"]);
    }

    #[test]
    fn distinct_quote_characters_both_toggle() {
        let parsed = tokenize("addsub q1 s1 [Light the torch]", '[', ']');
        assert_eq!(parsed.args, vec!["q1", "s1", "Light the torch"]);
    }

    #[test]
    fn quotes_inside_a_word_are_dropped() {
        let parsed = line(r#"addmain q"1" a"b c""#);
        assert_eq!(parsed.args, vec!["q1", "ab c"]);
    }

    #[test]
    fn empty_quotes_produce_no_token() {
        let parsed = line(r#"setmain q1 "" "New text""#);
        assert_eq!(parsed.args, vec!["q1", "New text"]);
    }

    #[test]
    fn blank_input_is_an_empty_command() {
        let parsed = line("   ");
        assert!(parsed.command.is_empty());
        assert!(parsed.args.is_empty());
    }

    #[test]
    fn setmain_sentinel_becomes_none() {
        let command = Command::from_line(&line(r#"setmain q1 = "New text""#)).unwrap();
        assert_eq!(
            command,
            Command::SetMain {
                id: "q1".into(),
                alias: None,
                description: Some("New text".into()),
            }
        );
    }

    #[test]
    fn fail_flag_parsing() {
        let fail = |text: &str| match Command::from_line(&line(text)).unwrap() {
            Command::DoneSub { fail, .. } => fail,
            other => panic!("unexpected command {other:?}"),
        };
        assert!(!fail("donesub q1 s1"));
        assert!(fail("donesub q1 s1 fail"));
        assert!(fail("donesub q1 s1 true"));
        assert!(!fail("donesub q1 s1 FALSE"));
        assert!(!fail("donesub q1 s1 false"));
        for value in ["0", "no", "off", "yes", "1"] {
            assert!(fail(&format!("donesub q1 s1 {value}")), "{value} counts as failure");
        }
    }

    #[test]
    fn enable_memo_key_requires_literal_true() {
        let parsed = |text: &str| Command::from_line(&line(text)).unwrap();
        assert_eq!(parsed("enablememokey true"), Command::EnableMemoKey(true));
        assert_eq!(parsed("enablememokey True"), Command::EnableMemoKey(false));
        assert_eq!(parsed("enablememokey"), Command::EnableMemoKey(false));
    }

    #[test]
    fn missing_key_argument_is_reported() {
        let err = Command::from_line(&line("addsub q1")).unwrap_err();
        assert!(matches!(err, CommandError::MissingArgument { argument, .. } if argument == "sub-objective alias"));
    }

    #[test]
    fn missing_text_defaults_to_empty() {
        let command = Command::from_line(&line("addmain q1 Key")).unwrap();
        assert_eq!(
            command,
            Command::AddMain {
                id: "q1".into(),
                alias: "Key".into(),
                description: String::new(),
            }
        );
    }

    #[test]
    fn unknown_and_malformed_lines_degrade() {
        assert!(parse_command("ShowPicture 1 2 3", '"', '"').is_unknown());
        assert!(parse_command("donesub q1", '"', '"').is_unknown());
        assert!(parse_command("", '"', '"').is_unknown());
    }

    #[test]
    fn check_commands_without_keys_still_query() {
        let parsed = |text: &str| parse_command(text, '"', '"');
        assert_eq!(parsed("checkmain"), Command::CheckMain { id: String::new() });
        assert_eq!(parsed("checksuccess"), Command::CheckSuccess { id: String::new() });
        assert_eq!(
            parsed("checksub q1"),
            Command::CheckSub {
                id: "q1".into(),
                sub_alias: String::new(),
            }
        );
    }

    #[test]
    fn every_script_command_parses() {
        for name in SCRIPT_COMMANDS {
            let command = parse_command(&format!("{name} q1 s1 text"), '"', '"');
            assert!(!command.is_unknown(), "{name} should parse");
        }
    }
}
