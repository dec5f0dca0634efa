//! Styling helpers for terminal output.
//!
//! The [`MemoStyle`] trait applies ANSI styling via the `colored` crate to
//! string literals and owned strings alike.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to memo output.
pub trait MemoStyle {
    fn title_style(&self) -> ColoredString;
    fn section_style(&self) -> ColoredString;
    fn alias_style(&self) -> ColoredString;
    fn alias_done_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn sub_objective_style(&self) -> ColoredString;
    fn inactive_style(&self) -> ColoredString;
    fn notification_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
}

impl MemoStyle for &str {
    fn title_style(&self) -> ColoredString {
        self.bold().truecolor(223, 77, 10).underline()
    }
    fn section_style(&self) -> ColoredString {
        let bracketed = format!("[{self}]");
        bracketed.truecolor(75, 80, 75)
    }
    fn alias_style(&self) -> ColoredString {
        self.truecolor(220, 40, 220)
    }
    fn alias_done_style(&self) -> ColoredString {
        self.truecolor(220, 40, 220).strikethrough()
    }
    fn description_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn sub_objective_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn inactive_style(&self) -> ColoredString {
        self.dimmed()
    }
    fn notification_style(&self) -> ColoredString {
        self.italic().truecolor(230, 230, 30)
    }
    fn prompt_style(&self) -> ColoredString {
        self.truecolor(110, 220, 110)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
}

impl MemoStyle for String {
    fn title_style(&self) -> ColoredString {
        self.as_str().title_style()
    }
    fn section_style(&self) -> ColoredString {
        self.as_str().section_style()
    }
    fn alias_style(&self) -> ColoredString {
        self.as_str().alias_style()
    }
    fn alias_done_style(&self) -> ColoredString {
        self.as_str().alias_done_style()
    }
    fn description_style(&self) -> ColoredString {
        self.as_str().description_style()
    }
    fn sub_objective_style(&self) -> ColoredString {
        self.as_str().sub_objective_style()
    }
    fn inactive_style(&self) -> ColoredString {
        self.as_str().inactive_style()
    }
    fn notification_style(&self) -> ColoredString {
        self.as_str().notification_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
}
