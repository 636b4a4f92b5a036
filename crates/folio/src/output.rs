//! Colored terminal output on stderr.

use console::{Style, Term};

/// Color applied to a line.
#[derive(Clone, Copy)]
enum Tone {
    Plain,
    Success,
    Warning,
    Error,
    Heading,
}

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    label: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
        }
    }

    fn line(&self, tone: Tone, msg: &str) {
        let style = match tone {
            Tone::Plain => None,
            Tone::Success => Some(Style::new().green()),
            Tone::Warning => Some(Style::new().yellow()),
            Tone::Error => Some(Style::new().red()),
            Tone::Heading => Some(Style::new().cyan().bold()),
        };
        let text = style.map_or_else(|| msg.to_owned(), |s| s.apply_to(msg).to_string());
        let _ = self.term.write_line(&text);
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(Tone::Plain, msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        self.line(Tone::Success, msg);
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        self.line(Tone::Warning, msg);
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(Tone::Error, msg);
    }

    /// Print a section heading (cyan bold).
    pub(crate) fn heading(&self, msg: &str) {
        self.line(Tone::Heading, msg);
    }

    /// Print an indented `label: value` pair with a dimmed label.
    pub(crate) fn field(&self, label: &str, value: impl std::fmt::Display) {
        let _ = self
            .term
            .write_line(&format!("  {} {value}", self.label.apply_to(format!("{label}:"))));
    }
}
