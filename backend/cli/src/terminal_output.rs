//! Terminal helpers for the one-shot commands: status notes and a
//! two-column report.

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && std::env::var("TERM").map(|t| t != "dumb").unwrap_or(false)
}

#[derive(Debug, Clone, Copy)]
pub enum Note {
    Info,
    Ok,
    Warn,
    Error,
}

impl Note {
    fn marker(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Note::Info => (CYAN, "ℹ", "INFO"),
            Note::Ok => (GREEN, "✓", "OK"),
            Note::Warn => (YELLOW, "⚠", "WARN"),
            Note::Error => (RED, "✗", "ERROR"),
        }
    }
}

pub fn note_line(kind: Note, msg: &str, color: bool) -> String {
    let (code, symbol, plain) = kind.marker();
    if color {
        format!("{code}{BOLD}{symbol}{RESET} {msg}")
    } else {
        format!("{plain}: {msg}")
    }
}

/// Errors go to stderr, everything else to stdout.
pub fn note(kind: Note, msg: &str) {
    let line = note_line(kind, msg, supports_color());
    match kind {
        Note::Error => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}

/// Labels padded to a common width, values left aligned.
pub fn render_report(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| {
            let pad = width - label.chars().count();
            format!("  {label}{}  {value}\n", " ".repeat(pad))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_notes_have_prefix() {
        assert_eq!(note_line(Note::Warn, "careful", false), "WARN: careful");
        assert!(note_line(Note::Ok, "done", true).ends_with(" done"));
    }

    #[test]
    fn report_aligns_values() {
        let out = render_report(&[("Users", "3".into()), ("Downloads", "10".into())]);
        assert_eq!(out, "  Users      3\n  Downloads  10\n");
    }
}
