//! Terminal output for listings.
//!
//! Colours are only used when stdout is a terminal.

use std::io::{stdout, Write};

use aliasctl_core::dialect::Dialect;
use aliasctl_core::error::Result;
use crossterm::queue;
use crossterm::style::Color::{DarkGreen, Yellow};
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::tty::IsTty;
use itertools::Itertools;

fn stdout_is_tty() -> bool {
    stdout().is_tty()
}

/// Writes `name = command` lines, sorted by name.
pub fn write_aliases(
    out: &mut impl Write,
    dialect: Dialect,
    aliases: &[(&str, &str)],
    colored: bool,
) -> Result<()> {
    writeln!(out, "Aliases for {dialect}:")?;

    if aliases.is_empty() {
        writeln!(out, "No aliases defined.")?;
        return Ok(());
    }

    for (name, command) in aliases.iter().sorted_by(|left, right| left.0.cmp(right.0)) {
        if colored {
            queue!(
                out,
                SetForegroundColor(DarkGreen),
                Print(name),
                ResetColor,
                Print(" = "),
                Print(command),
                Print("\n")
            )?;
        } else {
            writeln!(out, "{name} = {command}")?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Writes one entry per line, tagging the `current` one with `label`.
pub fn write_entries<'a>(
    out: &mut impl Write,
    title: &str,
    entries: impl IntoIterator<Item = &'a str>,
    current: Option<&str>,
    label: &str,
    colored: bool,
) -> Result<()> {
    writeln!(out, "{title}")?;

    for entry in entries {
        if Some(entry) != current {
            writeln!(out, "  {entry}")?;
        } else if colored {
            queue!(
                out,
                Print("  "),
                SetForegroundColor(Yellow),
                Print(format!("{entry} ({label})")),
                ResetColor,
                Print("\n")
            )?;
        } else {
            writeln!(out, "  {entry} ({label})")?;
        }
    }

    out.flush()?;
    Ok(())
}

pub fn print_aliases(dialect: Dialect, aliases: &[(&str, &str)]) -> Result<()> {
    write_aliases(&mut stdout(), dialect, aliases, stdout_is_tty())
}

pub fn print_entries<'a>(
    title: &str,
    entries: impl IntoIterator<Item = &'a str>,
    current: Option<&str>,
    label: &str,
) -> Result<()> {
    write_entries(&mut stdout(), title, entries, current, label, stdout_is_tty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_aliases(aliases: &[(&str, &str)]) -> String {
        let mut out = Vec::new();
        write_aliases(&mut out, Dialect::Bash, aliases, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_aliases_sorted_by_name() {
        assert_eq!(
            plain_aliases(&[("ll", "ls -la"), ("gs", "git status")]),
            "Aliases for bash:\ngs = git status\nll = ls -la\n"
        );
    }

    #[test]
    fn test_no_aliases() {
        assert_eq!(plain_aliases(&[]), "Aliases for bash:\nNo aliases defined.\n");
    }

    #[test]
    fn test_colored_output_keeps_text() {
        let mut out = Vec::new();
        write_aliases(&mut out, Dialect::Fish, &[("g", "git")], true).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("\u{1b}["));
        assert!(text.contains(" = git"));
    }

    #[test]
    fn test_entries_mark_current() {
        let mut out = Vec::new();
        write_entries(
            &mut out,
            "Supported shells:",
            ["bash", "zsh"],
            Some("zsh"),
            "active",
            false,
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Supported shells:\n  bash\n  zsh (active)\n"
        );
    }
}
