//! Interactive questions asked on the terminal.
//!
//! Each question has a reader-generic variant so the answers can be scripted in tests.

use std::io::{stdin, stdout, BufRead, Write};

use aliasctl_core::error::Result;

/// How the user answered the offer to save a suggested alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameChoice {
    Accept,
    Rename(String),
    Cancel,
}

fn read_answer(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "" | "y" | "yes")
}

fn is_no(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "n" | "no")
}

/// Asks whether to keep `suggested_name`, reading answers from `input`.
///
/// An empty answer or `y` accepts, any other word is taken as the new name, and
/// `n` asks for the name separately. End of input cancels.
pub fn choose_name_from(
    suggested_name: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<NameChoice> {
    write!(output, "Use suggested alias name `{suggested_name}`? [Y/n/custom name]: ")?;
    output.flush()?;

    let Some(answer) = read_answer(input)? else {
        return Ok(NameChoice::Cancel);
    };

    if is_yes(&answer) {
        return Ok(NameChoice::Accept);
    }

    if !is_no(&answer) {
        return Ok(NameChoice::Rename(answer));
    }

    write!(output, "Enter custom alias name (empty to cancel): ")?;
    output.flush()?;

    Ok(match read_answer(input)? {
        Some(name) if !name.is_empty() => NameChoice::Rename(name),
        _ => NameChoice::Cancel,
    })
}

/// Asks a yes/no question defaulting to yes, reading the answer from `input`.
pub fn confirm_from(question: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    loop {
        write!(output, "{question} [Y/n]: ")?;
        output.flush()?;

        let Some(answer) = read_answer(input)? else {
            return Ok(false);
        };

        if is_yes(&answer) {
            return Ok(true);
        }

        if is_no(&answer) {
            return Ok(false);
        }
    }
}

pub fn choose_name(suggested_name: &str) -> Result<NameChoice> {
    choose_name_from(suggested_name, &mut stdin().lock(), &mut stdout())
}

pub fn confirm(question: &str) -> Result<bool> {
    confirm_from(question, &mut stdin().lock(), &mut stdout())
}
