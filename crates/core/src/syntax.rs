//! Rendering and parsing of alias definitions in each shell's syntax.
//!
//! Every [`Syntax`] family has one [`Codec`]: the keywords that introduce a
//! definition, a render function and a line parser. Dialects look their codec up
//! through [`codec`] instead of branching at each call site.
//!
//! Parsing never fails. A line that is not a definition is simply no match.

use crate::dialect::{Dialect, Syntax};

/// An alias name and the command it expands to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub command: String,
}

impl Definition {
    fn new(name: &str, command: &str) -> Option<Self> {
        if name.is_empty() || command.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            command: command.to_string(),
        })
    }
}

type RenderFn = fn(&str, &str) -> String;
type ParseFn = fn(&str, &mut dyn Iterator<Item = &str>) -> Option<Definition>;

pub struct Codec {
    /// Keywords a definition line starts with, including the trailing space.
    pub keywords: &'static [&'static str],
    render: RenderFn,
    parse: ParseFn,
}

static POSIX: Codec = Codec {
    keywords: &["alias "],
    render: render_posix,
    parse: parse_posix,
};

static FISH: Codec = Codec {
    keywords: &["alias ", "function "],
    render: render_fish,
    parse: parse_fish,
};

static POWERSHELL: Codec = Codec {
    keywords: &["function ", "Set-Alias "],
    render: render_powershell,
    parse: parse_powershell,
};

static DOSKEY: Codec = Codec {
    keywords: &["doskey "],
    render: render_doskey,
    parse: parse_doskey,
};

/// Every keyword that starts a definition in some supported shell.
pub const DEFINING_KEYWORDS: [&str; 4] = ["alias ", "function ", "Set-Alias ", "doskey "];

pub fn codec(dialect: Dialect) -> &'static Codec {
    match dialect.syntax() {
        Syntax::Posix => &POSIX,
        Syntax::Fish => &FISH,
        Syntax::PowerShell => &POWERSHELL,
        Syntax::DosKey => &DOSKEY,
    }
}

/// Produces the definition text for `name`. Multi-line forms are joined with `\n`
/// and carry no trailing newline.
pub fn render(name: &str, command: &str, dialect: Dialect) -> String {
    (codec(dialect).render)(name, command)
}

/// Parses a single definition starting at `line`.
///
/// Forms spanning several lines pull what they need from `following`.
pub fn parse(
    line: &str,
    following: &mut dyn Iterator<Item = &str>,
    dialect: Dialect,
) -> Option<Definition> {
    let line = line.trim_start();
    let codec = codec(dialect);

    if !codec.keywords.iter().any(|keyword| line.starts_with(keyword)) {
        return None;
    }

    (codec.parse)(line, following)
}

/// Parses one self-contained line, such as a definition extracted from AI output.
pub fn parse_line(line: &str, dialect: Dialect) -> Option<Definition> {
    parse(line, &mut std::iter::empty::<&str>(), dialect)
}

/// Recovers every definition in `text`, in file order.
pub fn parse_document(text: &str, dialect: Dialect) -> Vec<Definition> {
    let mut definitions = Vec::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        if let Some(definition) = parse(line, &mut lines, dialect) {
            definitions.push(definition);
        }
    }

    definitions
}

/// The space heuristic: a command containing a space is wrapped in a function in
/// shells that distinguish simple aliases from functions.
fn needs_wrapping(command: &str) -> bool {
    command.contains(' ')
}

fn strip_quotes(value: &str) -> &str {
    value.trim_matches(|c| c == '\'' || c == '"')
}

fn render_posix(name: &str, command: &str) -> String {
    format!("alias {name}='{command}'")
}

fn parse_posix(line: &str, _following: &mut dyn Iterator<Item = &str>) -> Option<Definition> {
    let rest = line.strip_prefix("alias ")?;
    let (name, value) = rest.split_once('=')?;
    Definition::new(name, strip_quotes(value))
}

fn render_fish(name: &str, command: &str) -> String {
    if needs_wrapping(command) {
        format!("function {name}\n    {command}\nend")
    } else {
        format!("alias {name} '{command}'")
    }
}

fn parse_fish(line: &str, following: &mut dyn Iterator<Item = &str>) -> Option<Definition> {
    if let Some(rest) = line.strip_prefix("alias ") {
        let (name, value) = rest.split_once(' ')?;
        return Definition::new(name, strip_quotes(value));
    }

    let rest = line.strip_prefix("function ")?;
    let name = rest.split(' ').next()?.trim_end_matches(';');
    let body = following.next()?.trim();

    // A body that is itself the terminator means an empty function.
    if body.starts_with("end") {
        return None;
    }

    Definition::new(name, body)
}

fn render_powershell(name: &str, command: &str) -> String {
    if needs_wrapping(command) {
        format!("function {name} {{ {command} }}")
    } else {
        format!("Set-Alias {name} {command}")
    }
}

fn parse_powershell(line: &str, following: &mut dyn Iterator<Item = &str>) -> Option<Definition> {
    if let Some(rest) = line.strip_prefix("Set-Alias ") {
        let mut fields = rest.split_whitespace();
        let name = fields.next()?;
        let command = fields.next()?;
        return Definition::new(name, command);
    }

    let rest = line.strip_prefix("function ")?;
    let (name, remainder) = rest.split_once(' ')?;
    let (_, body) = remainder.split_once('{')?;
    let mut body = body.trim();

    // An opening brace ending the header line puts the body on the next line.
    if body.is_empty() {
        body = following.next()?.trim();
    }

    let command = body.strip_suffix('}').unwrap_or(body).trim();
    Definition::new(name, command)
}

fn render_doskey(name: &str, command: &str) -> String {
    format!("doskey {name}={command}")
}

fn parse_doskey(line: &str, _following: &mut dyn Iterator<Item = &str>) -> Option<Definition> {
    let rest = line.strip_prefix("doskey ")?;
    let (name, command) = rest.split_once('=')?;
    Definition::new(name, command)
}
