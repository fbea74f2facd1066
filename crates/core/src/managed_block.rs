//! Writing aliases into shell startup files, and reading them back.
//!
//! aliasctl owns one delimited region of a startup file, the managed block:
//!
//! ```text
//! # Aliases managed by AliasCtl
//! alias ll='ls -la'
//! # End of aliases managed by AliasCtl
//! ```
//!
//! Everything outside the markers belongs to the user and is preserved byte for
//! byte. Everything inside is regenerated on each write; edits made there by hand
//! are discarded.

use std::path::Path;

use itertools::Itertools;
use log::{debug, info, warn};
use memchr::memmem;

use crate::alias_store::AliasStore;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::file_handling::{read_optional_bytes, write_atomically};
use crate::syntax;

const FILE_DESCRIPTION: &str = "shell startup";
const START_MARKER_TEXT: &str = "Aliases managed by AliasCtl";
const END_MARKER_TEXT: &str = "End of aliases managed by AliasCtl";

/// The literal marker lines delimiting the managed block for one dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Markers {
    pub fn for_dialect(dialect: Dialect) -> Self {
        let prefix = dialect.comment_prefix();
        Self {
            start: format!("{prefix} {START_MARKER_TEXT}"),
            end: format!("{prefix} {END_MARKER_TEXT}"),
        }
    }
}

/// Renders a complete managed block, markers included, for the given definitions.
///
/// Definitions are written in name order so that identical data always produces
/// identical text.
pub fn render_block<'a>(
    definitions: impl IntoIterator<Item = (&'a str, &'a str)>,
    dialect: Dialect,
) -> String {
    let markers = Markers::for_dialect(dialect);
    let mut block = String::new();

    block.push_str(&markers.start);
    block.push('\n');

    for (name, command) in definitions
        .into_iter()
        .sorted_by(|left, right| left.0.cmp(right.0))
    {
        block.push_str(&syntax::render(name, command, dialect));
        block.push('\n');
    }

    block.push_str(&markers.end);
    block.push('\n');
    block
}

/// Returns the bytes following the line that contains the match ending at `offset`.
fn after_line(text: &[u8], offset: usize) -> &[u8] {
    match memchr::memchr(b'\n', &text[offset..]) {
        Some(newline) => &text[offset + newline + 1..],
        None => &[],
    }
}

/// Splices `block` into `existing` file contents.
///
/// - no file: the result is the block alone;
/// - no start marker: the block is appended, after a newline if the file lacks a
///   trailing one;
/// - start and end markers: the bytes before the start marker and after the end
///   marker line are kept, the region between them is replaced.
///
/// The file is handled as bytes, so text outside the block need not be UTF-8.
pub fn merge(existing: Option<&[u8]>, block: &str, markers: &Markers) -> Vec<u8> {
    let Some(existing) = existing else {
        debug!("Startup file does not exist, writing a new one");
        return block.as_bytes().to_vec();
    };

    let Some(start) = memmem::find(existing, markers.start.as_bytes()) else {
        debug!("No managed block found, appending one");
        let mut merged = Vec::with_capacity(existing.len() + block.len() + 1);
        merged.extend_from_slice(existing);
        if !existing.is_empty() && !existing.ends_with(b"\n") {
            merged.push(b'\n');
        }
        merged.extend_from_slice(block.as_bytes());
        return merged;
    };

    let prefix = &existing[..start];
    let after_start = &existing[start + markers.start.len()..];

    let suffix: &[u8] = match memmem::find(after_start, markers.end.as_bytes()) {
        Some(end) => after_line(after_start, end + markers.end.len()),
        None => {
            warn!(
                "Found `{}` without `{}`; replacing everything after it",
                markers.start, markers.end
            );
            &[]
        }
    };

    debug!("Replacing existing managed block");
    let mut merged = Vec::with_capacity(prefix.len() + block.len() + suffix.len());
    merged.extend_from_slice(prefix);
    merged.extend_from_slice(block.as_bytes());
    merged.extend_from_slice(suffix);
    merged
}

/// Writes `block` into the startup file at `path`, creating the file and its
/// directory if needed.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn write_block(path: &Path, block: &str, dialect: Dialect) -> Result<()> {
    let existing = read_optional_bytes(FILE_DESCRIPTION, path)?;
    let merged = merge(
        existing.as_deref(),
        block,
        &Markers::for_dialect(dialect),
    );

    if existing.as_deref() == Some(merged.as_slice()) {
        debug!("`{}` is already up to date", path.display());
        return Ok(());
    }

    write_atomically(FILE_DESCRIPTION, path, &merged)
}

/// Writes every alias the store defines for `dialect` into the managed block of
/// the startup file at `path`.
///
/// Returns the number of aliases written.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn apply(store: &AliasStore, dialect: Dialect, path: &Path) -> Result<usize> {
    let definitions = store.list(dialect);
    let count = definitions.len();

    write_block(path, &render_block(definitions, dialect), dialect)?;

    info!("Applied {count} {dialect} aliases to `{}`", path.display());
    Ok(count)
}

/// Reads alias definitions for `dialect` from the startup file at `path` into the
/// store. A name defined several times keeps its last definition.
///
/// The scan ignores the managed block markers, so aliases written by [`apply`]
/// are read back too. Returns the number of definitions found.
///
/// # Errors
///
/// Returns an error if the file is missing or cannot be read.
pub fn import(store: &mut AliasStore, dialect: Dialect, path: &Path) -> Result<usize> {
    let contents =
        read_optional_bytes(FILE_DESCRIPTION, path)?.ok_or_else(|| Error::MissingShellFile {
            path: path.display().to_string(),
        })?;

    let definitions = syntax::parse_document(&String::from_utf8_lossy(&contents), dialect);
    let count = definitions.len();

    for definition in definitions {
        store.add(&definition.name, &definition.command, dialect);
    }

    info!("Imported {count} {dialect} aliases from `{}`", path.display());
    Ok(count)
}
