//! The persisted alias store.
//!
//! Maps each alias name to an [`AliasRecord`] holding at most one command per
//! [`Dialect`]. The store lives in a JSON document:
//!
//! ```json
//! {
//!   "ll": { "bash": "ls -la", "fish": "ls -la" },
//!   "gs": { "pwsh": "git status" }
//! }
//! ```
//!
//! Mutations only touch memory; callers persist with [`AliasStore::save`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::file_handling::{read_optional, write_atomically};

const FILE_DESCRIPTION: &str = "alias store";

/// The commands defined for one alias name, keyed by dialect.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct AliasRecord {
    commands: BTreeMap<Dialect, String>,
}

impl AliasRecord {
    pub fn command(&self, dialect: Dialect) -> Option<&str> {
        self.commands.get(&dialect).map(String::as_str)
    }

    pub fn set_command(&mut self, dialect: Dialect, command: &str) {
        if command.is_empty() {
            self.commands.remove(&dialect);
        } else {
            self.commands.insert(dialect, command.to_string());
        }
    }

    /// A record without any command is treated as absent.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn dialects(&self) -> impl Iterator<Item = Dialect> + '_ {
        self.commands.keys().copied()
    }

    fn drop_empty_commands(&mut self) {
        self.commands.retain(|_, command| !command.is_empty());
    }
}

#[derive(Debug)]
pub struct AliasStore {
    path: PathBuf,
    records: IndexMap<String, AliasRecord>,
}

impl AliasStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: IndexMap::new(),
        }
    }

    /// Loads the store from `path`. A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a valid store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!("Alias store path: `{}`", path.display());

        let Some(contents) = read_optional(FILE_DESCRIPTION, &path)? else {
            debug!("No alias store yet, starting empty");
            return Ok(Self::new(path));
        };

        let mut records: IndexMap<String, AliasRecord> = serde_json::from_str(&contents)
            .map_err(|e| {
                Error::json_error("reading", FILE_DESCRIPTION, &path.display().to_string(), e)
            })?;

        for record in records.values_mut() {
            record.drop_empty_commands();
        }
        records.retain(|_, record| !record.is_empty());

        Ok(Self { path, records })
    }

    /// Writes the whole store back to its file, replacing the previous contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        let path_display = self.path.display().to_string();
        let persisted: IndexMap<&String, &AliasRecord> = self
            .records
            .iter()
            .filter(|(_, record)| !record.is_empty())
            .collect();

        let mut contents = serde_json::to_string_pretty(&persisted)
            .map_err(|e| Error::json_error("writing", FILE_DESCRIPTION, &path_display, e))?;
        contents.push('\n');

        write_atomically(FILE_DESCRIPTION, &self.path, &contents)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sets the command for `dialect` on the record for `name`, creating the record
    /// if needed. An empty command removes that dialect's entry.
    pub fn add(&mut self, name: &str, command: &str, dialect: Dialect) {
        info!("Setting {dialect} alias `{name}` to `{command}`");

        let record = self.records.entry(name.to_string()).or_default();
        record.set_command(dialect, command);

        if record.is_empty() {
            self.records.shift_remove(name);
        }
    }

    /// Removes the whole record for `name`, across every dialect.
    ///
    /// Returns whether the alias existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let existed = self.records.shift_remove(name).is_some();
        if existed {
            info!("Removed alias `{name}`");
        }
        existed
    }

    /// Name and command of every alias defined for `dialect`.
    pub fn list(&self, dialect: Dialect) -> Vec<(&str, &str)> {
        self.records
            .iter()
            .filter_map(|(name, record)| {
                record
                    .command(dialect)
                    .map(|command| (name.as_str(), command))
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&AliasRecord> {
        self.records.get(name)
    }

    pub fn records(&self) -> impl Iterator<Item = (&str, &AliasRecord)> {
        self.records
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Checks a user-supplied alias name.
///
/// # Errors
///
/// Returns an error if the name is empty or contains whitespace or `=`.
pub fn validate_alias_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::EmptyAliasName);
    }

    if name.chars().any(char::is_whitespace) {
        return Err(Error::AliasNameWithWhitespace(name.to_string()));
    }

    if name.contains('=') {
        return Err(Error::AliasNameWithEquals(name.to_string()));
    }

    Ok(())
}

/// Checks the command a user asked `name` to expand to.
///
/// # Errors
///
/// Returns an error if the command is blank.
pub fn validate_alias_command(name: &str, command: &str) -> Result<()> {
    if command.trim().is_empty() {
        return Err(Error::EmptyAliasCommand(name.to_string()));
    }

    Ok(())
}
