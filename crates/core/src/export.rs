//! Exporting the alias store into another shell's startup file.
//!
//! Each alias gets a command for the target shell from, in order: its own
//! command for that shell, a command from a shell with the same syntax, or an AI
//! translation. Aliases with none of these are skipped.

use std::path::Path;

use log::{debug, info};

use crate::alias_store::{AliasRecord, AliasStore};
use crate::dialect::Dialect;
use crate::error::Result;
use crate::managed_block::{render_block, write_block};
use crate::translation::{translate_command, TranslationRequest, Translator};

fn same_syntax_command(record: &AliasRecord, source: Dialect, target: Dialect) -> Option<&str> {
    if source.syntax() == target.syntax() {
        if let Some(command) = record.command(source) {
            return Some(command);
        }
    }

    record
        .dialects()
        .find(|dialect| dialect.syntax() == target.syntax())
        .and_then(|dialect| record.command(dialect))
}

fn translated_command(
    record: &AliasRecord,
    source: Dialect,
    target: Dialect,
    translator: &dyn Translator,
) -> Result<Option<String>> {
    let from = if record.command(source).is_some() {
        source
    } else {
        match record.dialects().next() {
            Some(dialect) => dialect,
            None => return Ok(None),
        }
    };
    let Some(command) = record.command(from) else {
        return Ok(None);
    };

    translate_command(
        &TranslationRequest {
            command,
            from,
            to: target,
        },
        translator,
    )
}

/// Resolves the command `record` should have in `target`, or `None` to skip it.
///
/// # Errors
///
/// Returns an error if an AI translation was needed and failed.
pub fn resolve_command(
    record: &AliasRecord,
    source: Dialect,
    target: Dialect,
    translator: Option<&dyn Translator>,
) -> Result<Option<String>> {
    if let Some(command) = record.command(target) {
        return Ok(Some(command.to_string()));
    }

    if let Some(command) = same_syntax_command(record, source, target) {
        return Ok(Some(command.to_string()));
    }

    match translator {
        Some(translator) => translated_command(record, source, target, translator),
        None => Ok(None),
    }
}

/// Writes the store's aliases for `target` into the managed block of the file at
/// `path`, translating from `source` where needed.
///
/// Every command is resolved before the file is touched, so a failed translation
/// leaves the file as it was. Returns the number of aliases written.
///
/// # Errors
///
/// Returns an error if a translation fails or the file cannot be read or written.
pub fn export(
    store: &AliasStore,
    source: Dialect,
    target: Dialect,
    path: &Path,
    translator: Option<&dyn Translator>,
) -> Result<usize> {
    let mut definitions = Vec::new();

    for (name, record) in store.records() {
        match resolve_command(record, source, target, translator)? {
            Some(command) => definitions.push((name, command)),
            None => debug!("Skipping alias `{name}`: no command for {target}"),
        }
    }

    let count = definitions.len();
    let block = render_block(
        definitions
            .iter()
            .map(|(name, command)| (*name, command.as_str())),
        target,
    );
    write_block(path, &block, target)?;

    info!("Exported {count} aliases as {target} to `{}`", path.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::translation::Prompt;
    use std::cell::Cell;
    use std::fs;

    struct FixedTranslator {
        answer: &'static str,
        calls: Cell<usize>,
    }

    impl FixedTranslator {
        fn new(answer: &'static str) -> Self {
            Self {
                answer,
                calls: Cell::new(0),
            }
        }
    }

    impl Translator for FixedTranslator {
        fn complete(&self, _prompt: &Prompt) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.answer.to_string())
        }
    }

    struct BrokenTranslator;

    impl Translator for BrokenTranslator {
        fn complete(&self, _prompt: &Prompt) -> Result<String> {
            Err(Error::TranslationFailure("HTTP 500".to_string()))
        }
    }

    fn record(entries: &[(Dialect, &str)]) -> AliasRecord {
        let mut record = AliasRecord::default();
        for (dialect, command) in entries {
            record.set_command(*dialect, command);
        }
        record
    }

    #[test]
    fn test_own_command_wins() {
        let record = record(&[(Dialect::Bash, "ls -la"), (Dialect::Fish, "ls -lah")]);
        let translator = FixedTranslator::new("unused");

        let command = resolve_command(&record, Dialect::Bash, Dialect::Fish, Some(&translator)).unwrap();

        assert_eq!(command.as_deref(), Some("ls -lah"));
        assert_eq!(translator.calls.get(), 0);
    }

    #[test]
    fn test_same_syntax_is_copied() {
        let record = record(&[(Dialect::Bash, "ls -la")]);
        let command = resolve_command(&record, Dialect::Bash, Dialect::Zsh, None).unwrap();
        assert_eq!(command.as_deref(), Some("ls -la"));
    }

    #[test]
    fn test_other_syntax_without_translator_is_skipped() {
        let record = record(&[(Dialect::Bash, "ls -la")]);
        let command = resolve_command(&record, Dialect::Bash, Dialect::Cmd, None).unwrap();
        assert!(command.is_none());
    }

    #[test]
    fn test_translated_definition_is_reduced_to_command() {
        let record = record(&[(Dialect::Bash, "ls -la")]);
        let translator = FixedTranslator::new("Here it is:\nfunction ll { Get-ChildItem -Force }");

        let command = resolve_command(&record, Dialect::Bash, Dialect::Pwsh, Some(&translator)).unwrap();

        assert_eq!(command.as_deref(), Some("Get-ChildItem -Force"));
    }

    #[test]
    fn test_multi_line_fish_answer_is_exported_as_its_body() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = AliasStore::new(temp_dir.path().join("aliases.json"));
        store.add("ll", "ls -la", Dialect::Bash);
        let path = temp_dir.path().join("config.fish");
        let translator = FixedTranslator::new("function ll\n    ls -la\nend");

        export(&store, Dialect::Bash, Dialect::Fish, &path, Some(&translator)).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Aliases managed by AliasCtl\nfunction ll\n    ls -la\nend\n# End of aliases managed by AliasCtl\n"
        );
    }

    #[test]
    fn test_unreadable_definition_header_is_skipped() {
        let record = record(&[(Dialect::Bash, "ls -la")]);
        let translator = FixedTranslator::new("function ll {");

        let command = resolve_command(&record, Dialect::Bash, Dialect::Pwsh, Some(&translator)).unwrap();

        assert!(command.is_none());
        assert_eq!(translator.calls.get(), 1);
    }

    #[test]
    fn test_translated_bare_command_is_kept() {
        let record = record(&[(Dialect::Zsh, "ls -la")]);
        let translator = FixedTranslator::new("dir /a");

        let command = resolve_command(&record, Dialect::Bash, Dialect::Cmd, Some(&translator)).unwrap();

        assert_eq!(command.as_deref(), Some("dir /a"));
    }

    #[test]
    fn test_export_writes_target_syntax() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = AliasStore::new(temp_dir.path().join("aliases.json"));
        store.add("ll", "ls -la", Dialect::Bash);
        store.add("g", "git", Dialect::Bash);
        store.add("gs", "git status", Dialect::Pwsh);
        let path = temp_dir.path().join("exported.zsh");

        let count = export(&store, Dialect::Bash, Dialect::Zsh, &path, None).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Aliases managed by AliasCtl\nalias g='git'\nalias ll='ls -la'\n# End of aliases managed by AliasCtl\n"
        );
    }

    #[test]
    fn test_failed_translation_leaves_file_untouched() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = AliasStore::new(temp_dir.path().join("aliases.json"));
        store.add("ll", "ls -la", Dialect::Bash);
        let path = temp_dir.path().join("aliases.cmd");
        fs::write(&path, "@echo off\n").unwrap();

        let result = export(&store, Dialect::Bash, Dialect::Cmd, &path, Some(&BrokenTranslator));

        assert!(matches!(result, Err(Error::TranslationFailure(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "@echo off\n");
    }

    #[test]
    fn test_export_to_cmd_uses_rem_markers() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = AliasStore::new(temp_dir.path().join("aliases.json"));
        store.add("ll", "ls -la", Dialect::Bash);
        let path = temp_dir.path().join("aliases.cmd");
        let translator = FixedTranslator::new("doskey ll=dir /a");

        export(&store, Dialect::Bash, Dialect::Cmd, &path, Some(&translator)).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "REM Aliases managed by AliasCtl\ndoskey ll=dir /a\nREM End of aliases managed by AliasCtl\n"
        );
    }
}
