use aliasctl_core::alias_store::validate_alias_name;
use aliasctl_core::dialect::Dialect;
use aliasctl_core::error::{Error, Result};
use aliasctl_core::providers::{ProviderKind, ProviderSettings};
use aliasctl_core::syntax::{self, Definition, DEFINING_KEYWORDS};
use aliasctl_core::translation::{suggest_alias, translate_command, TranslationRequest};

use super::Context;
use crate::output::print_entries;
use crate::prompt::{choose_name, confirm, NameChoice};

/// The name a suggested definition introduces, read up to the first separator.
fn name_after_keyword(suggestion: &str) -> Option<&str> {
    let rest = DEFINING_KEYWORDS
        .iter()
        .find_map(|keyword| suggestion.strip_prefix(keyword))?;

    rest.split(|c: char| c.is_whitespace() || c == '=' || c == ';')
        .next()
        .filter(|name| !name.is_empty())
}

/// Turns a suggestion into a definition for `command`.
///
/// A suggestion the codec cannot read fully still yields its alias name, paired
/// with the command the user asked about.
pub(crate) fn definition_from_suggestion(
    suggestion: &str,
    command: &str,
    dialect: Dialect,
) -> Result<Definition> {
    if let Some(definition) = syntax::parse_line(suggestion, dialect) {
        return Ok(definition);
    }

    name_after_keyword(suggestion)
        .map(|name| Definition {
            name: name.to_string(),
            command: command.to_string(),
        })
        .ok_or_else(|| Error::UnparseableSuggestion(suggestion.to_string()))
}

pub fn convert(
    context: &mut Context,
    name: &str,
    shell: &str,
    provider: Option<&str>,
    save: bool,
) -> Result<()> {
    let target: Dialect = shell.parse()?;
    let record = context
        .store
        .get(name)
        .ok_or_else(|| context.not_found(name))?;
    let command = record
        .command(context.dialect)
        .ok_or_else(|| Error::NoCommandForDialect {
            name: name.to_string(),
            dialect: context.dialect,
        })?
        .to_string();

    // Shells sharing a syntax take the command as it is.
    let converted = if context.dialect.syntax() == target.syntax() {
        command
    } else {
        let translator = context.translator(provider)?;
        translate_command(
            &TranslationRequest {
                command: &command,
                from: context.dialect,
                to: target,
            },
            &translator,
        )?
        .ok_or_else(|| {
            Error::TranslationFailure(format!("the answer held no {target} command for `{name}`"))
        })?
    };

    println!("{}", syntax::render(name, &converted, target));

    if save {
        context.store.add(name, &converted, target);
        context.store.save()?;
        println!("Saved {target} command for `{name}`");
    }

    Ok(())
}

pub fn generate(context: &mut Context, command: &str, provider: Option<&str>, yes: bool) -> Result<()> {
    let translator = context.translator(provider)?;
    let suggestion = suggest_alias(command, context.dialect, &translator)?;
    println!("Generated alias suggestion: {suggestion}");

    let mut definition = definition_from_suggestion(&suggestion, command, context.dialect)?;

    if !yes {
        match choose_name(&definition.name)? {
            NameChoice::Accept => {}
            NameChoice::Rename(name) => definition.name = name,
            NameChoice::Cancel => {
                println!("Alias not saved");
                return Ok(());
            }
        }

        if !confirm("Save this alias?")? {
            println!("Alias not saved");
            return Ok(());
        }
    }

    validate_alias_name(&definition.name)?;
    context
        .store
        .add(&definition.name, &definition.command, context.dialect);
    context.store.save()?;

    println!(
        "Alias saved: {} = {}",
        definition.name, definition.command
    );
    Ok(())
}

pub fn configure(
    context: &mut Context,
    kind: &str,
    endpoint: &str,
    model: &str,
    api_key: Option<String>,
) -> Result<()> {
    let kind: ProviderKind = kind.parse()?;
    let settings = ProviderSettings::new(kind, endpoint, model, api_key)?;

    context.config.add_provider(settings);
    context.save_config()?;

    println!("Configured {kind} with model `{model}` as the default AI provider");
    Ok(())
}

pub fn list_providers(context: &Context) -> Result<()> {
    if !context.config.has_provider() {
        return Err(Error::AiNotConfigured);
    }

    print_entries(
        "Configured AI providers:",
        context.config.provider_names(),
        context.config.default_provider.as_deref(),
        "default",
    )
}
