//! Translation of alias commands between shells with the help of an AI provider.
//!
//! The provider is reached through the [`Translator`] capability, passed in by the
//! caller. Everything else here is plain text work: building prompts from
//! templates and digging an alias definition out of the free-text answer.

use std::collections::HashMap;

use leon::Template;
use log::debug;

use crate::dialect::Dialect;
use crate::error::Result;
use crate::syntax::{self, DEFINING_KEYWORDS};

const CONVERSION_SYSTEM: &str = "You are a utility that converts command line aliases between different shells. Respond only with the converted command, no explanation.";

const CONVERSION_TEMPLATE: &str = "Convert the following command from {from} shell to {to} shell. Provide only the final command without explanation: {command}";

const GENERATION_SYSTEM_TEMPLATE: &str = "You are a shell alias creation expert for {shell} shell. Create concise, memorable aliases with proper syntax.";

const GENERATION_TEMPLATE: &str = "You are a shell alias creation expert for {shell} shell.

Task: Create a concise, memorable alias for the following command:
{command}

Requirements:
- The alias name should be short but descriptive
- Follow standard naming conventions for {shell} aliases
- The alias should be intuitive and easy to remember
- Don't abbreviate too aggressively, though initials like kgp for kubectl get pods are acceptable.
- Avoid using special characters or spaces in the alias
- Ensure the alias is unique and doesn't conflict with existing commands in the shell
- Consider common aliases in the {shell} ecosystem

Response format:
Provide ONLY the complete alias definition in the correct syntax for {shell} shell.
- For bash/zsh/ksh: alias name='command'
- For PowerShell: Set-Alias name command, or a function named after the alias whose body is the command
- For CMD: doskey name=command
- For fish: alias name 'command', or a function block closed by end

Do not include any explanations, preambles, or additional text.";

/// A message for the AI provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

/// The external text-completion capability.
pub trait Translator {
    /// Sends `prompt` and returns the provider's raw answer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::TranslationFailure`] when the provider is
    /// unreachable, rejects the credentials or answers with something unreadable.
    fn complete(&self, prompt: &Prompt) -> Result<String>;
}

/// A command to carry over from one shell to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationRequest<'a> {
    pub command: &'a str,
    pub from: Dialect,
    pub to: Dialect,
}

impl TranslationRequest<'_> {
    pub fn prompt(&self) -> Result<Prompt> {
        let user = render_template(
            CONVERSION_TEMPLATE,
            &[
                ("from", self.from.name()),
                ("to", self.to.name()),
                ("command", self.command),
            ],
        )?;

        Ok(Prompt {
            system: CONVERSION_SYSTEM.to_string(),
            user,
            temperature: 0.2,
        })
    }
}

fn render_template(template: &str, context: &[(&str, &str)]) -> Result<String> {
    let template = Template::parse(template)?;
    let values: HashMap<String, String> = context
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect();

    Ok(template.render(&values)?)
}

/// Builds the prompt asking for a new alias for `command` in `dialect`.
pub fn generation_prompt(command: &str, dialect: Dialect) -> Result<Prompt> {
    let context = [("shell", dialect.name()), ("command", command)];

    Ok(Prompt {
        system: render_template(GENERATION_SYSTEM_TEMPLATE, &context)?,
        user: render_template(GENERATION_TEMPLATE, &context)?,
        temperature: 0.3,
    })
}

/// Picks the first line of `response` that starts with a definition keyword.
///
/// Without such a line the whole trimmed response is returned as-is.
pub fn extract_definition(response: &str) -> String {
    let response = response.trim();

    response
        .lines()
        .map(str::trim)
        .find(|line| {
            DEFINING_KEYWORDS
                .iter()
                .any(|keyword| line.starts_with(keyword))
        })
        .unwrap_or(response)
        .to_string()
}

/// Reduces an answer to the bare command it defines for `dialect`.
///
/// A definition the codec reads, even one spanning several lines, yields its
/// command. An answer with no definition keyword is taken as the command itself
/// when it fits on one line. Anything else, such as a definition header whose
/// body cannot be read, yields `None`.
pub fn command_from_answer(answer: &str, dialect: Dialect) -> Option<String> {
    if let Some(definition) = syntax::parse_document(answer, dialect).into_iter().next() {
        return Some(definition.command);
    }

    let mut lines = answer
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("```"));
    let command = lines.next()?;

    if lines.next().is_some() || DEFINING_KEYWORDS.iter().any(|keyword| command.starts_with(keyword)) {
        debug!("No {dialect} command in answer `{answer}`");
        return None;
    }

    Some(command.to_string())
}

fn request_translation(request: &TranslationRequest<'_>, capability: &dyn Translator) -> Result<String> {
    debug!(
        "Translating `{}` from {} to {}",
        request.command, request.from, request.to
    );

    capability.complete(&request.prompt()?)
}

/// Rewrites a command for another shell.
///
/// The same shell on both sides returns the command untouched without calling
/// `capability`.
///
/// # Errors
///
/// Returns an error if the prompt cannot be built or the capability fails.
pub fn translate(request: &TranslationRequest<'_>, capability: &dyn Translator) -> Result<String> {
    if request.from == request.to {
        return Ok(request.command.to_string());
    }

    let response = request_translation(request, capability)?;
    Ok(extract_definition(&response))
}

/// Like [`translate`], but returns only the command for the target shell, or
/// `None` when the answer holds no readable command.
///
/// # Errors
///
/// Returns an error if the prompt cannot be built or the capability fails.
pub fn translate_command(
    request: &TranslationRequest<'_>,
    capability: &dyn Translator,
) -> Result<Option<String>> {
    if request.from == request.to {
        return Ok(Some(request.command.to_string()));
    }

    let response = request_translation(request, capability)?;
    Ok(command_from_answer(&response, request.to))
}

/// Asks the capability to suggest an alias definition for `command`.
///
/// # Errors
///
/// Returns an error if the prompt cannot be built or the capability fails.
pub fn suggest_alias(command: &str, dialect: Dialect, capability: &dyn Translator) -> Result<String> {
    debug!("Requesting a {dialect} alias suggestion for `{command}`");

    let response = capability.complete(&generation_prompt(command, dialect)?)?;
    Ok(extract_definition(&response))
}
