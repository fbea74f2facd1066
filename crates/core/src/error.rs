use leon::{ParseError, RenderError};
use thiserror::Error;

use crate::dialect::Dialect;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Alias `{}` not found.{} Run `aliasctl list` to see the defined aliases.", .name, did_you_mean(.suggestion))]
    NotFound {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Alias `{}` has no command for {}. Add one with `aliasctl --shell {} add {} <command>`.", .name, .dialect, .dialect, .name)]
    NoCommandForDialect { name: String, dialect: Dialect },

    #[error("Unsupported shell `{}`. Supported shells: {}", .given, .valid)]
    UnsupportedDialect { given: String, valid: String },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Json {
        action: String,
        file_description: String,
        path: String,
        original: serde_json::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("Shell startup file not found at `{}`. Use `aliasctl set-file <path>` to point at the right file.", .path)]
    MissingShellFile { path: String },

    #[error("AI translation failed: {}", .0)]
    TranslationFailure(String),

    #[error("No AI provider is configured. Run `aliasctl configure-ai <ollama|openai|anthropic> <endpoint> <model> [api-key]` first.")]
    AiNotConfigured,

    #[error("AI provider `{}` is not configured. Configured providers: {}", .name, .available)]
    UnknownProvider { name: String, available: String },

    #[error("Unknown AI provider kind `{}`. Supported kinds: ollama, openai, anthropic", .0)]
    UnknownProviderKind(String),

    #[error("Invalid endpoint URL `{}`: it must start with http:// or https://", .0)]
    InvalidEndpoint(String),

    #[error("Could not read an alias definition from the AI suggestion: `{}`", .0)]
    UnparseableSuggestion(String),

    #[error("Invalid alias name: the name may not be empty")]
    EmptyAliasName,

    #[error("Invalid alias name `{}`: the name may not contain whitespace", .0)]
    AliasNameWithWhitespace(String),

    #[error("Invalid alias name `{}`: the name may not contain `=`", .0)]
    AliasNameWithEquals(String),

    #[error("Alias `{}` needs a command. Use `aliasctl remove {}` to delete an alias.", .0, .0)]
    EmptyAliasCommand(String),

    #[error("Error parsing prompt template: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering prompt template: {}", .0)]
    Render(#[from] RenderError),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(suggestion) => format!(" Did you mean `{suggestion}`?"),
        None => String::new(),
    }
}

impl Error {
    pub fn not_found(name: &str, suggestion: Option<String>) -> Self {
        Self::NotFound {
            name: name.to_string(),
            suggestion,
        }
    }

    pub fn io_error(file_description: &str, path: &str, original: std::io::Error) -> Self {
        Self::Io {
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }

    pub fn json_error(
        action: &str,
        file_description: &str,
        path: &str,
        original: serde_json::Error,
    ) -> Self {
        Self::Json {
            action: action.to_string(),
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }

    pub fn yaml_error(
        action: &str,
        file_description: &str,
        path: &str,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action: action.to_string(),
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }
}
