//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate: a handful of global options followed by one subcommand.

use clap::{Parser, Subcommand};

/// Command-line arguments for the aliasctl CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use aliasctl_cli::cli_args::Args;
///
/// let args = Args::parse_from(["aliasctl", "--shell", "zsh", "list"]);
/// assert_eq!(args.shell.as_deref(), Some("zsh"));
/// ```
#[derive(Parser, Debug)]
#[command(name = "aliasctl", version, about = "Manage shell aliases across shells")]
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the configuration file YAML.
    ///
    /// If not provided, defaults to `~/.config/aliasctl/config.yml`.
    #[arg(long, short = 'c', global = true)]
    pub config_path: Option<String>,

    /// Path to the alias store JSON.
    ///
    /// If not provided, defaults to `~/.config/aliasctl/aliases.json`.
    #[arg(long, short = 's', global = true)]
    pub store_path: Option<String>,

    /// Shell to act on for this invocation, instead of the configured one.
    #[arg(long, global = true)]
    pub shell: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Add or update an alias for the active shell.
    Add {
        name: String,
        /// The command the alias expands to. Several words are joined with spaces.
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Remove an alias for every shell.
    Remove { name: String },

    /// List the aliases defined for the active shell.
    List,

    /// Write the aliases into the shell startup file.
    Apply,

    /// Read alias definitions from the shell startup file into the store.
    Import,

    /// Write the aliases for another shell into a file.
    Export {
        /// Target shell.
        #[arg(value_name = "SHELL")]
        target: String,
        /// File to write the managed block into.
        file: String,
    },

    /// Translate an alias to another shell with the AI provider.
    Convert {
        name: String,
        /// Target shell.
        #[arg(value_name = "SHELL")]
        target: String,
        /// AI provider to use instead of the default one.
        #[arg(long, short = 'p')]
        provider: Option<String>,
        /// Store the translated command for the target shell.
        #[arg(long, action)]
        save: bool,
    },

    /// Ask the AI provider to suggest an alias for a command.
    Generate {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
        /// AI provider to use instead of the default one.
        #[arg(long, short = 'p')]
        provider: Option<String>,
        /// Save the suggestion without asking.
        #[arg(long, short = 'y', action)]
        yes: bool,
    },

    /// Set the configured shell.
    SetShell { shell: String },

    /// Set the shell startup file aliases are applied to.
    SetFile { path: String },

    /// Detect the shell and its startup file from the environment.
    DetectShell,

    /// Configure an AI provider and make it the default.
    ConfigureAi {
        /// One of ollama, openai, anthropic.
        kind: String,
        endpoint: String,
        model: String,
        api_key: Option<String>,
    },

    /// List the configured AI providers.
    ListProviders,

    /// List the supported shells.
    Shells,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["aliasctl", "list"]);

        assert!(args.config_path.is_none());
        assert!(args.store_path.is_none());
        assert!(args.shell.is_none());
        assert_eq!(args.command, Command::List);
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from([
            "aliasctl",
            "-c",
            "/custom/config.yml",
            "-s",
            "/custom/aliases.json",
            "apply",
        ]);

        assert_eq!(args.config_path, Some("/custom/config.yml".to_string()));
        assert_eq!(args.store_path, Some("/custom/aliases.json".to_string()));
        assert_eq!(args.command, Command::Apply);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::parse_from(["aliasctl", "list", "--shell", "fish"]);
        assert_eq!(args.shell, Some("fish".to_string()));
    }

    #[test]
    fn test_target_shell_is_not_the_active_shell() {
        let args = Args::parse_from(["aliasctl", "convert", "ll", "pwsh"]);
        assert!(args.shell.is_none());

        let args = Args::parse_from(["aliasctl", "export", "fish", "/tmp/aliases.fish"]);
        assert!(args.shell.is_none());
        assert_eq!(
            args.command,
            Command::Export {
                target: "fish".to_string(),
                file: "/tmp/aliases.fish".to_string(),
            }
        );
    }

    #[test]
    fn test_active_and_target_shell_together() {
        let args = Args::parse_from(["aliasctl", "--shell", "zsh", "convert", "ll", "fish"]);

        assert_eq!(args.shell.as_deref(), Some("zsh"));
        match args.command {
            Command::Convert { target, .. } => assert_eq!(target, "fish"),
            other => panic!("Expected Convert, got {other:?}"),
        }
    }

    #[test]
    fn test_add_joins_command_words() {
        let args = Args::parse_from(["aliasctl", "add", "ll", "ls", "-la"]);

        match args.command {
            Command::Add { name, command } => {
                assert_eq!(name, "ll");
                assert_eq!(command, vec!["ls", "-la"]);
            }
            other => panic!("Expected Add, got {other:?}"),
        }
    }

    #[test]
    fn test_add_requires_command() {
        assert!(Args::try_parse_from(["aliasctl", "add", "ll"]).is_err());
    }

    #[test]
    fn test_convert_flags() {
        let args = Args::parse_from([
            "aliasctl", "convert", "ll", "pwsh", "--provider", "openai", "--save",
        ]);

        assert_eq!(
            args.command,
            Command::Convert {
                name: "ll".to_string(),
                target: "pwsh".to_string(),
                provider: Some("openai".to_string()),
                save: true,
            }
        );
    }

    #[test]
    fn test_generate_flags_before_command() {
        let args = Args::parse_from(["aliasctl", "generate", "-y", "docker", "compose", "up"]);

        match args.command {
            Command::Generate {
                command,
                provider,
                yes,
            } => {
                assert_eq!(command, vec!["docker", "compose", "up"]);
                assert!(provider.is_none());
                assert!(yes);
            }
            other => panic!("Expected Generate, got {other:?}"),
        }
    }

    #[test]
    fn test_configure_ai_optional_key() {
        let args = Args::parse_from([
            "aliasctl",
            "configure-ai",
            "ollama",
            "http://localhost:11434",
            "llama3",
        ]);

        assert_eq!(
            args.command,
            Command::ConfigureAi {
                kind: "ollama".to_string(),
                endpoint: "http://localhost:11434".to_string(),
                model: "llama3".to_string(),
                api_key: None,
            }
        );
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Args::try_parse_from(["aliasctl"]).is_err());
    }
}
