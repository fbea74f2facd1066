//! AliasCtl CLI Library
//!
//! This crate provides the command-line interface for aliasctl. It parses the
//! arguments, loads the configuration and alias store, and runs one subcommand.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`commands`]: Execution of each subcommand
//! - [`prompt`]: Interactive questions for AI suggestions
//! - [`output`]: Listings, coloured when writing to a terminal
//! - [`suggestions`]: "Did you mean" hints for unknown alias names
//!
//! # Examples
//!
//! ```bash
//! # Add an alias for the configured shell and write the startup file
//! aliasctl add ll ls -la
//! aliasctl apply
//!
//! # Work on another shell for one invocation
//! aliasctl --shell fish list
//!
//! # Translate an alias with the configured AI provider
//! aliasctl configure-ai ollama http://localhost:11434 llama3
//! aliasctl convert ll pwsh --save
//! ```

pub mod cli_args;
pub mod commands;
pub mod output;
pub mod prompt;
pub mod suggestions;
