//! AliasCtl Core Library
//!
//! This crate provides the core functionality for aliasctl, a tool that keeps one
//! store of shell aliases and writes them into the startup files of bash, zsh,
//! fish, ksh, PowerShell and cmd.
//!
//! # Key Features
//!
//! - **Dialects**: The closed set of supported shells and their syntax families
//! - **Syntax**: Rendering and parsing alias definitions for each shell
//! - **Alias Store**: Persisted per-shell commands for every alias name
//! - **Managed Block**: Idempotent updates of a marked region in a startup file
//! - **Translation**: AI-assisted conversion of commands between shells
//!
//! # Examples
//!
//! Applying the stored bash aliases to a startup file:
//!
//! ```no_run
//! use std::path::Path;
//!
//! use aliasctl_core::alias_store::AliasStore;
//! use aliasctl_core::dialect::Dialect;
//! use aliasctl_core::managed_block::apply;
//!
//! let mut store = AliasStore::load("aliases.json")?;
//! store.add("ll", "ls -la", Dialect::Bash);
//! store.save()?;
//!
//! let written = apply(&store, Dialect::Bash, Path::new("/home/me/.bash_aliases"))?;
//! println!("Wrote {written} aliases");
//! # Ok::<(), aliasctl_core::error::Error>(())
//! ```

pub mod alias_store;
pub mod config;
pub mod dialect;
pub mod error;
pub mod export;
pub mod file_handling;
pub mod managed_block;
pub mod providers;
pub mod syntax;
pub mod translation;
