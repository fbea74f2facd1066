//! Execution of the parsed subcommands.
//!
//! Every subcommand loads the configuration and the alias store into a
//! [`Context`], performs its mutation in memory and finishes with a single write.

use std::path::PathBuf;

use aliasctl_core::alias_store::AliasStore;
use aliasctl_core::config::{get_config_path, get_store_path, AppConfig};
use aliasctl_core::dialect::Dialect;
use aliasctl_core::error::{Error, Result};
use aliasctl_core::providers::HttpTranslator;
use log::debug;

use crate::cli_args::{Args, Command};
use crate::suggestions::closest_name;

mod ai;
mod aliases;
mod settings;

/// Everything a subcommand needs: loaded configuration, store and active shell.
pub struct Context {
    pub config_path: PathBuf,
    pub config: AppConfig,
    pub store: AliasStore,
    pub dialect: Dialect,
}

impl Context {
    /// # Errors
    ///
    /// Returns an error if the configuration or store cannot be loaded, or the
    /// `--shell` value is not a supported shell.
    pub fn load(args: &Args) -> Result<Self> {
        let config_path = PathBuf::from(get_config_path(&args.config_path));
        let store_path = get_store_path(&args.store_path);
        debug!("Store path: `{store_path}`");

        let config = AppConfig::load_or_detect(&config_path)?;
        let store = AliasStore::load(store_path)?;

        let dialect = match &args.shell {
            Some(shell) => shell.parse()?,
            None => config.shell,
        };

        Ok(Self {
            config_path,
            config,
            store,
            dialect,
        })
    }

    pub fn save_config(&self) -> Result<()> {
        self.config.save(&self.config_path)
    }

    /// A not-found error for `name`, with the closest existing name as a hint.
    pub fn not_found(&self, name: &str) -> Error {
        Error::not_found(name, closest_name(name, self.store.names()))
    }

    /// # Errors
    ///
    /// Returns an error if no provider is configured or `provider` is unknown.
    pub fn translator(&self, provider: Option<&str>) -> Result<HttpTranslator> {
        let settings = self.config.provider(provider)?;
        debug!("Using AI provider `{}` ({})", settings.kind, settings.model);
        HttpTranslator::new(settings.clone())
    }
}

/// Runs the subcommand given in `args`.
///
/// # Errors
///
/// Returns the error of whichever step failed; nothing is written after a failure.
pub fn run(args: Args) -> Result<()> {
    let mut context = Context::load(&args)?;

    match args.command {
        Command::Add { name, command } => aliases::add(&mut context, &name, &command.join(" ")),
        Command::Remove { name } => aliases::remove(&mut context, &name),
        Command::List => aliases::list(&context),
        Command::Apply => aliases::apply(&context),
        Command::Import => aliases::import(&mut context),
        Command::Export { target, file } => aliases::export(&context, &target, &file),
        Command::Convert {
            name,
            target,
            provider,
            save,
        } => ai::convert(&mut context, &name, &target, provider.as_deref(), save),
        Command::Generate {
            command,
            provider,
            yes,
        } => ai::generate(&mut context, &command.join(" "), provider.as_deref(), yes),
        Command::SetShell { shell } => settings::set_shell(&mut context, &shell),
        Command::SetFile { path } => settings::set_file(&mut context, &path),
        Command::DetectShell => settings::detect_shell(&mut context),
        Command::ConfigureAi {
            kind,
            endpoint,
            model,
            api_key,
        } => ai::configure(&mut context, &kind, &endpoint, &model, api_key),
        Command::ListProviders => ai::list_providers(&context),
        Command::Shells => settings::shells(&context),
    }
}
