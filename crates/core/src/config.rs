//! Configuration for aliasctl.
//!
//! Resolves where the configuration and the alias store live, and loads the
//! `config.yml` document holding the active shell, its startup file and the
//! configured AI providers. Paths may contain `~`, which is expanded on use.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::file_handling::{read_optional, write_atomically};
use crate::providers::ProviderSettings;

#[cfg(not(windows))]
const CONFIG_DIRECTORY: &str = "~/.config/aliasctl";
#[cfg(windows)]
const CONFIG_DIRECTORY: &str = "~/AppData/Roaming/AliasCtl";

const CONFIG_FILE_NAME: &str = "config.yml";
const STORE_FILE_NAME: &str = "aliases.json";
const FILE_DESCRIPTION: &str = "config";

/// Resolves the configuration file path.
///
/// Uses `config_path_arg` when given, otherwise `config.yml` in the aliasctl
/// configuration directory. `~` is expanded.
///
/// # Examples
///
/// ```
/// use aliasctl_core::config::get_config_path;
///
/// let custom_path = get_config_path(&Some("/path/to/config.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/config.yml");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    match config_path_arg {
        Some(config_path) => expand_path(config_path),
        None => expand_path(&format!("{CONFIG_DIRECTORY}/{CONFIG_FILE_NAME}")),
    }
}

/// Resolves the alias store path, `aliases.json` in the configuration directory
/// unless overridden.
pub fn get_store_path(store_path_arg: &Option<String>) -> String {
    match store_path_arg {
        Some(store_path) => expand_path(store_path),
        None => expand_path(&format!("{CONFIG_DIRECTORY}/{STORE_FILE_NAME}")),
    }
}

/// Expands a leading `~` to the home directory.
///
/// # Examples
///
/// ```
/// use aliasctl_core::config::expand_path;
///
/// assert!(!expand_path("~/.zshrc").starts_with('~'));
/// assert_eq!(expand_path("/etc/profile"), "/etc/profile");
/// ```
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}

/// The startup file aliasctl edits by default for `dialect`.
pub fn default_startup_file(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Bash => "~/.bash_aliases",
        Dialect::Zsh => "~/.zshrc",
        Dialect::Fish => "~/.config/fish/config.fish",
        Dialect::Ksh => "~/.kshrc",
        Dialect::PowerShell => "~/Documents/WindowsPowerShell/Microsoft.PowerShell_profile.ps1",
        Dialect::Pwsh => "~/Documents/PowerShell/Microsoft.PowerShell_profile.ps1",
        Dialect::Cmd => "~/aliases.cmd",
    }
}

/// Works out the user's shell and its startup file.
///
/// On Windows the choice is between PowerShell 7 (`pwsh`) when installed and
/// Windows PowerShell. Elsewhere `shell_env` (the `$SHELL` value) decides, falling
/// back to bash.
pub fn detect_shell(shell_env: Option<&str>, windows: bool, pwsh_installed: bool) -> (Dialect, String) {
    let dialect = if windows {
        if pwsh_installed {
            Dialect::Pwsh
        } else {
            Dialect::PowerShell
        }
    } else {
        let shell_env = shell_env.unwrap_or_default();
        if shell_env.is_empty() {
            warn!("SHELL environment variable not set, defaulting to bash");
        }

        if shell_env.contains("zsh") {
            Dialect::Zsh
        } else if shell_env.contains("fish") {
            Dialect::Fish
        } else if shell_env.contains("ksh") {
            Dialect::Ksh
        } else {
            Dialect::Bash
        }
    };

    (dialect, default_startup_file(dialect).to_string())
}

/// [`detect_shell`] for the running process.
pub fn detect_current_shell() -> (Dialect, String) {
    let shell_env = std::env::var("SHELL").ok();
    let pwsh_installed = cfg!(windows)
        && std::env::var("ProgramFiles")
            .map(|program_files| Path::new(&program_files).join("PowerShell").join("7").is_dir())
            .unwrap_or(false);

    let (dialect, startup_file) = detect_shell(shell_env.as_deref(), cfg!(windows), pwsh_installed);
    debug!("Detected shell {dialect} with startup file `{startup_file}`");
    (dialect, startup_file)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub shell: Dialect,
    pub alias_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub providers: IndexMap<String, ProviderSettings>,
}

impl AppConfig {
    pub fn new(shell: Dialect, alias_file: &str) -> Self {
        Self {
            shell,
            alias_file: alias_file.to_string(),
            default_provider: None,
            providers: IndexMap::new(),
        }
    }

    /// Reads the configuration at `path`, or `None` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        debug!("Config path: `{}`", path.display());

        let Some(contents) = read_optional(FILE_DESCRIPTION, path)? else {
            return Ok(None);
        };

        serde_yaml::from_str(&contents)
            .map(Some)
            .map_err(|e| Error::yaml_error("reading", FILE_DESCRIPTION, &path.display().to_string(), e))
    }

    /// Loads the configuration, detecting the shell and saving the result when
    /// no configuration exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read, parsed or created.
    pub fn load_or_detect(path: &Path) -> Result<Self> {
        if let Some(config) = Self::load(path)? {
            return Ok(config);
        }

        let (shell, alias_file) = detect_current_shell();
        info!("No configuration found, using detected shell {shell}");

        let config = Self::new(shell, &alias_file);
        config.save(path)?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized or written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let path_display = path.display().to_string();
        let contents = serde_yaml::to_string(self)
            .map_err(|e| Error::yaml_error("writing", FILE_DESCRIPTION, &path_display, e))?;

        write_atomically(FILE_DESCRIPTION, path, &contents)
    }

    /// The startup file with `~` expanded.
    pub fn alias_file_path(&self) -> PathBuf {
        PathBuf::from(expand_path(&self.alias_file))
    }

    /// Registers `settings` under its kind name and makes it the default provider.
    pub fn add_provider(&mut self, settings: ProviderSettings) {
        let name = settings.kind.name().to_string();

        if settings.api_key.is_some() {
            warn!("The API key for `{name}` is stored in plain text in the configuration file");
        }

        info!("Configured AI provider `{name}` with model `{}`", settings.model);
        self.providers.insert(name.clone(), settings);
        self.default_provider = Some(name);
    }

    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Looks up the provider `name`, or the default provider when `name` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AiNotConfigured`] when no provider is configured, and
    /// [`Error::UnknownProvider`] when `name` is not one of them.
    pub fn provider(&self, name: Option<&str>) -> Result<&ProviderSettings> {
        if self.providers.is_empty() {
            return Err(Error::AiNotConfigured);
        }

        let name = match name.or(self.default_provider.as_deref()) {
            Some(name) => name,
            None => self.provider_names().next().ok_or(Error::AiNotConfigured)?,
        };

        self.providers.get(name).ok_or_else(|| Error::UnknownProvider {
            name: name.to_string(),
            available: self.provider_names().join(", "),
        })
    }

    pub fn has_provider(&self) -> bool {
        !self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderKind;

    fn ollama() -> ProviderSettings {
        ProviderSettings::new(ProviderKind::Ollama, "http://localhost:11434", "llama3", None).unwrap()
    }

    fn openai() -> ProviderSettings {
        ProviderSettings::new(
            ProviderKind::OpenAi,
            "https://api.openai.com",
            "gpt-4o-mini",
            Some("sk-test".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_get_config_path_with_custom_path() {
        let custom_path = Some("/custom/path/config.yml".to_string());
        assert_eq!(get_config_path(&custom_path), "/custom/path/config.yml");
    }

    #[test]
    fn test_get_config_path_with_none() {
        let result = get_config_path(&None);
        assert!(result.ends_with("config.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_store_path_with_none() {
        let result = get_store_path(&None);
        assert!(result.ends_with("aliases.json"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_store_path_with_tilde() {
        let result = get_store_path(&Some("~/my-aliases.json".to_string()));
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("my-aliases.json"));
    }

    #[test]
    fn test_detect_shell_from_env() {
        assert_eq!(
            detect_shell(Some("/usr/bin/zsh"), false, false),
            (Dialect::Zsh, "~/.zshrc".to_string())
        );
        assert_eq!(
            detect_shell(Some("/usr/local/bin/fish"), false, false),
            (Dialect::Fish, "~/.config/fish/config.fish".to_string())
        );
        assert_eq!(
            detect_shell(Some("/bin/ksh"), false, false),
            (Dialect::Ksh, "~/.kshrc".to_string())
        );
        assert_eq!(
            detect_shell(Some("/bin/bash"), false, false),
            (Dialect::Bash, "~/.bash_aliases".to_string())
        );
    }

    #[test]
    fn test_detect_shell_defaults_to_bash() {
        assert_eq!(detect_shell(None, false, false).0, Dialect::Bash);
        assert_eq!(detect_shell(Some("/bin/tcsh"), false, false).0, Dialect::Bash);
    }

    #[test]
    fn test_detect_shell_on_windows() {
        let (dialect, file) = detect_shell(None, true, true);
        assert_eq!(dialect, Dialect::Pwsh);
        assert!(file.contains("Documents/PowerShell"));

        let (dialect, file) = detect_shell(Some("/bin/zsh"), true, false);
        assert_eq!(dialect, Dialect::PowerShell);
        assert!(file.contains("WindowsPowerShell"));
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load(&temp_dir.path().join("config.yml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.yml");

        let mut config = AppConfig::new(Dialect::Fish, "~/.config/fish/config.fish");
        config.add_provider(ollama());
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_file_format() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yml");
        std::fs::write(
            &path,
            "shell: pwsh\nalias_file: /tmp/profile.ps1\nproviders:\n  openai:\n    kind: openai\n    endpoint: https://api.openai.com\n    model: gpt-4o-mini\n    api_key: sk-test\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap().unwrap();

        assert_eq!(config.shell, Dialect::Pwsh);
        assert_eq!(config.alias_file_path(), PathBuf::from("/tmp/profile.ps1"));
        assert_eq!(config.provider(None).unwrap().kind, ProviderKind::OpenAi);
    }

    #[test]
    fn test_invalid_config_is_a_yaml_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yml");
        std::fs::write(&path, "shell: tcsh\nalias_file: x\n").unwrap();

        assert!(matches!(AppConfig::load(&path), Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_provider_not_configured() {
        let config = AppConfig::new(Dialect::Bash, "~/.bash_aliases");
        assert!(matches!(config.provider(None), Err(Error::AiNotConfigured)));
        assert!(!config.has_provider());
    }

    #[test]
    fn test_last_configured_provider_is_default() {
        let mut config = AppConfig::new(Dialect::Bash, "~/.bash_aliases");
        config.add_provider(ollama());
        config.add_provider(openai());

        assert_eq!(config.default_provider.as_deref(), Some("openai"));
        assert_eq!(config.provider(None).unwrap().model, "gpt-4o-mini");
        assert_eq!(config.provider(Some("ollama")).unwrap().model, "llama3");
    }

    #[test]
    fn test_unknown_provider_lists_available() {
        let mut config = AppConfig::new(Dialect::Bash, "~/.bash_aliases");
        config.add_provider(ollama());

        match config.provider(Some("anthropic")) {
            Err(Error::UnknownProvider { name, available }) => {
                assert_eq!(name, "anthropic");
                assert_eq!(available, "ollama");
            }
            other => panic!("Expected UnknownProvider, got {other:?}"),
        }
    }

    #[test]
    fn test_reconfiguring_replaces_provider() {
        let mut config = AppConfig::new(Dialect::Bash, "~/.bash_aliases");
        config.add_provider(ollama());
        config.add_provider(
            ProviderSettings::new(ProviderKind::Ollama, "http://gpu-box:11434", "qwen", None).unwrap(),
        );

        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.provider(None).unwrap().model, "qwen");
    }
}
