//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied by the command handlers, not here)
//! 2. `BACKBONE_*` environment variables, `__` between sections
//!    (`BACKBONE_DEFAULTS__AUTH_TYPE=session`)
//! 3. The config file (`--config`, or [`AppConfig::config_path`])
//! 4. Built-in defaults
//!
//! ```toml
//! [defaults]
//! database = "mongoose"
//! auth = true
//! auth_type = "jwt"
//! auth_features = ["passwordReset"]
//! notifications = false
//! notification_providers = []
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use backbone_core::domain::{AuthFeature, AuthType, Database, NotificationProvider};

use crate::error::{CliError, CliResult};

/// Prefix of the environment variables read into the config.
pub const ENV_PREFIX: &str = "BACKBONE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Answers used when a question is skipped.
    pub defaults: Defaults,
    pub output: OutputConfig,
    pub templates: TemplateConfig,
    pub install: InstallConfig,
    pub logging: LoggingConfig,
}

/// Raw default answers, in the same spelling the prompts produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub database: String,
    pub auth: bool,
    pub auth_type: String,
    pub auth_features: Vec<String>,
    pub notifications: bool,
    pub notification_providers: Vec<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            database: Database::default().as_str().into(),
            auth: true,
            auth_type: AuthType::default().as_str().into(),
            auth_features: vec![AuthFeature::PasswordReset.as_str().into()],
            notifications: false,
            notification_providers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`. Overridden by `--output-format`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    pub enabled: bool,
    /// Executable invoked as `<package_manager> install <pkg>@latest ...`.
    pub package_manager: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            package_manager: "npm".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs (without colors) to this file.
    pub file: Option<PathBuf>,
}

/// [`Defaults`] parsed into core types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultChoices {
    pub database: Database,
    pub auth: bool,
    pub auth_type: AuthType,
    pub auth_features: Vec<AuthFeature>,
    pub notifications: bool,
    pub notification_providers: Vec<NotificationProvider>,
}

impl Defaults {
    /// Parse the configured strings. A bad value names its key.
    pub fn resolve(&self) -> CliResult<DefaultChoices> {
        Ok(DefaultChoices {
            database: parse_value("defaults.database", &self.database)?,
            auth: self.auth,
            auth_type: parse_value("defaults.auth_type", &self.auth_type)?,
            auth_features: parse_list("defaults.auth_features", &self.auth_features)?,
            notifications: self.notifications,
            notification_providers: parse_list(
                "defaults.notification_providers",
                &self.notification_providers,
            )?,
        })
    }
}

fn parse_value<T>(key: &str, raw: &str) -> CliResult<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>().map_err(|e| CliError::ConfigError {
        message: format!("{key}: {e}"),
        source: Some(Box::new(e)),
    })
}

fn parse_list<T>(key: &str, raw: &[String]) -> CliResult<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.iter().map(|v| parse_value(key, v)).collect()
}

impl AppConfig {
    /// Layer defaults, the config file and the environment.
    ///
    /// A file passed explicitly must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> CliResult<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("defaults.auth_features")
                    .with_list_parse_key("defaults.notification_providers"),
            )
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .map_err(config_error)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs`, falling back to `.backbone.toml` in
    /// the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "backbone", "backbone")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".backbone.toml"))
    }
}

fn config_error(e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_defaults_follow_the_question_flow() {
        let choices = AppConfig::default().defaults.resolve().unwrap();
        assert_eq!(choices.database, Database::Mongoose);
        assert!(choices.auth);
        assert_eq!(choices.auth_type, AuthType::Jwt);
        assert_eq!(choices.auth_features, vec![AuthFeature::PasswordReset]);
        assert!(!choices.notifications);
        assert!(choices.notification_providers.is_empty());
    }

    #[test]
    fn bad_default_names_the_key() {
        let defaults = Defaults {
            auth_type: "oauth".into(),
            ..Defaults::default()
        };
        match defaults.resolve() {
            Err(CliError::ConfigError { message, .. }) => {
                assert!(message.starts_with("defaults.auth_type"), "{message}");
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[defaults]\nauth_type = \"session\"\nnotification_providers = [\"sms\"]\n\n[install]\nenabled = false"
        )
        .unwrap();

        let cfg = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.defaults.auth_type, "session");
        assert_eq!(cfg.defaults.notification_providers, vec!["sms".to_string()]);
        assert!(!cfg.install.enabled);
        // untouched keys keep their defaults
        assert_eq!(cfg.install.package_manager, "npm");
        assert!(cfg.defaults.auth);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn default_config_serialises_to_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(text.contains("[defaults]"));
        assert!(text.contains("auth_type = \"jwt\""));
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
