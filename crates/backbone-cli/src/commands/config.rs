//! `backbone config`: inspect the effective configuration.

use serde_json::Value;

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.format() == OutputFormat::Json {
                output.json(&value)?;
            } else {
                output.print(&render_value(&value))?;
            }
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.print(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Look up a dotted key (`install.package_manager`) in the effective config.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Value> {
    let unknown = || CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    };

    let tree = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if key.is_empty() {
        return Err(unknown());
    }
    let pointer = format!("/{}", key.replace('.', "/"));
    tree.pointer(&pointer).cloned().ok_or_else(unknown)
}

/// Strings print bare, everything else as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "defaults.auth_type").unwrap();
        assert_eq!(render_value(&value), "jwt");
    }

    #[test]
    fn get_list_key_renders_as_json() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "defaults.auth_features").unwrap();
        assert_eq!(render_value(&value), r#"["passwordReset"]"#);
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
        assert!(get_config_value(&cfg, "").is_err());
    }

    #[test]
    fn unset_optional_key_is_empty() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "templates.local_path").unwrap();
        assert_eq!(render_value(&value), "");
    }

    #[test]
    fn get_bool_default() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "install.enabled").unwrap();
        assert_eq!(render_value(&value), "true");
    }
}
