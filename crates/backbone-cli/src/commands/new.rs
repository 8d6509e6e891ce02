//! Implementation of the `backbone new` command.
//!
//! Collects the feature selection (flags, then questions, then configured
//! defaults), runs the assembly pipeline and reports the result. The
//! pipeline itself lives in `backbone-core`.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument};

use backbone_adapters::{LocalFilesystem, NpmInstaller, locate_templates};
use backbone_core::{
    application::{AssemblyService, FeatureSummary, ports::InstallOutcome},
    domain::{
        AuthFeature, AuthType, Database, DomainError, DomainValidator, FeatureSelection,
        NotificationProvider,
    },
};

use crate::{
    cli::{
        AuthFeatureArg, AuthTypeArg, DatabaseArg, NewArgs, NotifyArg, OutputFormat,
        global::GlobalArgs,
    },
    config::{AppConfig, DefaultChoices, InstallConfig},
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Execute `backbone new`.
///
/// 1. Gather choices from flags
/// 2. Ask for the rest when interactive
/// 3. Fill remaining gaps from configured defaults and validate
/// 4. Locate templates and assemble
/// 5. Print the summary, then wait for the background install
#[instrument(skip_all, fields(project = args.name.as_deref().unwrap_or("<prompt>")))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let defaults = config.defaults.resolve()?;

    let choices = Choices::from_args(&args);
    let choices = if !args.yes && output.is_interactive() {
        ask(choices, &defaults)?
    } else {
        choices
    };
    let selection = choices.into_selection(&defaults)?;

    debug!(
        database = %selection.database(),
        auth = ?selection.auth_type(),
        auth_features = ?selection.auth_features().collect::<Vec<_>>(),
        providers = ?selection.notification_providers().collect::<Vec<_>>(),
        "Selection resolved"
    );

    let layout = locate_templates(
        args.templates.as_deref(),
        config.templates.local_path.as_deref(),
    )?;
    let output_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let install_enabled = !args.no_install && config.install.enabled;

    let silent = global.quiet || output.format() == OutputFormat::Json;
    let installer = installer_for(&config.install, silent);
    let mut service = AssemblyService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(installer),
        layout,
    );
    if !install_enabled {
        service = service.without_install();
    }
    debug!(templates = %service.layout().root().display(), "Templates resolved");

    output.header(&format!("Creating '{}'...", selection.project_name()))?;
    let spinner = output.spinner("Assembling project");
    let result = service.assemble(&selection, &output_dir);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let mut summary = result.with_cli_context(|| "assembling project")?;
    info!(target = %summary.target_dir.display(), "Project assembled");

    let install = summary.take_install();

    if output.format() == OutputFormat::Json {
        let status = match install {
            Some(handle) => InstallStatus::from(handle.wait()),
            None => InstallStatus::Skipped,
        };
        output.json(&NewReport {
            summary: &summary,
            install: status,
        })?;
        return Ok(());
    }

    print_summary(&summary, &output)?;

    match install {
        Some(handle) => {
            output.info("Installing dependencies...")?;
            match handle.wait() {
                InstallOutcome::Succeeded => output.success("Dependencies installed")?,
                InstallOutcome::Failed { error } => {
                    output.warning(&error.to_string())?;
                    output.warning(&format!(
                        "The project is ready; run 'npm install' inside {}",
                        summary.target_dir.display()
                    ))?;
                }
            }
        }
        None => output.info("Dependency installation skipped")?,
    }

    Ok(())
}

#[cfg(feature = "interactive")]
fn ask(choices: Choices, defaults: &DefaultChoices) -> CliResult<Choices> {
    super::prompts::complete(choices, defaults)
}

#[cfg(not(feature = "interactive"))]
fn ask(choices: Choices, _defaults: &DefaultChoices) -> CliResult<Choices> {
    if choices.name.is_none() {
        return Err(crate::error::CliError::FeatureNotAvailable {
            feature: "interactive",
        });
    }
    Ok(choices)
}

fn installer_for(config: &InstallConfig, silent: bool) -> NpmInstaller {
    let installer = if config.package_manager == "npm" {
        NpmInstaller::new()
    } else {
        NpmInstaller::with_program(config.package_manager.clone())
    };
    installer.silent(silent)
}

// ── Choices ───────────────────────────────────────────────────────────────────

/// Partially answered question flow. `None` means "not decided yet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Choices {
    pub name: Option<String>,
    pub database: Option<Database>,
    pub auth: Option<bool>,
    pub auth_type: Option<AuthType>,
    pub auth_features: Option<Vec<AuthFeature>>,
    pub notifications: Option<bool>,
    pub notification_providers: Option<Vec<NotificationProvider>>,
}

impl Choices {
    /// Naming an auth type or feature implies auth; naming a provider
    /// implies notifications.
    pub fn from_args(args: &NewArgs) -> Self {
        let auth = if args.no_auth {
            Some(false)
        } else if args.auth.is_some() || !args.auth_features.is_empty() {
            Some(true)
        } else {
            None
        };

        let auth_features = (!args.auth_features.is_empty())
            .then(|| args.auth_features.iter().copied().map(convert_auth_feature).collect());
        let notification_providers = (!args.notify.is_empty())
            .then(|| args.notify.iter().copied().map(convert_provider).collect::<Vec<_>>());

        Self {
            name: args.name.clone(),
            database: args.database.map(convert_database),
            auth,
            auth_type: args.auth.map(convert_auth_type),
            auth_features,
            notifications: notification_providers.as_ref().map(|_| true),
            notification_providers,
        }
    }

    /// Fill gaps from `defaults` and build a validated selection.
    pub fn into_selection(self, defaults: &DefaultChoices) -> CliResult<FeatureSelection> {
        let name = self.name.ok_or(DomainError::MissingRequiredField {
            field: "project name",
        })?;
        DomainValidator::validate_project_name(&name)?;

        let selection = FeatureSelection::builder()
            .project_name(name)
            .database(self.database.unwrap_or(defaults.database))
            .include_auth(self.auth.unwrap_or(defaults.auth))
            .auth_type(self.auth_type.unwrap_or(defaults.auth_type))
            .auth_features(
                self.auth_features
                    .unwrap_or_else(|| defaults.auth_features.clone()),
            )
            .include_notifications(self.notifications.unwrap_or(defaults.notifications))
            .notification_providers(
                self.notification_providers
                    .unwrap_or_else(|| defaults.notification_providers.clone()),
            )
            .build()?;
        Ok(selection)
    }
}

// ── Type conversions CLI → core ───────────────────────────────────────────────

fn convert_database(db: DatabaseArg) -> Database {
    match db {
        DatabaseArg::Mongoose => Database::Mongoose,
    }
}

fn convert_auth_type(auth: AuthTypeArg) -> AuthType {
    match auth {
        AuthTypeArg::Jwt => AuthType::Jwt,
        AuthTypeArg::Session => AuthType::Session,
    }
}

fn convert_auth_feature(feature: AuthFeatureArg) -> AuthFeature {
    match feature {
        AuthFeatureArg::PasswordReset => AuthFeature::PasswordReset,
        AuthFeatureArg::Otp => AuthFeature::Otp,
        AuthFeatureArg::GoogleOAuth => AuthFeature::GoogleOAuth,
        AuthFeatureArg::MagicLink => AuthFeature::MagicLink,
    }
}

fn convert_provider(provider: NotifyArg) -> NotificationProvider {
    match provider {
        NotifyArg::Email => NotificationProvider::Email,
        NotifyArg::Sms => NotificationProvider::Sms,
    }
}

// ── Reporting ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewReport<'a> {
    #[serde(flatten)]
    summary: &'a FeatureSummary,
    install: InstallStatus,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum InstallStatus {
    Skipped,
    Succeeded,
    Failed { error: String },
}

impl From<InstallOutcome> for InstallStatus {
    fn from(outcome: InstallOutcome) -> Self {
        match outcome {
            InstallOutcome::Succeeded => Self::Succeeded,
            InstallOutcome::Failed { error } => Self::Failed {
                error: error.to_string(),
            },
        }
    }
}

fn print_summary(summary: &FeatureSummary, out: &OutputManager) -> CliResult<()> {
    out.success(&format!(
        "Project '{}' created at {}",
        summary.project_name,
        summary.target_dir.display()
    ))?;

    out.print("")?;
    out.print("Included features:")?;
    for feature in &summary.features {
        out.print(&format!("  - {feature}"))?;
    }

    out.print("")?;
    out.print("Next steps:")?;
    out.print(&format!("  cd {}", summary.target_dir.display()))?;
    out.print("  npm install")?;
    out.print("  npm run dev")?;
    out.print("")?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
