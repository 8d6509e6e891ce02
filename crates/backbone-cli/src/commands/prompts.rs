//! The question flow, asked only for choices no flag settled.
//!
//! Questions, labels and preselected answers follow the order users of the
//! generator expect: name, database, auth, auth type, auth features,
//! notifications, providers.

use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};

use backbone_core::domain::{
    AuthFeature, AuthType, Database, DomainValidator, NotificationProvider,
};

use super::new::Choices;
use crate::{
    config::DefaultChoices,
    error::{CliError, CliResult},
};

fn prompt_failed(e: dialoguer::Error) -> CliError {
    CliError::from(std::io::Error::from(e))
}

/// Ask for every missing choice. Auth and provider questions are skipped
/// when their gate is answered "no".
pub fn complete(mut choices: Choices, defaults: &DefaultChoices) -> CliResult<Choices> {
    let theme = ColorfulTheme::default();

    if choices.name.is_none() {
        let name: String = Input::with_theme(&theme)
            .with_prompt("Project name:")
            .validate_with(|input: &String| -> Result<(), String> {
                DomainValidator::validate_project_name(input).map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(prompt_failed)?;
        choices.name = Some(name);
    }

    if choices.database.is_none() {
        choices.database = Some(select(
            &theme,
            "Select a database:",
            &Database::ALL,
            Database::label,
            defaults.database,
        )?);
    }

    if choices.auth.is_none() {
        choices.auth = Some(confirm(
            &theme,
            "Would you like to include authentication?",
            defaults.auth,
        )?);
    }

    if choices.auth == Some(true) {
        if choices.auth_type.is_none() {
            choices.auth_type = Some(select(
                &theme,
                "Select authentication type:",
                &AuthType::ALL,
                AuthType::label,
                defaults.auth_type,
            )?);
        }
        if choices.auth_features.is_none() {
            choices.auth_features = Some(multi_select(
                &theme,
                "Select additional authentication features:",
                &AuthFeature::ALL,
                AuthFeature::label,
                &defaults.auth_features,
            )?);
        }
    }

    if choices.notifications.is_none() {
        choices.notifications = Some(confirm(
            &theme,
            "Would you like to include notifications (email/SMS)?",
            defaults.notifications,
        )?);
    }

    if choices.notifications == Some(true) && choices.notification_providers.is_none() {
        choices.notification_providers = Some(multi_select(
            &theme,
            "Select notification providers to include:",
            &NotificationProvider::ALL,
            NotificationProvider::label,
            &defaults.notification_providers,
        )?);
    }

    Ok(choices)
}

fn confirm(theme: &ColorfulTheme, prompt: &str, default: bool) -> CliResult<bool> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact_opt()
        .map_err(prompt_failed)?
        .ok_or(CliError::Cancelled)
}

fn select<T: Copy + PartialEq>(
    theme: &ColorfulTheme,
    prompt: &str,
    options: &[T],
    label: fn(&T) -> &'static str,
    default: T,
) -> CliResult<T> {
    let labels: Vec<&str> = options.iter().map(label).collect();
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(options.iter().position(|o| *o == default).unwrap_or(0))
        .interact_opt()
        .map_err(prompt_failed)?
        .ok_or(CliError::Cancelled)?;
    options.get(index).copied().ok_or(CliError::Cancelled)
}

fn multi_select<T: Copy + PartialEq>(
    theme: &ColorfulTheme,
    prompt: &str,
    options: &[T],
    label: fn(&T) -> &'static str,
    checked: &[T],
) -> CliResult<Vec<T>> {
    let labels: Vec<&str> = options.iter().map(label).collect();
    let preselected: Vec<bool> = options.iter().map(|o| checked.contains(o)).collect();
    let indices = MultiSelect::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .defaults(&preselected)
        .interact_opt()
        .map_err(prompt_failed)?
        .ok_or(CliError::Cancelled)?;
    Ok(indices
        .into_iter()
        .filter_map(|i| options.get(i).copied())
        .collect())
}
