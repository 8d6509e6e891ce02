//! The feature-selection record that drives one assembly run.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{AuthFeature, AuthType, Database, NotificationProvider},
};

/// Validated record of user choices.
///
/// Immutable once built. Gated fields keep whatever the selection source put
/// in them, but every accessor ignores them while their gate is off: a
/// selection with `include_auth = false` reports no auth type and no auth
/// features even if stale values are stored.
///
/// Sets are `BTreeSet` so iteration order, and therefore every artifact
/// derived from a selection, is stable.
///
/// Deserialising goes through [`FeatureSelectionBuilder::build`], so a
/// decoded selection passes the same checks as a built one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSelection")]
pub struct FeatureSelection {
    project_name: String,
    database: Database,
    include_auth: bool,
    auth_type: AuthType,
    auth_features: BTreeSet<AuthFeature>,
    include_notifications: bool,
    notification_providers: BTreeSet<NotificationProvider>,
}

impl FeatureSelection {
    pub fn builder() -> FeatureSelectionBuilder {
        FeatureSelectionBuilder::default()
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn database(&self) -> Database {
        self.database
    }

    pub fn includes_auth(&self) -> bool {
        self.include_auth
    }

    pub fn includes_notifications(&self) -> bool {
        self.include_notifications
    }

    /// The auth style, or `None` when auth is not included.
    pub fn auth_type(&self) -> Option<AuthType> {
        self.include_auth.then_some(self.auth_type)
    }

    /// Whether `feature` is active. Always `false` when auth is not included.
    pub fn has_auth_feature(&self, feature: AuthFeature) -> bool {
        self.include_auth && self.auth_features.contains(&feature)
    }

    /// Active auth features in declaration order. Empty when auth is off.
    pub fn auth_features(&self) -> impl Iterator<Item = AuthFeature> + '_ {
        self.auth_features
            .iter()
            .copied()
            .filter(|_| self.include_auth)
    }

    /// Whether `provider` is active. Always `false` when notifications are off.
    pub fn has_provider(&self, provider: NotificationProvider) -> bool {
        self.include_notifications && self.notification_providers.contains(&provider)
    }

    /// Active notification providers in declaration order.
    pub fn notification_providers(&self) -> impl Iterator<Item = NotificationProvider> + '_ {
        self.notification_providers
            .iter()
            .copied()
            .filter(|_| self.include_notifications)
    }
}

/// Builder for [`FeatureSelection`].
///
/// Defaults mirror the question flow: mongoose, JWT auth with password reset,
/// no notifications.
#[derive(Debug, Clone)]
pub struct FeatureSelectionBuilder {
    project_name: Option<String>,
    database: Database,
    include_auth: bool,
    auth_type: AuthType,
    auth_features: BTreeSet<AuthFeature>,
    include_notifications: bool,
    notification_providers: BTreeSet<NotificationProvider>,
}

impl Default for FeatureSelectionBuilder {
    fn default() -> Self {
        Self {
            project_name: None,
            database: Database::default(),
            include_auth: true,
            auth_type: AuthType::default(),
            auth_features: BTreeSet::from([AuthFeature::PasswordReset]),
            include_notifications: false,
            notification_providers: BTreeSet::new(),
        }
    }
}

impl FeatureSelectionBuilder {
    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn database(mut self, database: Database) -> Self {
        self.database = database;
        self
    }

    pub fn include_auth(mut self, include: bool) -> Self {
        self.include_auth = include;
        self
    }

    pub fn auth_type(mut self, auth_type: AuthType) -> Self {
        self.auth_type = auth_type;
        self
    }

    /// Replace the auth feature set.
    pub fn auth_features(mut self, features: impl IntoIterator<Item = AuthFeature>) -> Self {
        self.auth_features = features.into_iter().collect();
        self
    }

    pub fn include_notifications(mut self, include: bool) -> Self {
        self.include_notifications = include;
        self
    }

    /// Replace the notification provider set.
    pub fn notification_providers(
        mut self,
        providers: impl IntoIterator<Item = NotificationProvider>,
    ) -> Self {
        self.notification_providers = providers.into_iter().collect();
        self
    }

    /// Build the selection.
    ///
    /// The only check performed here is that a non-empty project name was
    /// given; enum membership is guaranteed by the types.
    pub fn build(self) -> Result<FeatureSelection, DomainError> {
        let project_name = self
            .project_name
            .filter(|n| !n.trim().is_empty())
            .ok_or(DomainError::MissingRequiredField {
                field: "project name",
            })?;

        Ok(FeatureSelection {
            project_name,
            database: self.database,
            include_auth: self.include_auth,
            auth_type: self.auth_type,
            auth_features: self.auth_features,
            include_notifications: self.include_notifications,
            notification_providers: self.notification_providers,
        })
    }
}

/// Wire shape of [`FeatureSelection`] before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSelection {
    project_name: String,
    database: Database,
    include_auth: bool,
    auth_type: AuthType,
    auth_features: BTreeSet<AuthFeature>,
    include_notifications: bool,
    notification_providers: BTreeSet<NotificationProvider>,
}

impl TryFrom<RawSelection> for FeatureSelection {
    type Error = DomainError;

    fn try_from(raw: RawSelection) -> Result<Self, Self::Error> {
        FeatureSelection::builder()
            .project_name(raw.project_name)
            .database(raw.database)
            .include_auth(raw.include_auth)
            .auth_type(raw.auth_type)
            .auth_features(raw.auth_features)
            .include_notifications(raw.include_notifications)
            .notification_providers(raw.notification_providers)
            .build()
    }
}
