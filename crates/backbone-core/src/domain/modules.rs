//! Module registry.
//!
//! Every optional piece of a generated project (the base skeleton, the
//! database connector, the auth module and its variants, each notification
//! channel) is described exactly once by a [`ModuleDef`]: the [`Gate`] that
//! activates it, the file operations it contributes, the packages it adds and
//! the feature tag it records.
//!
//! [`AssemblyPlan::for_selection`](super::AssemblyPlan::for_selection) walks
//! [`MODULE_REGISTRY`] once, in order. The same [`Gate`] type decides which
//! blocks appear in the generated env template and constants file (see
//! `artifacts/blocks.rs`), so file copying and config generation cannot drift
//! apart.
//!
//! # Adding a New Module
//!
//! 1. Add its template sources under `templates/` and a path constant on
//!    [`TemplateLayout`](super::TemplateLayout)
//! 2. Add one [`ModuleDef`] entry to [`MODULE_REGISTRY`]
//! 3. Add its env block to `ENV_BLOCKS` if it needs configuration

use crate::domain::{
    entities::{plan::FeatureTag, selection::FeatureSelection, template_layout::TemplateLayout},
    value_objects::{AuthFeature, AuthType, Database, NotificationProvider},
};

// ── Gates ────────────────────────────────────────────────────────────────────

/// Condition under which a module or a config block is active.
///
/// Auth and notification gates are evaluated through the selection's gated
/// accessors, so stale sub-choices behind a closed gate never open anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    Database(Database),
    Auth,
    AuthType(AuthType),
    /// Open when any of the listed auth features is selected.
    AnyAuthFeature(&'static [AuthFeature]),
    Provider(NotificationProvider),
}

impl Gate {
    pub fn is_open(&self, selection: &FeatureSelection) -> bool {
        match *self {
            Self::Always => true,
            Self::Database(db) => selection.database() == db,
            Self::Auth => selection.includes_auth(),
            Self::AuthType(kind) => selection.auth_type() == Some(kind),
            Self::AnyAuthFeature(features) => {
                features.iter().any(|f| selection.has_auth_feature(*f))
            }
            Self::Provider(provider) => selection.has_provider(provider),
        }
    }
}

// ── File operations ──────────────────────────────────────────────────────────

/// One file-system step contributed by a module.
///
/// `from` paths are relative to the template root, `to` and `path` relative to
/// the target directory. An empty `to` means the target directory itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpDef {
    /// Merge a whole directory into the target, overwriting collisions.
    CopyTree { from: &'static str, to: &'static str },
    /// Copy a single file; the source must exist.
    CopyFile { from: &'static str, to: &'static str },
    /// Copy a single file only if the source exists.
    CopyFileIfPresent { from: &'static str, to: &'static str },
    /// Delete a file from the target if it is there.
    RemoveIfPresent { path: &'static str },
}

// ── Module definitions ───────────────────────────────────────────────────────

/// Describes everything the planner needs to know about one module.
#[derive(Debug, Clone, Copy)]
pub struct ModuleDef {
    /// Short name used in logs.
    pub name: &'static str,

    pub gate: Gate,

    /// File operations, applied in order.
    pub operations: &'static [OpDef],

    /// Packages appended to the dependency set, in order.
    pub dependencies: &'static [&'static str],

    /// Tag recorded in the feature summary, if any.
    pub tag: Option<FeatureTag>,
}

/// Single source of truth for what each selection produces.
///
/// Ordering is semantic: operations are applied, and dependencies recorded,
/// in registry order.
pub static MODULE_REGISTRY: &[ModuleDef] = &[
    // ── Base skeleton ────────────────────────────────────────────────────────
    ModuleDef {
        name: "base",
        gate: Gate::Always,
        operations: &[
            OpDef::CopyTree {
                from: TemplateLayout::BASE,
                to: "",
            },
            OpDef::CopyFileIfPresent {
                from: TemplateLayout::BASE_APP_ENTRY,
                to: "app.js",
            },
            OpDef::CopyFileIfPresent {
                from: TemplateLayout::BASE_SERVER_ENTRY,
                to: "server.js",
            },
            OpDef::RemoveIfPresent { path: "src/app.js" },
            OpDef::RemoveIfPresent {
                path: "src/server.js",
            },
            OpDef::RemoveIfPresent { path: "src/index.js" },
        ],
        dependencies: &[],
        tag: None,
    },
    // ── Database ─────────────────────────────────────────────────────────────
    ModuleDef {
        name: "db-mongoose",
        gate: Gate::Database(Database::Mongoose),
        operations: &[OpDef::CopyFile {
            from: TemplateLayout::MONGOOSE_CONFIG,
            to: "src/config/db.js",
        }],
        dependencies: &["mongoose"],
        tag: Some(FeatureTag::Mongodb),
    },
    // ── Auth ─────────────────────────────────────────────────────────────────
    ModuleDef {
        name: "auth",
        gate: Gate::Auth,
        operations: &[
            OpDef::CopyTree {
                from: TemplateLayout::AUTH_MODULE,
                to: "",
            },
            OpDef::RemoveIfPresent {
                path: "src/config/authConstants.js",
            },
            OpDef::CopyFile {
                from: TemplateLayout::ROLES_CONFIG,
                to: "src/config/roles.js",
            },
        ],
        dependencies: &["jsonwebtoken", "bcryptjs", "express-rate-limit", "helmet"],
        tag: Some(FeatureTag::Auth),
    },
    ModuleDef {
        name: "auth-session",
        gate: Gate::AuthType(AuthType::Session),
        operations: &[],
        dependencies: &["express-session", "connect-mongo"],
        tag: None,
    },
    ModuleDef {
        name: "auth-google-oauth",
        gate: Gate::AnyAuthFeature(&[AuthFeature::GoogleOAuth]),
        operations: &[],
        dependencies: &["passport", "passport-google-oauth20"],
        tag: None,
    },
    // ── Notifications ────────────────────────────────────────────────────────
    ModuleDef {
        name: "notifications-email",
        gate: Gate::Provider(NotificationProvider::Email),
        operations: &[OpDef::CopyFileIfPresent {
            from: TemplateLayout::EMAIL_CONFIG,
            to: "src/config/email.js",
        }],
        dependencies: &["nodemailer", "ejs"],
        tag: Some(FeatureTag::NotificationsEmail),
    },
    ModuleDef {
        name: "notifications-sms",
        gate: Gate::Provider(NotificationProvider::Sms),
        operations: &[OpDef::CopyFileIfPresent {
            from: TemplateLayout::SMS_CONFIG,
            to: "src/config/sms.js",
        }],
        dependencies: &["twilio"],
        tag: Some(FeatureTag::NotificationsSms),
    },
];

/// Modules whose gate is open for `selection`, in registry order.
pub fn active_modules(selection: &FeatureSelection) -> impl Iterator<Item = &'static ModuleDef> + '_ {
    MODULE_REGISTRY
        .iter()
        .filter(move |m| m.gate.is_open(selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn selection() -> crate::domain::FeatureSelectionBuilder {
        FeatureSelection::builder().project_name("api")
    }

    #[test]
    fn registry_names_are_unique() {
        let mut seen = HashSet::new();
        for module in MODULE_REGISTRY {
            assert!(seen.insert(module.name), "duplicate module {}", module.name);
        }
    }

    #[test]
    fn registry_paths_are_relative() {
        use std::path::Path;

        for module in MODULE_REGISTRY {
            for op in module.operations {
                let paths = match *op {
                    OpDef::CopyTree { from, to }
                    | OpDef::CopyFile { from, to }
                    | OpDef::CopyFileIfPresent { from, to } => vec![from, to],
                    OpDef::RemoveIfPresent { path } => vec![path],
                };
                for path in paths {
                    assert!(!Path::new(path).is_absolute(), "{}: {path}", module.name);
                }
            }
        }
        for path in [
            crate::domain::artifacts::ENV_TEMPLATE_PATH,
            crate::domain::artifacts::CONSTANTS_PATH,
        ] {
            assert!(!Path::new(path).is_absolute(), "{path}");
        }
    }

    #[test]
    fn base_module_comes_first_and_is_always_active() {
        let first = &MODULE_REGISTRY[0];
        assert_eq!(first.gate, Gate::Always);
        assert!(matches!(
            first.operations[0],
            OpDef::CopyTree { from: TemplateLayout::BASE, to: "" }
        ));
    }

    #[test]
    fn session_gate_stays_closed_without_auth() {
        let sel = selection()
            .include_auth(false)
            .auth_type(AuthType::Session)
            .build()
            .unwrap();
        assert!(!Gate::AuthType(AuthType::Session).is_open(&sel));
    }

    #[test]
    fn any_auth_feature_gate_opens_on_either_member() {
        let gate = Gate::AnyAuthFeature(&[AuthFeature::Otp, AuthFeature::MagicLink]);

        let otp = selection().auth_features([AuthFeature::Otp]).build().unwrap();
        let magic = selection()
            .auth_features([AuthFeature::MagicLink])
            .build()
            .unwrap();
        let neither = selection()
            .auth_features([AuthFeature::GoogleOAuth])
            .build()
            .unwrap();

        assert!(gate.is_open(&otp));
        assert!(gate.is_open(&magic));
        assert!(!gate.is_open(&neither));
    }

    #[test]
    fn active_modules_for_minimal_selection() {
        let sel = selection()
            .include_auth(false)
            .include_notifications(false)
            .build()
            .unwrap();
        let names: Vec<_> = active_modules(&sel).map(|m| m.name).collect();
        assert_eq!(names, vec!["base", "db-mongoose"]);
    }
}
