//! Configuration blocks shared by the env template and the constants file.
//!
//! Both generators walk [`ENV_BLOCKS`] in order and emit a block only when
//! its gate is open, so the two artifacts always expose the same keys.

use crate::domain::{
    FeatureSelection,
    modules::Gate,
    value_objects::{AuthFeature, Database, NotificationProvider},
};

/// How a value is exposed in the constants module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Number,
}

/// One configuration key with its template default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvVar {
    pub key: &'static str,
    pub default: &'static str,
    pub kind: ValueKind,
    /// Inline remark appended after the value in the env template.
    pub note: Option<&'static str>,
    /// Whitespace between the value and the remark's `#`.
    pub note_gap: &'static str,
}

impl EnvVar {
    const fn text(key: &'static str, default: &'static str) -> Self {
        Self {
            key,
            default,
            kind: ValueKind::Text,
            note: None,
            note_gap: "  ",
        }
    }

    const fn number(key: &'static str, default: &'static str) -> Self {
        Self {
            key,
            default,
            kind: ValueKind::Number,
            note: None,
            note_gap: "  ",
        }
    }

    const fn noted(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }

    /// [`Self::noted`] with a single space before the `#`.
    const fn noted_tight(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self.note_gap = " ";
        self
    }
}

/// A titled group of keys behind a gate.
///
/// `requires` lists additional gates that must all be open; the auth
/// sub-blocks use it to stay tied to the auth gate.
#[derive(Debug, Clone, Copy)]
pub struct EnvBlock {
    pub title: &'static str,
    pub gate: Gate,
    pub requires: &'static [Gate],
    pub vars: &'static [EnvVar],
}

impl EnvBlock {
    pub fn is_active(&self, selection: &FeatureSelection) -> bool {
        self.gate.is_open(selection) && self.requires.iter().all(|g| g.is_open(selection))
    }
}

pub const PREAMBLE_TITLE: &str = "BackBone Generated Environment Variables";

/// Fixed block order: core, database, auth (+ OAuth, OTP/magic link),
/// email, SMS.
pub static ENV_BLOCKS: &[EnvBlock] = &[
    EnvBlock {
        title: "Core Application Settings",
        gate: Gate::Always,
        requires: &[],
        vars: &[
            EnvVar::text("NODE_ENV", "development"),
            EnvVar::number("PORT", "3000"),
        ],
    },
    EnvBlock {
        title: "Database Configuration",
        gate: Gate::Database(Database::Mongoose),
        requires: &[],
        vars: &[EnvVar::text(
            "MONGODB_URI",
            "mongodb://127.0.0.1:27017/your-database",
        )],
    },
    EnvBlock {
        title: "JWT Authentication",
        gate: Gate::Auth,
        requires: &[],
        vars: &[
            EnvVar::text("JWT_SECRET", "your-super-secret-jwt-key"),
            EnvVar::text("JWT_REFRESH_SECRET", "your-super-secret-refresh-key"),
            EnvVar::text("JWT_ACCESS_EXPIRY", "15m"),
            EnvVar::text("JWT_REFRESH_EXPIRY", "7d"),
        ],
    },
    EnvBlock {
        title: "Password Reset",
        gate: Gate::Auth,
        requires: &[],
        vars: &[
            EnvVar::text("PASSWORD_RESET_SECRET", "your-password-reset-secret"),
            EnvVar::text("PASSWORD_RESET_EXPIRY", "1h"),
        ],
    },
    EnvBlock {
        title: "Security Settings",
        gate: Gate::Auth,
        requires: &[],
        vars: &[
            EnvVar::number("RATE_LIMIT_WINDOW", "900000").noted("15 minutes in milliseconds"),
            EnvVar::number("RATE_LIMIT_MAX", "100"),
        ],
    },
    EnvBlock {
        title: "Google OAuth",
        gate: Gate::AnyAuthFeature(&[AuthFeature::GoogleOAuth]),
        requires: &[Gate::Auth],
        vars: &[
            EnvVar::text("GOOGLE_CLIENT_ID", "your-google-client-id"),
            EnvVar::text("GOOGLE_CLIENT_SECRET", "your-google-client-secret"),
            EnvVar::text(
                "GOOGLE_CALLBACK_URL",
                "http://localhost:3000/auth/google/callback",
            ),
        ],
    },
    EnvBlock {
        title: "OTP / Magic Link settings",
        gate: Gate::AnyAuthFeature(&[AuthFeature::Otp, AuthFeature::MagicLink]),
        requires: &[Gate::Auth],
        vars: &[
            EnvVar::number("OTP_LENGTH", "6"),
            EnvVar::number("OTP_EXPIRY", "300000").noted_tight("milliseconds (5 minutes)"),
            EnvVar::number("MAGIC_LINK_EXPIRY", "900000").noted_tight("milliseconds (15 minutes)"),
        ],
    },
    EnvBlock {
        title: "Email (Nodemailer)",
        gate: Gate::Provider(NotificationProvider::Email),
        requires: &[],
        vars: &[
            EnvVar::text("EMAIL_HOST", "smtp.example.com"),
            EnvVar::number("EMAIL_PORT", "587"),
            EnvVar::text("EMAIL_USER", "you@example.com"),
            EnvVar::text("EMAIL_PASS", "super-secret-password"),
            EnvVar::text("EMAIL_FROM", "Your App <noreply@example.com>"),
            EnvVar::text("EMAIL_SECURE", "false").noted("set true if using port 465"),
        ],
    },
    EnvBlock {
        title: "SMS (Twilio)",
        gate: Gate::Provider(NotificationProvider::Sms),
        requires: &[],
        vars: &[
            EnvVar::text("TWILIO_ACCOUNT_SID", "your-twilio-sid"),
            EnvVar::text("TWILIO_AUTH_TOKEN", "your-twilio-auth-token"),
            EnvVar::text("TWILIO_PHONE_NUMBER", "+1234567890"),
        ],
    },
];

/// Blocks active for `selection`, in fixed order.
pub fn active_blocks(selection: &FeatureSelection) -> impl Iterator<Item = &'static EnvBlock> + '_ {
    ENV_BLOCKS.iter().filter(move |b| b.is_active(selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique_across_blocks() {
        let mut seen = HashSet::new();
        for block in ENV_BLOCKS {
            for var in block.vars {
                assert!(seen.insert(var.key), "duplicate key {}", var.key);
            }
        }
    }

    #[test]
    fn number_defaults_parse() {
        for var in ENV_BLOCKS.iter().flat_map(|b| b.vars) {
            if var.kind == ValueKind::Number {
                assert!(var.default.parse::<u64>().is_ok(), "{}", var.key);
            }
        }
    }
}
