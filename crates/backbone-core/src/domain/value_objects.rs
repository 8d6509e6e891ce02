//! Domain value objects: Database, AuthType, AuthFeature, NotificationProvider.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO module logic. What each choice copies, removes or installs
//! lives in `modules.rs`. This file only defines the types, their string
//! representations and their `FromStr` parsers.
//!
//! The string forms match the values the question flow produces
//! (`passwordReset`, `googleOAuth`, ...), so a selection serialised by the
//! prompt layer deserialises here unchanged.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add a module entry in `modules.rs` and a block in `artifacts/blocks.rs`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Database ─────────────────────────────────────────────────────────────────

/// The database the generated project connects to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    /// MongoDB through Mongoose.
    #[default]
    Mongoose,
}

impl Database {
    pub const ALL: [Database; 1] = [Database::Mongoose];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mongoose => "mongoose",
        }
    }

    /// Human label used by prompts.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Mongoose => "MongoDB (Mongoose)",
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Database {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongoose" | "mongodb" | "mongo" => Ok(Self::Mongoose),
            other => Err(DomainError::InvalidSelection {
                field: "database",
                value: other.to_string(),
            }),
        }
    }
}

// ── AuthType ─────────────────────────────────────────────────────────────────

/// Authentication style. Only meaningful when auth is included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    Jwt,
    Session,
}

impl AuthType {
    pub const ALL: [AuthType; 2] = [AuthType::Jwt, AuthType::Session];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jwt => "jwt",
            Self::Session => "session",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Jwt => "JWT Authentication",
            Self::Session => "Session-based Authentication",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jwt" => Ok(Self::Jwt),
            "session" => Ok(Self::Session),
            other => Err(DomainError::InvalidSelection {
                field: "auth type",
                value: other.to_string(),
            }),
        }
    }
}

// ── AuthFeature ──────────────────────────────────────────────────────────────

/// Optional authentication sub-features.
///
/// `Ord` follows declaration order so feature sets iterate deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum AuthFeature {
    PasswordReset,
    Otp,
    #[serde(rename = "googleOAuth")]
    GoogleOAuth,
    MagicLink,
}

impl AuthFeature {
    pub const ALL: [AuthFeature; 4] = [
        AuthFeature::PasswordReset,
        AuthFeature::Otp,
        AuthFeature::GoogleOAuth,
        AuthFeature::MagicLink,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PasswordReset => "passwordReset",
            Self::Otp => "otp",
            Self::GoogleOAuth => "googleOAuth",
            Self::MagicLink => "magicLink",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::PasswordReset => "Password Reset",
            Self::Otp => "OTP (email/SMS)",
            Self::GoogleOAuth => "OAuth (Google)",
            Self::MagicLink => "Magic Link Login",
        }
    }
}

impl fmt::Display for AuthFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthFeature {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalised.as_str() {
            "passwordreset" => Ok(Self::PasswordReset),
            "otp" => Ok(Self::Otp),
            "googleoauth" | "google" => Ok(Self::GoogleOAuth),
            "magiclink" => Ok(Self::MagicLink),
            _ => Err(DomainError::InvalidSelection {
                field: "auth feature",
                value: s.to_string(),
            }),
        }
    }
}

// ── NotificationProvider ─────────────────────────────────────────────────────

/// Notification channels. Only meaningful when notifications are included.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NotificationProvider {
    Email,
    Sms,
}

impl NotificationProvider {
    pub const ALL: [NotificationProvider; 2] =
        [NotificationProvider::Email, NotificationProvider::Sms];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Email => "Email (Nodemailer)",
            Self::Sms => "SMS (Twilio)",
        }
    }
}

impl fmt::Display for NotificationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "email" | "mail" => Ok(Self::Email),
            "sms" | "text" => Ok(Self::Sms),
            other => Err(DomainError::InvalidSelection {
                field: "notification provider",
                value: other.to_string(),
            }),
        }
    }
}
