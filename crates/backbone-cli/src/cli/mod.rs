//! CLI argument definitions using the clap derive API.
//!
//! Argument names, help text and value enums live here. Conversion to the
//! core types happens in the command handlers.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "backbone",
    bin_name = "backbone",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Assemble an Express backend from composable modules",
    long_about = "BackBone assembles a ready-to-run Node.js/Express backend: \
                  a base project plus optional database, authentication and \
                  notification modules, a matching .env.example and \
                  constants file, and a background npm install.",
    after_help = "EXAMPLES:\n\
        \x20 backbone new my-api\n\
        \x20 backbone new my-api --auth session --auth-feature otp,magic-link --yes\n\
        \x20 backbone new my-api --no-auth --notify email --no-install -y\n\
        \x20 backbone completions bash > /usr/share/bash-completion/completions/backbone",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Assemble a new backend project.
    #[command(
        visible_alias = "n",
        about = "Create a new backend project",
        after_help = "EXAMPLES:\n\
            \x20 backbone new                                  # answer the questions\n\
            \x20 backbone new my-api -y                        # defaults: mongoose + JWT auth\n\
            \x20 backbone new my-api --auth jwt --auth-feature password-reset,otp\n\
            \x20 backbone new my-api --notify email --notify sms -o ~/code"
    )]
    New(NewArgs),

    /// Write the default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 backbone init\n\
            \x20 backbone init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 backbone completions bash > ~/.local/share/bash-completion/completions/backbone\n\
            \x20 backbone completions zsh  > ~/.zfunc/_backbone\n\
            \x20 backbone completions fish > ~/.config/fish/completions/backbone.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 backbone config get defaults.auth_type\n\
            \x20 backbone config list\n\
            \x20 backbone config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `backbone new`.
///
/// Every choice is optional: whatever is missing is asked interactively, or
/// taken from the configured defaults with `--yes` or without a terminal.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Becomes the directory name under the output directory.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: Option<String>,

    #[arg(long = "db", value_name = "DATABASE", value_enum, help = "Database")]
    pub database: Option<DatabaseArg>,

    #[arg(
        long = "auth",
        value_name = "TYPE",
        value_enum,
        conflicts_with = "no_auth",
        help = "Include authentication of this type"
    )]
    pub auth: Option<AuthTypeArg>,

    #[arg(long = "no-auth", help = "Leave authentication out")]
    pub no_auth: bool,

    /// Repeatable and comma separated. Ignored without auth.
    #[arg(
        long = "auth-feature",
        value_name = "FEATURE",
        value_enum,
        value_delimiter = ',',
        conflicts_with = "no_auth",
        help = "Auth features (password-reset, otp, google-oauth, magic-link)"
    )]
    pub auth_features: Vec<AuthFeatureArg>,

    /// Repeatable and comma separated. Any provider turns notifications on.
    #[arg(
        long = "notify",
        value_name = "PROVIDER",
        value_enum,
        value_delimiter = ',',
        help = "Notification providers (email, sms)"
    )]
    pub notify: Vec<NotifyArg>,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Directory to create the project in (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long = "templates",
        value_name = "DIR",
        help = "Template root (directory containing base/ and modules/)"
    )]
    pub templates: Option<PathBuf>,

    #[arg(long = "no-install", help = "Skip the npm install step")]
    pub no_install: bool,

    #[arg(
        short = 'y',
        long = "yes",
        help = "Do not ask; use flags and configured defaults"
    )]
    pub yes: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.auth_type`.
        key: String,
    },
    /// Print the effective configuration as TOML.
    List,
    /// Print the path of the default configuration file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatabaseArg {
    #[value(alias = "mongodb")]
    Mongoose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthTypeArg {
    Jwt,
    Session,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthFeatureArg {
    #[value(name = "password-reset", alias = "passwordReset")]
    PasswordReset,
    Otp,
    #[value(name = "google-oauth", alias = "googleOAuth")]
    GoogleOAuth,
    #[value(name = "magic-link", alias = "magicLink")]
    MagicLink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotifyArg {
    Email,
    Sms,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn new_without_arguments_parses() {
        let cli = Cli::parse_from(["backbone", "new"]);
        match cli.command {
            Commands::New(args) => {
                assert!(args.name.is_none());
                assert!(args.auth.is_none());
                assert!(args.auth_features.is_empty());
            }
            other => panic!("expected New, got {other:?}"),
        }
    }

    #[test]
    fn auth_features_accept_commas_and_repeats() {
        let cli = Cli::parse_from([
            "backbone",
            "new",
            "api",
            "--auth-feature",
            "otp,magic-link",
            "--auth-feature",
            "googleOAuth",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(
            args.auth_features,
            vec![
                AuthFeatureArg::Otp,
                AuthFeatureArg::MagicLink,
                AuthFeatureArg::GoogleOAuth
            ]
        );
    }

    #[test]
    fn mongodb_alias_selects_mongoose() {
        let cli = Cli::parse_from(["backbone", "new", "api", "--db", "mongodb"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.database, Some(DatabaseArg::Mongoose));
    }

    #[test]
    fn auth_and_no_auth_conflict() {
        let result = Cli::try_parse_from(["backbone", "new", "api", "--auth", "jwt", "--no-auth"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_auth_rejects_auth_features() {
        let result = Cli::try_parse_from([
            "backbone",
            "new",
            "api",
            "--no-auth",
            "--auth-feature",
            "otp",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["backbone", "--quiet", "--verbose", "config", "path"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_color_is_a_plain_switch() {
        let cli = Cli::try_parse_from(["backbone", "--no-color", "config", "path"]).unwrap();
        assert!(cli.global.no_color);
        assert!(Cli::try_parse_from(["backbone", "--no-color=1", "config", "path"]).is_err());
    }
}
