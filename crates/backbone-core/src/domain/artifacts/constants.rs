use std::fmt::Write as _;

use crate::domain::{
    FeatureSelection,
    artifacts::blocks::{EnvVar, ValueKind, active_blocks},
};

const HEADER: &str = "\
// ###########################################
// BackBone Generated Runtime Constants
// ###########################################
// Values come from the environment (see .env.example); the literals are
// fallbacks for local development.
";

/// Render `src/config/constants.js` for a selection.
///
/// An ES module exporting `CONSTANTS`, one property per key of the env
/// template, grouped under the same block headers.
pub fn render_constants(selection: &FeatureSelection) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    out.push_str("export const CONSTANTS = {\n");

    let mut first = true;
    for block in active_blocks(selection) {
        if !first {
            out.push('\n');
        }
        first = false;

        let _ = writeln!(out, "  // {}", block.title);
        for var in block.vars {
            let _ = writeln!(out, "  {}: {},", var.key, expression(var));
        }
    }

    out.push_str("};\n\nexport default CONSTANTS;\n");
    out
}

fn expression(var: &EnvVar) -> String {
    match var.kind {
        ValueKind::Number => format!("Number(process.env.{} || {})", var.key, var.default),
        ValueKind::Text => format!("process.env.{} || {}", var.key, js_string(var.default)),
    }
}

/// Single-quoted JS string literal.
fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthFeature, NotificationProvider, artifacts::render_env_template};

    #[test]
    fn minimal_selection_exports_core_and_database() {
        let sel = FeatureSelection::builder()
            .project_name("api")
            .include_auth(false)
            .build()
            .unwrap();
        let js = render_constants(&sel);

        assert!(js.starts_with("// ####"));
        assert!(js.contains("export const CONSTANTS = {\n  // Core Application Settings\n"));
        assert!(js.contains("  NODE_ENV: process.env.NODE_ENV || 'development',\n"));
        assert!(js.contains("  PORT: Number(process.env.PORT || 3000),\n"));
        assert!(js.contains(
            "  MONGODB_URI: process.env.MONGODB_URI || 'mongodb://127.0.0.1:27017/your-database',\n"
        ));
        assert!(js.ends_with("};\n\nexport default CONSTANTS;\n"));
        assert!(!js.contains("JWT_SECRET"));
    }

    #[test]
    fn exposes_the_same_keys_as_the_env_template() {
        let sel = FeatureSelection::builder()
            .project_name("api")
            .auth_features(AuthFeature::ALL)
            .include_notifications(true)
            .notification_providers(NotificationProvider::ALL)
            .build()
            .unwrap();

        let env_keys: Vec<String> = render_env_template(&sel)
            .lines()
            .filter(|l| !l.starts_with('#') && l.contains('='))
            .filter_map(|l| l.split('=').next())
            .map(str::to_string)
            .collect();

        let js = render_constants(&sel);
        for key in &env_keys {
            assert!(js.contains(&format!("  {key}: ")), "missing {key}");
        }
        assert_eq!(js.matches("process.env.").count(), env_keys.len());
    }

    #[test]
    fn js_string_escapes_quotes_and_backslashes() {
        assert_eq!(js_string("it's"), "'it\\'s'");
        assert_eq!(js_string("a\\b"), "'a\\\\b'");
        assert_eq!(js_string("Your App <noreply@example.com>"), "'Your App <noreply@example.com>'");
    }
}
