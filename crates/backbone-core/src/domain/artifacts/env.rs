use crate::domain::{
    FeatureSelection,
    artifacts::blocks::{PREAMBLE_TITLE, active_blocks},
};

const RULE: &str = "###########################################";

/// Render the `.env.example` contents for a selection.
///
/// Line oriented `KEY=VALUE`, one `#` header per block, a blank line after
/// each block. The project name plays no part.
pub fn render_env_template(selection: &FeatureSelection) -> String {
    let mut lines: Vec<String> = vec![
        RULE.to_string(),
        format!("# {PREAMBLE_TITLE}"),
        RULE.to_string(),
        String::new(),
    ];

    for block in active_blocks(selection) {
        lines.push(format!("# {}", block.title));
        for var in block.vars {
            match var.note {
                Some(note) => lines.push(format!(
                    "{}={}{}# {}",
                    var.key, var.default, var.note_gap, note
                )),
                None => lines.push(format!("{}={}", var.key, var.default)),
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthFeature, AuthType, NotificationProvider};

    fn minimal() -> FeatureSelection {
        FeatureSelection::builder()
            .project_name("api")
            .include_auth(false)
            .include_notifications(false)
            .build()
            .unwrap()
    }

    #[test]
    fn minimal_selection_renders_core_and_database() {
        let env = render_env_template(&minimal());
        let expected = "\
###########################################
# BackBone Generated Environment Variables
###########################################

# Core Application Settings
NODE_ENV=development
PORT=3000

# Database Configuration
MONGODB_URI=mongodb://127.0.0.1:27017/your-database
";
        assert_eq!(env, expected);
    }

    #[test]
    fn jwt_with_otp_has_auth_and_otp_blocks_only() {
        let sel = FeatureSelection::builder()
            .project_name("api")
            .auth_type(AuthType::Jwt)
            .auth_features([AuthFeature::PasswordReset, AuthFeature::Otp])
            .include_notifications(false)
            .build()
            .unwrap();
        let env = render_env_template(&sel);

        assert!(env.contains("# Core Application Settings"));
        assert!(env.contains("# Database Configuration"));
        assert!(env.contains("# JWT Authentication"));
        assert!(env.contains("# OTP / Magic Link settings"));
        assert!(env.contains("OTP_EXPIRY=300000 # milliseconds (5 minutes)\n"));
        assert!(env.contains("MAGIC_LINK_EXPIRY=900000 # milliseconds (15 minutes)\n"));
        assert!(!env.contains("GOOGLE_CLIENT_ID"));
        assert!(!env.contains("EMAIL_HOST"));
        assert!(!env.contains("TWILIO_ACCOUNT_SID"));
    }

    #[test]
    fn stale_auth_features_never_render_without_auth() {
        let sel = FeatureSelection::builder()
            .project_name("api")
            .include_auth(false)
            .auth_features(AuthFeature::ALL)
            .build()
            .unwrap();
        let env = render_env_template(&sel);

        assert!(!env.contains("JWT_SECRET"));
        assert!(!env.contains("GOOGLE_CLIENT_ID"));
        assert!(!env.contains("OTP_LENGTH"));
    }

    #[test]
    fn block_order_is_fixed() {
        let sel = FeatureSelection::builder()
            .project_name("api")
            .auth_features(AuthFeature::ALL)
            .include_notifications(true)
            .notification_providers([NotificationProvider::Sms, NotificationProvider::Email])
            .build()
            .unwrap();
        let env = render_env_template(&sel);

        let order = [
            "# Core Application Settings",
            "# Database Configuration",
            "# JWT Authentication",
            "# Google OAuth",
            "# OTP / Magic Link settings",
            "# Email (Nodemailer)",
            "# SMS (Twilio)",
        ];
        let positions: Vec<usize> = order.iter().map(|h| env.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn inline_remarks_keep_their_spacing() {
        let sel = FeatureSelection::builder()
            .project_name("api")
            .auth_features([AuthFeature::MagicLink])
            .include_notifications(true)
            .notification_providers([NotificationProvider::Email])
            .build()
            .unwrap();
        let env = render_env_template(&sel);

        assert!(env.contains("RATE_LIMIT_WINDOW=900000  # 15 minutes in milliseconds\n"));
        assert!(env.contains("MAGIC_LINK_EXPIRY=900000 # milliseconds (15 minutes)\n"));
        assert!(env.contains("EMAIL_SECURE=false  # set true if using port 465\n"));
    }

    #[test]
    fn output_ignores_project_name() {
        let a = FeatureSelection::builder().project_name("one").build().unwrap();
        let b = FeatureSelection::builder().project_name("two").build().unwrap();
        assert_eq!(render_env_template(&a), render_env_template(&b));
    }
}
