//! Full pipeline against the shipped templates on a real filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use backbone_adapters::{LocalFilesystem, MemoryFilesystem, RecordingInstaller};
use backbone_core::{
    application::{ApplicationError, AssemblyService},
    domain::{AuthFeature, AuthType, FeatureSelection, NotificationProvider, TemplateLayout},
    error::BackboneError,
};
use tempfile::TempDir;

fn templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
}

fn service(installer: RecordingInstaller) -> AssemblyService {
    AssemblyService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(installer),
        TemplateLayout::new(templates()),
    )
}

fn scenario_a() -> FeatureSelection {
    FeatureSelection::builder()
        .project_name("scenario-a")
        .auth_type(AuthType::Jwt)
        .auth_features([AuthFeature::PasswordReset, AuthFeature::Otp])
        .build()
        .unwrap()
}

fn scenario_b() -> FeatureSelection {
    FeatureSelection::builder()
        .project_name("scenario-b")
        .include_auth(false)
        .include_notifications(true)
        .notification_providers([NotificationProvider::Email, NotificationProvider::Sms])
        .build()
        .unwrap()
}

#[test]
fn scenario_a_produces_auth_project() {
    let out = TempDir::new().unwrap();
    let installer = RecordingInstaller::new();

    let summary = service(installer.clone())
        .assemble(&scenario_a(), out.path())
        .unwrap();

    let root = out.path().join("scenario-a");
    assert_eq!(summary.target_dir, root);

    assert!(root.join("app.js").is_file());
    assert!(root.join("server.js").is_file());
    assert!(!root.join("src/app.js").exists());
    assert!(!root.join("src/server.js").exists());
    assert!(root.join("src/config/db.js").is_file());
    assert!(root.join("src/config/roles.js").is_file());
    assert!(root.join("src/controllers/authController.js").is_file());
    assert!(!root.join("src/config/email.js").exists());

    let routes = fs::read_to_string(root.join("src/routes/index.js")).unwrap();
    assert!(routes.contains("authRoutes"), "auth module must override base routes");

    let env = fs::read_to_string(root.join(".env.example")).unwrap();
    assert!(env.contains("JWT_SECRET="));
    assert!(env.contains("OTP_LENGTH="));
    assert!(!env.contains("GOOGLE_CLIENT_ID"));
    assert!(!env.contains("EMAIL_HOST"));
    assert!(root.join("src/config/constants.js").is_file());

    let calls = installer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].target_dir, root);
    assert!(calls[0].packages.iter().any(|p| p == "helmet"));
    assert!(!calls[0].packages.iter().any(|p| p == "passport"));
}

#[test]
fn scenario_b_copies_notification_configs_only() {
    let out = TempDir::new().unwrap();
    let installer = RecordingInstaller::new();

    service(installer.clone())
        .assemble(&scenario_b(), out.path())
        .unwrap();

    let root = out.path().join("scenario-b");
    assert!(root.join("src/config/email.js").is_file());
    assert!(root.join("src/config/sms.js").is_file());
    assert!(!root.join("src/controllers").exists());
    assert!(!root.join("src/config/roles.js").exists());

    let calls = installer.calls();
    assert_eq!(
        calls[0].packages,
        vec!["mongoose", "nodemailer", "ejs", "twilio"]
    );
}

#[test]
fn second_run_fails_and_leaves_first_result_untouched() {
    let out = TempDir::new().unwrap();
    let svc = service(RecordingInstaller::new());
    svc.assemble(&scenario_a(), out.path()).unwrap();

    let marker = out.path().join("scenario-a/app.js");
    let before = fs::read_to_string(&marker).unwrap();

    let err = svc.assemble(&scenario_a(), out.path()).unwrap_err();

    assert!(matches!(
        err,
        BackboneError::Application(ApplicationError::AlreadyExists { .. })
    ));
    assert_eq!(fs::read_to_string(&marker).unwrap(), before);
}

#[test]
fn missing_module_source_rolls_back_target() {
    // A template root with a base skeleton but no mongoose config.
    let broken = TempDir::new().unwrap();
    fs::create_dir_all(broken.path().join("base/src")).unwrap();
    fs::write(broken.path().join("base/app.js"), "app").unwrap();

    let out = TempDir::new().unwrap();
    let svc = AssemblyService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(RecordingInstaller::new()),
        TemplateLayout::new(broken.path()),
    );

    let err = svc.assemble(&scenario_b(), out.path()).unwrap_err();

    assert!(matches!(
        err,
        BackboneError::Application(ApplicationError::CopyFailure { .. })
    ));
    assert!(!out.path().join("scenario-b").exists());
}

#[test]
fn failing_installer_still_yields_project() {
    let out = TempDir::new().unwrap();

    let mut summary = service(RecordingInstaller::failing())
        .assemble(&scenario_b(), out.path())
        .unwrap();

    assert!(out.path().join("scenario-b/.env.example").is_file());
    assert!(!summary.take_install().unwrap().wait().is_success());
}

#[test]
fn memory_filesystem_runs_the_same_pipeline() {
    let fs = MemoryFilesystem::new()
        .with_file("/t/base/app.js", "app")
        .with_file("/t/base/server.js", "server")
        .with_file("/t/base/src/app.js", "dup")
        .with_file("/t/base/src/routes/index.js", "base routes")
        .with_file("/t/modules/db/mongoose/db.js", "db")
        .with_file("/t/modules/auth/src/routes/index.js", "auth routes")
        .with_file("/t/shared/roles.js", "roles");

    let svc = AssemblyService::new(
        Box::new(fs.clone()),
        Box::new(RecordingInstaller::new()),
        TemplateLayout::new("/t"),
    )
    .without_install();

    let sel = FeatureSelection::builder()
        .project_name("api")
        .build()
        .unwrap();
    svc.assemble(&sel, "/out").unwrap();

    let read = |p: &str| fs.read_file(Path::new(p));
    assert_eq!(read("/out/api/app.js").as_deref(), Some("app"));
    assert_eq!(read("/out/api/src/app.js"), None);
    assert_eq!(read("/out/api/src/routes/index.js").as_deref(), Some("auth routes"));
    assert_eq!(read("/out/api/src/config/roles.js").as_deref(), Some("roles"));
    assert!(read("/out/api/.env.example").unwrap().contains("JWT_SECRET="));
}
