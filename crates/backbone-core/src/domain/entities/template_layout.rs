use std::path::{Path, PathBuf};

use crate::domain::entities::common::RelativePath;

/// Location of the template trees on disk.
///
/// The layout is fixed relative to `root`:
///
/// ```text
/// templates/
/// ├── base/                          ← project skeleton, copied verbatim
/// ├── modules/
/// │   ├── auth/                      ← merged over the skeleton
/// │   ├── db/mongoose/db.js
/// │   └── notifications/{email,sms}.js
/// └── shared/roles.js
/// ```
///
/// Nothing outside these paths is inspected; everything under `base/` and
/// `modules/auth/` is copied without being read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLayout {
    root: PathBuf,
}

impl TemplateLayout {
    pub const BASE: &'static str = "base";
    pub const BASE_APP_ENTRY: &'static str = "base/app.js";
    pub const BASE_SERVER_ENTRY: &'static str = "base/server.js";
    pub const MONGOOSE_CONFIG: &'static str = "modules/db/mongoose/db.js";
    pub const AUTH_MODULE: &'static str = "modules/auth";
    pub const EMAIL_CONFIG: &'static str = "modules/notifications/email.js";
    pub const SMS_CONFIG: &'static str = "modules/notifications/sms.js";
    pub const ROLES_CONFIG: &'static str = "shared/roles.js";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute (or cwd-relative) path of a template source.
    pub fn resolve(&self, source: &RelativePath) -> PathBuf {
        source.under(&self.root)
    }

    /// Path of the base skeleton, whose presence marks a usable template root.
    pub fn base_dir(&self) -> PathBuf {
        self.root.join(Self::BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_sources_under_root() {
        let layout = TemplateLayout::new("/opt/backbone/templates");
        let src = RelativePath::from(TemplateLayout::MONGOOSE_CONFIG);
        assert_eq!(
            layout.resolve(&src),
            PathBuf::from("/opt/backbone/templates/modules/db/mongoose/db.js")
        );
        assert_eq!(
            layout.base_dir(),
            PathBuf::from("/opt/backbone/templates/base")
        );
    }
}
