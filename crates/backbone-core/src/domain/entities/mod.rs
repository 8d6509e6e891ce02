pub mod common;
pub mod plan;
pub mod selection;
pub mod template_layout;

pub use crate::domain::DomainError;
pub use plan::AssemblyPlan;
pub use selection::FeatureSelection;
pub use template_layout::TemplateLayout;
