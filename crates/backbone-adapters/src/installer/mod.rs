//! Package manager adapters.

mod npm;
mod recording;

pub use npm::{NpmInstaller, pin_latest};
pub use recording::{InstallCall, RecordingInstaller};
