//! Service manager adapters.

mod manager;
mod recording;
mod template;

pub use manager::{DEFAULT_SYSTEMCTL, DEFAULT_TEMPLATES_DIR, DEFAULT_UNIT_DIR, SystemdManager};
pub use recording::RecordingServiceManager;
pub use template::render_unit;
