//! Run configuration: workspace layout and platform defaults

pub mod layout;
pub mod platform;

pub use layout::{BootstrapConfig, WorkspaceLayout, LAYOUT_FILE};
pub use platform::{PathStyle, PlatformConfig};
