//! Platform-specific defaults for generated files
//!
//! On Windows MDK finds the game on its own, so tool-configs say `auto`. On
//! any other host the game runs under Proton and both paths point into the
//! Steam compatibility prefix below the user's home directory.

use crate::error::{Result, ScaffoldError};
use std::path::Path;

/// Value telling MDK to detect a path at build time
pub const AUTO: &str = "auto";

/// Steam app id of the game the scripts are built for
pub const STEAM_APP_ID: u32 = 244850;

/// Separator convention for paths written into the solution document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    Backslash,
    ForwardSlash,
}

impl PathStyle {
    pub fn separator(&self) -> char {
        match self {
            PathStyle::Backslash => '\\',
            PathStyle::ForwardSlash => '/',
        }
    }

    /// Join path segments with this style's separator
    pub fn join(&self, segments: &[&str]) -> String {
        let separator = self.separator().to_string();
        segments.join(separator.as_str())
    }
}

/// Environment-derived values consumed by the normalizer and composer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    pub path_style: PathStyle,
    /// Value of `output=` in tool-configs
    pub output: String,
    /// Value of `binarypath=` in tool-configs
    pub binary_path: String,
    /// Whether the host is the platform the solution is consumed on
    pub native: bool,
}

impl PlatformConfig {
    /// Defaults for a Windows host
    pub fn windows() -> Self {
        Self {
            path_style: PathStyle::Backslash,
            output: AUTO.to_string(),
            binary_path: AUTO.to_string(),
            native: true,
        }
    }

    /// Defaults for a non-Windows host with the given home directory
    pub fn compat_layer(home: &Path) -> Self {
        let steamapps = home.join(".steam").join("steam").join("steamapps");
        let output = steamapps
            .join("compatdata")
            .join(STEAM_APP_ID.to_string())
            .join("pfx/drive_c/users/steamuser/AppData/Roaming/SpaceEngineers/IngameScripts/local");
        let binary_path = steamapps.join("common/SpaceEngineers/Bin64");

        Self {
            path_style: PathStyle::ForwardSlash,
            output: output.to_string_lossy().into_owned(),
            binary_path: binary_path.to_string_lossy().into_owned(),
            native: false,
        }
    }

    /// Pick defaults for an OS name (as in `std::env::consts::OS`) and home
    pub fn for_os(os: &str, home: Option<&str>) -> Result<Self> {
        if os == "windows" {
            return Ok(Self::windows());
        }
        match home {
            Some(home) if !home.is_empty() => Ok(Self::compat_layer(Path::new(home))),
            _ => Err(ScaffoldError::Config(
                "HOME is not set; cannot derive MDK output and binary paths".to_string(),
            )),
        }
    }

    /// Detect defaults for the running host
    pub fn detect() -> Result<Self> {
        let home = std::env::var("HOME").ok();
        Self::for_os(std::env::consts::OS, home.as_deref())
    }
}
