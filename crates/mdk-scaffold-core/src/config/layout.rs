//! Workspace layout configuration (`scaffold.yaml`)
//!
//! The file is optional. Without it the workspace uses the conventional
//! `Mixins/`, `Scripts/`, `Tests/` folders and writes `OmniOS.sln`.

use crate::error::{FsOp, Result, ScaffoldError};
use crate::workspace::Category;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name of the optional layout file at the workspace root
pub const LAYOUT_FILE: &str = "scaffold.yaml";

/// Environment variable overriding the bootstrap source archive URL
pub const SOURCE_URL_ENV: &str = "MDK_SCAFFOLD_SOURCE_URL";

pub const DEFAULT_SOLUTION: &str = "OmniOS.sln";

/// Folder names and output file of a workspace
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkspaceLayout {
    /// Solution file name, relative to the workspace root
    pub solution: String,
    pub mixins: String,
    pub scripts: String,
    pub tests: String,

    /// Optional external tool bootstrap (non-Windows hosts only)
    pub bootstrap: Option<BootstrapConfig>,
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self {
            solution: DEFAULT_SOLUTION.to_string(),
            mixins: Category::Mixin.default_folder().to_string(),
            scripts: Category::Script.default_folder().to_string(),
            tests: Category::Test.default_folder().to_string(),
            bootstrap: None,
        }
    }
}

impl WorkspaceLayout {
    /// Load `scaffold.yaml` from `root`, falling back to defaults if absent
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(LAYOUT_FILE);
        let mut layout = if path.is_file() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| ScaffoldError::fs(FsOp::Read, &path, e))?;
            Self::from_yaml(&path, &content)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(SOURCE_URL_ENV) {
            layout
                .bootstrap
                .get_or_insert_with(BootstrapConfig::default)
                .source_url = url;
        }

        layout.validate()?;
        Ok(layout)
    }

    /// Parse layout YAML; `path` is only used for error messages
    pub fn from_yaml(path: &Path, content: &str) -> Result<Self> {
        // An empty file is a valid "all defaults" layout
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|source| ScaffoldError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Folder name configured for a category
    pub fn folder(&self, category: Category) -> &str {
        match category {
            Category::Mixin => &self.mixins,
            Category::Script => &self.scripts,
            Category::Test => &self.tests,
        }
    }

    pub fn category_dir(&self, root: &Path, category: Category) -> PathBuf {
        root.join(self.folder(category))
    }

    pub fn solution_path(&self, root: &Path) -> PathBuf {
        root.join(&self.solution)
    }

    fn validate(&self) -> Result<()> {
        for category in Category::ALL {
            let folder = self.folder(category);
            if folder.is_empty() || folder.contains(['/', '\\']) {
                return Err(ScaffoldError::Config(format!(
                    "{} folder must be a single path segment, got '{}'",
                    category, folder
                )));
            }
        }
        if !self.solution.ends_with(".sln") {
            return Err(ScaffoldError::Config(format!(
                "solution file must end in .sln, got '{}'",
                self.solution
            )));
        }
        Ok(())
    }
}

/// Where to fetch, how to build and where to place the external build tool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    /// Zip archive of the tool's source tree
    pub source_url: String,

    /// Project to build, relative to the extracted archive root
    pub project: String,

    /// File names copied from the build output into `destination`
    pub artifacts: Vec<String>,

    /// Destination directory, relative to the workspace root
    pub destination: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            source_url: "https://github.com/malforge/mdk2/archive/refs/heads/main.zip"
                .to_string(),
            project: "Source/Mdk.CommandLine/Mdk.CommandLine.csproj".to_string(),
            artifacts: vec![
                "mdk.dll".to_string(),
                "mdk.runtimeconfig.json".to_string(),
                "mdk.deps.json".to_string(),
            ],
            destination: ".mdk/bin".to_string(),
        }
    }
}
