//! Sub-project categories and the metadata files each one carries

use std::fmt;

/// Extension of the shared-items manifest written into each mixin
pub const SHARED_ITEMS_EXT: &str = "projitems";

/// Extension of the MDK tool-config written into each script and test
pub const TOOL_CONFIG_EXT: &str = "mdk.ini";

/// Extension of the build-project file scripts and tests carry
pub const PROJECT_EXT: &str = "csproj";

/// The three kinds of sub-project folder in a workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Mixin,
    Script,
    Test,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Mixin, Category::Script, Category::Test];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Mixin => "Mixins",
            Category::Script => "Scripts",
            Category::Test => "Tests",
        }
    }

    /// Default folder name under the workspace root
    pub fn default_folder(&self) -> &'static str {
        self.display_name()
    }

    /// Extension of the generated manifest/config file
    pub fn generated_ext(&self) -> &'static str {
        match self {
            Category::Mixin => SHARED_ITEMS_EXT,
            Category::Script | Category::Test => TOOL_CONFIG_EXT,
        }
    }

    /// Extension of the build-project file, if the category is buildable
    pub fn project_ext(&self) -> Option<&'static str> {
        match self {
            Category::Mixin => None,
            Category::Script | Category::Test => Some(PROJECT_EXT),
        }
    }

    /// Whether sub-projects of this category appear in the solution
    pub fn is_buildable(&self) -> bool {
        self.project_ext().is_some()
    }

    /// Canonical generated file name for a sub-project
    pub fn generated_file_name(&self, name: &str) -> String {
        format!("{}.{}", name, self.generated_ext())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Check whether `file_name` ends in `.<ext>` (multi-part extensions allowed)
pub fn has_ext(file_name: &str, ext: &str) -> bool {
    file_name
        .strip_suffix(ext)
        .is_some_and(|stem| stem.ends_with('.'))
}
