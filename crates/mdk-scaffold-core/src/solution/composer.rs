//! Solution document composition

use super::ids::{BuildId, IdAllocator};
use crate::config::{PathStyle, WorkspaceLayout};
use crate::error::{Result, ScaffoldError};
use crate::templates::{self, store};
use crate::workspace::category::PROJECT_EXT;
use crate::workspace::{Category, DirectoryMutator};
use std::collections::HashSet;
use std::path::Path;

/// One buildable project as it appears in the solution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionEntry {
    pub name: String,
    pub category: Category,
    /// `<CategoryFolder>/<name>/<name>.csproj` in the platform's path style
    pub relative_path: String,
    pub id: BuildId,
}

/// A fully rendered solution and the entries it was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionDocument {
    pub entries: Vec<SolutionEntry>,
    pub text: String,
}

/// Builds the aggregate solution from scanned script and test names
#[derive(Debug, Clone, Copy)]
pub struct Composer<'a> {
    path_style: PathStyle,
    layout: &'a WorkspaceLayout,
}

impl<'a> Composer<'a> {
    pub fn new(path_style: PathStyle, layout: &'a WorkspaceLayout) -> Self {
        Self { path_style, layout }
    }

    /// Compose the solution: all scripts first, then all tests
    ///
    /// Mixins are shared-item containers and never become solution entries.
    pub fn compose<A: IdAllocator + ?Sized>(
        &self,
        allocator: &mut A,
        scripts: &[String],
        tests: &[String],
    ) -> Result<SolutionDocument> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(scripts.len() + tests.len());

        let named = scripts
            .iter()
            .map(|name| (Category::Script, name))
            .chain(tests.iter().map(|name| (Category::Test, name)));

        for (category, name) in named {
            let id = allocator.allocate();
            if !seen.insert(id) {
                return Err(ScaffoldError::DuplicateIdentifier(id.to_string()));
            }
            entries.push(SolutionEntry {
                name: name.clone(),
                category,
                relative_path: self.relative_path(category, name),
                id,
            });
        }

        let text = render_document(&entries)?;
        Ok(SolutionDocument { entries, text })
    }

    /// Path of a project file relative to the solution
    pub fn relative_path(&self, category: Category, name: &str) -> String {
        let file = format!("{}.{}", name, PROJECT_EXT);
        self.path_style
            .join(&[self.layout.folder(category), name, file.as_str()])
    }
}

fn render_document(entries: &[SolutionEntry]) -> Result<String> {
    let mut projects = Vec::with_capacity(entries.len());
    let mut configurations = Vec::with_capacity(entries.len());

    for entry in entries {
        let id = entry.id.to_string();
        projects.push(templates::render(
            &store::SOLUTION_PROJECT,
            &[
                ("project_type", store::CSHARP_PROJECT_TYPE),
                ("name", entry.name.as_str()),
                ("relative_path", entry.relative_path.as_str()),
                ("project_guid", id.as_str()),
            ],
        )?);
        configurations.push(templates::render(
            &store::SOLUTION_PROJECT_CONFIGURATION,
            &[("project_guid", id.as_str())],
        )?);
    }

    let projects = projects.join("\n");
    let configurations = configurations.join("\n");
    templates::render(
        &store::SOLUTION,
        &[
            ("projects", projects.as_str()),
            ("project_configurations", configurations.as_str()),
            ("solution_guid", store::SOLUTION_GUID),
        ],
    )
}

/// Write the document, replacing whatever was there before
pub fn write_solution<M: DirectoryMutator + ?Sized>(
    fs: &mut M,
    path: &Path,
    document: &SolutionDocument,
) -> Result<()> {
    fs.write_file(path, &document.text)?;
    tracing::info!(
        path = %path.display(),
        projects = document.entries.len(),
        "wrote solution"
    );
    Ok(())
}
