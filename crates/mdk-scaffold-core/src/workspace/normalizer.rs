//! Per-folder metadata repair
//!
//! Regenerates the shared-items manifest or MDK tool-config of one
//! sub-project and renames its build-project file to match the folder.

use super::category::{has_ext, Category};
use super::mutator::DirectoryMutator;
use crate::config::PlatformConfig;
use crate::error::{Result, ScaffoldError};
use crate::templates::{self, store};
use std::path::{Path, PathBuf};

/// A sub-project folder as found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubProject {
    /// Folder basename, which is also the canonical project name
    pub name: String,
    pub category: Category,
    pub folder: PathBuf,
}

/// What normalizing one folder changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOutcome {
    pub project: SubProject,
    /// Stale generated files that were deleted (file names)
    pub removed: Vec<String>,
    /// Path of the freshly written manifest/config
    pub generated: PathBuf,
    /// Build-project rename performed, as `(from, to)` file names
    pub renamed: Option<(String, String)>,
    /// Mismatched build-project files left in place
    pub skipped: Vec<String>,
}

/// Rewrites the generated files of sub-project folders
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    platform: &'a PlatformConfig,
}

impl<'a> Normalizer<'a> {
    pub fn new(platform: &'a PlatformConfig) -> Self {
        Self { platform }
    }

    /// Render the generated file content for a category
    ///
    /// The content never depends on the folder name, which keeps repeated
    /// runs byte-identical.
    pub fn render(&self, category: Category) -> Result<String> {
        match category {
            Category::Mixin => templates::render(
                &store::PROJITEMS,
                &[("shared_guid", store::SHARED_GROUP_ID)],
            ),
            Category::Script | Category::Test => {
                let template = if category == Category::Script {
                    &store::SCRIPT_MDK_INI
                } else {
                    &store::TEST_MDK_INI
                };
                templates::render(
                    template,
                    &[
                        ("ignores", store::MDK_IGNORES),
                        ("output", self.platform.output.as_str()),
                        ("binary_path", self.platform.binary_path.as_str()),
                    ],
                )
            }
        }
    }

    /// Normalize one sub-project folder
    pub fn normalize<M: DirectoryMutator + ?Sized>(
        &self,
        fs: &mut M,
        folder: &Path,
        category: Category,
    ) -> Result<NormalizeOutcome> {
        if !fs.is_dir(folder) {
            return Err(ScaffoldError::MissingFolder(folder.to_path_buf()));
        }
        let name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ScaffoldError::MissingFolder(folder.to_path_buf()))?;

        // Drop every generated file first so a renamed folder leaves no
        // stale duplicate behind
        let mut removed = Vec::new();
        for entry in fs.list_dir(folder)? {
            if entry.is_file() && has_ext(&entry.name, category.generated_ext()) {
                fs.remove_file(&folder.join(&entry.name))?;
                removed.push(entry.name);
            }
        }

        let content = self.render(category)?;
        let generated = folder.join(category.generated_file_name(&name));
        fs.write_file(&generated, &content)?;

        let (renamed, skipped) = match category.project_ext() {
            Some(ext) => fix_project_file(fs, folder, &name, ext)?,
            None => (None, Vec::new()),
        };

        tracing::info!(
            category = %category,
            name = %name,
            removed = removed.len(),
            renamed = renamed.is_some(),
            "normalized sub-project"
        );

        Ok(NormalizeOutcome {
            project: SubProject {
                name,
                category,
                folder: folder.to_path_buf(),
            },
            removed,
            generated,
            renamed,
            skipped,
        })
    }
}

/// Rename the first mismatched `*.<ext>` file (lexicographic) to `<name>.<ext>`
///
/// Never renames onto an existing canonical file. Every other mismatched
/// file is left untouched and returned as skipped.
fn fix_project_file<M: DirectoryMutator + ?Sized>(
    fs: &mut M,
    folder: &Path,
    name: &str,
    ext: &str,
) -> Result<(Option<(String, String)>, Vec<String>)> {
    let canonical = format!("{}.{}", name, ext);

    let mut canonical_exists = false;
    let mut mismatched = Vec::new();
    for entry in fs.list_dir(folder)? {
        if !entry.is_file() || !has_ext(&entry.name, ext) {
            continue;
        }
        if entry.name == canonical {
            canonical_exists = true;
        } else {
            mismatched.push(entry.name);
        }
    }
    mismatched.sort();

    let mut renamed = None;
    if !canonical_exists && !mismatched.is_empty() {
        let from = mismatched.remove(0);
        fs.rename(&folder.join(&from), &folder.join(&canonical))?;
        renamed = Some((from, canonical.clone()));
    }

    for skipped in &mismatched {
        tracing::warn!(
            folder = %folder.display(),
            file = %skipped,
            canonical = %canonical,
            "leaving extra project file in place"
        );
    }

    Ok((renamed, mismatched))
}
