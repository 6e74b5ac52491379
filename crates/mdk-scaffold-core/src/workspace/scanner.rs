//! Category folder scanning

use super::category::Category;
use super::mutator::DirectoryMutator;
use super::normalizer::{NormalizeOutcome, Normalizer};
use crate::error::{Result, ScaffoldError};
use std::path::Path;

/// Result of scanning one category folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryScan {
    /// Sub-project names in listing order
    pub names: Vec<String>,
    pub outcomes: Vec<NormalizeOutcome>,
}

/// Normalize every immediate subdirectory of `category_dir`
///
/// Plain files are ignored. Names come back in the order the mutator lists
/// them, which is not guaranteed to be sorted on disk.
pub fn scan<M: DirectoryMutator + ?Sized>(
    fs: &mut M,
    normalizer: &Normalizer<'_>,
    category_dir: &Path,
    category: Category,
) -> Result<CategoryScan> {
    if !fs.is_dir(category_dir) {
        return Err(ScaffoldError::MissingFolder(category_dir.to_path_buf()));
    }

    let mut result = CategoryScan::default();
    for entry in fs.list_dir(category_dir)? {
        if !entry.is_dir() {
            continue;
        }
        let outcome = normalizer.normalize(fs, &category_dir.join(&entry.name), category)?;
        result.names.push(entry.name);
        result.outcomes.push(outcome);
    }

    tracing::debug!(
        category = %category,
        dir = %category_dir.display(),
        count = result.names.len(),
        "scanned category"
    );

    Ok(result)
}
