//! One full regeneration pass over a workspace

use crate::config::{PlatformConfig, WorkspaceLayout};
use crate::error::Result;
use crate::solution::{write_solution, Composer, IdAllocator, SolutionEntry};
use crate::workspace::{scan, Category, CategoryScan, DirectoryMutator, Normalizer};
use std::path::{Path, PathBuf};

/// Everything a run touched, for reporting
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub mixins: CategoryScan,
    pub scripts: CategoryScan,
    pub tests: CategoryScan,
    pub solution_path: PathBuf,
    pub entries: Vec<SolutionEntry>,
}

impl RunSummary {
    pub fn scan(&self, category: Category) -> &CategoryScan {
        match category {
            Category::Mixin => &self.mixins,
            Category::Script => &self.scripts,
            Category::Test => &self.tests,
        }
    }

    /// Build-project renames as `(folder, from, to)`
    pub fn renames(&self) -> Vec<(&Path, &str, &str)> {
        Category::ALL
            .iter()
            .flat_map(|c| self.scan(*c).outcomes.iter())
            .filter_map(|o| {
                o.renamed
                    .as_ref()
                    .map(|(from, to)| (o.project.folder.as_path(), from.as_str(), to.as_str()))
            })
            .collect()
    }

    /// Mismatched project files left in place, as full paths
    pub fn skipped(&self) -> Vec<PathBuf> {
        Category::ALL
            .iter()
            .flat_map(|c| self.scan(*c).outcomes.iter())
            .flat_map(|o| o.skipped.iter().map(|s| o.project.folder.join(s)))
            .collect()
    }
}

/// Regenerates every derived file under a workspace root
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    root: PathBuf,
    layout: &'a WorkspaceLayout,
    platform: &'a PlatformConfig,
}

impl<'a> Generator<'a> {
    pub fn new(
        root: impl Into<PathBuf>,
        layout: &'a WorkspaceLayout,
        platform: &'a PlatformConfig,
    ) -> Self {
        Self {
            root: root.into(),
            layout,
            platform,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Normalize mixins, scripts and tests, then write the solution
    ///
    /// Stops at the first error. Whatever was already rewritten stays
    /// rewritten; running again finishes the job.
    pub fn run<M, A>(&self, fs: &mut M, allocator: &mut A) -> Result<RunSummary>
    where
        M: DirectoryMutator + ?Sized,
        A: IdAllocator + ?Sized,
    {
        let normalizer = Normalizer::new(self.platform);
        let dir = |category| self.layout.category_dir(&self.root, category);

        let mixins = scan(fs, &normalizer, &dir(Category::Mixin), Category::Mixin)?;
        let scripts = scan(fs, &normalizer, &dir(Category::Script), Category::Script)?;
        let tests = scan(fs, &normalizer, &dir(Category::Test), Category::Test)?;

        let composer = Composer::new(self.platform.path_style, self.layout);
        let document = composer.compose(allocator, &scripts.names, &tests.names)?;
        let solution_path = self.layout.solution_path(&self.root);
        write_solution(fs, &solution_path, &document)?;

        Ok(RunSummary {
            mixins,
            scripts,
            tests,
            solution_path,
            entries: document.entries,
        })
    }
}
