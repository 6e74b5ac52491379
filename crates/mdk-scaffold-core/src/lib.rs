//! MDK Scaffold Core - regenerates the derived metadata of a script workspace
//!
//! A workspace holds three category folders: `Mixins/` (shared code),
//! `Scripts/` and `Tests/` (buildable projects), one subdirectory per
//! sub-project. This library rebuilds the files that describe them:
//!
//! - a `<name>.projitems` shared-items manifest per mixin
//! - a `<name>.mdk.ini` tool-config per script and test
//! - one solution document listing every script and test
//!
//! # Architecture
//!
//! - **Templates** - static artifact templates and `${name}` substitution
//! - **Workspace** - categories, the directory-mutator seam, per-folder
//!   normalization and category scanning
//! - **Solution** - build identifier allocation and solution composition
//! - **Config** - workspace layout (`scaffold.yaml`) and platform defaults
//! - **Runtime** - the optional external tool bootstrap
//! - **TUI** - cliclack run report (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based run report
//!
//! # Example Usage
//!
//! ```ignore
//! use mdk_scaffold_core::{Generator, PlatformConfig, WorkspaceLayout};
//! use mdk_scaffold_core::solution::RandomAllocator;
//! use mdk_scaffold_core::workspace::DiskMutator;
//!
//! let layout = WorkspaceLayout::load(&root)?;
//! let platform = PlatformConfig::detect()?;
//! let summary = Generator::new(&root, &layout, &platform)
//!     .run(&mut DiskMutator, &mut RandomAllocator)?;
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod runtime;
pub mod solution;
pub mod templates;
pub mod workspace;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{PlatformConfig, WorkspaceLayout};
pub use error::{Result, ScaffoldError};
pub use generator::{Generator, RunSummary};
pub use solution::{IdAllocator, RandomAllocator, SeededAllocator};
pub use workspace::{Category, DirectoryMutator, DiskMutator};
