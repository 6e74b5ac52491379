//! Sub-project discovery and normalization
//!
//! This module provides:
//! - Category definitions (mixins, scripts, tests) and their file extensions
//! - The directory-mutator seam over disk or memory
//! - Per-folder normalization and per-category scanning

pub mod category;
pub mod mutator;
pub mod normalizer;
pub mod scanner;

pub use category::Category;
pub use mutator::{DirEntry, DirectoryMutator, DiskMutator, EntryKind, MemoryMutator};
pub use normalizer::{NormalizeOutcome, Normalizer, SubProject};
pub use scanner::{scan, CategoryScan};
