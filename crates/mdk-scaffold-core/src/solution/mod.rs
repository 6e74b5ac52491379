//! Solution composition
//!
//! This module provides:
//! - Build identifier allocation (random or seeded)
//! - Rendering of project entries and configuration blocks into one solution

pub mod composer;
pub mod ids;

pub use composer::{write_solution, Composer, SolutionDocument, SolutionEntry};
pub use ids::{BuildId, IdAllocator, RandomAllocator, SeededAllocator};
