//! Template store and rendering
//!
//! This module provides:
//! - The static templates for shared-items manifests, MDK tool-configs and
//!   the solution document
//! - single-pass `${name}` placeholder substitution

pub mod render;
pub mod store;

pub use render::render;
pub use store::Template;
