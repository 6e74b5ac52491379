//! External tooling
//!
//! This module provides the optional bootstrap of the MDK command-line tool
//! on hosts where it cannot be installed natively.

pub mod bootstrap;

pub use bootstrap::{Bootstrap, BootstrapOutcome};
