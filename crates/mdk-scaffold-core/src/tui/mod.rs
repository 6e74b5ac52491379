//! Terminal report using cliclack (Charm-style inline output)
//!
//! This module is optional and only available when the `tui` feature is enabled.

pub mod report;
