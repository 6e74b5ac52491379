//! Charm-style run report using cliclack

use crate::generator::RunSummary;
use crate::runtime::BootstrapOutcome;
use crate::workspace::Category;
use anyhow::Result;

/// Open the report with the workspace being regenerated
pub fn intro(root: &std::path::Path) -> Result<()> {
    cliclack::intro("mdk-scaffold")?;
    cliclack::log::info(format!("Workspace: {}", root.display()))?;
    Ok(())
}

/// Report the outcome of the bootstrap step
pub fn bootstrap(outcome: &BootstrapOutcome) -> Result<()> {
    match outcome {
        BootstrapOutcome::AlreadyInstalled => {
            cliclack::log::info("MDK tool already bootstrapped")?;
        }
        BootstrapOutcome::Installed(files) => {
            cliclack::log::success(format!("Bootstrapped MDK tool ({} files)", files.len()))?;
        }
    }
    Ok(())
}

/// Report what a regeneration run changed
pub fn summary(summary: &RunSummary) -> Result<()> {
    for category in Category::ALL {
        let scan = summary.scan(category);
        let names = if scan.names.is_empty() {
            "none".to_string()
        } else {
            scan.names.join(", ")
        };
        cliclack::log::success(format!(
            "{}: {} normalized ({})",
            category,
            scan.names.len(),
            names
        ))?;
    }

    for (folder, from, to) in summary.renames() {
        cliclack::log::info(format!("Renamed {} -> {} in {}", from, to, folder.display()))?;
    }

    for skipped in summary.skipped() {
        cliclack::log::warning(format!(
            "Left extra project file in place: {}",
            skipped.display()
        ))?;
    }

    cliclack::outro(format!(
        "Wrote {} with {} project(s)",
        summary.solution_path.display(),
        summary.entries.len()
    ))?;
    Ok(())
}
