//! MDK Scaffold - regenerates the solution, `.projitems` and `.mdk.ini` files
//! of a script workspace
//!
//! Run it with no arguments from the workspace root.

use anyhow::{Context, Result};
use clap::Parser;
use mdk_scaffold_core::runtime::Bootstrap;
use mdk_scaffold_core::{
    DiskMutator, Generator, IdAllocator, PlatformConfig, RandomAllocator, SeededAllocator,
    WorkspaceLayout,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "mdk-scaffold")]
#[command(about = "Regenerate the solution and per-project metadata files of an MDK script workspace")]
#[command(version)]
pub struct Args {
    /// Workspace root containing Mixins/, Scripts/ and Tests/ (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Derive build identifiers from this seed instead of randomly
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fetch and build the MDK tool first (non-Windows hosts only)
    #[arg(long)]
    pub bootstrap: bool,

    /// Do not print the run report
    #[arg(short, long)]
    pub quiet: bool,
}

/// Initialize tracing on stderr, filtered by RUST_LOG
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "mdk_scaffold=warn,mdk_scaffold_core=warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing();

    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };
    let layout = WorkspaceLayout::load(&root)?;
    let platform = PlatformConfig::detect()?;

    if !args.quiet {
        mdk_scaffold_core::tui::report::intro(&root)?;
    }

    if args.bootstrap {
        if platform.native {
            tracing::info!("skipping bootstrap on the native platform");
        } else {
            let config = layout.bootstrap.clone().unwrap_or_default();
            let outcome = Bootstrap::new(config, &root).run().await?;
            if !args.quiet {
                mdk_scaffold_core::tui::report::bootstrap(&outcome)?;
            }
        }
    }

    let mut allocator: Box<dyn IdAllocator> = match args.seed {
        Some(seed) => Box::new(SeededAllocator::new(seed)),
        None => Box::new(RandomAllocator),
    };
    let summary = Generator::new(&root, &layout, &platform)
        .run(&mut DiskMutator, allocator.as_mut())?;

    if !args.quiet {
        mdk_scaffold_core::tui::report::summary(&summary)?;
    }

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    Ok(())
}
