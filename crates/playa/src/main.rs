//! Playa - ring layout generator
//!
//! Computes the placement of every light base around the venue, packs the
//! bases into Art-Net universes and prints the resulting fixture document to
//! stdout (or writes it to `--output`). Logs go to stderr.

mod cli;
mod logging_setup;

use anyhow::{Context, Result};
use clap::Parser;
use playa_core::{generate, LayoutResult};
use playa_io::{dump_placements, ConfigFile, LayoutDocument, LAYOUT_FORMAT_VERSION};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigFile::load(path)
            .with_context(|| format!("Failed to load config file {:?}", path))?,
        None => ConfigFile::default(),
    };
    args.apply_overrides(&mut config);

    if let Some(path) = &args.write_default_config {
        config
            .save(path)
            .with_context(|| format!("Failed to write config file {:?}", path))?;
        eprintln!("Wrote config to {:?}", path);
        return Ok(());
    }

    let _log_guard = logging_setup::init(&config.logging)?;

    // Fails closed: nothing is written when the venue is invalid.
    let result = generate(&config.venue).context("Invalid venue configuration")?;

    if args.debug_dump {
        write_debug_dump(&args.dump_path, &result);
    }

    let document = LayoutDocument::from_result(&result);
    info!(
        "Emitting layout document v{} ({} bases, {} outputs)",
        LAYOUT_FORMAT_VERSION,
        document.children.len(),
        document.outputs.len()
    );

    match &args.output {
        Some(path) => document
            .save(path)
            .with_context(|| format!("Failed to write layout document {:?}", path))?,
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            document
                .write_json(&mut out)
                .context("Failed to write layout document to stdout")?;
            writeln!(out)?;
            out.flush()?;
        }
    }

    Ok(())
}

/// The dump is a side channel: failures are logged and never abort the run.
fn write_debug_dump(path: &Path, result: &LayoutResult) {
    match dump_placements(path, &result.placements) {
        Ok(lines) => info!("Wrote {} polar coordinates to {:?}", lines, path),
        Err(e) => warn!("Polar coordinate dump {:?} abandoned: {}", path, e),
    }
}
