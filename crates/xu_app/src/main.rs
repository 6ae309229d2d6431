//! xfsundelete - recovers recently deleted files from an XFS filesystem image.

mod config;

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use config::{Cli, RunConfig};
use xu_core::{Geometry, RecoveryConfig};
use xu_io::{DiskReader, FileBlockCopier, MagicByteClassifier};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let config: RunConfig = cli.into();

    std::fs::create_dir_all(&config.output)
        .with_context(|| format!("failed to create output directory {:?}", config.output))?;

    let running = Arc::new(AtomicBool::new(true));
    let signal_flag = running.clone();
    ctrlc::set_handler(move || {
        signal_flag.store(false, Ordering::SeqCst);
    })
    .context("failed to install Ctrl-C handler")?;

    let mut reader = DiskReader::open(&config.image)
        .with_context(|| format!("failed to open source image {:?}", config.image))?;

    let geometry = Geometry::read_from(&mut reader).context("failed to read filesystem geometry")?;

    tracing::info!(
        block_size = geometry.block_size,
        ag_count = geometry.ag_count,
        data_blocks = geometry.data_blocks,
        "opened XFS image"
    );

    let copier = FileBlockCopier;
    let classifier = MagicByteClassifier;
    let recovery_config = RecoveryConfig {
        output_dir: config.output.clone(),
        block_size: geometry.block_size as u64,
        ignore_extensions: config.ignore_extensions,
        recover_extensions: config.recover_extensions,
    };

    let mut recovered_count = 0u64;
    let image_path = config.image.clone();

    xu_core::walk_all_ags(
        &mut reader,
        &geometry,
        config.min_ctime,
        &mut || running.load(Ordering::SeqCst),
        &mut |inode, fraction| {
            eprint!("\rchecking inode {inode} ({:.1}%)", fraction * 100.0);
            let _ = std::io::stderr().flush();
        },
        &mut |candidate| {
            match xu_core::recover_inode(&copier, &classifier, &image_path, &recovery_config, &candidate) {
                Ok(Some(_)) => recovered_count += 1,
                Ok(None) => {}
                Err(err) => tracing::warn!(inode = candidate.inode, %err, "recovery attempt failed"),
            }
        },
    )
    .context("traversal of the filesystem image failed")?;

    tracing::info!(recovered = recovered_count, "Done.");

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
