//! Recovery orchestration: turn a surviving extent map into an output file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{Local, TimeZone};

use crate::error::Result;
use crate::extension;
use crate::inode::RecoveredCandidate;
use crate::traits::{BlockCopier, Classifier};

/// Options governing which recovered files are kept.
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    pub output_dir: PathBuf,
    pub block_size: u64,
    pub ignore_extensions: HashSet<String>,
    pub recover_extensions: HashSet<String>,
}

/// Attempts to recover one candidate inode's data. Returns the final output
/// path on success, or `None` if the file was abandoned or filtered out.
/// Never returns an error for anything other than an unopenable output
/// directory; per-extent and classifier failures are tolerated internally.
pub fn recover_inode(
    copier: &dyn BlockCopier,
    classifier: &dyn Classifier,
    source_path: &Path,
    config: &RecoveryConfig,
    candidate: &RecoveredCandidate,
) -> Result<Option<PathBuf>> {
    let Some(first) = candidate.extents.get(&0) else {
        // The caller is expected to have already enforced this invariant,
        // but defend against being handed a malformed candidate directly.
        return Ok(None);
    };

    let path = output_path(&config.output_dir, candidate.ctime_seconds, candidate.inode);

    if copier
        .copy_blocks(
            source_path,
            &path,
            config.block_size,
            first.absolute_disk_block,
            0,
            1,
        )
        .is_err()
    {
        tracing::debug!(inode = candidate.inode, "probe block copy failed, abandoning inode");
        return Ok(None);
    }

    let extension = match classifier.classify(&path) {
        Ok(media_type) => extension::derive_extension(&media_type),
        Err(err) => {
            tracing::debug!(inode = candidate.inode, %err, "classifier failed, leaving file unextended");
            None
        }
    };

    let mut final_path = path.clone();
    if let Some(ext) = &extension {
        let renamed = path.with_extension(ext);
        if std::fs::rename(&path, &renamed).is_ok() {
            final_path = renamed;
        }
    }

    if let Some(ext) = &extension {
        if config.ignore_extensions.contains(ext) {
            let _ = std::fs::remove_file(&final_path);
            return Ok(None);
        }
        if !config.recover_extensions.is_empty() && !config.recover_extensions.contains(ext) {
            let _ = std::fs::remove_file(&final_path);
            return Ok(None);
        }
    }

    for (&logical_offset, physical) in &candidate.extents {
        if copier
            .copy_blocks(
                source_path,
                &final_path,
                config.block_size,
                physical.absolute_disk_block,
                logical_offset,
                physical.count as u64,
            )
            .is_err()
        {
            tracing::debug!(
                inode = candidate.inode,
                logical_offset,
                "extent copy failed, keeping partial recovery"
            );
        }
    }

    tracing::info!("Recovered file -> {}", final_path.display());

    Ok(Some(final_path))
}

/// Builds `<out_dir>/<YYYY-MM-DD-HH:MM>_<inode>`, the pre-extension output
/// path, from a ctime and inode number.
fn output_path(out_dir: &Path, ctime_seconds: u32, inode: u64) -> PathBuf {
    let formatted = Local
        .timestamp_opt(ctime_seconds as i64, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d-%H:%M").to_string())
        .unwrap_or_else(|| format!("unknown-time-{ctime_seconds}"));

    out_dir.join(format!("{formatted}_{inode}"))
}
