//! Command-line configuration: flag parsing and validation.
//!
//! There is no on-disk config file; every option in this struct is filled
//! directly by the flag parser, with defaults applied here rather than
//! silently downstream.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{Local, NaiveDate, TimeZone};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "xfsundelete")]
#[command(author, version, about = "Recover recently deleted files from an XFS image", long_about = None)]
pub struct Cli {
    /// Path to the XFS filesystem image, opened read-only.
    pub image: PathBuf,

    /// Directory recovered files are written to; created if missing.
    #[arg(short, long, default_value = "xfs_undeleted")]
    pub output: PathBuf,

    /// Comma-separated extensions to discard after classification.
    #[arg(long, value_delimiter = ',', default_value = "bin")]
    pub ignore_extensions: Vec<String>,

    /// If non-empty, only files whose extension is in this set are kept.
    #[arg(long, value_delimiter = ',')]
    pub recover_extensions: Vec<String>,

    /// Skip inodes whose ctime is strictly earlier than this. Accepts a
    /// raw Unix timestamp or a `YYYY-MM-DD` date (midnight, local time).
    #[arg(long, value_parser = parse_min_ctime)]
    pub min_ctime: Option<u32>,

    /// Increase logging verbosity (stackable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all but warning-and-above logging.
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

fn parse_min_ctime(raw: &str) -> Result<u32, String> {
    if let Ok(epoch) = raw.parse::<u32>() {
        return Ok(epoch);
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("'{raw}' is neither a Unix timestamp nor a YYYY-MM-DD date"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| format!("'{raw}' does not name a valid midnight"))?;

    let local_midnight = Local
        .from_local_datetime(&midnight)
        .single()
        .ok_or_else(|| format!("'{raw}' midnight is ambiguous or nonexistent in the local timezone"))?;

    let epoch = local_midnight.timestamp();
    u32::try_from(epoch).map_err(|_| format!("'{raw}' is out of range for a 32-bit ctime"))
}

/// Resolved, validated configuration the orchestrator runs against.
pub struct RunConfig {
    pub image: PathBuf,
    pub output: PathBuf,
    pub ignore_extensions: HashSet<String>,
    pub recover_extensions: HashSet<String>,
    pub min_ctime: u32,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        Self {
            image: cli.image,
            output: cli.output,
            ignore_extensions: cli.ignore_extensions.into_iter().collect(),
            recover_extensions: cli.recover_extensions.into_iter().collect(),
            min_ctime: cli.min_ctime.unwrap_or(0),
        }
    }
}
