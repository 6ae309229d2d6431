//! Core error types for the XFS undelete tool.

use thiserror::Error;

/// Errors that can occur while reading or decoding the on-disk format.
///
/// Most of these are *recoverable* in the sense that the caller swallows
/// them at the narrowest scope (a slot, an extent, a tree block) rather than
/// aborting the run. Only [`CoreError::Io`] and the geometry variants are
/// expected to propagate all the way out of a run.
#[derive(Debug, Error)]
pub enum CoreError {
    /// I/O operation against the source image failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The superblock could not be parsed into valid geometry.
    #[error("invalid filesystem geometry: {0}")]
    InvalidGeometry(String),

    /// A read returned fewer bytes than the caller required.
    #[error("truncated read at offset {offset}: expected {expected} bytes, got {actual}")]
    Truncated {
        offset: u64,
        expected: usize,
        actual: usize,
    },

    /// Offset is out of bounds for the source.
    #[error("offset {offset} is out of bounds (max: {max})")]
    OutOfBounds { offset: u64, max: u64 },
}

pub type Result<T> = std::result::Result<T, CoreError>;
