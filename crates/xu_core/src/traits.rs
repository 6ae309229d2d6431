//! Ports: the abstractions the core domain reads and writes through.
//!
//! These traits decouple the on-disk-format reader from the concrete I/O
//! adapters (real files, in-memory buffers for tests) and from two
//! external collaborators: a byte-range copier and a content-type
//! classifier.

use crate::error::Result;

/// A source of raw block data, typically a disk image opened read-only.
pub trait BlockSource {
    /// Reads up to `buffer.len()` bytes starting at `offset`, returning the
    /// number of bytes actually read (short reads are only expected at EOF).
    fn read_at(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize>;

    /// Reads exactly `buffer.len()` bytes starting at `offset`.
    fn read_exact_at(&mut self, offset: u64, buffer: &mut [u8]) -> Result<()> {
        let n = self.read_at(offset, buffer)?;
        if n != buffer.len() {
            return Err(crate::error::CoreError::Truncated {
                offset,
                expected: buffer.len(),
                actual: n,
            });
        }
        Ok(())
    }

    /// Total size of the source in bytes.
    fn size(&self) -> u64;
}

/// Copies block-aligned byte ranges from the source image into a recovered
/// output file without disturbing bytes outside the written range.
pub trait BlockCopier {
    /// Copies `count` blocks of `block_size` bytes each from `src_block` in
    /// the source image to `dst_block` (a logical block offset) in the file
    /// at `dst_path`. The destination file is created if missing and is
    /// never truncated.
    fn copy_blocks(
        &self,
        src_path: &std::path::Path,
        dst_path: &std::path::Path,
        block_size: u64,
        src_block: u64,
        dst_block: u64,
        count: u64,
    ) -> Result<()>;
}

/// Sniffs the content of a file to produce a MIME-style media type, used
/// only to pick a plausible output extension.
pub trait Classifier {
    fn classify(&self, path: &std::path::Path) -> Result<String>;
}
