//! Byte-range copier: moves block-aligned ranges from the source image into
//! a destination file using positioned reads and writes.

use std::fs::OpenOptions;
use std::path::Path;

use xu_core::{BlockCopier, CoreError, Result};

use crate::reader::DiskReader;

/// A [`BlockCopier`] implemented directly with `pread`/`pwrite`, rather than
/// shelling out to `cp`/`dd`: faster, with richer error reporting, and
/// without a process launch per extent.
pub struct FileBlockCopier;

impl BlockCopier for FileBlockCopier {
    fn copy_blocks(
        &self,
        src_path: &Path,
        dst_path: &Path,
        block_size: u64,
        src_block: u64,
        dst_block: u64,
        count: u64,
    ) -> Result<()> {
        if count == 0 {
            return Ok(());
        }

        let mut src = DiskReader::open(src_path)?;
        let dst = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(dst_path)?;

        let byte_len = (count * block_size) as usize;
        let mut buf = vec![0u8; byte_len];
        let src_offset = src_block * block_size;

        let n = xu_core::BlockSource::read_at(&mut src, src_offset, &mut buf)?;
        buf.truncate(n);

        let dst_offset = dst_block * block_size;
        write_all_at(&dst, &buf, dst_offset)?;

        Ok(())
    }
}

fn write_all_at(file: &std::fs::File, mut buf: &[u8], mut offset: u64) -> Result<()> {
    while !buf.is_empty() {
        let n = rustix::fs::pwrite(file, buf, offset).map_err(|e| CoreError::Io(e.into()))?;
        if n == 0 {
            return Err(CoreError::Io(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                "pwrite returned zero bytes written",
            )));
        }
        buf = &buf[n..];
        offset += n as u64;
    }
    Ok(())
}
