//! Positioned reads against a disk image or device, without disturbing a
//! shared file cursor.

use std::fs::{File, OpenOptions};
use std::path::Path;

use xu_core::{BlockSource, CoreError, Result};

/// A read-only [`BlockSource`] backed by a single open file handle.
///
/// Uses `pread` so reads never race a shared cursor — the traversal is
/// single-threaded and sequential in practice, but positioned reads are
/// also simply the right primitive for random access into a fixed image.
pub struct DiskReader {
    file: File,
    size: u64,
}

impl DiskReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(false)
            .open(path.as_ref())?;

        #[cfg(target_os = "linux")]
        {
            use rustix::fs::{fadvise, Advice};
            let _ = fadvise(&file, 0, None, Advice::Random);
        }

        let size = file.metadata()?.len();

        Ok(Self { file, size })
    }
}

impl BlockSource for DiskReader {
    fn read_at(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize> {
        match rustix::fs::pread(&self.file, buffer, offset) {
            Ok(n) => Ok(n),
            Err(err) => Err(CoreError::Io(err.into())),
        }
    }

    fn size(&self) -> u64 {
        self.size
    }
}
