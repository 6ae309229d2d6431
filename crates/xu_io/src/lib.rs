//! Concrete I/O adapters for the xu XFS undelete tool: a positioned-read
//! disk reader, a pread/pwrite byte-range copier, and a magic-byte content
//! classifier.

mod classifier;
mod copier;
mod reader;

pub use classifier::MagicByteClassifier;
pub use copier::FileBlockCopier;
pub use reader::DiskReader;
