//! Core on-disk-format reader for the xu XFS undelete tool.
//!
//! This crate is the hard part: it knows nothing about command-line flags,
//! process wiring, or how bytes get copied off disk — it only knows how to
//! read an XFS image's geometry, walk its per-allocation-group inode
//! B+trees, recognize freshly deleted inodes, and decode their surviving
//! extent maps. I/O and content sniffing are expressed as traits
//! ([`traits::BlockSource`], [`traits::BlockCopier`], [`traits::Classifier`])
//! so concrete adapters live elsewhere.

pub mod ag_walker;
pub mod btree;
pub mod error;
pub mod extension;
pub mod extent;
pub mod inode;
pub mod recovery;
pub mod superblock;
pub mod traits;

pub use ag_walker::walk_all_ags;
pub use error::{CoreError, Result};
pub use inode::{PhysicalExtent, RecoveredCandidate};
pub use recovery::{recover_inode, RecoveryConfig};
pub use superblock::Geometry;
pub use traits::{BlockCopier, BlockSource, Classifier};
