//! Top-level per-allocation-group orchestration: AGI sector -> inode
//! B+tree -> inode cluster blocks -> candidate inodes.

use crate::error::Result;
use crate::inode::{self, RecoveredCandidate};
use crate::superblock::Geometry;
use crate::traits::BlockSource;
use crate::btree;

const AGI_ROOT_OFFSET: usize = 20;

/// Walks every allocation group in ascending order, AG-major and
/// tree-pre-order within each AG, handing every surviving deleted inode to
/// `on_candidate`. A single `inodes_examined` counter is threaded across all
/// AGs so progress is reported cumulatively over the whole run.
///
/// `should_continue` is polled between cluster blocks; once it returns
/// `false` the walk stops early (e.g. on a Ctrl-C request), leaving
/// already-recovered files intact rather than unwinding with an error.
#[allow(clippy::too_many_arguments)]
pub fn walk_all_ags(
    source: &mut dyn BlockSource,
    geom: &Geometry,
    min_ctime: u32,
    should_continue: &mut dyn FnMut() -> bool,
    on_progress: &mut dyn FnMut(u64, f64),
    on_candidate: &mut dyn FnMut(RecoveredCandidate),
) -> Result<()> {
    let mut inodes_examined = 0u64;

    'ags: for ag in 0..geom.ag_count {
        let agi_root = match read_agi_root(source, geom, ag) {
            Some(root) => root,
            None => {
                tracing::warn!(ag, "failed to read AGI sector, skipping allocation group");
                continue;
            }
        };

        let mut cluster_blocks = Vec::new();
        btree::walk_ag_inode_tree(source, geom, ag, agi_root, &mut |block| {
            cluster_blocks.push(block)
        })?;

        for block in cluster_blocks {
            if !should_continue() {
                break 'ags;
            }
            inode::scan_cluster_block(
                source,
                geom,
                ag,
                block,
                min_ctime,
                &mut inodes_examined,
                on_progress,
                on_candidate,
            )?;
        }
    }

    Ok(())
}

fn read_agi_root(source: &mut dyn BlockSource, geom: &Geometry, ag: u32) -> Option<u32> {
    let offset = geom.ag_base(ag) + 2 * geom.sector_size as u64;
    let mut sector = vec![0u8; geom.sector_size as usize];
    if source.read_at(offset, &mut sector).is_err() {
        return None;
    }
    if sector.len() < AGI_ROOT_OFFSET + 4 {
        return None;
    }
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&sector[AGI_ROOT_OFFSET..AGI_ROOT_OFFSET + 4]);
    Some(u32::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MemSource(Vec<u8>);
    impl BlockSource for MemSource {
        fn read_at(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize> {
            let start = offset as usize;
            if start >= self.0.len() {
                return Ok(0);
            }
            let end = (start + buffer.len()).min(self.0.len());
            let n = end - start;
            buffer[..n].copy_from_slice(&self.0[start..end]);
            Ok(n)
        }
        fn size(&self) -> u64 {
            self.0.len() as u64
        }
    }

    fn geom(ag_count: u32) -> Geometry {
        Geometry {
            block_size: 512,
            sector_size: 512,
            inode_size: 512,
            inodes_per_block: 1,
            ag_blocks: 8,
            ag_count,
            data_blocks: 8 * ag_count as u64,
            ag_block_log: 3,
            inode_count: 100,
        }
    }

    #[test]
    fn empty_agi_leaf_yields_no_candidates() {
        let g = geom(1);
        let mut image = vec![0u8; (g.ag_blocks as usize) * g.block_size as usize];

        // AGI sector at offset 2*sector_size; agi_root points at block 1.
        let agi_offset = 2 * g.sector_size as usize;
        image[agi_offset + AGI_ROOT_OFFSET..agi_offset + AGI_ROOT_OFFSET + 4]
            .copy_from_slice(&1u32.to_be_bytes());

        // Block 1: an IABT leaf with numrecs = 0.
        let leaf_offset = g.block_size as usize;
        image[leaf_offset..leaf_offset + 4].copy_from_slice(b"IABT");
        image[leaf_offset + 4..leaf_offset + 6].copy_from_slice(&0u16.to_be_bytes());
        image[leaf_offset + 6..leaf_offset + 8].copy_from_slice(&0u16.to_be_bytes());

        let mut src = MemSource(image);
        let mut candidates = Vec::new();
        walk_all_ags(
            &mut src,
            &g,
            0,
            &mut || true,
            &mut |_, _| {},
            &mut |c| candidates.push(c),
        )
        .unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn unreadable_agi_sector_skips_ag_without_failing_run() {
        let g = geom(2);
        // Image far too short to contain any AGI sector for either AG.
        let image = vec![0u8; 4];
        let mut src = MemSource(image);
        let mut candidates = Vec::new();
        let result = walk_all_ags(
            &mut src,
            &g,
            0,
            &mut || true,
            &mut |_, _| {},
            &mut |c| candidates.push(c),
        );
        assert!(result.is_ok());
        assert!(candidates.is_empty());
    }

    #[test]
    fn cancellation_flag_stops_traversal_early() {
        let g = geom(1);
        let mut image = vec![0u8; (g.ag_blocks as usize) * g.block_size as usize];
        let agi_offset = 2 * g.sector_size as usize;
        image[agi_offset + AGI_ROOT_OFFSET..agi_offset + AGI_ROOT_OFFSET + 4]
            .copy_from_slice(&1u32.to_be_bytes());
        let leaf_offset = g.block_size as usize;
        image[leaf_offset..leaf_offset + 4].copy_from_slice(b"IABT");
        image[leaf_offset + 4..leaf_offset + 6].copy_from_slice(&0u16.to_be_bytes());
        image[leaf_offset + 6..leaf_offset + 8].copy_from_slice(&1u16.to_be_bytes());
        image[leaf_offset + 16..leaf_offset + 20].copy_from_slice(&0u32.to_be_bytes());

        let mut src = MemSource(image);
        let mut candidates = Vec::new();
        let result = walk_all_ags(
            &mut src,
            &g,
            0,
            &mut || false,
            &mut |_, _| {},
            &mut |c| candidates.push(c),
        );
        assert!(result.is_ok());
        assert!(candidates.is_empty());
    }
}
