//! Packed 128-bit extent decoding.
//!
//! An in-inode extent record packs five fields across a 128-bit big-endian
//! value: a one-bit preallocation flag, a 54-bit logical offset, then an
//! AG index and a block-within-AG whose combined width is geometry-dependent
//! (they split 52 bits according to `ag_block_log`), and a 21-bit length.
//! Decoding goes through shifts on a `u128` rather than byte-by-byte bit
//! twiddling.

const LENGTH_WIDTH: u32 = 21;

/// One decoded in-inode extent, before any validity filtering is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawExtent {
    pub preallocated: bool,
    pub logical_offset: u64,
    pub aag: u32,
    pub ablock: u32,
    pub count: u32,
}

/// Decodes a 16-byte packed extent entry. `ag_block_log` is the number of
/// bits the superblock reserves for block-within-AG; it determines how the
/// remaining 52 bits split between the AG index and the block offset.
///
/// Returns `None` for the all-zero entry, which denotes an unused slot.
pub fn decode(entry: &[u8; 16], ag_block_log: u8) -> Option<RawExtent> {
    if entry.iter().all(|&b| b == 0) {
        return None;
    }

    let ag_block_log = ag_block_log as u32;
    if ag_block_log > 52 {
        // Geometry anomaly: a corrupt or unsupported superblock could claim
        // an ag_block_log wide enough to leave no room for the AG index.
        // Treat the extent as undecodable rather than underflow below.
        return None;
    }

    let raw = u128::from_be_bytes(*entry);

    let preallocated = ((raw >> 127) & 1) != 0;
    let logical_offset = ((raw >> 73) & mask(54)) as u64;
    let ablock_shift = LENGTH_WIDTH;
    let aag_shift = ablock_shift + ag_block_log;
    let aag = ((raw >> aag_shift) & mask(52 - ag_block_log)) as u32;
    let ablock = ((raw >> ablock_shift) & mask(ag_block_log)) as u32;
    let count = (raw & mask(LENGTH_WIDTH)) as u32;

    Some(RawExtent {
        preallocated,
        logical_offset,
        aag,
        ablock,
        count,
    })
}

#[inline]
fn mask(width: u32) -> u128 {
    if width >= 128 {
        u128::MAX
    } else {
        (1u128 << width) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(preallocated: bool, logical_offset: u64, aag: u32, ablock: u32, count: u32, ag_block_log: u8) -> [u8; 16] {
        let ag_block_log = ag_block_log as u32;
        let mut raw: u128 = 0;
        if preallocated {
            raw |= 1 << 127;
        }
        raw |= (logical_offset as u128 & mask(54)) << 73;
        raw |= (aag as u128 & mask(52 - ag_block_log)) << (21 + ag_block_log);
        raw |= (ablock as u128 & mask(ag_block_log)) << 21;
        raw |= count as u128 & mask(21);
        raw.to_be_bytes()
    }

    #[test]
    fn all_zero_entry_is_unused() {
        assert_eq!(decode(&[0u8; 16], 18), None);
    }

    #[test]
    fn round_trips_fields() {
        let entry = pack(false, 12345, 2, 987_654, 17, 18);
        let decoded = decode(&entry, 18).unwrap();
        assert!(!decoded.preallocated);
        assert_eq!(decoded.logical_offset, 12345);
        assert_eq!(decoded.aag, 2);
        assert_eq!(decoded.ablock, 987_654);
        assert_eq!(decoded.count, 17);
    }

    #[test]
    fn preallocated_flag_is_detected() {
        let entry = pack(true, 0, 0, 5, 1, 18);
        let decoded = decode(&entry, 18).unwrap();
        assert!(decoded.preallocated);
    }

    #[test]
    fn offset_zero_extent() {
        let entry = pack(false, 0, 0, 5, 1, 18);
        let decoded = decode(&entry, 18).unwrap();
        assert_eq!(decoded.logical_offset, 0);
        assert_eq!(decoded.ablock, 5);
    }

    #[test]
    fn oversized_ag_block_log_is_rejected_without_panicking() {
        assert_eq!(decode(&[0xffu8; 16], 200), None);
    }

    #[test]
    fn respects_ag_block_log_boundary() {
        // ag_block_log = 1: ablock fits in a single bit, aag takes the rest.
        let entry = pack(false, 0, 0b1, 0b1, 1, 1);
        let decoded = decode(&entry, 1).unwrap();
        assert_eq!(decoded.ablock, 1);
        assert_eq!(decoded.aag, 1);
    }
}
