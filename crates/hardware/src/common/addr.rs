//! Address decomposition.
//!
//! This module splits a 32-bit address into the fields a set-associative cache
//! needs. It provides the following:
//! 1. **Mask Derivation:** Tag and index masks computed once from a level's set count and the shared block size.
//! 2. **Decoding:** Extraction of the `(tag, index)` pair used to probe a `SetStore`.
//! 3. **Reconstruction:** Rebuilding the line address of an evicted tag for inclusion enforcement.

/// Number of bits in a simulated address.
pub const ADDRESS_BITS: u32 = 32;

/// Returns `ceil(log2(n))` for `n > 0`, and 0 for `n <= 1`.
#[inline]
pub const fn ceil_log2(n: u32) -> u32 {
    if n <= 1 {
        0
    } else {
        ADDRESS_BITS - (n - 1).leading_zeros()
    }
}

/// Builds a mask of `width` low bits, saturating at the full address width.
#[inline]
const fn low_bits(width: u32) -> u32 {
    if width >= ADDRESS_BITS {
        u32::MAX
    } else {
        (1 << width) - 1
    }
}

/// The tag and set index of an address under one level's masks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddr {
    /// Address bits above the index, kept in place (not shifted down).
    pub tag: u32,
    /// Set number, shifted down past the block offset.
    pub index: u32,
}

/// Tag and index masks for one cache level.
///
/// Index bits sit immediately above the block-offset bits; every bit above
/// them belongs to the tag. The three fields never overlap and together
/// cover the whole address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressMasks {
    tag_mask: u32,
    index_mask: u32,
    offset_bits: u32,
}

impl AddressMasks {
    /// Derives the masks for a cache with `sets` sets and `block_size`-byte lines.
    ///
    /// Both arguments are expected to be powers of two; `HierarchyConfig::validate`
    /// rejects anything else before masks are derived. A set count of 0 or 1
    /// yields an empty index mask.
    ///
    /// # Arguments
    ///
    /// * `sets` - Number of sets in the level.
    /// * `block_size` - Line size in bytes, shared by every level.
    pub const fn derive(sets: u32, block_size: u32) -> Self {
        let offset_bits = ceil_log2(block_size);
        let index_bits = ceil_log2(sets);

        let offset_mask = low_bits(offset_bits);
        let index_mask = if offset_bits >= ADDRESS_BITS {
            0
        } else {
            (low_bits(index_bits) << offset_bits) & !offset_mask
        };

        Self {
            tag_mask: !(index_mask | offset_mask),
            index_mask,
            offset_bits,
        }
    }

    /// Mask selecting the tag bits.
    #[inline]
    pub const fn tag_mask(&self) -> u32 {
        self.tag_mask
    }

    /// Mask selecting the index bits (in place).
    #[inline]
    pub const fn index_mask(&self) -> u32 {
        self.index_mask
    }

    /// Mask selecting the block-offset bits.
    #[inline]
    pub const fn offset_mask(&self) -> u32 {
        !(self.tag_mask | self.index_mask)
    }

    /// Splits `addr` into its tag and set index.
    #[inline]
    pub const fn decode(&self, addr: u32) -> DecodedAddr {
        DecodedAddr {
            tag: addr & self.tag_mask,
            index: match (addr & self.index_mask).checked_shr(self.offset_bits) {
                Some(index) => index,
                None => 0,
            },
        }
    }

    /// Rebuilds the line address (offset bits zero) for a resident tag.
    ///
    /// This is the inverse of [`decode`](Self::decode) up to the block offset.
    #[inline]
    pub const fn compose(&self, tag: u32, index: u32) -> u32 {
        let index_bits = match index.checked_shl(self.offset_bits) {
            Some(bits) => bits,
            None => 0,
        };
        (tag & self.tag_mask) | (index_bits & self.index_mask)
    }
}
