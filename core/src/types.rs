//! # Core Types
//!
//! Link identifiers, link masks and register block identifiers.

use core::fmt;
use static_assertions::const_assert;

/// Upper bound on links per device; link masks are 64 bits wide
pub const MAX_LINKS: usize = 64;

const_assert!(MAX_LINKS <= u64::BITS as usize);

/// Device-global link number
pub type LinkId = u32;

// =============================================================================
// LINK MASK
// =============================================================================

/// Set of links, one bit per [`LinkId`]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct LinkMask(u64);

impl LinkMask {
    /// The empty set
    pub const EMPTY: LinkMask = LinkMask(0);

    /// Mask from raw bits
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Mask holding a single link; out-of-range links give the empty set
    pub const fn single(link: LinkId) -> Self {
        if (link as usize) < MAX_LINKS {
            Self(1 << link)
        } else {
            Self(0)
        }
    }

    /// The first `count` links
    pub const fn first_n(count: u32) -> Self {
        if count as usize >= MAX_LINKS {
            Self(u64::MAX)
        } else {
            Self((1u64 << count) - 1)
        }
    }

    /// Raw bits
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// Whether no link is set
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of links in the set
    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Whether `link` is in the set
    pub const fn contains(&self, link: LinkId) -> bool {
        (link as usize) < MAX_LINKS && self.0 & (1 << link) != 0
    }

    /// Add `link`
    pub fn insert(&mut self, link: LinkId) {
        self.0 |= Self::single(link).0;
    }

    /// Remove `link`
    pub fn remove(&mut self, link: LinkId) {
        self.0 &= !Self::single(link).0;
    }

    /// Intersection
    pub const fn and(self, other: LinkMask) -> LinkMask {
        LinkMask(self.0 & other.0)
    }

    /// Links of `self` not present in `other`
    pub const fn without(self, other: LinkMask) -> LinkMask {
        LinkMask(self.0 & !other.0)
    }

    /// Iterate set links in ascending order
    pub fn iter(&self) -> LinkIter {
        LinkIter(self.0)
    }
}

impl fmt::Debug for LinkMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinkMask({:#x})", self.0)
    }
}

impl fmt::Display for LinkMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

impl FromIterator<LinkId> for LinkMask {
    fn from_iter<I: IntoIterator<Item = LinkId>>(iter: I) -> Self {
        let mut mask = LinkMask::EMPTY;
        for link in iter {
            mask.insert(link);
        }
        mask
    }
}

impl IntoIterator for LinkMask {
    type Item = LinkId;
    type IntoIter = LinkIter;

    fn into_iter(self) -> LinkIter {
        LinkIter(self.0)
    }
}

/// Ascending iterator over a [`LinkMask`]
#[derive(Debug, Clone)]
pub struct LinkIter(u64);

impl Iterator for LinkIter {
    type Item = LinkId;

    fn next(&mut self) -> Option<LinkId> {
        if self.0 == 0 {
            return None;
        }
        let link = self.0.trailing_zeros();
        self.0 &= self.0 - 1;
        Some(link)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for LinkIter {}

// =============================================================================
// REGISTER BLOCKS
// =============================================================================

/// Register address space of one hardware unit.
///
/// Every block is addressed as `(block, instance, offset)`. Per-link
/// blocks take the device-global link as instance; `Npg` takes the NPG
/// index, `Nxbar` the crossbar index, and `Nvlw`, `Nvlipt` and `Minion`
/// the NVLIPT instance. Device singletons use instance 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Block {
    /// System access window: top-level fatal/nonfatal/correctable summaries
    Saw         = 0,
    /// Legacy interrupt summary
    Psmc        = 1,
    /// PCIe endpoint (MSI rearm)
    Xve         = 2,
    /// Host bus: privileged access timeouts
    Pbus        = 3,
    /// Privileged ring master
    PrivMaster  = 4,
    /// Privileged ring system station
    PrivSys     = 5,
    /// Privileged ring FBP station (instance = FBP index)
    PrivPrt     = 6,
    /// Port group summary
    Npg         = 7,
    /// Per-link port control
    Nport       = 8,
    /// Per-link routing
    Route       = 9,
    /// Per-link ingress
    Ingress     = 10,
    /// Per-link egress
    Egress      = 11,
    /// Per-link tag state
    Tstate      = 12,
    /// Per-link source tracking
    Sourcetrack = 13,
    /// Crossbar summary and tile-out units
    Nxbar       = 14,
    /// Per-link crossbar tile
    Tile        = 15,
    /// NVLink wrapper interrupt masks
    Nvlw        = 16,
    /// NVLink IP common
    Nvlipt      = 17,
    /// NVLink IP per-link
    NvliptLnk   = 18,
    /// Per-link data link layer
    Nvldl       = 19,
    /// Per-link transaction layer
    Nvltlc      = 20,
    /// Link management microcontroller
    Minion      = 21,
}

impl Block {
    /// Short name used in logs
    pub const fn name(&self) -> &'static str {
        match self {
            Block::Saw => "SAW",
            Block::Psmc => "PSMC",
            Block::Xve => "XVE",
            Block::Pbus => "PBUS",
            Block::PrivMaster => "PRIV_MASTER",
            Block::PrivSys => "PRIV_SYS",
            Block::PrivPrt => "PRIV_PRT",
            Block::Npg => "NPG",
            Block::Nport => "NPORT",
            Block::Route => "ROUTE",
            Block::Ingress => "INGRESS",
            Block::Egress => "EGRESS",
            Block::Tstate => "TSTATE",
            Block::Sourcetrack => "SOURCETRACK",
            Block::Nxbar => "NXBAR",
            Block::Tile => "TILE",
            Block::Nvlw => "NVLW",
            Block::Nvlipt => "NVLIPT",
            Block::NvliptLnk => "NVLIPT_LNK",
            Block::Nvldl => "NVLDL",
            Block::Nvltlc => "NVLTLC",
            Block::Minion => "MINION",
        }
    }

    /// Whether the block is instanced per link
    pub const fn is_per_link(&self) -> bool {
        matches!(
            self,
            Block::Nport
                | Block::Route
                | Block::Ingress
                | Block::Egress
                | Block::Tstate
                | Block::Sourcetrack
                | Block::Tile
                | Block::NvliptLnk
                | Block::Nvldl
                | Block::Nvltlc
        )
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Register within a per-link block, instance supplied at access time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterAddr {
    /// Address space
    pub block: Block,
    /// Byte offset within one instance
    pub offset: u32,
}

impl RegisterAddr {
    /// Construct a register address
    pub const fn new(block: Block, offset: u32) -> Self {
        Self { block, offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_link_mask_iter_ascending() {
        let mask = LinkMask::from_bits(0b1010_0110);
        let links: Vec<LinkId> = mask.iter().collect();
        assert_eq!(links, [1, 2, 5, 7]);
        assert_eq!(mask.count(), 4);
    }

    #[test]
    fn test_link_mask_bounds() {
        assert!(LinkMask::single(64).is_empty());
        assert!(!LinkMask::single(63).contains(64));
        assert_eq!(LinkMask::first_n(64).bits(), u64::MAX);
        assert_eq!(LinkMask::first_n(3).bits(), 0b111);
    }

    #[test]
    fn test_link_mask_set_ops() {
        let mut mask: LinkMask = [0, 4, 9].into_iter().collect();
        mask.remove(4);
        assert!(mask.contains(9));
        assert!(!mask.contains(4));
        let other = LinkMask::single(9);
        assert_eq!(mask.without(other), LinkMask::single(0));
        assert_eq!(mask.and(other), other);
    }
}
