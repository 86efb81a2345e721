//! # Register Access
//!
//! Every register is addressed as `(block, instance, offset)`. The fault
//! subsystem talks to hardware only through [`RegisterIo`], which lets
//! tests substitute a register file for BAR0.

use core::ptr::NonNull;

use nvswitch_core::{Block, RegisterAddr};

/// Value returned for reads that do not decode to a register
pub const BAD_READ: u32 = 0xFFFF_FFFF;

// =============================================================================
// REGISTER IO TRAIT
// =============================================================================

/// 32-bit register access
pub trait RegisterIo: Sync {
    /// Read a register
    fn read32(&self, block: Block, instance: u32, offset: u32) -> u32;

    /// Write a register
    fn write32(&self, block: Block, instance: u32, offset: u32, value: u32);

    /// Read-modify-write: clear `clear`, then set `set`; returns the new value
    fn modify32(&self, block: Block, instance: u32, offset: u32, clear: u32, set: u32) -> u32 {
        let value = (self.read32(block, instance, offset) & !clear) | set;
        self.write32(block, instance, offset, value);
        value
    }

    /// Read through a [`RegisterAddr`]
    fn read_reg(&self, reg: RegisterAddr, instance: u32) -> u32 {
        self.read32(reg.block, instance, reg.offset)
    }

    /// Write through a [`RegisterAddr`]
    fn write_reg(&self, reg: RegisterAddr, instance: u32, value: u32) {
        self.write32(reg.block, instance, reg.offset, value);
    }
}

// =============================================================================
// MMIO DEVICE
// =============================================================================

/// Placement of one block's instances in BAR0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockWindow {
    /// Block served by this window
    pub block: Block,
    /// Byte offset of instance 0
    pub base: u32,
    /// Distance between consecutive instances
    pub stride: u32,
    /// Number of instances
    pub count: u32,
    /// Bytes decoded per instance
    pub size: u32,
}

impl BlockWindow {
    /// Byte offset of `(instance, offset)` within BAR0
    pub const fn locate(&self, instance: u32, offset: u32) -> Option<u32> {
        if instance >= self.count || offset >= self.size || offset % 4 != 0 {
            return None;
        }
        Some(self.base + instance * self.stride + offset)
    }
}

/// Volatile BAR0 access through a block window table
#[derive(Debug)]
pub struct MmioDevice {
    base: NonNull<u32>,
    len: usize,
    windows: &'static [BlockWindow],
}

// SAFETY: MMIO accesses are single volatile loads and stores; the
// hardware serializes them.
unsafe impl Send for MmioDevice {}
// SAFETY: see above; no Rust-visible state is mutated through &self.
unsafe impl Sync for MmioDevice {}

impl MmioDevice {
    /// Wrap a mapped BAR0
    ///
    /// # Safety
    /// - `base` must map `len` bytes of device registers for the lifetime
    ///   of the returned value
    /// - every window in `windows` must lie inside `len`
    pub unsafe fn new(base: NonNull<u32>, len: usize, windows: &'static [BlockWindow]) -> Self {
        Self { base, len, windows }
    }

    fn address(&self, block: Block, instance: u32, offset: u32) -> Option<*mut u32> {
        let window = self.windows.iter().find(|w| w.block == block)?;
        let byte = window.locate(instance, offset)? as usize;
        if byte + 4 > self.len {
            return None;
        }
        // SAFETY: byte is in bounds and 4-byte aligned
        Some(unsafe { self.base.as_ptr().add(byte / 4) })
    }
}

impl RegisterIo for MmioDevice {
    fn read32(&self, block: Block, instance: u32, offset: u32) -> u32 {
        match self.address(block, instance, offset) {
            // SAFETY: address() only returns mapped, aligned register addresses
            Some(ptr) => unsafe { ptr.read_volatile() },
            None => {
                log::warn!(
                    "nvswitch: read of unmapped register {}[{}] {:#x}",
                    block,
                    instance,
                    offset
                );
                BAD_READ
            }
        }
    }

    fn write32(&self, block: Block, instance: u32, offset: u32, value: u32) {
        match self.address(block, instance, offset) {
            Some(ptr) => {
                #[cfg(feature = "debug")]
                log::trace!("nvswitch: {}[{}] {:#x} <- {:#x}", block, instance, offset, value);
                // SAFETY: address() only returns mapped, aligned register addresses
                unsafe { ptr.write_volatile(value) }
            }
            None => log::warn!(
                "nvswitch: write of unmapped register {}[{}] {:#x} = {:#x}",
                block,
                instance,
                offset,
                value
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    static WINDOWS: [BlockWindow; 2] = [
        BlockWindow {
            block: Block::Route,
            base: 0x100,
            stride: 0x40,
            count: 2,
            size: 0x40,
        },
        BlockWindow {
            block: Block::Saw,
            base: 0x0,
            stride: 0,
            count: 1,
            size: 0x100,
        },
    ];

    #[test]
    fn test_window_locate() {
        let route = WINDOWS[0];
        assert_eq!(route.locate(1, 0x8), Some(0x148));
        assert_eq!(route.locate(2, 0x8), None);
        assert_eq!(route.locate(0, 0x40), None);
        assert_eq!(route.locate(0, 0x2), None);
    }

    #[test]
    fn test_mmio_read_write() {
        let mut bar = vec![0u32; 0x200 / 4];
        let base = NonNull::new(bar.as_mut_ptr()).expect("non-null");
        // SAFETY: the vector outlives the device and covers every window
        let dev = unsafe { MmioDevice::new(base, 0x200, &WINDOWS) };

        dev.write32(Block::Route, 1, 0x4, 0xabcd);
        assert_eq!(dev.read32(Block::Route, 1, 0x4), 0xabcd);
        assert_eq!(dev.read32(Block::Tile, 0, 0), BAD_READ);

        let value = dev.modify32(Block::Saw, 0, 0x10, 0, 0x3);
        assert_eq!(value, 0x3);
        drop(dev);
        assert_eq!(bar[0x144 / 4], 0xabcd);
        assert_eq!(bar[0x10 / 4], 0x3);
    }
}
