//! Register view of a GPIO port. No logic lives here; it only resolves a port to its
//! registers and performs volatile accesses.

use vcell::VolatileCell;

/// Reset value of `GPIOx_CRL` and `GPIOx_CRH`: every pin a floating input.
pub const CR_RESET: u32 = 0x4444_4444;

/// `GPIOx_LCKR` lock key bit.
pub const LCKK: u32 = 1 << 16;

/// A single 32-bit memory-mapped register.
#[repr(transparent)]
pub struct Reg {
    cell: VolatileCell<u32>,
}

impl Reg {
    pub const fn new(value: u32) -> Self {
        Self {
            cell: VolatileCell::new(value),
        }
    }

    #[inline(always)]
    pub fn read(&self) -> u32 {
        self.cell.get()
    }

    #[inline(always)]
    pub fn write(&self, value: u32) {
        self.cell.set(value)
    }

    /// Read, transform, write back. Not atomic.
    #[inline(always)]
    pub fn modify(&self, f: impl FnOnce(u32) -> u32) {
        self.write(f(self.read()));
    }
}

/// GPIO register block, as laid out in RM0008 section 9.5.
#[repr(C)]
pub struct RegisterBlock {
    /// Configuration register low; pins 0 - 7.
    pub crl: Reg,
    /// Configuration register high; pins 8 - 15.
    pub crh: Reg,
    /// Input data.
    pub idr: Reg,
    /// Output data.
    pub odr: Reg,
    /// Bit set (low half) / reset (high half).
    pub bsrr: Reg,
    /// Bit reset.
    pub brr: Reg,
    /// Configuration lock.
    pub lckr: Reg,
}

impl RegisterBlock {
    /// A block holding the reset values. Useful for backing a port with ordinary memory.
    pub const fn new() -> Self {
        Self {
            crl: Reg::new(CR_RESET),
            crh: Reg::new(CR_RESET),
            idr: Reg::new(0),
            odr: Reg::new(0),
            bsrr: Reg::new(0),
            brr: Reg::new(0),
            lckr: Reg::new(0),
        }
    }
}

impl Default for RegisterBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Binds a zero-sized type to one port's register block.
///
/// # Safety
/// `ptr()` must point to a `RegisterBlock` that is valid for the life of the program:
/// either the peripheral itself, or a `static` standing in for it.
pub unsafe trait Gpio {
    /// Port identifier, eg `'A'`.
    const ID: char;

    fn ptr() -> *const RegisterBlock;

    #[inline(always)]
    fn regs() -> &'static RegisterBlock {
        // NOTE(unsafe) guaranteed valid by the trait's contract.
        unsafe { &*Self::ptr() }
    }
}
