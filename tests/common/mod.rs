//! In-memory stand-ins for port hardware.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};

use stm32f1_ioports::gpio::RegisterBlock;

/// Defines a register view backed by its own `static` block, so tests don't share state.
macro_rules! mock_gpio {
    ($name:ident, $id:literal) => {
        struct $name;

        unsafe impl stm32f1_ioports::gpio::Gpio for $name {
            const ID: char = $id;

            fn ptr() -> *const stm32f1_ioports::gpio::RegisterBlock {
                static BLOCK: $crate::common::StaticBlock = $crate::common::StaticBlock::new();
                &BLOCK.0
            }
        }
    };
}

/// Defines a clock gate that counts how often it was switched.
macro_rules! mock_clock {
    ($name:ident) => {
        struct $name;

        impl $name {
            fn counters() -> &'static $crate::common::ClockCounters {
                static COUNTERS: $crate::common::ClockCounters = $crate::common::ClockCounters::new();
                &COUNTERS
            }
        }

        impl stm32f1_ioports::rcc::ClockGate for $name {
            fn enable() {
                Self::counters().enabled();
            }

            fn disable() {
                Self::counters().disabled();
            }
        }
    };
}

pub(crate) use {mock_clock, mock_gpio};

/// Register block that can live in a `static`. Each one belongs to a single test.
pub struct StaticBlock(pub RegisterBlock);

unsafe impl Sync for StaticBlock {}

impl StaticBlock {
    pub const fn new() -> Self {
        Self(RegisterBlock::new())
    }
}

pub struct ClockCounters {
    enables: AtomicU32,
    disables: AtomicU32,
}

impl ClockCounters {
    pub const fn new() -> Self {
        Self {
            enables: AtomicU32::new(0),
            disables: AtomicU32::new(0),
        }
    }

    pub fn enabled(&self) {
        self.enables.fetch_add(1, Ordering::Relaxed);
    }

    pub fn disabled(&self) {
        self.disables.fetch_add(1, Ordering::Relaxed);
    }

    pub fn enables(&self) -> u32 {
        self.enables.load(Ordering::Relaxed)
    }

    pub fn disables(&self) -> u32 {
        self.disables.load(Ordering::Relaxed)
    }
}

/// Applies the last `BSRR` write to `ODR` the way the hardware does: reset half first,
/// then set half, so a pin in both ends up set.
pub fn latch(regs: &RegisterBlock) {
    let bsrr = regs.bsrr.read();
    regs.odr
        .modify(|odr| ((odr & !(bsrr >> 16)) | (bsrr & 0xffff)) & 0xffff);
    regs.bsrr.write(0);
}
