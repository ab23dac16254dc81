//! Mask-based GPIO port access for STM32F1.
//!
//! A port is a zero-sized type bound to a register block; all operations are associated
//! functions on the [`gpio::IoPort`] trait. Pin configuration for any subset of a port's
//! 16 pins is applied with one masked write per configuration register, see
//! [`gpio::engine`].
//!
//! Select the chip with one of the `f100`, `f101`, `f103`, `f105` or `f107` features, and
//! the package with `pins_100` / `pins_144`, to get `PortA` .. `PortG`. Without a chip
//! feature, ports can still be built over any [`gpio::Gpio`] register view.

#![cfg_attr(not(test), no_std)]

cfg_if::cfg_if! {
    if #[cfg(feature = "f100")] {
        pub use stm32f1::stm32f100 as pac;
    } else if #[cfg(feature = "f101")] {
        pub use stm32f1::stm32f101 as pac;
    } else if #[cfg(feature = "f103")] {
        pub use stm32f1::stm32f103 as pac;
    } else if #[cfg(any(feature = "f105", feature = "f107"))] {
        // F105 and F107 share the connectivity-line SVD.
        pub use stm32f1::stm32f107 as pac;
    }
}

pub mod error;
pub mod gpio;
pub mod rcc;
mod util;

pub use error::{Error, Result};
