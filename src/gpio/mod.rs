//! This module provides functionality for General Purpose Input and Output (GPIO) ports
//! on STM32F1, where each pin is configured by a 4-bit field in `GPIOx_CRL` (pins 0 - 7)
//! or `GPIOx_CRH` (pins 8 - 15).
//!
//! Pins are addressed as a mask over the 16 pins of a port. Configuration changes are
//! applied to any subset of pins with one read-modify-write per configuration register;
//! see [`engine`]. Every operation takes either a runtime mask (`u16`, or `u8` on a
//! half port) or a [`Pins`] constant, in which case the lane masks are computed at
//! build time:
//!
//! ```ignore
//! PortA::set_configuration(0x0003_u16, Configuration::Output);
//! PortA::set_configuration(Pins::<0x0003>, Configuration::Output);
//! ```
//!
//! # Concurrency
//! `set`, `clear` and `clear_and_set` use the `BSRR` register and are single writes, so
//! they're safe to call from interrupt and main context for disjoint pins. `write`,
//! `toggle`, and every configuration setter are read-modify-write: the caller must
//! prevent concurrent use on the same register (eg with a critical section).

use crate::error::{Error, Result};

pub mod engine;
mod half;
mod null;
mod pin;
mod port;
pub mod regs;

pub use engine::Lanes;
pub use half::{PortHalf, PortHigh, PortLow};
pub use null::{NullHalf, NullPort};
pub use pin::Pin;
pub use port::Port;
pub use regs::{Gpio, Reg, RegisterBlock};

#[cfg(feature = "f1")]
use crate::{pac, rcc::*};
#[cfg(feature = "f1")]
use paste::paste;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// Values for a pin's whole `CNF`/`MODE` field in `GPIOx_CRL` and `GPIOx_CRH`.
pub enum Configuration {
    Analog = 0b0000,
    /// Floating input.
    Input = 0b0100,
    /// Push-pull output, 50 MHz.
    Output = 0b0011,
    /// Alternate function push-pull, 50 MHz.
    AltFn = 0b1011,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// Values for `MODE`: the output slew rate. Only meaningful for output and alternate
/// function pins; `MODE` = 0 is what makes a pin an input.
pub enum OutputSpeed {
    /// 2 MHz.
    Low = 0b10,
    /// 10 MHz.
    Medium = 0b01,
    /// 50 MHz.
    High = 0b11,
}

impl OutputSpeed {
    /// Bits of a pin's field owned by the speed.
    pub const FIELD: u8 = 0b0011;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// Values for `CNF0`, when the pin is an output.
pub enum OutputType {
    PushPull = 0,
    OpenDrain = 0b0100,
}

impl OutputType {
    /// Bits of a pin's field owned by the output type.
    pub const FIELD: u8 = 0b0100;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// Internal pull resistor: Pull up, pull down, or floating.
///
/// Bits 0 - 3 are the `CNF` code for an input pin. On this family the pull direction
/// isn't in `CRL`/`CRH`: it's the pin's `ODR` bit, 1 for pull-up and 0 for pull-down
/// (RM0008 table 20). Bit 4 carries that `ODR` value.
pub enum Pull {
    Floating = 0b0_0100,
    Up = 0b1_1000,
    Dn = 0b0_1000,
}

impl Pull {
    /// Bits of a pin's field owned by the pull setting: both `CNF` bits, since a
    /// pulled input is `CNF` = 0b10 and a floating one 0b01.
    pub const FIELD: u8 = 0b1100;

    const ODR_HIGH: u8 = 0b1_0000;

    /// `CNF` bits, positioned within the pin's field.
    pub const fn cnf(self) -> u8 {
        self as u8 & Self::FIELD
    }

    /// Whether the pin's `ODR` bit must be set to select this pull.
    pub const fn odr_high(self) -> bool {
        self as u8 & Self::ODR_HIGH != 0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// Pin number; 0 through 15. For example, use 5 for PA5 or PB5.
pub enum PinNum {
    P0,
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
    P7,
    P8,
    P9,
    P10,
    P11,
    P12,
    P13,
    P14,
    P15,
}

impl PinNum {
    /// Port mask selecting only this pin.
    pub const fn mask(self) -> u16 {
        1 << self as u8
    }
}

impl TryFrom<u8> for PinNum {
    type Error = Error;

    fn try_from(pin: u8) -> Result<Self> {
        Ok(match pin {
            0 => Self::P0,
            1 => Self::P1,
            2 => Self::P2,
            3 => Self::P3,
            4 => Self::P4,
            5 => Self::P5,
            6 => Self::P6,
            7 => Self::P7,
            8 => Self::P8,
            9 => Self::P9,
            10 => Self::P10,
            11 => Self::P11,
            12 => Self::P12,
            13 => Self::P13,
            14 => Self::P14,
            15 => Self::P15,
            _ => return Err(Error::InvalidPin(pin)),
        })
    }
}

/// A set of pins, as accepted by port operations. `T` is the port's data width: `u16`
/// for a full port, `u8` for a half port.
///
/// Implemented by plain masks, whose lanes are expanded at runtime, and by [`Pins`],
/// whose lanes are constants.
pub trait PinSelection<T>: Copy {
    /// The selection as a data-register mask.
    fn bits(self) -> T;

    /// The selection expanded to configuration register lanes.
    fn lanes(self) -> Lanes;
}

/// Bits above 15 can't be expressed; a selection is always a valid port mask.
impl PinSelection<u16> for u16 {
    #[inline(always)]
    fn bits(self) -> u16 {
        self
    }

    #[inline(always)]
    fn lanes(self) -> Lanes {
        Lanes::from_mask(self)
    }
}

impl PinSelection<u8> for u8 {
    #[inline(always)]
    fn bits(self) -> u8 {
        self
    }

    #[inline(always)]
    fn lanes(self) -> Lanes {
        Lanes::from_half(self)
    }
}

impl PinSelection<u16> for PinNum {
    #[inline(always)]
    fn bits(self) -> u16 {
        self.mask()
    }

    #[inline(always)]
    fn lanes(self) -> Lanes {
        Lanes::from_mask(self.mask())
    }
}

/// A pin mask fixed at build time. The lane expansion is an associated constant, so
/// configuring through `Pins` costs no more than writing precomputed masks.
///
/// On a half port, `MASK` is relative to the half and must fit in 8 bits; a wider
/// mask fails the build.
///
/// ```
/// use stm32f1_ioports::gpio::{PinSelection, Pins};
///
/// assert_eq!(<Pins<0x0081> as PinSelection<u8>>::bits(Pins), 0x81);
/// assert_eq!(<Pins<0x0100> as PinSelection<u16>>::bits(Pins), 0x0100);
/// ```
///
/// ```compile_fail
/// use stm32f1_ioports::gpio::{PinSelection, Pins};
///
/// let _ = <Pins<0x0100> as PinSelection<u8>>::lanes(Pins);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Pins<const MASK: u16>;

impl<const MASK: u16> Pins<MASK> {
    pub const LANES: Lanes = Lanes::from_mask(MASK);

    const HALF_LANES: Lanes = {
        assert!(MASK <= 0xff, "half-port mask selects pins outside the half");
        Lanes::from_half(MASK as u8)
    };
}

impl<const MASK: u16> PinSelection<u16> for Pins<MASK> {
    #[inline(always)]
    fn bits(self) -> u16 {
        MASK
    }

    #[inline(always)]
    fn lanes(self) -> Lanes {
        Self::LANES
    }
}

impl<const MASK: u16> PinSelection<u8> for Pins<MASK> {
    #[inline(always)]
    fn bits(self) -> u8 {
        let _ = Self::HALF_LANES;
        MASK as u8
    }

    #[inline(always)]
    fn lanes(self) -> Lanes {
        Self::HALF_LANES
    }
}

/// Operations common to every port variant: a full 16-pin port, either half of one,
/// or the do-nothing [`NullPort`]. Generic code written against `IoPort` works with
/// all of them; the variant is chosen by the port type, at compile time.
///
/// All functions are associated functions: ports are zero-sized and bound to fixed
/// registers, so there's no instance to pass around.
pub trait IoPort {
    /// Data word, and pin mask width.
    type Data: Copy;

    /// Port identifier; `'A'` for GPIOA etc.
    const ID: char;

    /// Enable the port's bus clock.
    fn enable();

    /// Disable the port's bus clock.
    fn disable();

    /// Read the output data register.
    fn read() -> Self::Data;

    /// Read the input data register; the physical pin levels.
    fn pin_read() -> Self::Data;

    /// Overwrite the output data register.
    fn write(value: Self::Data);

    /// Set output bits. Atomic.
    fn set<M: PinSelection<Self::Data>>(mask: M);

    /// Clear output bits. Atomic.
    fn clear<M: PinSelection<Self::Data>>(mask: M);

    /// Clear, then set output bits, in one atomic write. If a pin is in both masks, it
    /// ends up set.
    fn clear_and_set<C, S>(clear: C, set: S)
    where
        C: PinSelection<Self::Data>,
        S: PinSelection<Self::Data>;

    /// Invert output bits. This reads and writes `ODR`, so it isn't atomic with
    /// respect to `write`, `set` or `clear` from another context.
    fn toggle<M: PinSelection<Self::Data>>(mask: M);

    /// Set the whole configuration field of the selected pins.
    fn set_configuration<M: PinSelection<Self::Data>>(mask: M, config: Configuration);

    /// Set the configuration of one pin, selected at compile time. An index outside
    /// the port fails the build.
    ///
    /// ```
    /// use stm32f1_ioports::gpio::{Configuration, IoPort, NullHalf, NullPort};
    ///
    /// NullPort::set_pin_configuration::<15>(Configuration::Output);
    /// NullHalf::set_pin_configuration::<7>(Configuration::Output);
    /// ```
    ///
    /// ```compile_fail
    /// use stm32f1_ioports::gpio::{Configuration, IoPort, NullPort};
    ///
    /// NullPort::set_pin_configuration::<16>(Configuration::Output);
    /// ```
    ///
    /// Half ports count from 0 within the half:
    ///
    /// ```compile_fail
    /// use stm32f1_ioports::gpio::{Configuration, IoPort, NullHalf};
    ///
    /// NullHalf::set_pin_configuration::<8>(Configuration::Output);
    /// ```
    fn set_pin_configuration<const PIN: u8>(config: Configuration);

    /// Set the output speed, leaving the rest of each pin's field alone.
    fn set_speed<M: PinSelection<Self::Data>>(mask: M, speed: OutputSpeed);

    /// Set the internal pull resistor. Writes the `CNF` bits first, then sets or
    /// clears the pins' `ODR` bits to pick the direction.
    fn set_pull_up<M: PinSelection<Self::Data>>(mask: M, pull: Pull);

    /// Set push-pull or open-drain, leaving the rest of each pin's field alone.
    fn set_driver_type<M: PinSelection<Self::Data>>(mask: M, driver: OutputType);

    /// Select an alternate function number. On F1, peripherals are routed with AFIO
    /// remapping rather than per-pin function numbers, so there's nothing to do here;
    /// it exists so code shared with other families compiles unchanged.
    #[inline(always)]
    fn set_alt_func_number<M: PinSelection<Self::Data>>(_mask: M, _number: u8) {}

    /// Lock the configuration of the selected pins until the next reset. The key
    /// sequence must not be interrupted by other `LCKR` writes.
    ///
    /// The lock register is shared by the whole port and only the first sequence after
    /// reset takes effect, so lock every pin that needs it in one call; this includes
    /// both halves of a split port. A later call returns `Error::LockFailed` unless all
    /// of its pins were already locked.
    fn lock<M: PinSelection<Self::Data>>(mask: M) -> Result<()>;
}

#[cfg(feature = "f1")]
macro_rules! make_port {
    ($Port:ident, $id:literal) => {
        paste! {
            /// Registers of a GPIO port.
            pub struct [<Gpio $Port>];

            unsafe impl Gpio for [<Gpio $Port>] {
                const ID: char = $id;

                #[inline(always)]
                fn ptr() -> *const RegisterBlock {
                    pac::[<GPIO $Port>]::ptr() as *const RegisterBlock
                }
            }

            pub type [<Port $Port>] = Port<[<Gpio $Port>], [<Gpio $Port Clock>]>;
            pub type [<Port $Port L>] = PortLow<[<Gpio $Port>], [<Gpio $Port Clock>]>;
            pub type [<Port $Port H>] = PortHigh<[<Gpio $Port>], [<Gpio $Port Clock>]>;
        }
    };
}

/// Stand-ins for ports the selected package doesn't bond out, so code can address them
/// uniformly.
#[cfg(all(feature = "f1", not(gpio_fg)))]
macro_rules! make_null_port {
    ($Port:ident) => {
        paste! {
            pub type [<Port $Port>] = NullPort;
            pub type [<Port $Port L>] = NullHalf;
            pub type [<Port $Port H>] = NullHalf;
        }
    };
}

#[cfg(feature = "f1")]
make_port!(A, 'A');
#[cfg(feature = "f1")]
make_port!(B, 'B');
#[cfg(feature = "f1")]
make_port!(C, 'C');
#[cfg(feature = "f1")]
make_port!(D, 'D');

#[cfg(all(feature = "f1", gpio_e))]
make_port!(E, 'E');
#[cfg(all(feature = "f1", not(gpio_e)))]
make_null_port!(E);

#[cfg(all(feature = "f1", gpio_fg))]
make_port!(F, 'F');
#[cfg(all(feature = "f1", gpio_fg))]
make_port!(G, 'G');
#[cfg(all(feature = "f1", not(gpio_fg)))]
make_null_port!(F);
#[cfg(all(feature = "f1", not(gpio_fg)))]
make_null_port!(G);
