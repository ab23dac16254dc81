//! Single-pin handle over a port, with `embedded-hal` implementations.

use core::marker::PhantomData;

#[cfg(feature = "embedded_hal")]
use core::convert::Infallible;

#[cfg(feature = "embedded_hal")]
use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use super::{Configuration, IoPort, OutputSpeed, OutputType, Pull};

/// Represents a single GPIO pin: pin `N` of port `P`. Zero-sized.
///
/// Each method is one port operation with a one-bit mask, so the same concurrency
/// rules apply: `set_high` / `set_low` are atomic, configuration changes are not.
///
/// `N` must name a pin of the port:
///
/// ```
/// use stm32f1_ioports::gpio::{NullPort, Pin};
///
/// let mut pin = Pin::<NullPort, 15>::new();
/// pin.set_high();
/// ```
///
/// ```compile_fail
/// use stm32f1_ioports::gpio::{NullPort, Pin};
///
/// let _pin = Pin::<NullPort, 16>::new();
/// ```
pub struct Pin<P, const N: u8> {
    _port: PhantomData<P>,
}

impl<P: IoPort<Data = u16>, const N: u8> Pin<P, N> {
    const MASK: u16 = {
        assert!(N < 16, "pin index out of range");
        1 << N
    };

    pub const fn new() -> Self {
        let _ = Self::MASK;
        Self { _port: PhantomData }
    }

    /// Set the pin's whole configuration field.
    pub fn configure(&mut self, config: Configuration) {
        P::set_pin_configuration::<N>(config);
    }

    /// Set output type
    pub fn output_type(&mut self, value: OutputType) {
        P::set_driver_type(Self::MASK, value);
    }

    /// Set output speed.
    pub fn output_speed(&mut self, value: OutputSpeed) {
        P::set_speed(Self::MASK, value);
    }

    /// Set internal pull up/down resistor, or leave floating.
    pub fn pull(&mut self, value: Pull) {
        P::set_pull_up(Self::MASK, value);
    }

    pub fn set_high(&mut self) {
        P::set(Self::MASK);
    }

    pub fn set_low(&mut self) {
        P::clear(Self::MASK);
    }

    pub fn toggle(&mut self) {
        P::toggle(Self::MASK);
    }

    /// Level on the pin, from `IDR`.
    pub fn is_high(&self) -> bool {
        P::pin_read() & Self::MASK != 0
    }

    pub fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Level the pin is driven to, from `ODR`.
    pub fn is_set_high(&self) -> bool {
        P::read() & Self::MASK != 0
    }

    pub fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

impl<P: IoPort<Data = u16>, const N: u8> Default for Pin<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "embedded_hal")]
impl<P: IoPort<Data = u16>, const N: u8> ErrorType for Pin<P, N> {
    type Error = Infallible;
}

#[cfg(feature = "embedded_hal")]
impl<P: IoPort<Data = u16>, const N: u8> OutputPin for Pin<P, N> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Pin::set_low(self);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Pin::set_high(self);
        Ok(())
    }
}

#[cfg(feature = "embedded_hal")]
impl<P: IoPort<Data = u16>, const N: u8> StatefulOutputPin for Pin<P, N> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(Pin::is_set_high(self))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(Pin::is_set_low(self))
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        Pin::toggle(self);
        Ok(())
    }
}

#[cfg(feature = "embedded_hal")]
impl<P: IoPort<Data = u16>, const N: u8> InputPin for Pin<P, N> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(Pin::is_high(self))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(Pin::is_low(self))
    }
}
