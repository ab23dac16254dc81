//! Half ports: pins 0 - 7 or 8 - 15 of a port, addressed as an 8-pin unit backed by a
//! single configuration register. Masks and pin indices are relative to the half, so
//! bit 0 of a `PortHigh` mask is pin 8.

use core::marker::PhantomData;

use super::{
    Configuration, Gpio, IoPort, OutputSpeed, OutputType, PinSelection, Pull,
    engine::FULL_LANE,
    port::{lock_sequence, merge_into, write_lane},
    regs::{Reg, RegisterBlock},
};
use crate::{error::Result, rcc::ClockGate};

/// One half of a port. `H` selects the high half (`CRH`, pins 8 - 15).
pub struct PortHalf<R, C, const H: bool> {
    _regs: PhantomData<R>,
    _clock: PhantomData<C>,
}

/// Pins 0 - 7, configured through `CRL`.
pub type PortLow<R, C> = PortHalf<R, C, false>;

/// Pins 8 - 15, configured through `CRH`.
pub type PortHigh<R, C> = PortHalf<R, C, true>;

impl<R: Gpio, C: ClockGate, const H: bool> PortHalf<R, C, H> {
    /// Position of the half within the data registers.
    const SHIFT: u32 = if H { 8 } else { 0 };

    #[inline(always)]
    fn config_reg(regs: &RegisterBlock) -> &Reg {
        if H { &regs.crh } else { &regs.crl }
    }

    #[inline(always)]
    fn port_bits<M: PinSelection<u8>>(mask: M) -> u32 {
        (mask.bits() as u32) << Self::SHIFT
    }

    #[inline(always)]
    fn apply<M: PinSelection<u8>>(mask: M, field: u8, value: u8) {
        merge_into(Self::config_reg(R::regs()), mask.lanes().low, field, value);
    }
}

impl<R: Gpio, C: ClockGate, const H: bool> IoPort for PortHalf<R, C, H> {
    type Data = u8;

    const ID: char = R::ID;

    fn enable() {
        C::enable();
    }

    fn disable() {
        C::disable();
    }

    #[inline(always)]
    fn read() -> u8 {
        (R::regs().odr.read() >> Self::SHIFT) as u8
    }

    #[inline(always)]
    fn pin_read() -> u8 {
        (R::regs().idr.read() >> Self::SHIFT) as u8
    }

    /// Only this half's output bits are written; the other half is untouched. This
    /// goes through `BSRR`, so unlike the full port's `write` it's a single atomic
    /// access.
    #[inline(always)]
    fn write(value: u8) {
        let set = (value as u32) << Self::SHIFT;
        let clear = (!value as u32 & 0xff) << Self::SHIFT;
        R::regs().bsrr.write(set | clear << 16);
    }

    #[inline(always)]
    fn set<M: PinSelection<u8>>(mask: M) {
        R::regs().bsrr.write(Self::port_bits(mask));
    }

    #[inline(always)]
    fn clear<M: PinSelection<u8>>(mask: M) {
        R::regs().bsrr.write(Self::port_bits(mask) << 16);
    }

    #[inline(always)]
    fn clear_and_set<Cl, S>(clear: Cl, set: S)
    where
        Cl: PinSelection<u8>,
        S: PinSelection<u8>,
    {
        R::regs()
            .bsrr
            .write(Self::port_bits(set) | Self::port_bits(clear) << 16);
    }

    #[inline(always)]
    fn toggle<M: PinSelection<u8>>(mask: M) {
        R::regs().odr.modify(|r| r ^ Self::port_bits(mask));
    }

    #[inline(always)]
    fn set_configuration<M: PinSelection<u8>>(mask: M, config: Configuration) {
        Self::apply(mask, FULL_LANE, config as u8);
    }

    #[inline(always)]
    fn set_pin_configuration<const PIN: u8>(config: Configuration) {
        const { assert!(PIN < 8, "pin index outside the half port") };

        write_lane(Self::config_reg(R::regs()), PIN, config);
    }

    #[inline(always)]
    fn set_speed<M: PinSelection<u8>>(mask: M, speed: OutputSpeed) {
        Self::apply(mask, OutputSpeed::FIELD, speed as u8);
    }

    #[inline(always)]
    fn set_pull_up<M: PinSelection<u8>>(mask: M, pull: Pull) {
        Self::apply(mask, Pull::FIELD, pull.cnf());

        if pull.odr_high() {
            Self::set(mask);
        } else {
            Self::clear(mask);
        }
    }

    #[inline(always)]
    fn set_driver_type<M: PinSelection<u8>>(mask: M, driver: OutputType) {
        Self::apply(mask, OutputType::FIELD, driver as u8);
    }

    fn lock<M: PinSelection<u8>>(mask: M) -> Result<()> {
        lock_sequence(&R::regs().lckr, Self::port_bits(mask))
    }
}
