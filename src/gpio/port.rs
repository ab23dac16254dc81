//! Full 16-pin port.

use core::marker::PhantomData;

use super::{
    Configuration, Gpio, IoPort, OutputSpeed, OutputType, PinSelection, Pull,
    engine::{FULL_LANE, LANE_WIDTH, Lanes, merge_masked_field},
    regs::{LCKK, Reg},
};
use crate::{error::Result, rcc::ClockGate};

/// Merge `value` into the `field` bits of the selected lanes of a configuration register.
#[inline(always)]
pub(super) fn merge_into(reg: &Reg, lanes: u32, field: u8, value: u8) {
    reg.modify(|r| merge_masked_field(r, lanes, field, value));
}

/// Replace one pin's whole field. `pin` is relative to the register.
#[inline(always)]
pub(super) fn write_lane(reg: &Reg, pin: u8, config: Configuration) {
    let shift = pin as u32 * LANE_WIDTH;
    reg.modify(|r| (r & !((FULL_LANE as u32) << shift)) | ((config as u32) << shift));
}

/// Run the `LCKR` key sequence for `bits`, and check the key and every requested bit
/// read back.
///
/// Once `LCKK` is set, `LCKR` is frozen until reset and the key sequence is ignored, so
/// a port that is already locked only succeeds for pins that are already locked.
pub(super) fn lock_sequence(lckr: &Reg, bits: u32) -> Result<()> {
    let expected = LCKK | bits;

    if lckr.read() & LCKK == 0 {
        lckr.write(expected);
        lckr.write(bits);
        lckr.write(expected);
        let _ = lckr.read();
    }

    if lckr.read() & expected != expected {
        #[cfg(feature = "defmt")]
        defmt::warn!("GPIO configuration lock failed for mask {=u32:#x}", bits);
        return Err(crate::error::Error::LockFailed);
    }
    Ok(())
}

/// A GPIO port: register view `R`, bus clock `C`. Zero-sized; every operation goes
/// straight to the registers.
pub struct Port<R, C> {
    _regs: PhantomData<R>,
    _clock: PhantomData<C>,
}

impl<R: Gpio, C: ClockGate> Port<R, C> {
    /// Apply `value` to the `field` bits of every selected pin. Always exactly one
    /// write to `CRL` and one to `CRH`, however many pins are selected.
    #[inline(always)]
    fn apply(lanes: Lanes, field: u8, value: u8) {
        let regs = R::regs();
        merge_into(&regs.crl, lanes.low, field, value);
        merge_into(&regs.crh, lanes.high, field, value);
    }
}

impl<R: Gpio, C: ClockGate> IoPort for Port<R, C> {
    type Data = u16;

    const ID: char = R::ID;

    fn enable() {
        C::enable();
    }

    fn disable() {
        C::disable();
    }

    #[inline(always)]
    fn read() -> u16 {
        R::regs().odr.read() as u16
    }

    #[inline(always)]
    fn pin_read() -> u16 {
        R::regs().idr.read() as u16
    }

    #[inline(always)]
    fn write(value: u16) {
        R::regs().odr.write(value as u32);
    }

    #[inline(always)]
    fn set<M: PinSelection<u16>>(mask: M) {
        R::regs().bsrr.write(mask.bits() as u32);
    }

    #[inline(always)]
    fn clear<M: PinSelection<u16>>(mask: M) {
        R::regs().bsrr.write((mask.bits() as u32) << 16);
    }

    #[inline(always)]
    fn clear_and_set<Cl, S>(clear: Cl, set: S)
    where
        Cl: PinSelection<u16>,
        S: PinSelection<u16>,
    {
        R::regs()
            .bsrr
            .write(set.bits() as u32 | (clear.bits() as u32) << 16);
    }

    #[inline(always)]
    fn toggle<M: PinSelection<u16>>(mask: M) {
        R::regs().odr.modify(|r| r ^ mask.bits() as u32);
    }

    #[inline(always)]
    fn set_configuration<M: PinSelection<u16>>(mask: M, config: Configuration) {
        Self::apply(mask.lanes(), FULL_LANE, config as u8);
    }

    #[inline(always)]
    fn set_pin_configuration<const PIN: u8>(config: Configuration) {
        const { assert!(PIN < 16, "pin index out of range") };

        let regs = R::regs();
        let reg = if PIN < 8 { &regs.crl } else { &regs.crh };
        write_lane(reg, PIN % 8, config);
    }

    #[inline(always)]
    fn set_speed<M: PinSelection<u16>>(mask: M, speed: OutputSpeed) {
        Self::apply(mask.lanes(), OutputSpeed::FIELD, speed as u8);
    }

    #[inline(always)]
    fn set_pull_up<M: PinSelection<u16>>(mask: M, pull: Pull) {
        Self::apply(mask.lanes(), Pull::FIELD, pull.cnf());

        if pull.odr_high() {
            Self::set(mask);
        } else {
            Self::clear(mask);
        }
    }

    #[inline(always)]
    fn set_driver_type<M: PinSelection<u16>>(mask: M, driver: OutputType) {
        Self::apply(mask.lanes(), OutputType::FIELD, driver as u8);
    }

    fn lock<M: PinSelection<u16>>(mask: M) -> Result<()> {
        lock_sequence(&R::regs().lckr, mask.bits() as u32)
    }
}
