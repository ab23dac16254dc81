mod common;

use common::{latch, mock_clock, mock_gpio};
use stm32f1_ioports::{
    Error,
    gpio::{
        Configuration, Gpio, IoPort, OutputSpeed, OutputType, PinNum, Pins, Port, Pull,
        regs::{CR_RESET, LCKK},
    },
};

#[test]
fn configuration_touches_only_selected_lanes() {
    mock_gpio!(Regs, 'A');
    mock_clock!(Clock);
    type P = Port<Regs, Clock>;

    P::set_configuration(0x0003_u16, Configuration::Output);

    let regs = Regs::regs();
    assert_eq!(regs.crl.read(), 0x4444_4433);
    assert_eq!(regs.crh.read(), CR_RESET);
}

#[test]
fn constant_and_runtime_masks_agree() {
    mock_gpio!(Runtime, 'A');
    mock_gpio!(Constant, 'B');
    mock_clock!(Clock);

    Port::<Runtime, Clock>::set_configuration(0x8421_u16, Configuration::AltFn);
    Port::<Constant, Clock>::set_configuration(Pins::<0x8421>, Configuration::AltFn);

    assert_eq!(Runtime::regs().crl.read(), 0x44b4_444b);
    assert_eq!(Runtime::regs().crh.read(), 0xb444_4b44);
    assert_eq!(Constant::regs().crl.read(), Runtime::regs().crl.read());
    assert_eq!(Constant::regs().crh.read(), Runtime::regs().crh.read());
}

#[test]
fn driver_type_keeps_output_mode() {
    mock_gpio!(Regs, 'A');
    mock_clock!(Clock);
    type P = Port<Regs, Clock>;

    P::set_configuration(0x0101_u16, Configuration::Output);
    P::set_driver_type(0x0101_u16, OutputType::OpenDrain);

    let regs = Regs::regs();
    for reg in [regs.crl.read(), regs.crh.read()] {
        assert_eq!(reg, 0x4444_4447);
        assert_eq!(reg & 0b11, Configuration::Output as u32 & 0b11);
    }

    P::set_driver_type(0x0001_u16, OutputType::PushPull);
    assert_eq!(regs.crl.read(), 0x4444_4443);
    assert_eq!(regs.crh.read(), 0x4444_4447);
}

#[test]
fn speed_keeps_function_bits() {
    mock_gpio!(Regs, 'A');
    mock_clock!(Clock);
    type P = Port<Regs, Clock>;

    P::set_configuration(Pins::<0x0001>, Configuration::AltFn);
    P::set_speed(Pins::<0x0001>, OutputSpeed::Low);
    assert_eq!(Regs::regs().crl.read(), 0x4444_444a);

    P::set_speed(0x0001_u16, OutputSpeed::Medium);
    assert_eq!(Regs::regs().crl.read(), 0x4444_4449);
}

#[test]
fn pull_down_clears_output_bits() {
    mock_gpio!(Regs, 'A');
    mock_clock!(Clock);
    type P = Port<Regs, Clock>;
    let regs = Regs::regs();

    P::write(0xffff);
    P::set_pull_up(0x0003_u16, Pull::Dn);

    assert_eq!(regs.crl.read(), 0x4444_4488);
    assert_eq!(regs.crh.read(), CR_RESET);
    assert_eq!(regs.bsrr.read(), 0x0003 << 16);

    latch(regs);
    assert_eq!(P::read(), 0xfffc);
}

#[test]
fn pull_up_sets_output_bits() {
    mock_gpio!(Regs, 'A');
    mock_clock!(Clock);
    type P = Port<Regs, Clock>;
    let regs = Regs::regs();

    P::set_pull_up(0x0300_u16, Pull::Up);

    assert_eq!(regs.crl.read(), CR_RESET);
    assert_eq!(regs.crh.read(), 0x4444_4488);
    assert_eq!(regs.bsrr.read(), 0x0300);

    latch(regs);
    assert_eq!(P::read(), 0x0300);

    P::set_pull_up(0x0300_u16, Pull::Floating);
    assert_eq!(regs.crh.read(), CR_RESET);
}

#[test]
fn set_then_clear_leaves_other_pins() {
    mock_gpio!(Regs, 'A');
    mock_clock!(Clock);
    type P = Port<Regs, Clock>;
    let regs = Regs::regs();

    P::write(0x0002);

    P::set(0x0001_u16);
    assert_eq!(regs.bsrr.read(), 0x0000_0001);
    latch(regs);
    assert_eq!(P::read(), 0x0003);

    P::clear(0x0001_u16);
    assert_eq!(regs.bsrr.read(), 0x0001_0000);
    latch(regs);
    assert_eq!(P::read(), 0x0002);
}

#[test]
fn clear_and_set_lets_set_win() {
    mock_gpio!(Regs, 'A');
    mock_clock!(Clock);
    type P = Port<Regs, Clock>;
    let regs = Regs::regs();

    P::write(0x00f0);
    P::clear_and_set(0x0011_u16, 0x0001_u16);
    assert_eq!(regs.bsrr.read(), 0x0011_0001);

    latch(regs);
    assert_eq!(P::read(), 0x00e1);
}

#[test]
fn toggle_write_and_reads() {
    mock_gpio!(Regs, 'A');
    mock_clock!(Clock);
    type P = Port<Regs, Clock>;
    let regs = Regs::regs();

    P::write(0x00ff);
    P::toggle(0x0f0f_u16);
    assert_eq!(P::read(), 0x0ff0);
    assert_eq!(regs.odr.read(), 0x0ff0);

    regs.idr.write(0xa5a5);
    assert_eq!(P::pin_read(), 0xa5a5);
    // Output register is separate from the pin levels.
    assert_eq!(P::read(), 0x0ff0);
}

#[test]
fn single_pin_configuration_picks_register() {
    mock_gpio!(Regs, 'A');
    mock_clock!(Clock);
    type P = Port<Regs, Clock>;
    let regs = Regs::regs();

    P::set_pin_configuration::<3>(Configuration::Output);
    assert_eq!(regs.crl.read(), 0x4444_3444);
    assert_eq!(regs.crh.read(), CR_RESET);

    P::set_pin_configuration::<12>(Configuration::AltFn);
    assert_eq!(regs.crh.read(), 0x444b_4444);

    P::set_pin_configuration::<15>(Configuration::Analog);
    assert_eq!(regs.crh.read(), 0x044b_4444);
    assert_eq!(regs.crl.read(), 0x4444_3444);
}

#[test]
fn pin_numbers_select_one_pin() {
    mock_gpio!(Regs, 'A');
    mock_clock!(Clock);
    type P = Port<Regs, Clock>;

    P::set(PinNum::P9);
    assert_eq!(Regs::regs().bsrr.read(), 0x0200);

    P::set_configuration(PinNum::try_from(9_u8).unwrap(), Configuration::Output);
    assert_eq!(Regs::regs().crh.read(), 0x4444_4434);

    assert_eq!(PinNum::try_from(15_u8), Ok(PinNum::P15));
    assert_eq!(PinNum::try_from(16_u8), Err(Error::InvalidPin(16)));
}

#[test]
fn clock_gate_is_forwarded() {
    mock_gpio!(Regs, 'C');
    mock_clock!(Clock);
    type P = Port<Regs, Clock>;

    P::enable();
    P::enable();
    P::disable();

    assert_eq!(Clock::counters().enables(), 2);
    assert_eq!(Clock::counters().disables(), 1);
    assert_eq!(P::ID, 'C');
}

#[test]
fn lock_runs_key_sequence() {
    mock_gpio!(Regs, 'A');
    mock_clock!(Clock);
    type P = Port<Regs, Clock>;

    assert_eq!(P::lock(Pins::<0x00ff>), Ok(()));
    assert_eq!(Regs::regs().lckr.read(), LCKK | 0x00ff);
}

#[test]
fn lock_on_frozen_register_needs_pins_already_locked() {
    mock_gpio!(Regs, 'A');
    mock_clock!(Clock);
    type P = Port<Regs, Clock>;
    let lckr = &Regs::regs().lckr;

    // Pin 0 was locked earlier; the register ignores any further key sequence.
    lckr.write(LCKK | 0x0001);

    assert_eq!(P::lock(0x0002_u16), Err(Error::LockFailed));
    assert_eq!(P::lock(0x0003_u16), Err(Error::LockFailed));
    assert_eq!(lckr.read(), LCKK | 0x0001);

    assert_eq!(P::lock(PinNum::P0), Ok(()));
}

#[test]
fn alt_func_number_is_a_no_op() {
    mock_gpio!(Regs, 'A');
    mock_clock!(Clock);
    type P = Port<Regs, Clock>;
    let regs = Regs::regs();

    P::set_alt_func_number(0xffff_u16, 7);
    assert_eq!(regs.crl.read(), CR_RESET);
    assert_eq!(regs.crh.read(), CR_RESET);
    assert_eq!(regs.bsrr.read(), 0);
}

fn configure_leds<P: IoPort<Data = u16>>() {
    P::set_configuration(Pins::<0x0030>, Configuration::Output);
    P::set_driver_type(Pins::<0x0030>, OutputType::OpenDrain);
    P::clear_and_set(Pins::<0x0010>, Pins::<0x0020>);
}

#[test]
fn generic_code_drives_any_full_port() {
    mock_gpio!(Regs, 'B');
    mock_clock!(Clock);

    configure_leds::<Port<Regs, Clock>>();

    let regs = Regs::regs();
    assert_eq!(regs.crl.read(), 0x4477_4444);
    assert_eq!(regs.bsrr.read(), 0x0010_0020);
}
