//! Bus clock gating for GPIO ports. On F1, every port sits on APB2 and is gated by an
//! `IOPxEN` bit in `RCC_APB2ENR`.

/// Enables and disables a peripheral's bus clock. Ports only forward to this; they keep
/// no record of whether the clock is on.
pub trait ClockGate {
    /// Turn the peripheral's bus clock on.
    fn enable();

    /// Turn the peripheral's bus clock off.
    fn disable();
}

#[cfg(feature = "f1")]
macro_rules! make_clock_gate {
    ($Port:ident, $port:ident, $id:literal) => {
        paste::paste! {
            /// Bus clock gate of a GPIO port.
            pub struct [<Gpio $Port Clock>];

            impl ClockGate for [<Gpio $Port Clock>] {
                fn enable() {
                    // `APB2ENR` is shared with other peripherals' gates.
                    cortex_m::interrupt::free(|_| {
                        let rcc = unsafe { &(*crate::pac::RCC::ptr()) };
                        crate::util::rcc_en_dis!(apb2, [<iop $port>], rcc, set_bit);
                    });
                    #[cfg(feature = "defmt")]
                    defmt::trace!("GPIO{} clock enabled", $id);
                }

                fn disable() {
                    cortex_m::interrupt::free(|_| {
                        let rcc = unsafe { &(*crate::pac::RCC::ptr()) };
                        crate::util::rcc_en_dis!(apb2, [<iop $port>], rcc, clear_bit);
                    });
                    #[cfg(feature = "defmt")]
                    defmt::trace!("GPIO{} clock disabled", $id);
                }
            }
        }
    };
}

#[cfg(feature = "f1")]
make_clock_gate!(A, a, 'A');
#[cfg(feature = "f1")]
make_clock_gate!(B, b, 'B');
#[cfg(feature = "f1")]
make_clock_gate!(C, c, 'C');
#[cfg(feature = "f1")]
make_clock_gate!(D, d, 'D');
#[cfg(all(feature = "f1", gpio_e))]
make_clock_gate!(E, e, 'E');
#[cfg(all(feature = "f1", gpio_fg))]
make_clock_gate!(F, f, 'F');
#[cfg(all(feature = "f1", gpio_fg))]
make_clock_gate!(G, g, 'G');
