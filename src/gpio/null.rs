use super::{Configuration, IoPort, OutputSpeed, OutputType, PinSelection, Pull};
use crate::error::Result;

macro_rules! make_null {
    ($(#[$meta:meta])* $Name:ident, $data:ty, $pins:literal, $msg:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $Name;

        impl IoPort for $Name {
            type Data = $data;

            const ID: char = '-';

            fn enable() {}

            fn disable() {}

            fn read() -> $data {
                0
            }

            fn pin_read() -> $data {
                0
            }

            fn write(_value: $data) {}

            fn set<M: PinSelection<$data>>(_mask: M) {}

            fn clear<M: PinSelection<$data>>(_mask: M) {}

            fn clear_and_set<C, S>(_clear: C, _set: S)
            where
                C: PinSelection<$data>,
                S: PinSelection<$data>,
            {
            }

            fn toggle<M: PinSelection<$data>>(_mask: M) {}

            fn set_configuration<M: PinSelection<$data>>(_mask: M, _config: Configuration) {}

            fn set_pin_configuration<const PIN: u8>(_config: Configuration) {
                const { assert!(PIN < $pins, $msg) };
            }

            fn set_speed<M: PinSelection<$data>>(_mask: M, _speed: OutputSpeed) {}

            fn set_pull_up<M: PinSelection<$data>>(_mask: M, _pull: Pull) {}

            fn set_driver_type<M: PinSelection<$data>>(_mask: M, _driver: OutputType) {}

            fn lock<M: PinSelection<$data>>(_mask: M) -> Result<()> {
                Ok(())
            }
        }
    };
}

make_null!(
    /// A port that doesn't exist on this chip. Every operation does nothing and reads
    /// return 0, so code written against "port N" needn't special-case missing ports.
    NullPort,
    u16,
    16,
    "pin index out of range"
);

make_null!(
    /// Stand-in for either half of a missing port; the 8-pin counterpart of
    /// [`NullPort`], accepting the same masks and pin indices as a real half.
    NullHalf,
    u8,
    8,
    "pin index outside the half port"
);
