//! This is an internal module that contains utility functionality used by other modules.

/// Sets or clears a peripheral's clock enable bit on an RCC register.
/// The first argument is `apb2` to specify the reg block. The second is something like
/// `iopa`, the third is a `pac::RCC`, and the fourth `set_bit` or `clear_bit`.
#[cfg(feature = "f1")]
macro_rules! rcc_en_dis {
    (apb2, $periph:ident, $rcc:expr, $bit:ident) => {
        paste::paste! {
            $rcc.apb2enr.modify(|_, w| w.[<$periph en>]().$bit());
        }
    };
}

#[cfg(feature = "f1")]
pub(crate) use rcc_en_dis;
