//! Common error definitions.

/// Alias for Result<T, Error>.
pub type Result<T> = core::result::Result<T, Error>;

/// Collection of all errors that can occur.
///
/// Mask-based port operations are infallible; a bit outside the port simply has no
/// effect. Errors only come from runtime pin numbers and the configuration lock.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A runtime pin number outside 0 - 15.
    InvalidPin(u8),
    /// The `GPIOx_LCKR` key sequence didn't read back `LCKK` set; the configuration
    /// is not locked. Usually the sequence was interrupted by another write.
    LockFailed,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidPin(pin) => write!(f, "pin {pin} is out of range"),
            Self::LockFailed => f.write_str("port configuration lock failed"),
        }
    }
}

impl core::error::Error for Error {}
