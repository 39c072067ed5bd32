use core::fmt;

use thiserror::Error;

/// Reasons an acquisition cycle produced no reading.
///
/// All of these are recoverable: the caller decides whether to wait and retry.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The line never changed state after the wake signal.
    #[error("sensor did not respond")]
    Timeout,
    /// Fewer than 40 data bits were captured.
    #[error("fewer than 40 data bits received")]
    InsufficientBits,
    /// Checksum did not match the received data.
    #[error("checksum mismatch")]
    ChecksumMismatch,
}

/// Possible errors from the DHT driver.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum DhtError<E> {
    /// The captured pulse train did not decode to a valid reading.
    Decode(DecodeError),
    /// Error from the GPIO pin (input/output).
    PinError(E),
}

impl<E> From<DecodeError> for DhtError<E> {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl<E: fmt::Debug> fmt::Display for DhtError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "{e}"),
            Self::PinError(e) => write!(f, "gpio pin error: {e:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for DhtError<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            Self::PinError(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(DecodeError::Timeout.to_string(), "sensor did not respond");
        assert_eq!(
            DhtError::<()>::from(DecodeError::ChecksumMismatch).to_string(),
            "checksum mismatch"
        );
        assert_eq!(
            DhtError::PinError("bus fault").to_string(),
            "gpio pin error: \"bus fault\""
        );
    }
}
