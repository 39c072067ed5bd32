//! Reconstruction of the 40-bit sensor frame from captured pulse widths.
//!
//! The sensor answers the wake signal with a short high, then an 80 µs low and an
//! 80 µs high. Each data bit that follows is a ~50 µs low separator and a high
//! whose width carries the value: ~26-28 µs for `0`, ~70 µs for `1`. Bits arrive
//! most significant first; the fifth byte is the checksum of the first four.

use crate::error::DecodeError;
use crate::pulse::Observation;
use crate::reading::Reading;

/// Number of payload bits in a frame.
pub const FRAME_BITS: usize = 40;

/// High pulses longer than this many ticks encode a `1`.
pub const BIT_THRESHOLD_TICKS: u8 = 16;

/// Index of the first data-carrying observation. Earlier entries are the
/// sensor's acknowledgment and the first separator.
const FIRST_DATA_INDEX: usize = 4;

/// The five bytes sent by the sensor: humidity, temperature, checksum.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawFrame {
    data: [u8; 5],
}

impl RawFrame {
    /// Packs the data pulses of `observations` into a frame.
    ///
    /// Only even positions from index 4 onwards carry bits. Assembly
    /// stops at the first timeout observation.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InsufficientBits` if fewer than 40 bits were found.
    pub fn assemble(observations: &[Observation]) -> Result<Self, DecodeError> {
        let mut data = [0u8; 5];
        let mut bits = 0;

        for (i, observation) in observations.iter().enumerate() {
            if observation.is_timeout() || bits == FRAME_BITS {
                break;
            }
            if i < FIRST_DATA_INDEX || i % 2 != 0 {
                continue;
            }

            let byte = &mut data[bits / 8];
            *byte <<= 1;
            if observation.duration > BIT_THRESHOLD_TICKS {
                *byte |= 1;
            }
            bits += 1;
        }

        if bits < FRAME_BITS {
            return Err(DecodeError::InsufficientBits);
        }
        Ok(RawFrame { data })
    }

    /// All five bytes as received.
    pub fn bytes(&self) -> [u8; 5] {
        self.data
    }

    /// The checksum byte as received.
    pub fn checksum(&self) -> u8 {
        self.data[4]
    }

    /// Sum of the four payload bytes, modulo 256.
    pub fn computed_checksum(&self) -> u8 {
        self.data[..4].iter().fold(0u8, |sum, v| sum.wrapping_add(*v))
    }

    pub fn is_valid(&self) -> bool {
        self.checksum() == self.computed_checksum()
    }

    #[cfg(test)]
    pub(crate) fn with_checksum(payload: [u8; 4]) -> Self {
        let [a, b, c, d] = payload;
        let mut frame = RawFrame {
            data: [a, b, c, d, 0],
        };
        frame.data[4] = frame.computed_checksum();
        frame
    }
}

/// Decodes one capture into a reading.
///
/// Pure: the same observations always give the same result.
///
/// # Errors
///
/// * `DecodeError::InsufficientBits` if the capture ended before 40 data pulses.
/// * `DecodeError::ChecksumMismatch` if the fifth byte does not match.
pub fn decode(observations: &[Observation]) -> Result<Reading, DecodeError> {
    let frame = RawFrame::assemble(observations)?;
    if !frame.is_valid() {
        return Err(DecodeError::ChecksumMismatch);
    }
    Ok(Reading::from_frame(&frame))
}
