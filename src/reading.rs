use core::fmt;

use crate::frame::RawFrame;

/// Compound humidity above this is treated as the DHT11 whole-percent encoding.
const MAX_HUMIDITY: f32 = 100.0;

/// Compound temperature above this is treated as the DHT11 whole-degree encoding.
const MAX_TEMPERATURE: f32 = 125.0;

/// Reading decoded from a verified sensor frame.
///
/// Only produced by [`decode`](crate::decode) and [`Dht::read`](crate::Dht::read),
/// so every value carries a matching checksum.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    relative_humidity: f32,
    temperature: f32,
    fahrenheit: f32,
}

impl Reading {
    /// Converts the payload bytes of a checked frame.
    ///
    /// DHT22 sends tenths in a 16-bit big-endian field. DHT11 sends whole units in
    /// the high byte with a zero low byte, which reads as an implausibly large
    /// compound value and falls back to the high byte alone.
    pub(crate) fn from_frame(frame: &RawFrame) -> Self {
        let [hum_hi, hum_lo, temp_byte, temp_lo, _] = frame.bytes();

        let joined_humidity = u16::from_be_bytes([hum_hi, hum_lo]);
        let mut relative_humidity = joined_humidity as f32 / 10.0;
        if relative_humidity > MAX_HUMIDITY {
            relative_humidity = hum_hi as f32;
        }

        let is_temp_negative = (temp_byte >> 7) != 0;
        let temp_hi = temp_byte & 0b0111_1111;
        let joined_temp = u16::from_be_bytes([temp_hi, temp_lo]);
        let mut temperature = joined_temp as f32 / 10.0;
        if temperature > MAX_TEMPERATURE {
            // whole byte, sign bit included
            temperature = temp_byte as f32;
        }
        if is_temp_negative {
            temperature = -temperature;
        }

        Reading {
            relative_humidity,
            temperature,
            fahrenheit: temperature * 1.8 + 32.0,
        }
    }

    /// Relative humidity in percent.
    pub fn relative_humidity(&self) -> f32 {
        self.relative_humidity
    }

    /// Temperature in degrees Celsius.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Temperature in degrees Fahrenheit, derived from [`Reading::temperature`].
    pub fn fahrenheit(&self) -> f32 {
        self.fahrenheit
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Humidity = {:.1} % Temperature = {:.1} *C ({:.1} *F)",
            self.relative_humidity, self.temperature, self.fahrenheit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(data: [u8; 4]) -> Reading {
        Reading::from_frame(&RawFrame::with_checksum(data))
    }

    #[test]
    fn test_parse_data_positive_temp() {
        // Humidity: 55.5% -> [0x02, 0x2B] => 555
        // Temperature: 24.6C -> [0x00, 0xF6] => 246
        let r = reading([0x02, 0x2B, 0x00, 0xF6]);

        assert_eq!(r.relative_humidity(), 55.5);
        assert_eq!(r.temperature(), 24.6);
    }

    #[test]
    fn test_parse_data_negative_temp() {
        // Temperature: -1.0C -> [0x80, 0x0A]
        // Clear sign bit: 0x80 & 0x7F = 0x00, so [0x00, 0x0A] = 10 => 1.0 then negated
        let r = reading([0x01, 0x90, 0x80, 0x0A]);

        assert_eq!(r.relative_humidity(), 40.0);
        assert_eq!(r.temperature(), -1.0);
        assert!((r.fahrenheit() - 30.2).abs() < 1e-4);
    }

    #[test]
    fn test_dht11_whole_units() {
        // 55 % and 23 C packed in the high bytes
        let r = reading([55, 0, 23, 0]);

        assert_eq!(r.relative_humidity(), 55.0);
        assert_eq!(r.temperature(), 23.0);
    }

    #[test]
    fn test_fallback_uses_whole_byte() {
        // magnitude 0x05_00 = 1280 => 128.0 > 125, fall back to 0x85 = 133, then negate
        let r = reading([40, 0, 0x85, 0x00]);

        assert_eq!(r.temperature(), -133.0);
    }

    #[test]
    fn test_boundary_values_not_reinterpreted() {
        // 1000 => 100.0 %, 1250 => 125.0 C
        let r = reading([0x03, 0xE8, 0x04, 0xE2]);

        assert_eq!(r.relative_humidity(), 100.0);
        assert_eq!(r.temperature(), 125.0);
    }

    #[test]
    fn test_zero_reading() {
        let r = reading([0, 0, 0, 0]);

        assert_eq!(r.relative_humidity(), 0.0);
        assert_eq!(r.temperature(), 0.0);
        assert_eq!(r.fahrenheit(), 32.0);
    }

    #[test]
    fn test_display() {
        let r = reading([0x02, 0x8C, 0x00, 0x00]);

        assert_eq!(
            r.to_string(),
            "Humidity = 65.2 % Temperature = 0.0 *C (32.0 *F)"
        );
    }
}
