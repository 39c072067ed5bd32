use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

use crate::error::{DecodeError, DhtError};
use crate::frame::decode;
use crate::pulse::{Capture, Level, Observation, TIMEOUT_TICKS};
use crate::reading::Reading;

/// How long the line is held low to wake the sensor.
pub const WAKE_HOLD_MS: u32 = 18;

/// Shortest pause the sensor needs between two acquisitions.
///
/// The sensor ignores requests that arrive sooner; the caller schedules this.
pub const MIN_READ_INTERVAL_MS: u32 = 2000;

/// Driver for DHT11 and DHT22 temperature and humidity sensors.
///
/// The pin must be open-drain with a pull-up: driving it high releases the line
/// so the sensor can pull it low.
pub struct Dht<PIN, D> {
    pin: PIN,
    delay: D,
}

impl<PIN, DELAY, E> Dht<PIN, DELAY>
where
    PIN: InputPin<Error = E> + OutputPin<Error = E>,
    DELAY: DelayNs,
{
    /// Wraps the data line and a delay source. The line is not touched until
    /// the first [`Dht::capture`] or [`Dht::read`].
    ///
    /// * `pin` - Open-drain pin on the sensor's data line, with a pull-up so that
    ///   `set_high` lets the sensor drive it. Read back with `is_high`.
    /// * `delay` - Needs microsecond resolution; every tick of a pulse is one `delay_us(1)`.
    pub fn new(pin: PIN, delay: DELAY) -> Self {
        Dht { pin, delay }
    }

    /// Gives back the pin and delay provider.
    pub fn release(self) -> (PIN, DELAY) {
        (self.pin, self.delay)
    }

    /// Reads a temperature and humidity measurement from the sensor.
    ///
    /// Captures one pulse train and decodes it. Nothing is retried: on error,
    /// wait at least [`MIN_READ_INTERVAL_MS`] before calling again.
    ///
    /// # Returns
    ///
    /// * `Ok(Reading)` if 40 bits arrived and the checksum is valid.
    /// * `Err(DhtError::Decode(DecodeError::Timeout))` if the sensor never answered.
    /// * `Err(DhtError)` for any other decode or pin failure.
    pub fn read(&mut self) -> Result<Reading, DhtError<E>> {
        let capture = self.capture().map_err(DhtError::PinError)?;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "dht: captured {=usize} observations, timed out: {=bool}",
            capture.len(),
            capture.timed_out()
        );

        if capture.len() == 1 && capture.timed_out() {
            return Err(DecodeError::Timeout.into());
        }
        Ok(decode(&capture)?)
    }

    /// Wakes the sensor and records every level hold until the capture fills up
    /// or a hold outlasts [`TIMEOUT_TICKS`].
    ///
    /// Busy-waits for the whole transmission (about 5 ms). Interrupts that stall
    /// this loop for tens of microseconds corrupt the bits being timed.
    ///
    /// # Errors
    ///
    /// Only pin errors. A short or aborted capture is returned as-is for
    /// [`decode`] to judge.
    pub fn capture(&mut self) -> Result<Capture, E> {
        self.start()?;

        let mut capture = Capture::new();
        let mut level = Level::High;

        while !capture.is_full() {
            match self.hold_duration(level)? {
                Some((duration, next)) => {
                    let pushed = capture.push(Observation::new(level, duration));
                    debug_assert!(pushed, "capture checked for room");
                    level = next;
                }
                None => {
                    let pushed = capture.push(Observation::timeout(level));
                    debug_assert!(pushed, "capture checked for room");
                    break;
                }
            }
        }

        Ok(capture)
    }

    /// Sends the wake signal: line low for [`WAKE_HOLD_MS`], then released.
    fn start(&mut self) -> Result<(), E> {
        self.pin.set_low()?;
        self.delay.delay_ms(WAKE_HOLD_MS);
        self.pin.set_high()?;
        Ok(())
    }

    /// Counts 1 µs ticks while the line stays at `level`.
    ///
    /// Returns the tick count and the level the line changed to, or `None` if
    /// the count reached [`TIMEOUT_TICKS`].
    fn hold_duration(&mut self, level: Level) -> Result<Option<(u8, Level)>, E> {
        let mut ticks: u8 = 0;
        loop {
            let now = self.level()?;
            if now != level {
                return Ok(Some((ticks, now)));
            }
            ticks += 1;
            self.delay.delay_us(1);
            if ticks == TIMEOUT_TICKS {
                return Ok(None);
            }
        }
    }

    fn level(&mut self) -> Result<Level, E> {
        self.pin.is_high().map(Level::from)
    }
}
