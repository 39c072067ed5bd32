//! Timed level-holds captured from the data line.

use core::ops::Deref;

use heapless::Vec;

/// Number of level changes recorded per acquisition.
///
/// Covers the sensor's response pulses plus the 80 pulses of the 40 data bits,
/// with room for the trailing low.
pub const MAX_TRANSITIONS: usize = 85;

/// Duration value marking a hold that never ended.
pub const TIMEOUT_TICKS: u8 = u8::MAX;

/// Logic level of the data line.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(is_high: bool) -> Self {
        if is_high { Level::High } else { Level::Low }
    }
}

/// How long the line was held at one level, in polling ticks (~1 µs each).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
    pub level: Level,
    pub duration: u8,
}

impl Observation {
    pub const fn new(level: Level, duration: u8) -> Self {
        Self { level, duration }
    }

    /// A hold at `level` that lasted past [`TIMEOUT_TICKS`].
    pub const fn timeout(level: Level) -> Self {
        Self::new(level, TIMEOUT_TICKS)
    }

    pub const fn is_timeout(&self) -> bool {
        self.duration == TIMEOUT_TICKS
    }
}

/// The ordered observations of one acquisition cycle.
///
/// Holds at most [`MAX_TRANSITIONS`] entries. A capture that aborted ends with a
/// timeout observation and nothing after it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Capture {
    observations: Vec<Observation, MAX_TRANSITIONS>,
}

impl Capture {
    pub const fn new() -> Self {
        Self {
            observations: Vec::new(),
        }
    }

    /// Appends an observation. Returns `false` once the capture is full or has
    /// already timed out.
    pub fn push(&mut self, observation: Observation) -> bool {
        if self.timed_out() {
            return false;
        }
        self.observations.push(observation).is_ok()
    }

    pub fn is_full(&self) -> bool {
        self.observations.is_full()
    }

    /// Whether the capture stopped on a hold that never ended.
    pub fn timed_out(&self) -> bool {
        self.observations.last().is_some_and(Observation::is_timeout)
    }
}

impl Deref for Capture {
    type Target = [Observation];

    fn deref(&self) -> &Self::Target {
        &self.observations
    }
}
