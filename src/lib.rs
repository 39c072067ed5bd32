//! DHT11/DHT22 Pulse Decoder for Embedded Rust
//!
//! This crate reads the DHT11 and DHT22 (AM2302) temperature and humidity
//! sensors by timing their single-wire pulses, built on top of the
//! [`embedded-hal`] traits.
//!
//! A read happens in two steps:
//! - [`Dht::capture`] wakes the sensor and records how long the line holds each
//!   level, as a [`Capture`] of [`Observation`]s.
//! - [`decode`] turns those pulse widths into a checksummed [`RawFrame`] and then
//!   a [`Reading`]. It is a pure function, so captures can be decoded (or
//!   replayed in tests) away from the hardware.
//!
//! [`Dht::read`] composes both. Polling, retries and persistence belong to the
//! caller; the sensor needs [`MIN_READ_INTERVAL_MS`](dht::MIN_READ_INTERVAL_MS)
//! between requests.
//!
//! # Timing
//! Bits are told apart by pulse width (~27 µs vs ~70 µs), measured by polling
//! the pin once per microsecond. Build in release mode, and keep interrupts from
//! stalling the capture loop.
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`InputPin`] and [`OutputPin`] for GPIO access
//! - [`DelayNs`] for accurate timing
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` for logging support
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

pub mod dht;
pub mod error;
pub mod frame;
pub mod pulse;
pub mod reading;

pub use dht::Dht;
pub use error::{DecodeError, DhtError};
pub use frame::{RawFrame, decode};
pub use pulse::{Capture, Level, Observation};
pub use reading::Reading;
