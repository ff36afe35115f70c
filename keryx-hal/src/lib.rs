//! Bus transport abstraction for Keryx peripheral drivers
//!
//! The driver core in `keryx-drivers` issues logical transactions against
//! the [`I2cBus`] trait defined here; concrete transports (chip HALs, USB
//! bridges) implement it over the electrical reality. [`MockBus`] is the
//! hardware-less stand-in: every transaction trivially succeeds, so firmware
//! can run with the peripheral absent and tests can script bus behavior.

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod mock;

pub use i2c::{is_valid_address, I2cBus, I2cBusError, ADDRESS_MAX, ADDRESS_MIN};
pub use mock::MockBus;
