//! Master-side driver core for Keryx expansion peripherals
//!
//! This crate implements the logic every peripheral-specific driver shares:
//!
//! - configuration validation and one-shot setup with bounded detection
//!   retries
//! - identity-verified device detection
//! - frame encoding over the fixed-size message buffer and atomic
//!   transmission
//! - exact-length response fetch and validation
//!
//! Peripheral-specific drivers layer their command vocabularies on top of
//! [`DeviceDriver`]'s typed send helpers.

#![no_std]
#![deny(unsafe_code)]

pub mod device;

pub use device::{DeviceDriver, DriverConfig, Error, SETUP_RETRY_MAX};
