//! Reserved command set
//!
//! Opcodes 0x00-0x0F are reserved for the base commands every Keryx
//! peripheral understands; device-specific vocabularies start at
//! [`FIRST_DEVICE_OPCODE`].

/// Request the peripheral's 32-bit identity code.
///
/// Zero-payload command; the peripheral answers with its identity as a
/// single little-endian u32 ([`GET_DEVICE_ID_RESPONSE_LEN`] bytes).
pub const GET_DEVICE_ID: u8 = 0x00;

/// Byte count of the identity response
pub const GET_DEVICE_ID_RESPONSE_LEN: usize = 4;

/// Soft-reset the peripheral. Zero-payload, no response.
pub const RESET_DEVICE: u8 = 0x01;

/// Put the peripheral into low-power sleep. Zero-payload, no response.
pub const LOW_POWER_SLEEP: u8 = 0x02;

/// First opcode available to device-specific command vocabularies
pub const FIRST_DEVICE_OPCODE: u8 = 0x10;
