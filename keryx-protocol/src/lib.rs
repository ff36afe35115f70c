//! Keryx wire protocol: message buffer and reserved command set
//!
//! Every command travels as one compact binary frame inside a single bus
//! transaction:
//! ```text
//! ┌────────┬──────────────────────────┐
//! │ HEADER │ PAYLOAD                  │
//! │ 1B     │ 0–31B, fields at fixed   │
//! │        │ offsets, little-endian   │
//! └────────┴──────────────────────────┘
//! ```
//!
//! The header byte is the command opcode; the total frame length is set
//! explicitly by the sender, never inferred from the payload encoding calls.
//! All multi-byte fields are little-endian — a fixed protocol choice, not
//! configurable per call.

#![no_std]
#![deny(unsafe_code)]

pub mod commands;
pub mod message;

pub use message::{Message, MESSAGE_MAX_SIZE};
