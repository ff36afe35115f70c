//! Mock bus transport
//!
//! A stand-in for the real bus, selected at construction instead of compile
//! time so the same binary runs with and without hardware attached. With no
//! script configured every transaction trivially succeeds: writes are
//! acknowledged (and recorded), reads deliver exactly the requested number
//! of zero bytes. Tests script canned responses and upcoming failures to
//! exercise the driver's validation paths.

use heapless::Vec;

use crate::i2c::{I2cBus, I2cBusError};

/// Per-transaction byte capacity, matching the classic two-wire 32-byte
/// transaction buffer.
pub const TRANSACTION_CAPACITY: usize = 32;

/// Scripted bus transport for tests and hardware-less operation.
#[derive(Debug)]
pub struct MockBus {
    last_write: Vec<u8, TRANSACTION_CAPACITY>,
    response: Option<Vec<u8, TRANSACTION_CAPACITY>>,
    fail_writes: usize,
    fail_reads: usize,
    write_count: usize,
    read_count: usize,
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBus {
    /// Create a mock on which every transaction succeeds.
    pub fn new() -> Self {
        Self {
            last_write: Vec::new(),
            response: None,
            fail_writes: 0,
            fail_reads: 0,
            write_count: 0,
            read_count: 0,
        }
    }

    /// Create a mock that answers every read with `bytes`.
    pub fn with_response(bytes: &[u8]) -> Self {
        let mut bus = Self::new();
        bus.set_response(bytes);
        bus
    }

    /// Script the bytes every subsequent read delivers, regardless of the
    /// requested count. Scripts longer than the transaction capacity are
    /// truncated.
    pub fn set_response(&mut self, bytes: &[u8]) {
        let mut response = Vec::new();
        let take = bytes.len().min(TRANSACTION_CAPACITY);
        // Cannot fail after the truncation above
        let _ = response.extend_from_slice(&bytes[..take]);
        self.response = Some(response);
    }

    /// Fail the next `count` write transactions with a NACK.
    pub fn fail_next_writes(&mut self, count: usize) {
        self.fail_writes = count;
    }

    /// Fail the next `count` read transactions with a NACK.
    pub fn fail_next_reads(&mut self, count: usize) {
        self.fail_reads = count;
    }

    /// Number of write transactions attempted, acknowledged or not.
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    /// Number of read transactions attempted.
    pub fn read_count(&self) -> usize {
        self.read_count
    }

    /// Bytes of the most recently attempted write transaction.
    pub fn last_write(&self) -> &[u8] {
        &self.last_write
    }
}

impl I2cBus for MockBus {
    type Error = I2cBusError;

    fn write(&mut self, _address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.write_count += 1;
        self.last_write.clear();
        let take = data.len().min(TRANSACTION_CAPACITY);
        let _ = self.last_write.extend_from_slice(&data[..take]);

        if self.fail_writes > 0 {
            self.fail_writes -= 1;
            return Err(I2cBusError::Nack);
        }
        Ok(())
    }

    fn read(&mut self, _address: u8, count: usize, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.read_count += 1;

        if self.fail_reads > 0 {
            self.fail_reads -= 1;
            return Err(I2cBusError::Nack);
        }

        match &self.response {
            Some(bytes) => {
                let delivered = bytes.len().min(buf.len());
                buf[..delivered].copy_from_slice(&bytes[..delivered]);
                Ok(delivered)
            }
            None => {
                let delivered = count.min(buf.len());
                buf[..delivered].fill(0);
                Ok(delivered)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscripted_write_succeeds_and_records() {
        let mut bus = MockBus::new();
        assert!(bus.write(0x20, &[0x01, 0x02]).is_ok());
        assert_eq!(bus.write_count(), 1);
        assert_eq!(bus.last_write(), &[0x01, 0x02]);
    }

    #[test]
    fn test_unscripted_read_delivers_requested_zeroes() {
        let mut bus = MockBus::new();
        let mut buf = [0xFFu8; 8];
        let delivered = bus.read(0x20, 5, &mut buf).unwrap();
        assert_eq!(delivered, 5);
        assert_eq!(&buf[..5], &[0, 0, 0, 0, 0]);
        assert_eq!(bus.read_count(), 1);
    }

    #[test]
    fn test_scripted_response_overrides_requested_count() {
        let mut bus = MockBus::with_response(&[1, 2, 3, 4, 5, 6]);
        let mut buf = [0u8; 32];
        let delivered = bus.read(0x20, 5, &mut buf).unwrap();
        assert_eq!(delivered, 6);
        assert_eq!(&buf[..6], &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_scripted_write_failures_then_recovery() {
        let mut bus = MockBus::new();
        bus.fail_next_writes(2);
        assert_eq!(bus.write(0x20, &[0]), Err(I2cBusError::Nack));
        assert_eq!(bus.write(0x20, &[0]), Err(I2cBusError::Nack));
        assert!(bus.write(0x20, &[0]).is_ok());
        assert_eq!(bus.write_count(), 3);
    }

    #[test]
    fn test_scripted_read_failure() {
        let mut bus = MockBus::with_response(&[1, 2, 3]);
        bus.fail_next_reads(1);
        let mut buf = [0u8; 8];
        assert_eq!(bus.read(0x20, 3, &mut buf), Err(I2cBusError::Nack));
        assert_eq!(bus.read(0x20, 3, &mut buf), Ok(3));
    }

    #[test]
    fn test_delivery_truncated_at_buffer() {
        let mut bus = MockBus::with_response(&[9; 8]);
        let mut buf = [0u8; 4];
        let delivered = bus.read(0x20, 8, &mut buf).unwrap();
        assert_eq!(delivered, 4);
        assert_eq!(buf, [9, 9, 9, 9]);
    }
}
