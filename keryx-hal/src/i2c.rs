//! I2C bus master abstraction
//!
//! Provides the transport trait the driver core talks to, the canonical
//! transaction error vocabulary, and the legal 7-bit address range.

/// Lowest assignable 7-bit device address.
///
/// Addresses 0x00-0x07 are reserved by the bus specification (general call,
/// CBUS, high-speed master codes).
pub const ADDRESS_MIN: u8 = 0x08;

/// Highest assignable 7-bit device address.
///
/// Addresses 0x78-0x7F are reserved (10-bit addressing, device ID).
pub const ADDRESS_MAX: u8 = 0x77;

/// Check whether `address` may be assigned to a peripheral.
pub const fn is_valid_address(address: u8) -> bool {
    address >= ADDRESS_MIN && address <= ADDRESS_MAX
}

/// I2C bus master
///
/// One method per transaction kind. A transaction is atomic from the
/// caller's point of view: the implementation handles start/stop conditions,
/// addressing and acknowledgment on the wire.
pub trait I2cBus {
    /// Error type for transactions
    type Error;

    /// Write `data` to the device at `address` as a single transaction
    /// (start, address, data bytes, stop).
    ///
    /// An error means the device did not acknowledge or the bus faulted;
    /// nothing is reported about how many bytes went out before that.
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Request `count` bytes from the device at `address` as a single read
    /// transaction.
    ///
    /// Fills `buf` with the bytes the device delivers, in arrival order, and
    /// returns the delivered count. The count may differ from `count` when
    /// the device ends the transfer early or pads it; callers are
    /// responsible for validating it. Delivery beyond `buf.len()` is
    /// truncated.
    fn read(&mut self, address: u8, count: usize, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }

    fn read(&mut self, address: u8, count: usize, buf: &mut [u8]) -> Result<usize, Self::Error> {
        T::read(self, address, count, buf)
    }
}

/// Transport-level transaction failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Device did not acknowledge
    Nack,
    /// Electrical or protocol fault on the bus
    Bus,
    /// Lost arbitration to another master
    ArbitrationLost,
    /// Transaction timed out
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_low_addresses_rejected() {
        assert!(!is_valid_address(0x00));
        assert!(!is_valid_address(0x07));
        assert!(is_valid_address(0x08));
    }

    #[test]
    fn test_reserved_high_addresses_rejected() {
        assert!(is_valid_address(0x77));
        assert!(!is_valid_address(0x78));
        assert!(!is_valid_address(0x7F));
        assert!(!is_valid_address(0xFF));
    }
}
