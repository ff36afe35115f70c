//! Generic device driver core
//!
//! [`DeviceDriver`] owns a bus transport, a delay provider and two reusable
//! message buffers, and implements the request/response cycle shared by all
//! Keryx peripherals: setup with bounded detection retries, identity
//! verification, typed command senders and exact-length response fetch.
//!
//! The driver is synchronous and blocking; every operation runs to
//! completion on the caller's thread. It assumes exclusive, serialized
//! access to the bus for each logical operation and performs no locking
//! itself. No allocation happens during normal operation.

use embedded_hal::delay::DelayNs;
use keryx_hal::{is_valid_address, I2cBus};
use keryx_protocol::{commands, Message};

/// Detection attempts made by [`DeviceDriver::setup`] before giving up
pub const SETUP_RETRY_MAX: u8 = 3;

/// Driver configuration, fixed for the driver's lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverConfig {
    /// 7-bit bus address of the peripheral
    pub address: u8,
    /// Identity the peripheral must report during detection; used only as
    /// the expected comparison value, never transmitted
    pub device_id: u32,
    /// Wait between sending the identity request and fetching its response
    /// (peripheral turnaround latency)
    pub response_delay_ms: u32,
    /// Verify the reported identity during detection. When false, detection
    /// is presence-only: transmission success alone decides.
    pub verify_device_id: bool,
}

impl DriverConfig {
    /// Configuration with the default turnaround delay and identity
    /// verification enabled.
    pub const fn new(address: u8, device_id: u32) -> Self {
        Self {
            address,
            device_id,
            response_delay_ms: 20,
            verify_device_id: true,
        }
    }
}

/// Driver operation failure
///
/// `InvalidAddress` is permanent for a given driver value; everything else
/// is transient and recoverable by retrying the failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Configured address is outside the assignable 7-bit range
    InvalidAddress,
    /// Transport-level transaction failure
    Bus(E),
    /// Response byte count did not match the request exactly
    ResponseLength { requested: usize, received: usize },
    /// Peripheral answered the identity request with the wrong identity
    WrongDevice,
    /// Setup exhausted its detection retries. Deliberately cause-free:
    /// an absent device and an identity mismatch are indistinguishable here.
    NotDetected,
}

/// Generic driver for one addressed Keryx peripheral
///
/// `B` is the bus transport, `D` the delay provider for the response
/// turnaround wait. Peripheral-specific drivers wrap this and build their
/// command vocabulary from the typed senders.
pub struct DeviceDriver<B, D> {
    bus: B,
    delay: D,
    config: DriverConfig,
    outgoing: Message,
    incoming: Message,
}

impl<B, D> DeviceDriver<B, D>
where
    B: I2cBus,
    D: DelayNs,
{
    /// Create a driver. No bus traffic happens until [`setup`](Self::setup).
    pub fn new(bus: B, delay: D, config: DriverConfig) -> Self {
        Self {
            bus,
            delay,
            config,
            outgoing: Message::new(),
            incoming: Message::new(),
        }
    }

    /// The configured peripheral identity.
    pub fn device_id(&self) -> u32 {
        self.config.device_id
    }

    /// The driver configuration.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// The inbound buffer, holding the bytes of the last successful
    /// response fetch.
    pub fn response(&self) -> &Message {
        &self.incoming
    }

    /// Validate the configuration and detect the peripheral.
    ///
    /// Must succeed once before any other operation. Detection is attempted
    /// up to [`SETUP_RETRY_MAX`] times with no backoff between attempts
    /// beyond the per-attempt turnaround wait. Re-callable after
    /// [`Error::NotDetected`]; [`Error::InvalidAddress`] is permanent for
    /// this driver value and is reported before any transport call.
    pub fn setup(&mut self) -> Result<(), Error<B::Error>> {
        if !is_valid_address(self.config.address) {
            return Err(Error::InvalidAddress);
        }

        for _ in 0..SETUP_RETRY_MAX {
            if self.check_device().is_ok() {
                return Ok(());
            }
        }
        Err(Error::NotDetected)
    }

    /// Verify the peripheral is present and, when configured, reports the
    /// expected identity. May be called at any time to re-check.
    ///
    /// Unlike [`setup`](Self::setup), reports the precise per-attempt cause
    /// (`Bus`, `ResponseLength`, `WrongDevice`).
    pub fn check_device(&mut self) -> Result<(), Error<B::Error>> {
        self.send_header(commands::GET_DEVICE_ID)?;

        if !self.config.verify_device_id {
            return Ok(());
        }

        self.delay.delay_ms(self.config.response_delay_ms);
        self.get_response(commands::GET_DEVICE_ID_RESPONSE_LEN)?;

        if self.incoming.read_u32(0) != self.config.device_id {
            return Err(Error::WrongDevice);
        }
        Ok(())
    }

    /// Fetch a response of exactly `request_size` bytes into the inbound
    /// buffer.
    ///
    /// Clears the buffer, issues one read transaction and accepts every
    /// byte the transport delivers in arrival order. Under- and
    /// over-delivery both fail; there is no partial success, though the
    /// delivered bytes remain readable via [`response`](Self::response).
    pub fn get_response(&mut self, request_size: usize) -> Result<(), Error<B::Error>> {
        self.incoming.clear();

        let received = self
            .bus
            .read(self.config.address, request_size, self.incoming.storage_mut())
            .map_err(Error::Bus)?;
        self.incoming.set_len(received);

        if received != request_size {
            return Err(Error::ResponseLength {
                requested: request_size,
                received,
            });
        }
        Ok(())
    }

    /// Send a header-only frame (total length 1).
    pub fn send_header(&mut self, opcode: u8) -> Result<(), Error<B::Error>> {
        self.outgoing.clear();
        self.outgoing.set_header(opcode);
        self.outgoing.set_len(1);

        self.write_outgoing()
    }

    /// Send a frame carrying one u16 at offset 1 (total length 3).
    pub fn send_u16(&mut self, opcode: u8, value: u16) -> Result<(), Error<B::Error>> {
        self.outgoing.clear();
        self.outgoing.set_header(opcode);
        self.outgoing.write_u16(value, 1);
        self.outgoing.set_len(3);

        self.write_outgoing()
    }

    /// Send a frame carrying one u32 at offset 1 (total length 5).
    pub fn send_u32(&mut self, opcode: u8, value: u32) -> Result<(), Error<B::Error>> {
        self.outgoing.clear();
        self.outgoing.set_header(opcode);
        self.outgoing.write_u32(value, 1);
        self.outgoing.set_len(5);

        self.write_outgoing()
    }

    /// Send a frame carrying two u16s at offsets 1 and 3 (total length 5).
    pub fn send_two_u16(
        &mut self,
        opcode: u8,
        first: u16,
        second: u16,
    ) -> Result<(), Error<B::Error>> {
        self.outgoing.clear();
        self.outgoing.set_header(opcode);
        self.outgoing.write_u16(first, 1);
        self.outgoing.write_u16(second, 3);
        self.outgoing.set_len(5);

        self.write_outgoing()
    }

    /// Soft-reset the peripheral.
    pub fn reset_device(&mut self) -> Result<(), Error<B::Error>> {
        self.send_header(commands::RESET_DEVICE)
    }

    /// Put the peripheral into low-power sleep.
    pub fn sleep(&mut self) -> Result<(), Error<B::Error>> {
        self.send_header(commands::LOW_POWER_SLEEP)
    }

    /// Transmit exactly `len` bytes of the outbound buffer as one atomic
    /// write transaction. No partial-write retry at this layer; the caller
    /// retries the whole send operation if desired.
    fn write_outgoing(&mut self) -> Result<(), Error<B::Error>> {
        self.bus
            .write(self.config.address, self.outgoing.as_bytes())
            .map_err(Error::Bus)
    }
}
