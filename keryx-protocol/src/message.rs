//! Fixed-capacity message buffer
//!
//! [`Message`] is the scratch buffer a driver reuses for every outbound and
//! inbound frame: a raw byte array with an explicit logical length, a header
//! byte at offset 0, and little-endian multi-byte field access at arbitrary
//! offsets. Fields may be written beyond the current logical length — the
//! sender sets the total length explicitly once the frame is assembled —
//! which is why this is a raw array rather than a growable vector.

/// Protocol-wide maximum message size in bytes, shared by every driver
/// instance. Matches the classic two-wire 32-byte transaction buffer.
pub const MESSAGE_MAX_SIZE: usize = 32;

/// A reusable fixed-capacity message buffer
///
/// The logical content is the first [`len`](Message::len) bytes of the
/// backing storage. [`clear`](Message::clear) zeroes the storage and resets
/// the length, so no stale data leaks between operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    data: [u8; MESSAGE_MAX_SIZE],
    len: usize,
}

impl Default for Message {
    fn default() -> Self {
        Self::new()
    }
}

impl Message {
    /// Create an empty, zeroed message.
    pub const fn new() -> Self {
        Self {
            data: [0; MESSAGE_MAX_SIZE],
            len: 0,
        }
    }

    /// Zero the backing storage and reset the length.
    pub fn clear(&mut self) {
        self.data.fill(0);
        self.len = 0;
    }

    /// Set the header/opcode byte (offset 0).
    pub fn set_header(&mut self, opcode: u8) {
        self.data[0] = opcode;
    }

    /// The header/opcode byte (offset 0).
    pub fn header(&self) -> u8 {
        self.data[0]
    }

    /// Set the logical length, clamped to [`MESSAGE_MAX_SIZE`].
    ///
    /// The sender calls this explicitly once the frame is assembled; the
    /// length is never inferred from the field-encoding calls.
    pub fn set_len(&mut self, len: usize) {
        self.len = len.min(MESSAGE_MAX_SIZE);
    }

    /// Current logical length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the logical content is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Write a u16 field little-endian at `offset`.
    ///
    /// Panics if the field would not fit in the backing storage; offsets are
    /// fixed per command, so an out-of-range offset is a programmer error.
    pub fn write_u16(&mut self, value: u16, offset: usize) {
        self.data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    /// Read a little-endian u16 field at `offset`.
    ///
    /// Panics if the field extends past the backing storage.
    pub fn read_u16(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.data[offset], self.data[offset + 1]])
    }

    /// Write a u32 field little-endian at `offset`.
    ///
    /// Panics if the field would not fit in the backing storage.
    pub fn write_u32(&mut self, value: u32, offset: usize) {
        self.data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Read a little-endian u32 field at `offset`.
    ///
    /// Panics if the field extends past the backing storage.
    pub fn read_u32(&self, offset: usize) -> u32 {
        u32::from_le_bytes([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ])
    }

    /// The logical content: the first `len` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// The full backing storage, for transports that fill the buffer in
    /// place. The caller commits the received count with
    /// [`set_len`](Message::set_len) afterwards.
    pub fn storage_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_message_is_empty_and_zeroed() {
        let msg = Message::new();
        assert_eq!(msg.len(), 0);
        assert!(msg.is_empty());
        assert_eq!(msg.header(), 0);
        assert!(msg.as_bytes().is_empty());
    }

    #[test]
    fn test_header_roundtrip() {
        let mut msg = Message::new();
        msg.set_header(0x42);
        assert_eq!(msg.header(), 0x42);
    }

    #[test]
    fn test_set_len_clamps_to_capacity() {
        let mut msg = Message::new();
        msg.set_len(MESSAGE_MAX_SIZE + 10);
        assert_eq!(msg.len(), MESSAGE_MAX_SIZE);
        msg.set_len(5);
        assert_eq!(msg.len(), 5);
    }

    #[test]
    fn test_clear_zeroes_stale_bytes() {
        let mut msg = Message::new();
        msg.set_header(0xFF);
        msg.write_u32(0xDEADBEEF, 1);
        msg.set_len(5);

        msg.clear();
        assert_eq!(msg.len(), 0);
        assert_eq!(msg.header(), 0);
        // Stale payload bytes are gone, not merely hidden behind len
        msg.set_len(MESSAGE_MAX_SIZE);
        assert!(msg.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_u16_fields_are_little_endian() {
        let mut msg = Message::new();
        msg.write_u16(0x1234, 1);
        msg.set_len(3);
        assert_eq!(msg.as_bytes()[1], 0x34);
        assert_eq!(msg.as_bytes()[2], 0x12);
        assert_eq!(msg.read_u16(1), 0x1234);
    }

    #[test]
    fn test_u32_roundtrip_extremes() {
        let mut msg = Message::new();
        for value in [0u32, 1, u32::MAX] {
            msg.clear();
            msg.write_u32(value, 1);
            assert_eq!(msg.read_u32(1), value);
        }
    }

    #[test]
    fn test_storage_fill_then_commit() {
        let mut msg = Message::new();
        msg.storage_mut()[..3].copy_from_slice(&[7, 8, 9]);
        msg.set_len(3);
        assert_eq!(msg.as_bytes(), &[7, 8, 9]);
    }

    proptest! {
        #[test]
        fn prop_u32_roundtrip(value: u32, offset in 0usize..=MESSAGE_MAX_SIZE - 4) {
            let mut msg = Message::new();
            msg.write_u32(value, offset);
            prop_assert_eq!(msg.read_u32(offset), value);
        }

        #[test]
        fn prop_u16_roundtrip(value: u16, offset in 0usize..=MESSAGE_MAX_SIZE - 2) {
            let mut msg = Message::new();
            msg.write_u16(value, offset);
            prop_assert_eq!(msg.read_u16(offset), value);
        }
    }
}
