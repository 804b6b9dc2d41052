use bytes::Buf;

/// The fixed 19-byte prefix of every binlog event, little-endian on disk.
/// `file_offset` is stamped by the reader and is not part of the wire format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventHeader {
    pub timestamp: u32,
    pub type_code: u8,
    pub server_id: u32,
    pub length: u32,
    pub next_position: u32,
    pub flags: u16,
    pub file_offset: u64,
}

impl EventHeader {
    pub const SIZE: usize = 19;

    pub fn decode(raw: &[u8; EventHeader::SIZE], file_offset: u64) -> Self {
        let mut buf = &raw[..];
        Self {
            timestamp: buf.get_u32_le(),
            type_code: buf.get_u8(),
            server_id: buf.get_u32_le(),
            length: buf.get_u32_le(),
            next_position: buf.get_u32_le(),
            flags: buf.get_u16_le(),
            file_offset,
        }
    }

    /// Declared payload size. `length` counts the header itself.
    #[inline]
    pub fn payload_len(&self) -> usize {
        (self.length as usize).saturating_sub(Self::SIZE)
    }

    /// Offset of the event that follows this one. The on-disk
    /// `next_position` hint is not trustworthy across master/slave logs,
    /// so chaining always recomputes from offset + length.
    #[inline]
    pub fn next_offset(&self) -> u64 {
        self.file_offset + self.length as u64
    }
}
