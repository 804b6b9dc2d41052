use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};

use super::{BINLOG_VERSION, check};
use crate::error::{Error, Result};
use crate::event::typed::FormatDescription;
use crate::event::{EventHeader, PayloadBuffer, RawEvent};

/// Owns the file handle and turns byte positions into decoded events.
///
/// Path-opened logs are seekable and every read targets an explicit
/// offset. Adopted descriptors are sequential: the caller guarantees the
/// stream is positioned at an event boundary and reads simply continue
/// from wherever the descriptor is.
#[derive(Debug)]
pub struct EventReader {
    file: File,
    seekable: bool,
}

impl EventReader {
    pub(crate) fn seekable(file: File) -> Self {
        Self {
            file,
            seekable: true,
        }
    }

    pub(crate) fn sequential(file: File) -> Self {
        Self {
            file,
            seekable: false,
        }
    }

    /// Read the event at `offset`. Returns:
    /// - `Ok(None)` when the header read comes up short (end of stream);
    /// - `Ok(Some(event))` without a payload when the header fails the
    ///   validity check -- the caller decides whether that means
    ///   "keep scanning" or "stop";
    /// - `Ok(Some(event))` with a payload when the header validates. Once
    ///   a header is trusted, a short payload read is a torn write or
    ///   corruption and comes back as a fatal `Err`.
    pub(crate) fn read_event(
        &mut self,
        offset: u64,
        min_timestamp: u32,
        max_timestamp: u32,
    ) -> Result<Option<RawEvent>> {
        if self.seekable {
            self.file.seek(SeekFrom::Start(offset))?;
        }

        let mut raw = [0u8; EventHeader::SIZE];
        if !self.fill_header(&mut raw)? {
            return Ok(None);
        }

        let header = EventHeader::decode(&raw, offset);
        if !check::is_valid(&header, min_timestamp, max_timestamp) {
            return Ok(Some(RawEvent::new(header, None)));
        }

        let mut payload = PayloadBuffer::with_len(header.payload_len());
        self.file.read_exact(payload.as_mut_slice())?;
        Ok(Some(RawEvent::new(header, Some(payload))))
    }

    /// Header reads tolerate a short count: hitting end-of-file part way
    /// through 19 bytes is the normal end-of-stream signal, not an error.
    fn fill_header(&mut self, raw: &mut [u8; EventHeader::SIZE]) -> Result<bool> {
        let mut filled = 0;
        while filled < raw.len() {
            match self.file.read(&mut raw[filled..]) {
                Ok(0) => return Ok(false),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(true)
    }

    /// Read and verify the format description event that must open every
    /// binlog. Anything else at the start position means the file is not
    /// a log this crate can read.
    pub(crate) fn read_format_description(
        &mut self,
        min_timestamp: u32,
        max_timestamp: u32,
    ) -> Result<RawEvent> {
        let event = match self.read_event(0, min_timestamp, max_timestamp)? {
            Some(event) => event,
            None => {
                return Err(Error::Format {
                    reason: "file is too short for an event header",
                });
            }
        };
        if !event.has_payload() {
            return Err(Error::Format {
                reason: "first event header fails validation",
            });
        }
        if event.header.type_code != FormatDescription::TYPE_CODE {
            return Err(Error::Format {
                reason: "first event is not a format description",
            });
        }
        let fde = FormatDescription::decode(&event)?;
        if fde.format_version != BINLOG_VERSION {
            return Err(Error::UnsupportedVersion {
                version: fde.format_version,
            });
        }
        Ok(event)
    }
}
