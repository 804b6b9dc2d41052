use std::fs::File;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use super::cursor::Cursor;
use super::reader::EventReader;
use super::scan::Direction;
use crate::error::{Error, Result};
use crate::event::RawEvent;

/// An open binlog. Owns exactly one file handle, the cached file size
/// (path-opened logs only) and the two timestamp bounds that gate the
/// validity check: the first event's timestamp below, the wall clock at
/// open time above.
#[derive(Debug)]
pub struct Binlog {
    reader: EventReader,
    file_size: Option<u64>,
    min_timestamp: u32,
    max_timestamp: u32,
    first_event: RawEvent,
}

impl Binlog {
    /// Open a binlog from a path. Fails unless the file starts with a
    /// valid version-4 format description event.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(Error::Open)?;
        let file_size = file.metadata().map_err(Error::Open)?.len();
        Self::from_reader(EventReader::seekable(file), Some(file_size))
    }

    /// Adopt an already-positioned descriptor. The stream is consumed
    /// sequentially and never seeked, so offset- and time-based location
    /// are unavailable; traversal from the first event still works.
    pub fn adopt(file: File) -> Result<Self> {
        Self::from_reader(EventReader::sequential(file), None)
    }

    fn from_reader(mut reader: EventReader, file_size: Option<u64>) -> Result<Self> {
        let max_timestamp = unix_now();
        // The FDE is validated against a wide-open lower bound; its own
        // timestamp then becomes the floor for every later event.
        let first_event = reader.read_format_description(0, max_timestamp)?;
        Ok(Self {
            reader,
            file_size,
            min_timestamp: first_event.header.timestamp,
            max_timestamp,
            first_event,
        })
    }

    #[inline]
    pub fn file_size(&self) -> Option<u64> {
        self.file_size
    }

    #[inline]
    pub fn min_timestamp(&self) -> u32 {
        self.min_timestamp
    }

    #[inline]
    pub fn max_timestamp(&self) -> u32 {
        self.max_timestamp
    }

    #[inline]
    pub fn first_event(&self) -> &RawEvent {
        &self.first_event
    }

    pub(crate) fn read_event(&mut self, offset: u64) -> Result<Option<RawEvent>> {
        self.reader
            .read_event(offset, self.min_timestamp, self.max_timestamp)
    }

    /// Byte offset of the first valid event at or after `offset`, or
    /// `None` when the scan runs out of file or out of retry budget.
    pub fn locate_by_offset(&mut self, offset: u64) -> Result<Option<u64>> {
        let start = i64::try_from(offset).unwrap_or(i64::MAX);
        Ok(self
            .nearest_offset(start, Direction::Forward)?
            .map(|(found, _)| found))
    }

    /// Byte offset of the event nearest `timestamp`, located by a
    /// halving-step convergence over resynchronization scans. Approximate
    /// by design; `None` when the search runs off the file.
    pub fn locate_by_time(&mut self, timestamp: u32) -> Result<Option<u64>> {
        Ok(self.nearest_time(timestamp)?.map(|(found, _)| found))
    }

    /// A cursor positioned on the first valid event at or after `offset`.
    /// Offset zero positions on the format description event without a
    /// scan, which keeps it usable on adopted sequential streams.
    pub fn cursor_from(&mut self, offset: u64) -> Result<Cursor<'_>> {
        let current = if offset == 0 {
            self.first_event.clone()
        } else {
            match self.nearest_offset(i64::try_from(offset).unwrap_or(i64::MAX), Direction::Forward)? {
                Some((_, event)) => event,
                None => RawEvent::default(),
            }
        };
        Ok(Cursor::new(self, current))
    }
}

fn unix_now() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
        .min(u32::MAX as u64) as u32
}
