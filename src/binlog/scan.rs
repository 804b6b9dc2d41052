use tracing::debug;

use super::file::Binlog;
use crate::error::Result;
use crate::event::{EventHeader, RawEvent};

/// How far a resynchronization scan will step before giving up. Bounds
/// the worst case of "seek landed in a huge run of garbage" to a fast
/// failure instead of a crawl over the whole file.
pub(crate) const MAX_RETRIES: u32 = 102_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub(crate) fn step(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

impl Binlog {
    /// Step one byte at a time from `start` until a header validates,
    /// returning the offset and the decoded event. Gives up when the
    /// candidate leaves `[0, file_size - 19]`, when the retry budget is
    /// spent, or when a header read comes up short.
    ///
    /// Sequential-mode logs have no cached size to bound the scan, so
    /// they always report `None` here.
    pub(crate) fn nearest_offset(
        &mut self,
        start: i64,
        direction: Direction,
    ) -> Result<Option<(u64, RawEvent)>> {
        let Some(file_size) = self.file_size() else {
            return Ok(None);
        };
        let last = file_size as i64 - EventHeader::SIZE as i64;

        let mut offset = start;
        let mut attempts = 0u32;
        while attempts < MAX_RETRIES && offset >= 0 && offset <= last {
            match self.read_event(offset as u64)? {
                None => return Ok(None),
                Some(event) if event.has_payload() => {
                    debug!(start, offset, attempts, "resynchronized on a valid event");
                    return Ok(Some((offset as u64, event)));
                }
                Some(_) => {
                    offset += direction.step();
                    attempts += 1;
                }
            }
        }
        debug!(start, offset, attempts, "scan exhausted without a valid event");
        Ok(None)
    }
}
