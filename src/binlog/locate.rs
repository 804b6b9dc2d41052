use tracing::{debug, warn};

use super::file::Binlog;
use super::scan::Direction;
use crate::error::Result;
use crate::event::RawEvent;

impl Binlog {
    /// Converge on the event nearest `target` using nothing but the
    /// resynchronization scan: start at the middle of the file, compare
    /// timestamps, then step by a halving increment in whichever
    /// direction closes the gap.
    ///
    /// The result is the nearest *reachable* event along the convergence
    /// path, not a guaranteed global nearest neighbor. An exact timestamp
    /// hit stops immediately; a scan that runs off the file stops with
    /// nothing rather than keeping a match known to be on the wrong side.
    pub(crate) fn nearest_time(&mut self, target: u32) -> Result<Option<(u64, RawEvent)>> {
        let Some(file_size) = self.file_size() else {
            return Ok(None);
        };

        let mut offset = (file_size / 2) as i64;
        let mut increment = (file_size / 4) as i64;
        let mut direction = Direction::Forward;
        let mut last_found = None;

        while increment > 2 {
            let Some((found, event)) = self.nearest_offset(offset, direction)? else {
                warn!(target, "ran off the end of the file, no usable match");
                last_found = None;
                break;
            };

            let delta = event.header.timestamp as i64 - target as i64;
            debug!(target, found, delta, increment, ?direction, "convergence step");
            last_found = Some((found, event));

            if delta > 0 {
                direction = Direction::Backward;
            } else if delta < 0 {
                direction = Direction::Forward;
            } else {
                break;
            }

            offset += increment * direction.step();
            increment /= 2;
        }

        Ok(last_found)
    }
}
