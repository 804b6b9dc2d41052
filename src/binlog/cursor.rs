use tracing::warn;

use super::file::Binlog;
use crate::error::Result;
use crate::event::RawEvent;

/// Forward-only traversal of valid events. Two states: positioned on a
/// decoded event, or at the terminal End sentinel (an all-zero event,
/// equal to `RawEvent::default()`). Each step decodes a fresh owned
/// snapshot; nothing references stored state.
pub struct Cursor<'a> {
    log: &'a mut Binlog,
    current: RawEvent,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(log: &'a mut Binlog, current: RawEvent) -> Self {
        Self { log, current }
    }

    #[inline]
    pub fn current(&self) -> &RawEvent {
        &self.current
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.current.is_end()
    }

    /// Move to the event chained after the current one. End of stream or
    /// an invalid header collapses the cursor to End, which is terminal;
    /// a read failure also collapses but surfaces the error.
    pub fn advance(&mut self) -> Result<()> {
        if self.current.is_end() {
            return Ok(());
        }
        let next = self.current.header.next_offset();
        self.current = RawEvent::default();
        match self.log.read_event(next)? {
            Some(event) if event.has_payload() => {
                self.current = event;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl Iterator for Cursor<'_> {
    type Item = RawEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_end() {
            return None;
        }
        let out = self.current.clone();
        if let Err(err) = self.advance() {
            warn!(%err, "stopping traversal on read failure");
        }
        Some(out)
    }
}
