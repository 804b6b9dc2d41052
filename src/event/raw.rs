use super::typed::{FormatDescription, IntVar, Query, Rand, Rotate, TypedEntry, Xid};
use super::{EventHeader, PayloadBuffer};
use crate::error::Result;

/// A decoded event: header plus its exclusively owned payload. The payload
/// is absent exactly when the header failed validation, so presence doubles
/// as the validity signal during resynchronization scans.
///
/// A default-constructed event (all header fields zero, no payload) is the
/// end-of-stream sentinel used by `Cursor`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    pub header: EventHeader,
    payload: Option<PayloadBuffer>,
}

impl RawEvent {
    pub(crate) fn new(header: EventHeader, payload: Option<PayloadBuffer>) -> Self {
        Self { header, payload }
    }

    #[inline]
    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_ref().map(PayloadBuffer::as_slice)
    }

    #[inline]
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.payload.is_none() && self.header == EventHeader::default()
    }

    /// Dispatch on the type code and decode the payload into a typed view.
    /// Type codes this crate does not model come back as `Unrecognized`.
    pub fn as_typed(&self) -> Result<TypedEntry> {
        match self.header.type_code {
            Query::TYPE_CODE => Query::decode(self).map(TypedEntry::Query),
            Rotate::TYPE_CODE => Rotate::decode(self).map(TypedEntry::Rotate),
            IntVar::TYPE_CODE => IntVar::decode(self).map(TypedEntry::IntVar),
            Rand::TYPE_CODE => Rand::decode(self).map(TypedEntry::Rand),
            FormatDescription::TYPE_CODE => {
                FormatDescription::decode(self).map(TypedEntry::FormatDescription)
            }
            Xid::TYPE_CODE => Xid::decode(self).map(TypedEntry::Xid),
            other => Ok(TypedEntry::Unrecognized(other)),
        }
    }
}
