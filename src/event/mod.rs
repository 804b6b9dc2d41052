pub mod header;
pub mod payload;
pub mod raw;
pub mod typed;

pub use header::EventHeader;
pub use payload::PayloadBuffer;
pub use raw::RawEvent;
pub use typed::{FormatDescription, IntVar, Query, Rand, Rotate, TypedEntry, Xid};
