use bytes::Buf;

use super::RawEvent;
use crate::error::{Error, Result};

/// Decoded payload views for the event kinds this crate understands.
/// Anything else is carried through as `Unrecognized` with its type code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedEntry {
    FormatDescription(FormatDescription),
    Query(Query),
    Rand(Rand),
    IntVar(IntVar),
    Rotate(Rotate),
    Xid(Xid),
    Unrecognized(u8),
}

fn expect_payload(event: &RawEvent, type_code: u8) -> Result<&[u8]> {
    if event.header.type_code != type_code {
        return Err(Error::TypeMismatch {
            expected: type_code,
            actual: event.header.type_code,
        });
    }
    event.payload().ok_or(Error::NoPayload)
}

fn check_len(payload: &[u8], needed: usize, what: &'static str) -> Result<()> {
    if payload.len() < needed {
        return Err(Error::Truncated {
            what,
            needed,
            len: payload.len(),
        });
    }
    Ok(())
}

/// The mandatory first event of every binlog. Declares the format version
/// the rest of the file is encoded with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatDescription {
    pub format_version: u16,
    pub server_version: String,
    pub create_timestamp: u32,
    pub header_len: u8,
}

impl FormatDescription {
    pub const TYPE_CODE: u8 = 15;
    const SERVER_VERSION_LEN: usize = 50;
    const FIXED_LEN: usize = 2 + Self::SERVER_VERSION_LEN + 4 + 1;

    pub fn decode(event: &RawEvent) -> Result<Self> {
        let payload = expect_payload(event, Self::TYPE_CODE)?;
        check_len(payload, Self::FIXED_LEN, "format description event")?;
        let mut buf = payload;
        let format_version = buf.get_u16_le();
        let mut version_bytes = [0u8; Self::SERVER_VERSION_LEN];
        buf.copy_to_slice(&mut version_bytes);
        // NUL-padded fixed-width string
        let end = version_bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(Self::SERVER_VERSION_LEN);
        Ok(Self {
            format_version,
            server_version: String::from_utf8_lossy(&version_bytes[..end]).into_owned(),
            create_timestamp: buf.get_u32_le(),
            header_len: buf.get_u8(),
        })
    }
}

/// A replicated statement. The fixed prefix is followed by the status
/// variable block (opaque here), the NUL-terminated database name, and the
/// statement text filling the rest of the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub thread_id: u32,
    pub query_time: u32,
    pub error_code: u16,
    pub database: String,
    pub statement: String,
}

impl Query {
    pub const TYPE_CODE: u8 = 2;
    const FIXED_LEN: usize = 4 + 4 + 1 + 2 + 2;

    pub fn decode(event: &RawEvent) -> Result<Self> {
        let payload = expect_payload(event, Self::TYPE_CODE)?;
        check_len(payload, Self::FIXED_LEN, "query event")?;
        let mut buf = payload;
        let thread_id = buf.get_u32_le();
        let query_time = buf.get_u32_le();
        let db_name_len = buf.get_u8() as usize;
        let error_code = buf.get_u16_le();
        let status_var_len = buf.get_u16_le() as usize;

        let db_start = Self::FIXED_LEN + status_var_len;
        let stmt_start = db_start + db_name_len + 1;
        check_len(payload, stmt_start, "query event")?;

        Ok(Self {
            thread_id,
            query_time,
            error_code,
            database: String::from_utf8_lossy(&payload[db_start..db_start + db_name_len])
                .into_owned(),
            statement: String::from_utf8_lossy(&payload[stmt_start..]).into_owned(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rand {
    pub seed_1: u64,
    pub seed_2: u64,
}

impl Rand {
    pub const TYPE_CODE: u8 = 13;

    pub fn decode(event: &RawEvent) -> Result<Self> {
        let payload = expect_payload(event, Self::TYPE_CODE)?;
        check_len(payload, 16, "rand event")?;
        let mut buf = payload;
        Ok(Self {
            seed_1: buf.get_u64_le(),
            seed_2: buf.get_u64_le(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntVar {
    pub kind: u8,
    pub value: u64,
}

impl IntVar {
    pub const TYPE_CODE: u8 = 5;

    pub fn decode(event: &RawEvent) -> Result<Self> {
        let payload = expect_payload(event, Self::TYPE_CODE)?;
        check_len(payload, 9, "intvar event")?;
        let mut buf = payload;
        Ok(Self {
            kind: buf.get_u8(),
            value: buf.get_u64_le(),
        })
    }
}

/// Log rotation marker. The tail of the payload is the name of the next
/// binlog file, not NUL-terminated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rotate {
    pub next_position: u64,
    pub next_file: String,
}

impl Rotate {
    pub const TYPE_CODE: u8 = 4;
    const FIXED_LEN: usize = 8;

    pub fn decode(event: &RawEvent) -> Result<Self> {
        let payload = expect_payload(event, Self::TYPE_CODE)?;
        check_len(payload, Self::FIXED_LEN, "rotate event")?;
        let mut buf = payload;
        Ok(Self {
            next_position: buf.get_u64_le(),
            next_file: String::from_utf8_lossy(&payload[Self::FIXED_LEN..]).into_owned(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Xid {
    pub id: u64,
}

impl Xid {
    pub const TYPE_CODE: u8 = 16;

    pub fn decode(event: &RawEvent) -> Result<Self> {
        let payload = expect_payload(event, Self::TYPE_CODE)?;
        check_len(payload, 8, "xid event")?;
        let mut buf = payload;
        Ok(Self { id: buf.get_u64_le() })
    }
}
