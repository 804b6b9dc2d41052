use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open binlog: {0}")]
    Open(#[source] io::Error),

    #[error("binlog read failed: {0}")]
    Io(#[from] io::Error),

    #[error("not a binlog: {reason}")]
    Format { reason: &'static str },

    #[error("binlog declares format version {version}, only version 4 is supported")]
    UnsupportedVersion { version: u16 },

    #[error("event has type code {actual} where {expected} was required")]
    TypeMismatch { expected: u8, actual: u8 },

    #[error("{what} needs {needed} payload bytes, event carries {len}")]
    Truncated {
        what: &'static str,
        needed: usize,
        len: usize,
    },

    #[error("event failed validation and carries no payload")]
    NoPayload,
}
