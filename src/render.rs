//! Human-readable event formatting. Presentation only: everything here
//! consumes decoded events through the public accessors and an explicit
//! verbosity value.

use std::fmt;

use chrono::DateTime;

use crate::event::{RawEvent, TypedEntry};

/// How much of an event to print. `Brief` stops after offset, timestamp
/// and type; `NoStatement` prints everything except statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Full,
    NoStatement,
    Brief,
}

pub const EVENT_TYPE_NAMES: [&str; 27] = [
    "UNKNOWN_EVENT",
    "START_EVENT_V3",
    "QUERY_EVENT",
    "STOP_EVENT",
    "ROTATE_EVENT",
    "INTVAR_EVENT",
    "LOAD_EVENT",
    "SLAVE_EVENT",
    "CREATE_FILE_EVENT",
    "APPEND_BLOCK_EVENT",
    "EXEC_LOAD_EVENT",
    "DELETE_FILE_EVENT",
    "NEW_LOAD_EVENT",
    "RAND_EVENT",
    "USER_VAR_EVENT",
    "FORMAT_DESCRIPTION_EVENT",
    "XID_EVENT",
    "BEGIN_LOAD_QUERY_EVENT",
    "EXECUTE_LOAD_QUERY_EVENT",
    "TABLE_MAP_EVENT",
    "PRE_GA_WRITE_ROWS_EVENT",
    "PRE_GA_DELETE_ROWS_EVENT",
    "WRITE_ROWS_EVENT",
    "UPDATE_ROWS_EVENT",
    "DELETE_ROWS_EVENT",
    "INCIDENT_EVENT",
    "HEARTBEAT_LOG_EVENT",
];

pub const INTVAR_TYPE_NAMES: [&str; 3] = ["", "LAST_INSERT_ID_EVENT", "INSERT_ID_EVENT"];

pub const FLAG_NAMES: [&str; 16] = [
    "LOG_EVENT_BINLOG_IN_USE",
    "LOG_EVENT_FORCED_ROTATE",
    "LOG_EVENT_THREAD_SPECIFIC",
    "LOG_EVENT_SUPPRESS_USE",
    "LOG_EVENT_UPDATE_TABLE_MAP_VERSION",
    "LOG_EVENT_ARTIFICIAL",
    "LOG_EVENT_RELAY_LOG",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
];

pub fn event_type_name(code: u8) -> &'static str {
    EVENT_TYPE_NAMES
        .get(code as usize)
        .copied()
        .unwrap_or("UNKNOWN_EVENT")
}

fn civil_time(timestamp: u32) -> String {
    match DateTime::from_timestamp(timestamp as i64, 0) {
        Some(t) => t.format("%a %b %e %H:%M:%S %Y").to_string(),
        None => "?".to_string(),
    }
}

/// Renders one event the way the query tool prints it.
pub struct DisplayEvent<'a> {
    event: &'a RawEvent,
    verbosity: Verbosity,
}

impl<'a> DisplayEvent<'a> {
    pub fn new(event: &'a RawEvent, verbosity: Verbosity) -> Self {
        Self { event, verbosity }
    }

    fn fmt_typed(&self, f: &mut fmt::Formatter<'_>, entry: &TypedEntry) -> fmt::Result {
        match entry {
            TypedEntry::Query(q) => {
                writeln!(f, "thread id:          {}", q.thread_id)?;
                writeln!(f, "query time (s):     {}", q.query_time)?;
                if q.error_code == 0 {
                    writeln!(f, "error code:         {}", q.error_code)?;
                } else {
                    writeln!(f, "ERROR CODE:         {}", q.error_code)?;
                }
                writeln!(f, "db_name:            {}", q.database)?;
                writeln!(f, "statement length:   {}", q.statement.len())?;
                if self.verbosity == Verbosity::Full {
                    writeln!(f, "statement:          {}", q.statement)?;
                }
            }
            TypedEntry::Rotate(r) => {
                writeln!(f, "next log position:  {}", r.next_position)?;
                writeln!(f, "next file name:     {}", r.next_file)?;
            }
            TypedEntry::IntVar(i) => {
                let name = INTVAR_TYPE_NAMES.get(i.kind as usize).copied().unwrap_or("");
                writeln!(f, "variable type:      {}", name)?;
                writeln!(f, "value:              {}", i.value)?;
            }
            TypedEntry::Rand(r) => {
                writeln!(f, "seed 1:             {}", r.seed_1)?;
                writeln!(f, "seed 2:             {}", r.seed_2)?;
            }
            TypedEntry::FormatDescription(d) => {
                writeln!(f, "binlog version:     {}", d.format_version)?;
                writeln!(f, "server version:     {}", d.server_version)?;
            }
            TypedEntry::Xid(x) => {
                writeln!(f, "xid id:             {}", x.id)?;
            }
            TypedEntry::Unrecognized(_) => {}
        }
        Ok(())
    }
}

impl fmt::Display for DisplayEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.event.header;
        writeln!(f, "BYTE OFFSET {}", h.file_offset)?;
        writeln!(f, "------------------------")?;
        writeln!(
            f,
            "timestamp:          {} = {}",
            h.timestamp,
            civil_time(h.timestamp)
        )?;
        writeln!(f, "type_code:          {}", event_type_name(h.type_code))?;
        if self.verbosity == Verbosity::Brief {
            return Ok(());
        }
        writeln!(f, "server id:          {}", h.server_id)?;
        writeln!(f, "length:             {}", h.length)?;
        writeln!(f, "next pos:           {}", h.next_position)?;
        write!(f, "flags:              ")?;
        for bit in (0..16).rev() {
            write!(f, "{}", (h.flags >> bit) & 1)?;
        }
        writeln!(f)?;
        for bit in (0..16).rev() {
            if (h.flags >> bit) & 1 == 1 && !FLAG_NAMES[bit].is_empty() {
                writeln!(f, "                        {}", FLAG_NAMES[bit])?;
            }
        }
        if !self.event.has_payload() {
            return Ok(());
        }
        match self.event.as_typed() {
            Ok(entry) => self.fmt_typed(f, &entry),
            Err(_) => Ok(()),
        }
    }
}
