pub mod binlog;
pub mod error;
pub mod event;
pub mod render;
