//! File-backed configuration, read once at startup.

pub mod oracle;
pub mod tables;
