//! Process exit codes
//!
//! Rejected operations and usage errors share code 2 (the same code clap
//! uses for argument errors); the rest follow BSD sysexits.h.

/// Successful termination
pub const OK: i32 = 0;

/// Validation or lookup failure, or command line usage error
pub const USAGE: i32 = 2;

/// Data format error (unreadable gradebook file)
pub const DATAERR: i32 = 65;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
