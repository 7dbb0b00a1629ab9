//! Unified exit codes for the scoresheet CLI.
//! These codes are part of the public contract; scripts depend on them.

pub const SUCCESS: i32 = 0;
pub const OPERATION_FAILED: i32 = 1; // Store read/write failed
pub const CONFIG_ERROR: i32 = 2; // Bad config or invalid arguments
