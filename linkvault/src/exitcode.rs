/// Standard Unix exit codes for the linkvault CLI.
///
/// These codes follow the BSD convention where possible.
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Operation failed, e.g. the bookmark backend rejected a bulk call
pub const FAILURE: i32 = 1;

/// Command line usage error - invalid arguments, missing required parameters, etc.
pub const USAGE: i32 = 64;

/// Operation was cancelled by user (declined confirmation or Ctrl+C)
pub const CANCEL: i32 = 130;
