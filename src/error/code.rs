//! Result codes and error classification.

/// Integer result codes shared with the room toolkit.
///
/// `0` is success by convention of the toolkit; any other value from the
/// toolkit or backend is forwarded untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode;

impl ErrorCode {
    /// The call succeeded.
    pub const SUCCESS: i32 = 0;
    /// A local precondition failed before any external call was made.
    pub const FAILED: i32 = -1;
}

/// Where an error originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// SDK not initialized, no active room, missing identifier.
    Precondition,
    /// Failure reported by the toolkit or backend.
    Remote,
    Configuration,
    /// Reading a config file failed.
    Io,
}
