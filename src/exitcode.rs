//! Process exit codes, following BSD `sysexits.h`.

/// Bad invocation
pub const USAGE: i32 = 64;
/// Malformed dataset or a tree that cannot be built from it
pub const DATAERR: i32 = 65;
/// Dataset file or directory missing
pub const NOINPUT: i32 = 66;
pub const IOERR: i32 = 74;
/// Unreadable settings file
pub const CONFIG: i32 = 78;
