//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// Success - operation completed without errors
#[allow(dead_code)]
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Nothing is cached under the requested key
pub const NOT_DOCUMENTED: i32 = 2;

/// The supplied bytes are not a CustomResourceDefinition
pub const INVALID_CRD: i32 = 3;

/// The CRD decoded but no schema could be selected
pub const NO_SCHEMA: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;
