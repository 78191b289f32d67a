//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. They are part of the
//! shell contract; scripts depend on them staying stable.
//!
//! # Exit Code Ranges
//!
//! | Range | Domain    | Description                              |
//! |-------|-----------|------------------------------------------|
//! | 0     | Universal | Success                                  |
//! | 1     | Universal | General error (unspecified)              |
//! | 2     | Universal | CLI usage error (bad args)               |
//! | 3-9   | clean     | Clean-run codes                          |
//!
//! Finding duplicates is NOT an error: a completed pass exits 0 no matter
//! how many rows it dropped.

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - the pass completed.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Clean (3-9)
// =============================================================================

/// Input file missing or unreadable. Detected before the pass runs.
pub const EXIT_CLEAN_SOURCE: u8 = 3;

/// Input could not be parsed as delimited text.
pub const EXIT_CLEAN_PARSE: u8 = 4;

/// Output, dropped, or report file could not be written.
pub const EXIT_CLEAN_SINK: u8 = 5;

/// Invalid job config (TOML parse or validation failure).
pub const EXIT_CLEAN_INVALID_CONFIG: u8 = 6;
