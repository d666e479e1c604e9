//! Shared process-level helpers used by the workspace binaries.

pub mod utils;
