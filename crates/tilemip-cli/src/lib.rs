//! tilemip CLI library.
//!
//! Command implementations for the `tilemip` binary: building composites,
//! printing layout plans, and dumping the default configuration.

pub mod commands;
