//! Booth-wide configuration.

/// Booth configuration file.
pub mod booth;
