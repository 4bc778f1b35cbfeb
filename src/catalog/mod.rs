//! Frame catalog.

/// Selectable frame templates.
pub mod frames;
