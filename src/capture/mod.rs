//! Still capture.
//!
//! The session asks a [`provider::CaptureProvider`] for one still per shot. Device acquisition
//! lives outside this crate; the built-in sources cover headless and file-driven use.

/// Capture trait and captured-image handle.
pub mod provider;
/// Built-in capture providers.
pub mod sources;
