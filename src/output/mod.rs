//! Where finished strips go.

/// Strip download sinks.
pub mod sink;
