//! The capture session state machine.
//!
//! A [`machine::Session`] walks frame selection, four capture/decide cycles, review and strip
//! creation. Countdown ticks are driven by a [`timer::TickScheduler`] owned by the session.

/// Session aggregate and its operations.
pub mod machine;
/// Committed shot slots.
pub mod shots;
/// State and transition types.
pub mod state;
/// Countdown tick scheduling.
pub mod timer;
