use std::fmt;

use crate::{
    capture::provider::CapturedImage, composite::compositor::StripImage,
    foundation::core::ShotIndex,
};

/// How a preview was reached. Decides what "keep" does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PreviewOrigin {
    /// Normal progression through the four shots.
    #[default]
    Forward,
    /// Re-opened from the review screen to patch one shot.
    FromReview,
}

/// Visible countdown value, always at least `1`.
///
/// There is no resting "zero": the tick that would take the count to zero is the shutter tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Countdown(pub u8);

impl Countdown {
    /// Value after one tick, or `None` when the count reaches zero and the tick should capture.
    pub fn tick(self) -> Option<Self> {
        (self.0 > 1).then(|| Self(self.0 - 1))
    }

    /// Number shown to the user.
    pub fn remaining(self) -> u8 {
        self.0
    }
}

/// Mutually exclusive session phases.
///
/// A pending capture only exists inside [`SessionState::Previewing`] and a strip only inside
/// [`SessionState::Composited`], so neither can outlive its phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No frame chosen yet.
    FrameSelection,
    /// Camera feed shown for `shot`, optionally counting down.
    Live {
        /// Shot being captured.
        shot: ShotIndex,
        /// Active countdown, if a capture has been triggered.
        countdown: Option<Countdown>,
    },
    /// Captured but undecided image for `shot`.
    Previewing {
        /// Shot the image belongs to.
        shot: ShotIndex,
        /// Pending capture.
        image: CapturedImage,
        /// How the preview was reached.
        origin: PreviewOrigin,
    },
    /// All four shots are filled and shown for selection.
    Reviewing,
    /// Merged strip ready for download.
    Composited {
        /// The merged output.
        strip: StripImage,
    },
}

impl SessionState {
    /// Payload-free tag of this state.
    pub fn kind(&self) -> StateKind {
        match self {
            Self::FrameSelection => StateKind::FrameSelection,
            Self::Live { .. } => StateKind::Live,
            Self::Previewing { .. } => StateKind::Previewing,
            Self::Reviewing => StateKind::Reviewing,
            Self::Composited { .. } => StateKind::Composited,
        }
    }

    /// Shot being captured or previewed.
    pub fn shot(&self) -> Option<ShotIndex> {
        match self {
            Self::Live { shot, .. } | Self::Previewing { shot, .. } => Some(*shot),
            _ => None,
        }
    }
}

/// Tag of a [`SessionState`] without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateKind {
    /// See [`SessionState::FrameSelection`].
    FrameSelection,
    /// See [`SessionState::Live`].
    Live,
    /// See [`SessionState::Previewing`].
    Previewing,
    /// See [`SessionState::Reviewing`].
    Reviewing,
    /// See [`SessionState::Composited`].
    Composited,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FrameSelection => "frame-selection",
            Self::Live => "live",
            Self::Previewing => "previewing",
            Self::Reviewing => "reviewing",
            Self::Composited => "composited",
        };
        f.write_str(s)
    }
}

/// Result of invoking a session operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The operation ran and the session moved on.
    Applied,
    /// Not legal in the current state; nothing changed.
    Ignored,
    /// The operation ran but a collaborator failed. The session stays put and records the
    /// condition (see `capture_error` / `composite_error`).
    Failed,
}

impl Transition {
    /// Return `true` for [`Transition::Applied`].
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
