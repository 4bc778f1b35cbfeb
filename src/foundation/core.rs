use crate::foundation::error::{PhotostripError, PhotostripResult};

pub use kurbo::Rect;

/// Number of shots in every session. Fixed; never configurable.
pub const SHOT_COUNT: usize = 4;

/// Ordinal of one of the four shots, always in `0..SHOT_COUNT`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct ShotIndex(u8);

impl ShotIndex {
    /// First shot of a session.
    pub const FIRST: Self = Self(0);
    /// Last shot of a session; keeping it ends the forward flow.
    pub const LAST: Self = Self(SHOT_COUNT as u8 - 1);

    /// Create a validated shot index.
    pub fn new(index: usize) -> PhotostripResult<Self> {
        if index >= SHOT_COUNT {
            return Err(PhotostripError::validation(format!(
                "shot index {index} out of range 0..{SHOT_COUNT}"
            )));
        }
        Ok(Self(index as u8))
    }

    /// Zero-based position, usable for indexing.
    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    /// The following shot, or `None` for [`ShotIndex::LAST`].
    pub fn next(self) -> Option<Self> {
        if self.is_last() {
            None
        } else {
            Some(Self(self.0 + 1))
        }
    }

    /// Return `true` for the final shot.
    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// All shot indices in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..SHOT_COUNT as u8).map(Self)
    }
}

impl TryFrom<u8> for ShotIndex {
    type Error = PhotostripError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(usize::from(value))
    }
}

impl From<ShotIndex> for u8 {
    fn from(value: ShotIndex) -> Self {
        value.0
    }
}

impl std::fmt::Display for ShotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {SHOT_COUNT}", self.0 + 1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
