use crate::{
    capture::provider::CapturedImage,
    foundation::core::{SHOT_COUNT, ShotIndex},
};

/// The four shot slots of a session. Length is fixed by the type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Shots {
    slots: [Option<CapturedImage>; SHOT_COUNT],
}

impl Shots {
    /// Four empty slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed image for `shot`, if any.
    pub fn get(&self, shot: ShotIndex) -> Option<&CapturedImage> {
        self.slots[shot.get()].as_ref()
    }

    /// Replace the committed image for `shot`.
    pub(crate) fn commit(&mut self, shot: ShotIndex, image: CapturedImage) {
        self.slots[shot.get()] = Some(image);
    }

    /// Empty every slot.
    pub(crate) fn clear(&mut self) {
        self.slots = Default::default();
    }

    /// Number of filled slots.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Return `true` when all four slots are filled.
    pub fn is_complete(&self) -> bool {
        self.filled() == SHOT_COUNT
    }

    /// Slots by ascending shot index.
    pub fn as_array(&self) -> &[Option<CapturedImage>; SHOT_COUNT] {
        &self.slots
    }

    /// `(index, slot)` pairs by ascending shot index.
    pub fn iter(&self) -> impl Iterator<Item = (ShotIndex, Option<&CapturedImage>)> {
        ShotIndex::all().map(move |k| (k, self.get(k)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/shots.rs"]
mod tests;
