use crate::foundation::{
    core::{Rect, SHOT_COUNT, ShotIndex},
    error::{PhotostripError, PhotostripResult},
};

/// Fixed slot layout shared by every frame template.
///
/// Slots are horizontally centred on the canvas and stacked top to bottom with a constant gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SlotGeometry {
    /// Width of every slot in pixels.
    pub slot_width: u32,
    /// Height of every slot in pixels.
    pub slot_height: u32,
    /// Distance from the top of the canvas to the first slot.
    pub first_slot_top: u32,
    /// Vertical gap between consecutive slots.
    pub slot_gap: u32,
}

impl SlotGeometry {
    /// Geometry of the stock frame templates.
    pub const REFERENCE: Self = Self {
        slot_width: 572,
        slot_height: 383,
        first_slot_top: 130,
        slot_gap: 35,
    };

    /// Reject layouts that cannot hold a photo.
    pub fn validate(&self) -> PhotostripResult<()> {
        if self.slot_width == 0 || self.slot_height == 0 {
            return Err(PhotostripError::validation("slot width/height must be > 0"));
        }
        Ok(())
    }

    /// Top-left corner of slot `k` on a canvas `canvas_width` pixels wide.
    ///
    /// Exact: `((W - slot_width) / 2, first_slot_top + k * (slot_height + slot_gap))`.
    pub fn slot_origin(&self, canvas_width: u32, k: ShotIndex) -> (f64, f64) {
        let x = (f64::from(canvas_width) - f64::from(self.slot_width)) / 2.0;
        let pitch = f64::from(self.slot_height) + f64::from(self.slot_gap);
        let y = f64::from(self.first_slot_top) + (k.get() as f64) * pitch;
        (x, y)
    }

    /// Rectangle covered by slot `k`.
    pub fn slot_rect(&self, canvas_width: u32, k: ShotIndex) -> Rect {
        let (x, y) = self.slot_origin(canvas_width, k);
        Rect::new(
            x,
            y,
            x + f64::from(self.slot_width),
            y + f64::from(self.slot_height),
        )
    }

    /// All four slot rectangles, by ascending shot index.
    pub fn slot_rects(&self, canvas_width: u32) -> [Rect; SHOT_COUNT] {
        let mut out = [Rect::ZERO; SHOT_COUNT];
        for k in ShotIndex::all() {
            out[k.get()] = self.slot_rect(canvas_width, k);
        }
        out
    }
}

impl Default for SlotGeometry {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/geometry.rs"]
mod tests;
