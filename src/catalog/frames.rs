use std::fmt;

use crate::{
    assets::store::AssetRef,
    foundation::error::{PhotostripError, PhotostripResult},
};

/// Stable identifier of a catalog frame.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct FrameId(pub String);

impl FrameId {
    /// Identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FrameId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A selectable decorative template. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Catalog identifier.
    pub id: FrameId,
    /// Display name.
    pub name: String,
    /// Template image with transparent slot cutouts.
    pub asset: AssetRef,
}

/// Ordered, immutable list of selectable frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCatalog {
    frames: Vec<Frame>,
}

impl FrameCatalog {
    /// Build a catalog, rejecting empty lists and duplicate ids.
    pub fn new(frames: Vec<Frame>) -> PhotostripResult<Self> {
        if frames.is_empty() {
            return Err(PhotostripError::validation(
                "frame catalog must contain at least one frame",
            ));
        }
        for (i, frame) in frames.iter().enumerate() {
            if frame.id.as_str().is_empty() {
                return Err(PhotostripError::validation("frame id must be non-empty"));
            }
            if frames[..i].iter().any(|f| f.id == frame.id) {
                return Err(PhotostripError::validation(format!(
                    "duplicate frame id '{}'",
                    frame.id
                )));
            }
        }
        Ok(Self { frames })
    }

    /// The three stock frames shipped with the booth.
    pub fn builtin() -> Self {
        Self {
            frames: builtin_frames(),
        }
    }

    /// Look up a frame by id.
    pub fn get(&self, id: &FrameId) -> Option<&Frame> {
        self.frames.iter().find(|f| &f.id == id)
    }

    /// Frames in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; catalogs are never empty.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

pub(crate) fn builtin_frames() -> Vec<Frame> {
    (1..=3)
        .map(|n| Frame {
            id: FrameId(n.to_string()),
            name: format!("Frame {n}"),
            asset: AssetRef(format!("frame/{n}.png")),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/frames.rs"]
mod tests;
