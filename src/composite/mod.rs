//! Strip compositing: four photos stretched into fixed slots, frame template drawn on top.

/// Premultiplied RGBA8 canvas and source-over blending.
pub mod blend;
/// Compositor and strip output.
pub mod compositor;
/// Slot layout.
pub mod geometry;
