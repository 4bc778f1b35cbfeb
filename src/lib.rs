//! Photostrip drives a four-shot photo booth session and composites the shots into a strip.
//!
//! The public API is session-oriented:
//!
//! - Load a [`BoothConfig`] and pick a [`Frame`] from its [`FrameCatalog`]
//! - Create a [`Session`] with a [`TickScheduler`] for the countdown
//! - Feed it user actions and expired ticks; it asks a [`CaptureProvider`] for stills
//! - Merge the four shots with a [`Compositor`] and hand the [`StripImage`] to an [`OutputSink`]
//!
//! Compositing works on premultiplied RGBA8 and is deterministic: photos are stretched into their
//! slots in ascending order, then the frame template is drawn over them.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod assets;
pub mod capture;
pub mod catalog;
pub mod composite;
pub mod config;
pub mod output;
pub mod session;

pub use crate::foundation::core::{Rect, SHOT_COUNT, ShotIndex};
pub use crate::foundation::error::{PhotostripError, PhotostripResult};

pub use crate::assets::decode::{
    PreparedImage, decode_image, decode_rgba8, decode_template, encode_png, rasterize_svg,
};
pub use crate::assets::store::{
    AssetRef, AssetSource, DirAssetSource, MemoryAssetSource, normalize_rel_path,
};
pub use crate::capture::provider::{CaptureProvider, CaptureUnavailable, CapturedImage};
pub use crate::capture::sources::{
    DirectoryCapture, Mirrored, SyntheticCapture, UnavailableCapture,
};
pub use crate::catalog::frames::{Frame, FrameCatalog, FrameId};
pub use crate::composite::blend::{PremulCanvas, over};
pub use crate::composite::compositor::{Compositor, StripImage, render_strip};
pub use crate::composite::geometry::SlotGeometry;
pub use crate::config::booth::BoothConfig;
pub use crate::output::sink::{DirSink, InMemorySink, OutputSink};
pub use crate::session::machine::{Session, SessionOpts};
pub use crate::session::shots::Shots;
pub use crate::session::state::{Countdown, PreviewOrigin, SessionState, StateKind, Transition};
pub use crate::session::timer::{ManualScheduler, TickId, TickScheduler};
