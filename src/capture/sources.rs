use std::{collections::VecDeque, path::PathBuf};

use crate::{
    assets::decode::{decode_rgba8, encode_png},
    capture::provider::{CaptureProvider, CaptureUnavailable, CapturedImage},
};

// Distinct, saturated colours so consecutive synthetic stills are easy to tell apart.
const SYNTHETIC_PALETTE: [[u8; 3]; 6] = [
    [231, 76, 60],
    [46, 204, 113],
    [52, 152, 219],
    [241, 196, 15],
    [155, 89, 182],
    [26, 188, 156],
];

/// Deterministic stand-in camera producing solid-colour PNG stills.
///
/// The colour cycles through a fixed palette by request number, so a session driven by this
/// provider always composites to the same pixels.
#[derive(Clone, Debug)]
pub struct SyntheticCapture {
    width: u32,
    height: u32,
    requests: usize,
}

impl SyntheticCapture {
    /// Stills of `width`x`height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            requests: 0,
        }
    }

    /// Number of stills handed out so far.
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl CaptureProvider for SyntheticCapture {
    fn request_still(&mut self) -> Result<CapturedImage, CaptureUnavailable> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptureUnavailable::new("synthetic camera has a zero-sized sensor"));
        }
        let [r, g, b] = SYNTHETIC_PALETTE[self.requests % SYNTHETIC_PALETTE.len()];
        self.requests += 1;

        let img =
            image::RgbaImage::from_pixel(self.width, self.height, image::Rgba([r, g, b, 255]));
        let png = encode_png(&img).map_err(|e| CaptureUnavailable::new(e.to_string()))?;
        Ok(CapturedImage::from_encoded(png))
    }
}

/// Plays back image files in order, one per request.
///
/// Runs dry after the last file; unreadable or undecodable files are reported as unavailable.
#[derive(Clone, Debug)]
pub struct DirectoryCapture {
    files: VecDeque<PathBuf>,
}

impl DirectoryCapture {
    /// Play back `files` in the given order.
    pub fn new(files: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            files: files.into_iter().collect(),
        }
    }

    /// Files not yet handed out.
    pub fn remaining(&self) -> usize {
        self.files.len()
    }
}

impl CaptureProvider for DirectoryCapture {
    fn request_still(&mut self) -> Result<CapturedImage, CaptureUnavailable> {
        let path = self
            .files
            .pop_front()
            .ok_or_else(|| CaptureUnavailable::new("no more capture files"))?;
        let bytes = std::fs::read(&path).map_err(|e| {
            CaptureUnavailable::new(format!("unable to read '{}': {e}", path.display()))
        })?;
        if image::guess_format(&bytes).is_err() {
            return Err(CaptureUnavailable::new(format!(
                "'{}' is not a supported image",
                path.display()
            )));
        }
        Ok(CapturedImage::from_encoded(bytes))
    }
}

/// Mirrors every still horizontally, like a user-facing camera preview.
#[derive(Clone, Debug)]
pub struct Mirrored<P> {
    inner: P,
}

impl<P> Mirrored<P> {
    /// Wrap `inner`.
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    /// Unwrap the inner provider.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: CaptureProvider> CaptureProvider for Mirrored<P> {
    fn request_still(&mut self) -> Result<CapturedImage, CaptureUnavailable> {
        let still = self.inner.request_still()?;
        let rgba =
            decode_rgba8(still.bytes()).map_err(|e| CaptureUnavailable::new(e.to_string()))?;
        let flipped = image::imageops::flip_horizontal(&rgba);
        let png = encode_png(&flipped).map_err(|e| CaptureUnavailable::new(e.to_string()))?;
        Ok(CapturedImage::from_encoded(png))
    }
}

/// A camera that is never available, e.g. after a permission denial.
#[derive(Clone, Debug)]
pub struct UnavailableCapture {
    reason: String,
}

impl UnavailableCapture {
    /// Always fail with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl CaptureProvider for UnavailableCapture {
    fn request_still(&mut self) -> Result<CapturedImage, CaptureUnavailable> {
        Err(CaptureUnavailable::new(self.reason.clone()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/sources.rs"]
mod tests;
