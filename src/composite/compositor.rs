use std::{fmt, sync::Arc};

use image::imageops::FilterType;
use rayon::prelude::*;

use crate::{
    assets::{
        decode::{
            PreparedImage, decode_rgba8, decode_template, demultiply_image, encode_png,
            premultiply_image,
        },
        store::AssetSource,
    },
    capture::provider::CapturedImage,
    catalog::frames::Frame,
    composite::{blend::PremulCanvas, geometry::SlotGeometry},
    foundation::{
        core::{SHOT_COUNT, ShotIndex},
        error::{PhotostripError, PhotostripResult},
    },
};

/// Final merged strip, PNG-encoded. Never mutated after creation.
#[derive(Clone, PartialEq, Eq)]
pub struct StripImage {
    width: u32,
    height: u32,
    png: Arc<[u8]>,
}

impl StripImage {
    /// Encode straight-alpha pixels as a strip.
    pub fn from_rgba8(rgba: &image::RgbaImage) -> PhotostripResult<Self> {
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            png: encode_png(rgba)?.into(),
        })
    }

    /// Width in pixels (equals the frame template width).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels (equals the frame template height).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// PNG-encoded bytes.
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// Decode back into straight-alpha pixels.
    pub fn to_rgba8(&self) -> PhotostripResult<image::RgbaImage> {
        decode_rgba8(&self.png)
    }
}

impl fmt::Debug for StripImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("png_len", &self.png.len())
            .finish()
    }
}

/// Lays four captured photos onto a frame template.
///
/// Draw order is fixed: photos by ascending slot index, then the template over the whole canvas so
/// its opaque decoration hides photo edges outside the cutouts.
#[derive(Clone)]
pub struct Compositor {
    geometry: SlotGeometry,
    assets: Arc<dyn AssetSource>,
}

impl Compositor {
    /// Compositor reading templates from `assets`.
    pub fn new(geometry: SlotGeometry, assets: impl AssetSource + 'static) -> Self {
        Self {
            geometry,
            assets: Arc::new(assets),
        }
    }

    /// Slot layout in use.
    pub fn geometry(&self) -> SlotGeometry {
        self.geometry
    }

    /// Merge the four shots into `frame`.
    ///
    /// Fails with [`PhotostripError::CompositeFailed`] if any shot is empty or if the template or a
    /// shot cannot be loaded. The output is exactly the size of the template.
    #[tracing::instrument(skip(self, frame, shots), fields(frame_id = %frame.id))]
    pub fn composite(
        &self,
        frame: &Frame,
        shots: &[Option<CapturedImage>; SHOT_COUNT],
    ) -> PhotostripResult<StripImage> {
        let mut stills = Vec::with_capacity(SHOT_COUNT);
        for k in ShotIndex::all() {
            let still = shots[k.get()].as_ref().ok_or_else(|| {
                PhotostripError::composite_failed(format!("shot {k} is empty"))
            })?;
            stills.push(still);
        }

        // Template and photos load concurrently; photos are joined by slot index, not by
        // completion order.
        let (template, photos) = rayon::join(
            || self.load_template(frame),
            || {
                stills
                    .par_iter()
                    .enumerate()
                    .map(|(k, still)| {
                        decode_rgba8(still.bytes()).map_err(|e| {
                            PhotostripError::composite_failed(format!(
                                "decode shot {}: {e}",
                                k + 1
                            ))
                        })
                    })
                    .collect::<PhotostripResult<Vec<_>>>()
            },
        );
        let template = template?;
        let photos = photos?;

        let canvas = render_strip(&self.geometry, &template, &photos)?;
        let (width, height) = (canvas.width, canvas.height);
        let rgba = demultiply_image(width, height, canvas.data)?;
        let strip = StripImage::from_rgba8(&rgba)?;

        tracing::info!(width, height, bytes = strip.png.len(), "strip composited");
        Ok(strip)
    }

    fn load_template(&self, frame: &Frame) -> PhotostripResult<PreparedImage> {
        let bytes = self.assets.read(&frame.asset).map_err(|e| {
            PhotostripError::composite_failed(format!("load frame '{}': {e}", frame.asset))
        })?;
        decode_template(&frame.asset, &bytes).map_err(|e| {
            PhotostripError::composite_failed(format!("decode frame '{}': {e}", frame.asset))
        })
    }
}

impl fmt::Debug for Compositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compositor")
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

/// Rasterize a strip from an already-decoded template and photos.
///
/// Each photo is stretched to exactly fill its slot (aspect ratio is not preserved), drawn at the
/// slot origin rounded to the nearest pixel (`.5` rounds up), and the template is drawn last at
/// `(0, 0)` at native size.
pub fn render_strip(
    geometry: &SlotGeometry,
    template: &PreparedImage,
    photos: &[image::RgbaImage],
) -> PhotostripResult<PremulCanvas> {
    geometry.validate()?;
    if photos.len() != SHOT_COUNT {
        return Err(PhotostripError::composite_failed(format!(
            "expected {SHOT_COUNT} photos, got {}",
            photos.len()
        )));
    }

    let mut canvas = PremulCanvas::new(template.width, template.height)?;
    for k in ShotIndex::all() {
        let rect = geometry.slot_rect(template.width, k);
        let scaled = image::imageops::resize(
            &photos[k.get()],
            geometry.slot_width,
            geometry.slot_height,
            FilterType::Triangle,
        );
        let scaled = premultiply_image(scaled);
        canvas.draw_over(&scaled, rect.x0.round() as i64, rect.y0.round() as i64)?;
    }
    canvas.draw_over(template, 0, 0)?;
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/compositor.rs"]
mod tests;
