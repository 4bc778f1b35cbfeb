use std::{io::Cursor, sync::Arc};

use anyhow::Context;

use crate::{
    assets::store::AssetRef,
    foundation::error::{PhotostripError, PhotostripResult},
};

// Avoid pathological allocations from hostile or broken SVG headers.
const MAX_SVG_DIM: u32 = 16_384;

/// Raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> PhotostripResult<PreparedImage> {
    let rgba = decode_rgba8(bytes)?;
    Ok(premultiply_image(rgba))
}

/// Decode encoded image bytes into straight-alpha RGBA8.
pub fn decode_rgba8(bytes: &[u8]) -> PhotostripResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Parse an SVG document and rasterize it at its intrinsic size.
pub fn rasterize_svg(bytes: &[u8]) -> PhotostripResult<PreparedImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;

    let size = tree.size();
    let width = svg_dim_px(size.width())?;
    let height = svg_dim_px(size.height())?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PhotostripError::validation("failed to allocate svg pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    // tiny-skia already stores premultiplied RGBA8.
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.data().to_vec()),
    })
}

/// Decode a frame template, dispatching on the asset's file type.
pub fn decode_template(asset: &AssetRef, bytes: &[u8]) -> PhotostripResult<PreparedImage> {
    if asset.is_svg() {
        rasterize_svg(bytes)
    } else {
        decode_image(bytes)
    }
}

/// Encode straight-alpha RGBA8 as PNG.
pub fn encode_png(img: &image::RgbaImage) -> PhotostripResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Convert a straight-alpha image into a [`PreparedImage`].
pub fn premultiply_image(rgba: image::RgbaImage) -> PreparedImage {
    let (width, height) = rgba.dimensions();
    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    }
}

/// Convert premultiplied pixels back into a straight-alpha image.
pub fn demultiply_image(
    width: u32,
    height: u32,
    mut premul: Vec<u8>,
) -> PhotostripResult<image::RgbaImage> {
    demultiply_rgba8_in_place(&mut premul);
    image::RgbaImage::from_raw(width, height, premul).ok_or_else(|| {
        PhotostripError::validation(format!(
            "pixel buffer does not match {width}x{height} rgba8"
        ))
    })
}

fn svg_dim_px(v: f32) -> PhotostripResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(PhotostripError::validation("svg has invalid width/height"));
    }
    let px = (v.ceil() as u32).max(1);
    if px > MAX_SVG_DIM {
        return Err(PhotostripError::validation(format!(
            "svg raster size too large: {px} (max {MAX_SVG_DIM})"
        )));
    }
    Ok(px)
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
