use crate::{
    assets::decode::PreparedImage,
    foundation::error::{PhotostripError, PhotostripResult},
};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over: `src + dst * (1 - src.a)`.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let inv = 255u16 - u16::from(sa);
            let mut out = [0u8; 4];
            for i in 0..4 {
                out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
            }
            out
        }
    }
}

/// Transparent premultiplied RGBA8 drawing surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PremulCanvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8.
    pub data: Vec<u8>,
}

impl PremulCanvas {
    /// Fully transparent canvas.
    pub fn new(width: u32, height: u32) -> PhotostripResult<Self> {
        if width == 0 || height == 0 {
            return Err(PhotostripError::validation("canvas width/height must be > 0"));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| PhotostripError::validation("canvas size overflows"))?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Composite `src` over the canvas with its top-left corner at `(x, y)`.
    ///
    /// Parts of `src` falling outside the canvas are clipped.
    pub fn draw_over(&mut self, src: &PreparedImage, x: i64, y: i64) -> PhotostripResult<()> {
        let expected = (src.width as usize) * (src.height as usize) * 4;
        if src.rgba8_premul.len() != expected {
            return Err(PhotostripError::validation(
                "draw_over expects a tightly packed rgba8 source",
            ));
        }

        let (cw, ch) = (i64::from(self.width), i64::from(self.height));
        let (sw, sh) = (i64::from(src.width), i64::from(src.height));
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + sw).min(cw);
        let y1 = (y + sh).min(ch);
        if x0 >= x1 || y0 >= y1 {
            return Ok(());
        }

        let span = ((x1 - x0) * 4) as usize;
        for dy in y0..y1 {
            let sy = dy - y;
            let s_off = ((sy * sw + (x0 - x)) * 4) as usize;
            let d_off = ((dy * cw + x0) * 4) as usize;
            let s_row = &src.rgba8_premul[s_off..s_off + span];
            let d_row = &mut self.data[d_off..d_off + span];
            for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
                let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
                d.copy_from_slice(&out);
            }
        }
        Ok(())
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/composite/blend.rs"]
mod tests;
