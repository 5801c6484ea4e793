use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::Canvas;
use crate::foundation::error::{ForgeError, ForgeResult};

/// Decoded base image, resampled once to the canvas it will be composited on.
///
/// Replaced wholesale when a new image arrives; never mutated after decode.
#[derive(Clone, Debug)]
pub struct BaseImage {
    /// Width of the decoded source, in pixels.
    pub source_width: u32,
    /// Height of the decoded source, in pixels.
    pub source_height: u32,
    /// Size of `rgba8_premul`.
    pub canvas: Canvas,
    /// Canvas-sized pixels, row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl BaseImage {
    /// Decode encoded image bytes and aspect-fill them onto the canonical canvas.
    pub fn decode(bytes: &[u8]) -> ForgeResult<Self> {
        Self::decode_for(bytes, Canvas::CANONICAL)
    }

    /// Decode encoded image bytes and aspect-fill them onto `canvas`.
    ///
    /// The source is scaled to cover the canvas and center-cropped on the overflowing axis, so a
    /// 16:9 source maps edge to edge onto a 16:9 canvas.
    #[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn decode_for(bytes: &[u8], canvas: Canvas) -> ForgeResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(ForgeError::validation("canvas must be non-empty"));
        }
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        let (source_width, source_height) = (dyn_img.width(), dyn_img.height());
        if source_width == 0 || source_height == 0 {
            return Err(ForgeError::validation("decoded image is empty"));
        }

        let (cx, cy, cw, ch) = cover_crop(source_width, source_height, canvas);
        let filled = dyn_img.crop_imm(cx, cy, cw, ch).resize_exact(
            canvas.width,
            canvas.height,
            image::imageops::FilterType::Triangle,
        );

        let mut rgba8_premul = filled.to_rgba8().into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);

        Ok(Self {
            source_width,
            source_height,
            canvas,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }
}

/// Source-space crop rectangle `(x, y, w, h)` whose aspect ratio matches `canvas`.
pub(crate) fn cover_crop(src_w: u32, src_h: u32, canvas: Canvas) -> (u32, u32, u32, u32) {
    let src_w64 = u64::from(src_w);
    let src_h64 = u64::from(src_h);
    let cw = u64::from(canvas.width);
    let ch = u64::from(canvas.height);

    // Compare src_w/src_h against cw/ch without floats.
    if src_w64 * ch > src_h64 * cw {
        let w = ((src_h64 * cw) / ch).max(1) as u32;
        ((src_w - w) / 2, 0, w, src_h)
    } else {
        let h = ((src_w64 * ch) / cw).max(1) as u32;
        (0, (src_h - h) / 2, src_w, h)
    }
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

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
