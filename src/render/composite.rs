use crate::foundation::error::{ForgeError, ForgeResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Axis-aligned pixel rectangle inside a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Integer cover of `[x0, x1) x [y0, y1)` clipped to a `width` x `height` surface.
    ///
    /// Returns `None` when nothing of it lies on the surface.
    pub fn clipped(x0: f64, y0: f64, x1: f64, y1: f64, width: u32, height: u32) -> Option<Self> {
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return None;
        }
        let left = x0.floor().clamp(0.0, f64::from(width)) as u32;
        let top = y0.floor().clamp(0.0, f64::from(height)) as u32;
        let right = x1.ceil().clamp(0.0, f64::from(width)) as u32;
        let bottom = y1.ceil().clamp(0.0, f64::from(height)) as u32;
        (right > left && bottom > top).then_some(Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        })
    }

    pub fn byte_len(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);

    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> ForgeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ForgeError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Copy `region` out of a `width`-wide surface into a tightly packed buffer.
pub fn extract_region(src: &[u8], width: u32, region: Region) -> ForgeResult<Vec<u8>> {
    let row = region.width as usize * 4;
    let mut out = Vec::with_capacity(region.byte_len());
    for y in region.y..region.y + region.height {
        let start = (y as usize * width as usize + region.x as usize) * 4;
        let line = src
            .get(start..start + row)
            .ok_or_else(|| ForgeError::render("region lies outside the surface"))?;
        out.extend_from_slice(line);
    }
    Ok(out)
}

/// Premultiplied `over` of a packed region buffer onto a `width`-wide surface.
pub fn over_region_in_place(
    dst: &mut [u8],
    width: u32,
    src: &[u8],
    region: Region,
) -> ForgeResult<()> {
    if src.len() != region.byte_len() {
        return Err(ForgeError::render("region buffer size mismatch"));
    }
    let row = region.width as usize * 4;
    for (ry, src_line) in src.chunks_exact(row).enumerate() {
        let start = ((region.y as usize + ry) * width as usize + region.x as usize) * 4;
        let dst_line = dst
            .get_mut(start..start + row)
            .ok_or_else(|| ForgeError::render("region lies outside the surface"))?;
        over_in_place(dst_line, src_line)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
