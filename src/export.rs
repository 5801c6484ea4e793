use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::foundation::error::{ForgeError, ForgeResult};
use crate::render::backend::FrameRGBA;

/// PNG produced by an export, plus the file name it should be saved under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedPng {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportedPng {
    /// Write the PNG into `dir` under its file name and return the full path.
    pub fn save_in(&self, dir: &Path) -> ForgeResult<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(path)
    }
}

/// `thumbnail-<unix millis>.png`
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("thumbnail-{}.png", now.timestamp_millis())
}

/// Encode a frame as PNG (straight alpha RGBA8).
pub fn encode_png(frame: &FrameRGBA) -> ForgeResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(ForgeError::render(format!(
            "frame buffer is {} bytes, expected {expected}",
            frame.data.len()
        )));
    }

    let mut rgba = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut rgba);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
        .ok_or_else(|| ForgeError::render("frame does not fit an rgba image"))?;

    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(out)
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/export.rs"]
mod tests;
