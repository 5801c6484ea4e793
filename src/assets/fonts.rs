use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{ForgeError, ForgeResult};
use crate::layers::model::FontFamily;

/// Advance estimate (in em) used to measure text when no face is loaded at all.
pub const FALLBACK_ADVANCE_EM: f64 = 0.6;

/// Font bytes for one family.
#[derive(Clone, Debug)]
pub struct FontFace {
    /// Family the bytes actually belong to (differs from the request on fallback).
    pub family: FontFamily,
    pub bytes: Arc<Vec<u8>>,
}

/// Font faces available to the renderer, keyed by editor font family.
///
/// Families without a face resolve to the fallback face (the first loaded family in
/// [`FontFamily::ALL`] order). An empty book renders no glyphs.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    faces: HashMap<FontFamily, Arc<Vec<u8>>>,
}

impl FontBook {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, family: FontFamily, bytes: Vec<u8>) {
        self.faces.insert(family, Arc::new(bytes));
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn contains(&self, family: FontFamily) -> bool {
        self.faces.contains_key(&family)
    }

    /// Face for `family`, or the fallback face.
    pub fn face(&self, family: FontFamily) -> Option<FontFace> {
        if let Some(bytes) = self.faces.get(&family) {
            return Some(FontFace {
                family,
                bytes: bytes.clone(),
            });
        }
        FontFamily::ALL.into_iter().find_map(|f| {
            self.faces.get(&f).map(|bytes| FontFace {
                family: f,
                bytes: bytes.clone(),
            })
        })
    }

    /// Load `.ttf`/`.otf` files whose names start with a family name.
    ///
    /// Matching ignores case, spaces, dashes and underscores (`BebasNeue-Regular.ttf`,
    /// `bebas_neue.otf`). When several files match a family, heavier styles win (black, then
    /// bold, then regular), and at equal weight an italic face beats the upright one.
    pub fn from_dir(dir: &Path) -> ForgeResult<Self> {
        let mut candidates: Vec<(String, std::path::PathBuf)> = Vec::new();
        let entries =
            std::fs::read_dir(dir).with_context(|| format!("read font dir '{}'", dir.display()))?;
        for entry in entries {
            let path = entry.context("read font dir entry")?.path();
            let is_font = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"));
            if !is_font {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let key: String = stem
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .map(|c| c.to_ascii_lowercase())
                .collect();
            candidates.push((key, path));
        }
        candidates.sort();

        let mut book = Self::empty();
        for family in FontFamily::ALL {
            let prefix = family.file_key();
            let best = candidates
                .iter()
                .filter(|(key, _)| key.starts_with(&prefix))
                .max_by_key(|(key, _)| {
                    (
                        style_rank(&key[prefix.len()..]),
                        std::cmp::Reverse(key.clone()),
                    )
                });
            if let Some((_, path)) = best {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("read font '{}'", path.display()))?;
                tracing::debug!(family = family.name(), path = %path.display(), "font loaded");
                book.insert(family, bytes);
            }
        }

        if book.is_empty() {
            tracing::warn!(dir = %dir.display(), "no usable fonts found");
        }
        Ok(book)
    }
}

/// Preference of a file-name style suffix: weight first, italic breaks ties.
fn style_rank(suffix: &str) -> u8 {
    let italic = suffix.contains("italic") || suffix.contains("oblique");
    let upright = suffix.replace("italic", "").replace("oblique", "");
    let weight = if upright.contains("black") || upright.contains("heavy") {
        3
    } else if upright.contains("bold") {
        2
    } else if upright.is_empty() || upright.contains("regular") {
        1
    } else {
        0
    };
    weight * 2 + u8::from(italic)
}

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Stateful helper for building single-line Parley layouts from registered font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    registered: HashMap<FontFamily, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    fn family_name(&mut self, face: &FontFace) -> ForgeResult<String> {
        if let Some(name) = self.registered.get(&face.family) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(face.bytes.as_ref().clone()),
            None,
        );
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ForgeError::validation("no font families registered from font bytes"))?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ForgeError::validation("registered font family has no name"))?
            .to_string();

        self.registered.insert(face.family, name.clone());
        Ok(name)
    }

    /// Shape `text` as one unwrapped line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        face: &FontFace,
        size_px: f32,
    ) -> ForgeResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ForgeError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_name(face)?;
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::default()));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
