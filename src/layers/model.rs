use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::Point;
use crate::foundation::error::ForgeError;
use crate::foundation::math::clamp_finite;

/// Smallest font size a layer may carry, in canvas pixels.
pub const MIN_FONT_SIZE: u32 = 40;
/// Largest font size a layer may carry, in canvas pixels.
pub const MAX_FONT_SIZE: u32 = 500;
pub const DEFAULT_FONT_SIZE: u32 = 120;

/// Vertical step applied to a new layer relative to the previous one (percent).
pub const STACK_STEP: f64 = 10.0;
/// New layers are never stacked below this vertical position (percent).
pub const STACK_LIMIT: f64 = 90.0;

/// Identifier of a [`TextLayer`], unique within one [`EditorState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

/// Closed set of font families the editor offers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    #[serde(rename = "Bebas Neue")]
    BebasNeue,
    #[serde(rename = "Montserrat")]
    Montserrat,
    #[serde(rename = "Poppins")]
    Poppins,
    #[serde(rename = "Inter")]
    Inter,
}

impl FontFamily {
    pub const ALL: [Self; 4] = [Self::BebasNeue, Self::Montserrat, Self::Poppins, Self::Inter];

    pub fn name(self) -> &'static str {
        match self {
            Self::BebasNeue => "Bebas Neue",
            Self::Montserrat => "Montserrat",
            Self::Poppins => "Poppins",
            Self::Inter => "Inter",
        }
    }

    /// Lowercase alphanumeric key used to match font file names ("bebasneue").
    pub(crate) fn file_key(self) -> String {
        self.name()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FontFamily {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|f| f.file_key() == key)
            .ok_or_else(|| ForgeError::validation(format!("unsupported font family \"{s}\"")))
    }
}

/// One positioned, styled text element overlaid on the base image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLayer {
    pub id: LayerId,
    pub text: String,
    pub font: FontFamily,
    pub text_color: Color,
    pub outline_color: Color,
    pub font_size: u32,
    /// Horizontal anchor, percent of canvas width.
    pub pos_x: f64,
    /// Vertical anchor, percent of canvas height.
    pub pos_y: f64,
}

impl TextLayer {
    fn with_defaults(id: LayerId, text: String) -> Self {
        Self {
            id,
            text,
            font: FontFamily::default(),
            text_color: Color::WHITE,
            outline_color: Color::BLACK,
            font_size: DEFAULT_FONT_SIZE,
            pos_x: 50.0,
            pos_y: 50.0,
        }
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.pos_x, self.pos_y)
    }

    /// Whitespace-only layers stay in the list but never paint.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn apply(&mut self, patch: &LayerPatch) {
        if let Some(text) = &patch.text {
            self.text.clone_from(text);
        }
        if let Some(font) = patch.font {
            self.font = font;
        }
        if let Some(c) = patch.text_color {
            self.text_color = c;
        }
        if let Some(c) = patch.outline_color {
            self.outline_color = c;
        }
        if let Some(size) = patch.font_size {
            self.font_size = clamp_font_size(size);
        }
        if let Some(x) = patch.pos_x.and_then(|v| clamp_finite(v, 0.0, 100.0)) {
            self.pos_x = x;
        }
        if let Some(y) = patch.pos_y.and_then(|v| clamp_finite(v, 0.0, 100.0)) {
            self.pos_y = y;
        }
    }
}

pub fn clamp_font_size(size: i64) -> u32 {
    size.clamp(i64::from(MIN_FONT_SIZE), i64::from(MAX_FONT_SIZE)) as u32
}

/// Partial update for a [`TextLayer`]; `None` fields keep their prior value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerPatch {
    pub text: Option<String>,
    pub font: Option<FontFamily>,
    pub text_color: Option<Color>,
    pub outline_color: Option<Color>,
    pub font_size: Option<i64>,
    pub pos_x: Option<f64>,
    pub pos_y: Option<f64>,
}

impl LayerPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            pos_x: Some(x),
            pos_y: Some(y),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The editor's layer list plus selection state.
///
/// List order is paint order: later layers draw over earlier ones.
#[derive(Clone, Debug, Default)]
pub struct EditorState {
    layers: Vec<TextLayer>,
    active: Option<LayerId>,
    dragging: bool,
    next_id: u64,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> &[TextLayer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&TextLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn active_id(&self) -> Option<LayerId> {
        self.active
    }

    /// The active layer, if the active id still resolves.
    pub fn active_layer(&self) -> Option<&TextLayer> {
        self.active.and_then(|id| self.layer(id))
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub(crate) fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Append a layer with default styling and return its id.
    ///
    /// When a previous layer exists the new one is placed one step below it, capped at
    /// [`STACK_LIMIT`].
    pub fn add_layer(&mut self, text: impl Into<String>) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        let mut layer = TextLayer::with_defaults(id, text.into());
        if let Some(last) = self.layers.last() {
            layer.pos_y = STACK_LIMIT.min(last.pos_y + STACK_STEP);
        }
        tracing::debug!(%id, pos_y = layer.pos_y, "add layer");
        self.layers.push(layer);
        id
    }

    /// Remove a layer; clears the selection if it pointed at it. Absent ids are ignored.
    pub fn remove_layer(&mut self, id: LayerId) {
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        if self.layers.len() != before {
            tracing::debug!(%id, "remove layer");
        }
        if self.active == Some(id) {
            self.active = None;
            self.dragging = false;
        }
    }

    /// Merge `patch` into the layer with `id`. Returns whether a layer matched.
    pub fn update_layer(&mut self, id: LayerId, patch: &LayerPatch) -> bool {
        match self.layers.iter_mut().find(|l| l.id == id) {
            Some(layer) => {
                layer.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Merge `patch` into the active layer; no-op without a resolvable selection.
    pub fn update_active(&mut self, patch: &LayerPatch) -> bool {
        match self.active {
            Some(id) => self.update_layer(id, patch),
            None => false,
        }
    }

    /// Set or clear the selection. Unknown ids are stored as-is and behave as "nothing
    /// selected" for rendering and editing.
    pub fn set_active(&mut self, id: Option<LayerId>) {
        self.active = id;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/model.rs"]
mod tests;
