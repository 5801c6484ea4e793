use crate::foundation::color::Color;
use crate::layers::model::{EditorState, FontFamily, LayerPatch};

/// Named text style applied to the active layer in one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextPreset {
    pub name: &'static str,
    pub text_color: Color,
    pub outline_color: Color,
    pub font: FontFamily,
}

impl TextPreset {
    pub fn patch(&self) -> LayerPatch {
        LayerPatch {
            text_color: Some(self.text_color),
            outline_color: Some(self.outline_color),
            font: Some(self.font),
            ..LayerPatch::default()
        }
    }

    /// Look a preset up by name, ignoring case.
    pub fn by_name(name: &str) -> Option<&'static TextPreset> {
        TEXT_PRESETS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }
}

pub const TEXT_PRESETS: [TextPreset; 5] = [
    TextPreset {
        name: "Viral Red",
        text_color: Color::WHITE,
        outline_color: Color::rgb(0xff, 0x00, 0x00),
        font: FontFamily::BebasNeue,
    },
    TextPreset {
        name: "Neon Glow",
        text_color: Color::rgb(0x00, 0xff, 0xff),
        outline_color: Color::rgb(0x00, 0x00, 0xff),
        font: FontFamily::Montserrat,
    },
    TextPreset {
        name: "Clean White",
        text_color: Color::WHITE,
        outline_color: Color::BLACK,
        font: FontFamily::Inter,
    },
    TextPreset {
        name: "Gold Impact",
        text_color: Color::rgb(0xfa, 0xcc, 0x15),
        outline_color: Color::rgb(0x78, 0x35, 0x0f),
        font: FontFamily::Poppins,
    },
    TextPreset {
        name: "Nightmare",
        text_color: Color::rgb(0xef, 0x44, 0x44),
        outline_color: Color::BLACK,
        font: FontFamily::Montserrat,
    },
];

impl EditorState {
    /// Restyle the active layer with `preset`. No-op without a selection.
    pub fn apply_preset(&mut self, preset: &TextPreset) -> bool {
        self.update_active(&preset.patch())
    }
}
