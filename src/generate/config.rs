use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::{ForgeError, ForgeResult};

/// Closed enum whose variants serialize and display as human-readable names.
///
/// Parsing accepts the display name or the variant name, ignoring case and punctuation.
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = ForgeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = loose_key(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| loose_key(v.name()) == key || loose_key(&format!("{v:?}")) == key)
                    .ok_or_else(|| {
                        ForgeError::validation(format!(
                            "unknown {} '{}'",
                            stringify!($name),
                            s
                        ))
                    })
            }
        }
    };
}

fn loose_key(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

named_enum! {
    /// Content category of the video.
    pub enum Niche {
        Gaming => "Gaming",
        Tech => "Tech & Gadgets",
        Finance => "Finance & Money",
        Lifestyle => "Lifestyle & Vlog",
        Education => "Education & Tutorials",
        Entertainment => "Entertainment & Movies",
        Fitness => "Fitness & Health",
        Cooking => "Cooking & Food",
        Music => "Music & Performance",
        Travel => "Travel & Adventure",
        Beauty => "Beauty & Fashion",
        Automotive => "Automotive/Cars",
        Diy => "DIY & Crafting",
        News => "News & Politics",
    }
}

named_enum! {
    pub enum VisualStyle {
        Cinematic => "Cinematic",
        Minimalist => "Minimalist",
        HighContrast => "High Contrast",
        Cartoon => "Cartoon/Vector",
        ThreeD => "3D Render",
        Glowing => "Glowing/Neon",
        Vintage => "Vintage/Retro",
        Realistic => "Hyper-Realistic",
    }
}

named_enum! {
    pub enum EmotionalVibe {
        Excited => "Excited/Hype",
        Shocked => "Shocked/Surprised",
        Mysterious => "Mysterious/Dark",
        Professional => "Professional/Trustworthy",
        Angry => "Angry/Intense",
        Happy => "Happy/Warm",
        Sad => "Sad/Emotional",
    }
}

/// Number of topic words used for the seeded text layer.
pub const SEED_WORDS: usize = 3;

/// Parameters of one insights request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    pub niche: Niche,
    /// Video topic or title; must be non-blank to generate.
    pub topic: String,
    pub style: VisualStyle,
    pub vibe: EmotionalVibe,
    pub primary_color: Color,
    pub accent_color: Color,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            niche: Niche::Gaming,
            topic: String::new(),
            style: VisualStyle::Cinematic,
            vibe: EmotionalVibe::Excited,
            primary_color: Color::rgb(0x25, 0x63, 0xeb),
            accent_color: Color::rgb(0xf5, 0x9e, 0x0b),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> ForgeResult<()> {
        if self.topic.trim().is_empty() {
            return Err(ForgeError::config_validation(
                "Please enter a video topic or title.",
            ));
        }
        Ok(())
    }

    /// Text for the layer seeded after the first successful generation.
    pub fn seed_text(&self) -> String {
        self.topic
            .split_whitespace()
            .take(SEED_WORDS)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/config.rs"]
mod tests;
