use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::ForgeError;

/// Straight-alpha sRGB color.
///
/// Parses CSS-like notations: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)`, `hsl(..)`
/// and `hsla(..)`. Serializes back to lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from channels with a float alpha in `0..=1`.
    pub fn with_alpha_f(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self::rgba(r, g, b, unit_to_u8(alpha))
    }

    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s).map_err(ForgeError::validation)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => parse_color(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_color(s: &str) -> Result<Color, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    let (func, args) = lower
        .split_once('(')
        .and_then(|(f, rest)| rest.strip_suffix(')').map(|a| (f.trim(), a)))
        .ok_or_else(|| format!("unrecognized color \"{s}\""))?;
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();

    match (func, parts.len()) {
        ("rgb", 3) | ("rgba", 4) => {
            let ch = |i: usize| -> Result<u8, String> {
                let v: f64 = parts[i]
                    .parse()
                    .map_err(|_| format!("invalid channel \"{}\"", parts[i]))?;
                Ok(v.clamp(0.0, 255.0).round() as u8)
            };
            let a = if parts.len() == 4 {
                parse_unit(parts[3])?
            } else {
                1.0
            };
            Ok(Color::with_alpha_f(ch(0)?, ch(1)?, ch(2)?, a))
        }
        ("hsl", 3) | ("hsla", 4) => {
            let h: f64 = parts[0]
                .trim_end_matches("deg")
                .parse()
                .map_err(|_| format!("invalid hue \"{}\"", parts[0]))?;
            let s = parse_percent(parts[1])?;
            let l = parse_percent(parts[2])?;
            let a = if parts.len() == 4 {
                parse_unit(parts[3])?
            } else {
                1.0
            };
            Ok(hsla_to_rgba(h, s, l, a))
        }
        _ => Err(format!("unrecognized color \"{s}\"")),
    }
}

fn parse_hex(s: &str) -> Result<Color, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }

    match s.len() {
        3 => {
            let r = hex_byte(&s[0..1].repeat(2))?;
            let g = hex_byte(&s[1..2].repeat(2))?;
            let b = hex_byte(&s[2..3].repeat(2))?;
            Ok(Color::rgb(r, g, b))
        }
        6 => Ok(Color::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Color::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

fn parse_unit(s: &str) -> Result<f64, String> {
    if s.ends_with('%') {
        return parse_percent(s);
    }
    s.parse::<f64>()
        .map(|v| v.clamp(0.0, 1.0))
        .map_err(|_| format!("invalid alpha \"{s}\""))
}

fn parse_percent(s: &str) -> Result<f64, String> {
    let raw = s.strip_suffix('%').unwrap_or(s);
    raw.parse::<f64>()
        .map(|v| (v / 100.0).clamp(0.0, 1.0))
        .map_err(|_| format!("invalid percentage \"{s}\""))
}

fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> Color {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;

    if s == 0.0 {
        let v = unit_to_u8(l);
        return Color::with_alpha_f(v, v, v, a);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Color::with_alpha_f(
        unit_to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        unit_to_u8(hue_to_rgb(p, q, h)),
        unit_to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        a,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
