use std::collections::BTreeMap;
use std::fmt;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use serde::{Serialize, Serializer};

/// Dashboard page background.
pub const BACKGROUND: Rgb = Rgb::new(0xFA, 0xF0, 0xDC);
/// Heading text colour.
pub const HEADING: Rgb = Rgb::new(0x50, 0x3D, 0x36);
/// Used for keys the colour map has never seen.
pub const FALLBACK: Rgb = Rgb::new(0x80, 0x80, 0x80);

// ---------------------------------------------------------------------------
// Rgb – renderer-independent colour carried by chart specs
// ---------------------------------------------------------------------------

/// An sRGB colour, serialised as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            Rgb::new(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Rgb
// ---------------------------------------------------------------------------

/// Maps the distinct values of a categorical column to distinct colours.
///
/// Built once over the whole dataset so a category keeps its colour no
/// matter which subset a chart shows.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Rgb>,
}

impl ColorMap {
    /// Assign palette colours to `keys` in iteration order. Repeated keys
    /// keep their first colour.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for key in keys {
            let key = key.as_ref();
            if !ordered.iter().any(|k| k == key) {
                ordered.push(key.to_string());
            }
        }
        let palette = generate_palette(ordered.len());
        ColorMap {
            mapping: ordered.into_iter().zip(palette).collect(),
        }
    }

    /// Look up the colour for a given key.
    pub fn color_for(&self, key: &str) -> Rgb {
        self.mapping.get(key).copied().unwrap_or(FALLBACK)
    }
}
