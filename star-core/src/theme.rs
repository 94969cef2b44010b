use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) sRGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with alpha `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

/// Colours the attractor can cycle through.
pub const ATTRACTOR_PALETTE: [Color; 5] = [
    Color::rgb(0x34, 0x98, 0xdb),
    Color::rgb(0x2e, 0xcc, 0x71),
    Color::rgb(0x9b, 0x59, 0xb6),
    Color::rgb(0xe6, 0x7e, 0x22),
    Color::rgb(0xe7, 0x4c, 0x3c),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn background(self) -> Color {
        match self {
            Theme::Light => Color::WHITE,
            Theme::Dark => Color::rgb(0x12, 0x12, 0x12),
        }
    }

    /// Faint colour of the connecting star lines.
    pub fn line(self) -> Color {
        match self {
            Theme::Light => Color::BLACK.with_alpha(0.2),
            Theme::Dark => Color::WHITE.with_alpha(0.2),
        }
    }

    pub fn label(self) -> Color {
        match self {
            Theme::Light => Color::BLACK,
            Theme::Dark => Color::rgb(0xf0, 0xf0, 0xf0),
        }
    }

    /// Colour of the upcoming target's label.
    pub fn highlight(self) -> Color {
        Color::RED
    }
}
