//! Theme configuration
//!
//! An explicit configuration object plus a pure shade-derivation step.
//! The UI shell injects the derived variants wherever it renders; the
//! core never touches global style state.

use serde::{Deserialize, Serialize};
use shared::{PosError, PosResult};

/// Brand color triple (hex strings)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#10b981".to_string(),
            secondary: "#06b6d4".to_string(),
            accent: "#f59e0b".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    fn rgba(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }

    fn scaled(self, factor: f64) -> Rgb {
        Rgb {
            r: (self.r as f64 * factor).round() as u8,
            g: (self.g as f64 * factor).round() as u8,
            b: (self.b as f64 * factor).round() as u8,
        }
    }
}

/// Parse a `#rrggbb` hex color (leading `#` optional)
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(Rgb {
        r: u8::from_str_radix(&hex[0..2], 16).ok()?,
        g: u8::from_str_radix(&hex[2..4], 16).ok()?,
        b: u8::from_str_radix(&hex[4..6], 16).ok()?,
    })
}

/// Derived shade variants for one base color
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorShades {
    /// The base hex value as given
    pub base: String,
    /// "r, g, b" triple for composing custom alphas
    pub rgb: String,
    pub alpha_50: String,
    pub alpha_100: String,
    pub alpha_200: String,
    /// Darkened variant (x0.9)
    pub shade_600: String,
    /// Darkened variant (x0.8)
    pub shade_700: String,
}

/// Derive the shade set for one hex color
pub fn derive_color_shades(hex: &str) -> Option<ColorShades> {
    let rgb = parse_hex(hex)?;
    Some(ColorShades {
        base: hex.to_string(),
        rgb: format!("{}, {}, {}", rgb.r, rgb.g, rgb.b),
        alpha_50: rgb.rgba(0.05),
        alpha_100: rgb.rgba(0.1),
        alpha_200: rgb.rgba(0.2),
        shade_600: rgb.scaled(0.9).rgba(1.0),
        shade_700: rgb.scaled(0.8).rgba(1.0),
    })
}

/// Shade sets for the full triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeShades {
    pub primary: ColorShades,
    pub secondary: ColorShades,
    pub accent: ColorShades,
}

/// Pure mapping from a color triple to its derived variants
pub fn derive_shades(colors: &ThemeColors) -> PosResult<ThemeShades> {
    let shade = |name: &str, hex: &str| {
        derive_color_shades(hex)
            .ok_or_else(|| PosError::validation(format!("invalid {name} color: {hex}")))
    };
    Ok(ThemeShades {
        primary: shade("primary", &colors.primary)?,
        secondary: shade("secondary", &colors.secondary)?,
        accent: shade("accent", &colors.accent)?,
    })
}
