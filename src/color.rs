//! Color parsing, luminance and contrast utilities.
//!
//! This module provides functions for:
//! - Parsing various color formats (hex, `rgb()`, `hsl()`, X11 format)
//! - Resolving any [`ColorInput`] into a normalized [`Color`]
//! - Calculating relative luminance for accessibility
//! - Calculating the contrast ratio between two colors

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use regex::Regex;

/// Offset added to both luminances of a contrast ratio to account for flare.
const CONTRAST_FLARE: f64 = 0.05;

/// sRGB color with 8-bit red, green, and blue components.
///
/// Two colors are equal when their components are, whatever notation they
/// were parsed from: `#fff`, `rgb(255, 255, 255)` and `hsl(0, 0%, 100%)` all
/// resolve to [`Color::WHITE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl Color {
    /// Pure white, `#FFFFFF`.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure black, `#000000`.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure red, `#FF0000`.
    pub const RED: Self = Self::new(255, 0, 0);
    /// Pure green, `#00FF00`.
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Pure blue, `#0000FF`.
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Create a new color from individual components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Render the color as an upper-case `#RRGGBB` string.
    ///
    /// # Examples
    ///
    /// ```
    /// # use matchstyle::color::Color;
    /// assert_eq!(Color::new(255, 128, 0).hex(), "#FF8000");
    /// ```
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Relative luminance of this color, see [`luminance`].
    #[must_use]
    pub fn luminance(self) -> f64 {
        luminance(self)
    }

    /// Contrast ratio between this color and `other`, see [`contrast_ratio`].
    #[must_use]
    pub fn contrast_to(self, other: Self) -> f64 {
        contrast_ratio(self, other)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_color_str(s)
    }
}

/// Any color representation accepted at the API boundary.
///
/// Inputs are resolved once into a [`Color`] through [`parse_color`]; the
/// selection logic never sees anything else.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorInput {
    /// Any supported textual notation (hex, `rgb()`, `hsl()` or X11 `rgb:`).
    Text(String),
    /// Hex notation only, `#RGB` or `#RRGGBB` with an optional `#`.
    Hex(String),
    /// Integer RGB components, each expected in 0-255.
    Rgb {
        /// Red component
        r: i32,
        /// Green component
        g: i32,
        /// Blue component
        b: i32,
    },
    /// Hue in degrees (0-360), saturation and lightness in percent (0-100).
    Hsl {
        /// Hue in degrees
        h: f64,
        /// Saturation in percent
        s: f64,
        /// Lightness in percent
        l: f64,
    },
    /// An already parsed color.
    Parsed(Color),
}

impl fmt::Display for ColorInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Hex(s) => f.write_str(s),
            Self::Rgb { r, g, b } => write!(f, "rgb({r}, {g}, {b})"),
            Self::Hsl { h, s, l } => write!(f, "hsl({h}, {s}%, {l}%)"),
            Self::Parsed(color) => write!(f, "{color}"),
        }
    }
}

impl From<&str> for ColorInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for ColorInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Color> for ColorInput {
    fn from(color: Color) -> Self {
        Self::Parsed(color)
    }
}

/// Resolve any color representation into a [`Color`].
///
/// # Errors
///
/// Returns an error if the input is not a valid color: an unrecognized
/// textual notation, malformed hex digits, or a component out of range.
pub fn parse_color(input: &ColorInput) -> Result<Color> {
    match input {
        ColorInput::Text(s) => parse_color_str(s),
        ColorInput::Hex(s) => {
            parse_hex(s.trim()).with_context(|| format!("Invalid hex color: {s}"))
        }
        ColorInput::Rgb { r, g, b } => rgb_from_components(*r, *g, *b),
        ColorInput::Hsl { h, s, l } => hsl_to_rgb(*h, *s, *l),
        ColorInput::Parsed(color) => Ok(*color),
    }
}

/// Check whether an input resolves to a valid color.
#[must_use]
pub fn is_valid_color(input: &ColorInput) -> bool {
    parse_color(input).is_ok()
}

/// Parse a color string into a [`Color`].
///
/// Supported formats (case-insensitive, surrounding whitespace ignored):
/// - `#RGB` and `#RRGGBB`, with or without the leading `#`
/// - `rgb(R, G, B)` - CSS-style RGB function, components 0-255
/// - `hsl(H, S%, L%)` - CSS-style HSL function
/// - `rgb:RRRR/GGGG/BBBB` - X11 RGB format with hex values
/// - `rgba:RRRR/GGGG/BBBB/AAAA` - X11 RGBA format (alpha checked, then ignored)
///
/// # Arguments
///
/// * `s` - The color string to parse
///
/// # Returns
///
/// - `Ok(Color)` with each component in range 0-255
/// - `Err` if the string cannot be parsed as a valid color
///
/// # Errors
///
/// This function returns an error in the following cases:
/// - The string is not in a recognized color format
/// - A component value is invalid (e.g., non-hex characters, out of range)
/// - The hex string has an invalid length
///
/// # Examples
///
/// ```
/// # use matchstyle::color::{Color, parse_color_str};
/// assert_eq!(parse_color_str("#ff8000").unwrap(), Color::new(255, 128, 0));
/// assert_eq!(parse_color_str("rgb(255, 128, 0)").unwrap(), Color::new(255, 128, 0));
/// assert_eq!(parse_color_str("hsl(0, 0%, 100%)").unwrap(), Color::WHITE);
/// ```
pub fn parse_color_str(s: &str) -> Result<Color> {
    let s = s.trim();
    let lower = s.to_ascii_lowercase();

    if lower.starts_with("rgb:") || lower.starts_with("rgba:") {
        return parse_x11(&lower);
    }
    if lower.starts_with("rgb(") {
        return parse_rgb_function(&lower);
    }
    if lower.starts_with("hsl(") {
        return parse_hsl_function(&lower);
    }

    parse_hex(s).with_context(|| format!("Unrecognized color format: {s}"))
}

/// Parse `#RGB` / `#RRGGBB`, the `#` being optional.
fn parse_hex(s: &str) -> Result<Color> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Invalid hex digits: {digits}");
    }

    match digits.len() {
        3 => {
            let nibble = |i: usize| -> Result<u8> {
                let n = u8::from_str_radix(&digits[i..=i], 16)
                    .with_context(|| format!("Invalid hex digit: {}", &digits[i..=i]))?;
                Ok(n * 17)
            };
            Ok(Color::new(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16)
                .with_context(|| format!("Failed to parse red hex component: {}", &digits[0..2]))?;
            let g = u8::from_str_radix(&digits[2..4], 16).with_context(|| {
                format!("Failed to parse green hex component: {}", &digits[2..4])
            })?;
            let b = u8::from_str_radix(&digits[4..6], 16).with_context(|| {
                format!("Failed to parse blue hex component: {}", &digits[4..6])
            })?;
            Ok(Color::new(r, g, b))
        }
        n => bail!("Invalid hex length: expected 3 or 6 digits, got {n}"),
    }
}

/// Parse the X11 `rgb:` / `rgba:` notation.
fn parse_x11(s: &str) -> Result<Color> {
    let color_part = s
        .split_once(':')
        .ok_or_else(|| anyhow!("Invalid rgb: format - missing colon"))?
        .1;
    let parts: Vec<&str> = color_part.split('/').collect();

    if parts.len() != 3 && parts.len() != 4 {
        bail!(
            "Invalid rgb: format - expected 3 or 4 components, got {}",
            parts.len()
        );
    }

    let r = hex_to_u8(parts[0])
        .with_context(|| format!("Failed to parse red component: {}", parts[0]))?;
    let g = hex_to_u8(parts[1])
        .with_context(|| format!("Failed to parse green component: {}", parts[1]))?;
    let b = hex_to_u8(parts[2])
        .with_context(|| format!("Failed to parse blue component: {}", parts[2]))?;
    if let Some(alpha) = parts.get(3) {
        hex_to_u8(alpha).with_context(|| format!("Failed to parse alpha component: {alpha}"))?;
    }
    Ok(Color::new(r, g, b))
}

/// Parse the CSS `rgb(R, G, B)` notation.
fn parse_rgb_function(s: &str) -> Result<Color> {
    let re = Regex::new(r"^rgb\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)$")
        .context("Failed to compile RGB regex")?;
    let caps = re
        .captures(s)
        .ok_or_else(|| anyhow!("Invalid rgb() format: {s}"))?;

    let r = caps[1]
        .parse::<u8>()
        .with_context(|| format!("Failed to parse red component: {}", &caps[1]))?;
    let g = caps[2]
        .parse::<u8>()
        .with_context(|| format!("Failed to parse green component: {}", &caps[2]))?;
    let b = caps[3]
        .parse::<u8>()
        .with_context(|| format!("Failed to parse blue component: {}", &caps[3]))?;
    Ok(Color::new(r, g, b))
}

/// Parse the CSS `hsl(H, S%, L%)` notation.
fn parse_hsl_function(s: &str) -> Result<Color> {
    let re = Regex::new(
        r"^hsl\(\s*(\d+(?:\.\d+)?)\s*,\s*(\d+(?:\.\d+)?)%\s*,\s*(\d+(?:\.\d+)?)%\s*\)$",
    )
    .context("Failed to compile HSL regex")?;
    let caps = re
        .captures(s)
        .ok_or_else(|| anyhow!("Invalid hsl() format: {s}"))?;

    let h = caps[1]
        .parse::<f64>()
        .with_context(|| format!("Failed to parse hue: {}", &caps[1]))?;
    let sat = caps[2]
        .parse::<f64>()
        .with_context(|| format!("Failed to parse saturation: {}", &caps[2]))?;
    let l = caps[3]
        .parse::<f64>()
        .with_context(|| format!("Failed to parse lightness: {}", &caps[3]))?;
    hsl_to_rgb(h, sat, l)
}

/// Convert hex string to u8, handling different hex formats.
///
/// 2-digit values are taken as is, 4-digit values are scaled from the
/// 16-bit (0-65535) to the 8-bit (0-255) range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn hex_to_u8(hex: &str) -> Result<u8> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Invalid hex digits: {hex}");
    }
    let n = u32::from_str_radix(hex, 16).with_context(|| format!("Invalid hex string: {hex}"))?;

    match hex.len() {
        2 => Ok(n as u8),
        4 => Ok(((f64::from(n) / 65535.0) * 255.0).round() as u8),
        _ => Err(anyhow!(
            "Invalid hex length: expected 2 or 4 characters, got {}",
            hex.len()
        )),
    }
}

fn rgb_from_components(r: i32, g: i32, b: i32) -> Result<Color> {
    let channel = |name: &str, v: i32| -> Result<u8> {
        u8::try_from(v).with_context(|| format!("{name} component out of range: {v}"))
    };
    Ok(Color::new(
        channel("Red", r)?,
        channel("Green", g)?,
        channel("Blue", b)?,
    ))
}

/// Convert HSL to RGB using the CSS Color algorithm.
///
/// Hue is in degrees (0-360), saturation and lightness in percent (0-100).
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Result<Color> {
    if !(0.0..=360.0).contains(&h) {
        bail!("Hue out of range: {h}");
    }
    if !(0.0..=100.0).contains(&s) {
        bail!("Saturation out of range: {s}%");
    }
    if !(0.0..=100.0).contains(&l) {
        bail!("Lightness out of range: {l}%");
    }

    let s = s / 100.0;
    let l = l / 100.0;
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let sector = (h % 360.0) / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (r, g, b) = match sector.floor() as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let m = l - chroma / 2.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Ok(Color::new(channel(r), channel(g), channel(b)))
}

/// Calculate relative luminance of a color using the sRGB formula.
///
/// This implements the standard relative luminance calculation as defined by
/// the W3C Web Content Accessibility Guidelines (WCAG). The formula accounts
/// for the non-linear nature of human vision by first converting sRGB values
/// to linear RGB, then applying luminance coefficients.
///
/// # Returns
///
/// Relative luminance value between 0.0 (black) and 1.0 (white)
///
/// # Formula
///
/// L = 0.2126 × R + 0.7152 × G + 0.0722 × B
///
/// Where R, G, B are the linearized RGB values.
#[must_use]
pub fn luminance(color: Color) -> f64 {
    let r = f64::from(color.r) / 255.0;
    let g = f64::from(color.g) / 255.0;
    let b = f64::from(color.b) / 255.0;

    // Convert sRGB component to linear RGB
    let lin = |c: f64| -> f64 {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };

    0.2126 * lin(r) + 0.7152 * lin(g) + 0.0722 * lin(b)
}

/// Calculate the WCAG contrast ratio between two colors.
///
/// The ratio is `(L1 + 0.05) / (L2 + 0.05)` where `L1` is the luminance of
/// the lighter color. It is symmetric, equals exactly 1.0 for identical
/// colors and peaks at 21.0 for black on white.
///
/// # Arguments
///
/// * `a` - First color
/// * `b` - Second color, order does not matter
///
/// # Returns
///
/// Contrast ratio between 1.0 (identical luminance) and 21.0 (black on white)
///
/// # Examples
///
/// ```
/// # use matchstyle::color::{Color, contrast_ratio};
/// assert!((contrast_ratio(Color::BLACK, Color::WHITE) - 21.0).abs() < 1e-9);
/// assert_eq!(contrast_ratio(Color::RED, Color::RED), 1.0);
/// ```
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = luminance(a);
    let lb = luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + CONTRAST_FLARE) / (darker + CONTRAST_FLARE)
}
