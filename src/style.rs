//! Style declaration and contrast-based style selection.
//!
//! A style is a named color. Given a background color, [`select`] picks the
//! declared style whose color has the highest contrast ratio against it.
//! When nothing is declared, the built-in `basic-light` / `basic-dark` pair
//! is used, and when the background is missing or invalid the result is the
//! [`no_style`] sentinel.

use crate::color::{Color, ColorInput, contrast_ratio, parse_color};
use crate::debug;
use crate::error::StyleError;

/// Prefix of the class reflecting the matched style, e.g. `matched-dark`.
pub const MATCHED_CLASS_PREFIX: &str = "matched-";

/// Name of the sentinel style used when there is no valid background.
pub const NO_STYLE: &str = "no-style";

/// Name of the light default style.
pub const BASIC_LIGHT: &str = "basic-light";

/// Name of the dark default style.
pub const BASIC_DARK: &str = "basic-dark";

/// Contrast reported by the sentinel style.
const NO_STYLE_CONTRAST: f64 = 21.0;

/// Ordered declaration of named candidate styles.
///
/// Names are unique. Iteration follows declaration order, which decides
/// which candidate wins when several share the highest contrast.
///
/// # Example
///
/// ```rust
/// use matchstyle::{Color, Styles};
///
/// let styles = Styles::new()
///     .with("light", Color::WHITE)
///     .with("accent", "hsl(40, 100%, 50%)")
///     .with("dark", "#000");
/// assert_eq!(styles.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Styles {
    entries: Vec<(String, ColorInput)>,
}

impl Styles {
    /// Creates an empty declaration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a style, builder style. See [`Styles::insert`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, color: impl Into<ColorInput>) -> Self {
        self.insert(name, color);
        self
    }

    /// Declares a style.
    ///
    /// Declaring a name twice replaces the previous value in place, keeping
    /// its original position. The replaced value is returned.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        color: impl Into<ColorInput>,
    ) -> Option<ColorInput> {
        let name = name.into();
        let color = color.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, value)) => Some(std::mem::replace(value, color)),
            None => {
                self.entries.push((name, color));
                None
            }
        }
    }

    /// Returns the value declared for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColorInput> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Number of declared styles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorInput)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for Styles
where
    K: Into<String>,
    V: Into<ColorInput>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut styles = Self::new();
        for (name, color) in iter {
            styles.insert(name, color);
        }
        styles
    }
}

/// The selected style: its name, its color, and the contrast ratio of that
/// color against the background it was selected for.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    name: String,
    color: Color,
    contrast: f64,
}

impl ResolvedStyle {
    /// Name of the style, as declared.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color of the style.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Contrast ratio against the background, in [1, 21].
    #[must_use]
    pub fn contrast(&self) -> f64 {
        self.contrast
    }

    /// Class reflecting this style on a host, e.g. `matched-dark`.
    #[must_use]
    pub fn class_name(&self) -> String {
        class_name(&self.name)
    }

    /// Whether this is the [`no_style`] sentinel.
    #[must_use]
    pub fn is_no_style(&self) -> bool {
        self.name == NO_STYLE
    }
}

/// Class name for a style name: `matched-<name>`.
#[must_use]
pub fn class_name(name: &str) -> String {
    format!("{MATCHED_CLASS_PREFIX}{name}")
}

/// The built-in two-style declaration: white `basic-light`, then black
/// `basic-dark`.
#[must_use]
pub fn default_styles() -> Styles {
    Styles::new()
        .with(BASIC_LIGHT, Color::WHITE)
        .with(BASIC_DARK, Color::BLACK)
}

/// The sentinel returned when no valid background is available.
#[must_use]
pub fn no_style() -> ResolvedStyle {
    ResolvedStyle {
        name: NO_STYLE.to_owned(),
        color: Color::BLACK,
        contrast: NO_STYLE_CONTRAST,
    }
}

/// Check that every declared style resolves to a valid color.
///
/// # Errors
///
/// Returns [`StyleError::InvalidStyle`] naming the first entry, in
/// declaration order, whose value is not a valid color.
pub fn validate(styles: &Styles) -> Result<(), StyleError> {
    resolve(styles).map(|_| ())
}

/// Select the style with the highest contrast against `background`.
///
/// The declaration is validated first, so an invalid style fails even when
/// the background is missing. An empty or absent declaration falls back to
/// [`default_styles`]. An absent or invalid background yields [`no_style`].
///
/// # Arguments
///
/// * `background` - The background color, if any
/// * `styles` - The candidate styles, `None` for the default pair
///
/// # Returns
///
/// - `Ok(ResolvedStyle)` with the winning name, color and contrast
/// - `Ok(no_style())` when the background is missing or invalid
/// - `Err` if the declaration contains an invalid color
///
/// # Errors
///
/// Returns [`StyleError::InvalidStyle`] if a declared style is not a valid
/// color.
///
/// # Examples
///
/// ```
/// use matchstyle::{Color, ColorInput, Styles, select};
///
/// let styles = Styles::new().with("light", "#FFFFFF").with("dark", "#000000");
/// let style = select(Some(&ColorInput::from("#000000")), Some(&styles)).unwrap();
/// assert_eq!(style.name(), "light");
/// assert_eq!(style.color(), Color::WHITE);
/// ```
pub fn select(
    background: Option<&ColorInput>,
    styles: Option<&Styles>,
) -> Result<ResolvedStyle, StyleError> {
    let selector = match styles {
        Some(styles) => StyleSelector::new(styles)?,
        None => StyleSelector::default(),
    };
    Ok(selector.select(background))
}

/// A validated, ready-to-use set of candidate styles.
///
/// Validation happens once in [`StyleSelector::new`]; [`StyleSelector::select`]
/// then never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSelector {
    candidates: Vec<(String, Color)>,
}

impl StyleSelector {
    /// Validates `styles` and builds a selector over them.
    ///
    /// An empty declaration selects among [`default_styles`].
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidStyle`] if a declared style is not a
    /// valid color.
    pub fn new(styles: &Styles) -> Result<Self, StyleError> {
        let candidates = resolve(styles)?;
        if candidates.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self { candidates })
    }

    /// Iterates over the candidate names and colors in declaration order.
    pub fn candidates(&self) -> impl Iterator<Item = (&str, Color)> {
        self.candidates
            .iter()
            .map(|(name, color)| (name.as_str(), *color))
    }

    /// Select the candidate with the highest contrast against `background`.
    ///
    /// Returns [`no_style`] when the background is absent or not a valid
    /// color. On equal contrast the first declared candidate wins.
    #[must_use]
    pub fn select(&self, background: Option<&ColorInput>) -> ResolvedStyle {
        let Some(input) = background else {
            debug!("no background, using {NO_STYLE}");
            return no_style();
        };
        match parse_color(input) {
            Ok(color) => self.select_for(color),
            Err(err) => {
                debug!("invalid background {input}: {err:#}");
                no_style()
            }
        }
    }

    /// Select the candidate with the highest contrast against a parsed
    /// background color.
    #[must_use]
    pub fn select_for(&self, background: Color) -> ResolvedStyle {
        debug!("background={background}");
        self.candidates
            .iter()
            .map(|(name, color)| ResolvedStyle {
                name: name.clone(),
                color: *color,
                contrast: contrast_ratio(background, *color),
            })
            .inspect(|style| {
                debug!("candidate {}={} contrast={}", style.name, style.color, style.contrast);
            })
            // Only a strictly higher contrast replaces the current best.
            .reduce(|best, style| {
                if style.contrast > best.contrast {
                    style
                } else {
                    best
                }
            })
            .unwrap_or_else(no_style)
    }
}

impl Default for StyleSelector {
    fn default() -> Self {
        Self {
            candidates: vec![
                (BASIC_LIGHT.to_owned(), Color::WHITE),
                (BASIC_DARK.to_owned(), Color::BLACK),
            ],
        }
    }
}

fn resolve(styles: &Styles) -> Result<Vec<(String, Color)>, StyleError> {
    styles
        .iter()
        .map(|(name, value)| {
            parse_color(value)
                .map(|color| (name.to_owned(), color))
                .map_err(|err| StyleError::InvalidStyle {
                    name: name.to_owned(),
                    value: value.to_string(),
                    reason: format!("{err:#}"),
                })
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn color() -> impl Strategy<Value = Color> {
        any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Color::new(r, g, b))
    }

    fn declared(colors: &[Color]) -> Styles {
        colors
            .iter()
            .enumerate()
            .map(|(i, color)| (format!("style-{i}"), *color))
            .collect()
    }

    proptest! {
        #[test]
        fn selects_a_declared_name(background in color(), colors in prop::collection::vec(color(), 1..8)) {
            let styles = declared(&colors);
            let style = select(Some(&background.into()), Some(&styles)).unwrap();
            prop_assert!(styles.get(style.name()).is_some());
        }

        #[test]
        fn selects_a_default_name_without_declaration(background in color()) {
            let style = select(Some(&background.into()), None).unwrap();
            prop_assert!(style.name() == BASIC_LIGHT || style.name() == BASIC_DARK);
        }

        #[test]
        fn black_and_white_pick_the_higher_contrast(background in color()) {
            let styles = Styles::new().with("white", Color::WHITE).with("black", Color::BLACK);
            let style = select(Some(&background.into()), Some(&styles)).unwrap();
            let other = if style.name() == "white" { Color::BLACK } else { Color::WHITE };
            prop_assert!(style.contrast() >= contrast_ratio(background, other));
        }

        #[test]
        fn winner_is_first_with_maximum_contrast(background in color(), colors in prop::collection::vec(color(), 1..8)) {
            let styles = declared(&colors);
            let style = select(Some(&background.into()), Some(&styles)).unwrap();
            let contrasts: Vec<f64> = colors.iter().map(|c| contrast_ratio(background, *c)).collect();
            let index = styles.iter().position(|(name, _)| name == style.name()).unwrap();

            prop_assert_eq!(style.contrast(), contrasts[index]);
            prop_assert!(contrasts.iter().all(|c| *c <= style.contrast()));
            prop_assert!(contrasts[..index].iter().all(|c| *c < style.contrast()));
        }

        #[test]
        fn identical_colors_tie_to_the_first(background in color(), shared in color(), copies in 2usize..5) {
            let styles = declared(&vec![shared; copies]);
            let style = select(Some(&background.into()), Some(&styles)).unwrap();
            prop_assert_eq!(style.name(), "style-0");
        }
    }
}
