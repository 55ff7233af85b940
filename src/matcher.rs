//! Reflecting the matched style on a host as the background changes.
//!
//! [`StyleMatcher`] is the caller-owned state around [`StyleSelector`]: it
//! remembers the last applied style and only touches the [`Host`] when the
//! selected style's name changes.

use std::collections::BTreeSet;

use crate::color::{Color, ColorInput};
use crate::debug;
use crate::error::StyleError;
use crate::style::{ResolvedStyle, StyleSelector, Styles, no_style};

/// Presentation surface the matched style is reflected on.
pub trait Host {
    /// Adds (`on == true`) or removes a class.
    fn apply_class(&mut self, class: &str, on: bool);

    /// Sets the foreground color.
    fn apply_color(&mut self, color: Color);
}

/// Options for [`StyleMatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Also set the host's foreground color to the matched style's color.
    pub set_color: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self { set_color: true }
    }
}

/// Tracks the applied style across background updates.
///
/// # Example
///
/// ```rust
/// use matchstyle::{Color, ElementStyle, MatchOptions, StyleMatcher};
///
/// let mut element = ElementStyle::default();
/// let mut matcher = StyleMatcher::new(MatchOptions::default());
///
/// let changed = matcher.update(Some(Color::BLACK.into()), &mut element);
/// assert_eq!(changed.map(|s| s.name().to_owned()).as_deref(), Some("basic-light"));
/// assert!(element.has_class("matched-basic-light"));
///
/// // Same winner, no change event.
/// assert!(matcher.update(Some("#111".into()), &mut element).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct StyleMatcher {
    selector: StyleSelector,
    options: MatchOptions,
    background: Option<ColorInput>,
    current: ResolvedStyle,
}

impl StyleMatcher {
    /// Creates a matcher over the default styles, starting from the
    /// no-style sentinel.
    #[must_use]
    pub fn new(options: MatchOptions) -> Self {
        Self {
            selector: StyleSelector::default(),
            options,
            background: None,
            current: no_style(),
        }
    }

    /// Creates a matcher over `styles`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidStyle`] if a declared style is not a
    /// valid color.
    pub fn with_styles(styles: &Styles, options: MatchOptions) -> Result<Self, StyleError> {
        Ok(Self {
            selector: StyleSelector::new(styles)?,
            ..Self::new(options)
        })
    }

    /// The style currently applied.
    #[must_use]
    pub fn current(&self) -> &ResolvedStyle {
        &self.current
    }

    /// The options this matcher was created with.
    #[must_use]
    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Replaces the style declaration and re-evaluates the last background.
    ///
    /// `None` or an empty declaration switches back to the default styles.
    /// Returns the new style when the re-evaluation changed it.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidStyle`] if a declared style is not a
    /// valid color. The matcher and the host are left untouched.
    pub fn set_styles(
        &mut self,
        styles: Option<&Styles>,
        host: &mut impl Host,
    ) -> Result<Option<ResolvedStyle>, StyleError> {
        self.selector = match styles {
            Some(styles) => StyleSelector::new(styles)?,
            None => StyleSelector::default(),
        };
        let style = self.selector.select(self.background.as_ref());
        Ok(self.apply(style, host))
    }

    /// Selects the style for a new background and applies it if it changed.
    ///
    /// Returns the new style when its name differs from the applied one;
    /// a different contrast alone is not a change. `None` is not an update:
    /// the applied style and the remembered background are kept. An invalid
    /// background resolves to the no-style sentinel.
    pub fn update(
        &mut self,
        background: Option<ColorInput>,
        host: &mut impl Host,
    ) -> Option<ResolvedStyle> {
        let background = background?;
        let style = self.selector.select(Some(&background));
        self.background = Some(background);
        self.apply(style, host)
    }

    fn apply(&mut self, style: ResolvedStyle, host: &mut impl Host) -> Option<ResolvedStyle> {
        if style.name() == self.current.name() {
            return None;
        }
        debug!("style change: {} -> {}", self.current.name(), style.name());

        if self.options.set_color {
            host.apply_color(style.color());
        }
        host.apply_class(&self.current.class_name(), false);
        host.apply_class(&style.class_name(), true);

        self.current = style.clone();
        Some(style)
    }
}

/// In-memory [`Host`]: a class set and an optional foreground color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementStyle {
    classes: BTreeSet<String>,
    color: Option<Color>,
}

impl ElementStyle {
    /// Whether `class` is set.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Classes currently set, sorted.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Foreground color, if one was set.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.color
    }
}

impl Host for ElementStyle {
    fn apply_class(&mut self, class: &str, on: bool) {
        if on {
            self.classes.insert(class.to_owned());
        } else {
            self.classes.remove(class);
        }
    }

    fn apply_color(&mut self, color: Color) {
        self.color = Some(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::NO_STYLE;
    use anyhow::Result;

    /// Records every host call in order.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Host for Recorder {
        fn apply_class(&mut self, class: &str, on: bool) {
            self.calls.push(format!("class {class} {on}"));
        }

        fn apply_color(&mut self, color: Color) {
            self.calls.push(format!("color {color}"));
        }
    }

    fn basic_styles() -> Styles {
        Styles::new().with("light", Color::WHITE).with("dark", Color::BLACK)
    }

    #[test]
    fn test_initially_no_style() {
        let matcher = StyleMatcher::new(MatchOptions::default());
        assert_eq!(matcher.current().name(), NO_STYLE);
        assert!(matcher.options().set_color);
    }

    #[test]
    fn test_class_follows_matched_style() -> Result<()> {
        let mut element = ElementStyle::default();
        let mut matcher = StyleMatcher::with_styles(&basic_styles(), MatchOptions::default())?;

        let changed = matcher.update(Some(Color::BLACK.into()), &mut element);
        assert_eq!(changed.as_ref().map(ResolvedStyle::name), Some("light"));
        assert!(element.has_class("matched-light"));
        assert_eq!(element.color(), Some(Color::WHITE));

        let changed = matcher.update(Some(Color::WHITE.into()), &mut element);
        assert_eq!(changed.as_ref().map(ResolvedStyle::name), Some("dark"));
        assert!(!element.has_class("matched-light"));
        assert!(element.has_class("matched-dark"));
        assert_eq!(element.color(), Some(Color::BLACK));
        assert_eq!(element.classes().collect::<Vec<_>>(), ["matched-dark"]);
        Ok(())
    }

    #[test]
    fn test_host_calls_in_order() -> Result<()> {
        let mut recorder = Recorder::default();
        let mut matcher = StyleMatcher::with_styles(&basic_styles(), MatchOptions::default())?;

        matcher.update(Some("#000".into()), &mut recorder);
        assert_eq!(
            recorder.calls,
            [
                "color #FFFFFF",
                "class matched-no-style false",
                "class matched-light true"
            ]
        );
        Ok(())
    }

    #[test]
    fn test_no_event_when_name_unchanged() -> Result<()> {
        let mut recorder = Recorder::default();
        let mut matcher = StyleMatcher::with_styles(&basic_styles(), MatchOptions::default())?;

        assert!(matcher.update(Some("#000000".into()), &mut recorder).is_some());
        let calls = recorder.calls.len();

        // Contrast changes, winner does not.
        assert!(matcher.update(Some("#101010".into()), &mut recorder).is_none());
        assert!(matcher.update(Some("#202020".into()), &mut recorder).is_none());
        assert_eq!(recorder.calls.len(), calls);
        assert_eq!(matcher.current().name(), "light");
        assert!((matcher.current().contrast() - 21.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_invalid_background_keeps_initial_state() -> Result<()> {
        let mut recorder = Recorder::default();
        let mut matcher = StyleMatcher::with_styles(&basic_styles(), MatchOptions::default())?;

        assert!(matcher.update(Some("invalid".into()), &mut recorder).is_none());
        assert!(matcher.update(None, &mut recorder).is_none());
        assert!(recorder.calls.is_empty());
        assert!(matcher.current().is_no_style());
        Ok(())
    }

    #[test]
    fn test_invalid_background_after_match_returns_to_no_style() -> Result<()> {
        let mut element = ElementStyle::default();
        let mut matcher = StyleMatcher::with_styles(&basic_styles(), MatchOptions::default())?;

        matcher.update(Some(Color::BLACK.into()), &mut element);
        let changed = matcher.update(Some("invalid-color".into()), &mut element);
        assert_eq!(changed.as_ref().map(ResolvedStyle::name), Some(NO_STYLE));
        assert!(element.has_class("matched-no-style"));
        assert!(!element.has_class("matched-light"));
        Ok(())
    }

    #[test]
    fn test_absent_background_keeps_applied_style() -> Result<()> {
        let mut recorder = Recorder::default();
        let mut matcher = StyleMatcher::with_styles(&basic_styles(), MatchOptions::default())?;

        matcher.update(Some(Color::BLACK.into()), &mut recorder);
        let calls = recorder.calls.len();

        assert!(matcher.update(None, &mut recorder).is_none());
        assert_eq!(recorder.calls.len(), calls);
        assert_eq!(matcher.current().name(), "light");

        // The last real background is still the one re-evaluated.
        let changed = matcher.set_styles(Some(&Styles::new().with("ink", "#222")), &mut recorder)?;
        assert_eq!(changed.as_ref().map(ResolvedStyle::name), Some("ink"));
        Ok(())
    }

    #[test]
    fn test_color_not_set_when_disabled() -> Result<()> {
        let mut element = ElementStyle::default();
        let options = MatchOptions { set_color: false };
        let mut matcher = StyleMatcher::with_styles(&basic_styles(), options)?;

        assert!(matcher.update(Some(Color::BLACK.into()), &mut element).is_some());
        assert!(element.has_class("matched-light"));
        assert_eq!(element.color(), None);
        Ok(())
    }

    #[test]
    fn test_single_style_stays_applied() -> Result<()> {
        let mut element = ElementStyle::default();
        let styles = Styles::new().with("single", Color::RED);
        let mut matcher = StyleMatcher::with_styles(&styles, MatchOptions::default())?;

        assert!(matcher.update(Some(Color::BLACK.into()), &mut element).is_some());
        assert!(matcher.update(Some(Color::WHITE.into()), &mut element).is_none());
        assert_eq!(matcher.current().name(), "single");
        assert!(element.has_class("matched-single"));
        Ok(())
    }

    #[test]
    fn test_set_styles_reevaluates_last_background() -> Result<()> {
        let mut element = ElementStyle::default();
        let mut matcher = StyleMatcher::new(MatchOptions::default());

        let changed = matcher.update(Some(Color::WHITE.into()), &mut element);
        assert_eq!(changed.as_ref().map(ResolvedStyle::name), Some("basic-dark"));

        let changed = matcher.set_styles(Some(&basic_styles()), &mut element)?;
        assert_eq!(changed.as_ref().map(ResolvedStyle::name), Some("dark"));
        assert!(element.has_class("matched-dark"));
        assert!(!element.has_class("matched-basic-dark"));

        let changed = matcher.set_styles(None, &mut element)?;
        assert_eq!(changed.as_ref().map(ResolvedStyle::name), Some("basic-dark"));
        Ok(())
    }

    #[test]
    fn test_set_styles_rejects_invalid_declaration() -> Result<()> {
        let mut recorder = Recorder::default();
        let mut matcher = StyleMatcher::with_styles(&basic_styles(), MatchOptions::default())?;
        matcher.update(Some(Color::BLACK.into()), &mut recorder);
        let calls = recorder.calls.len();

        let bad = Styles::new().with("invalid", "rgb(300, 300, 300)");
        assert!(matcher.set_styles(Some(&bad), &mut recorder).is_err());
        assert!(StyleMatcher::with_styles(&bad, MatchOptions::default()).is_err());
        assert_eq!(recorder.calls.len(), calls);

        // Previous declaration still in effect.
        let changed = matcher.update(Some(Color::WHITE.into()), &mut recorder);
        assert_eq!(changed.as_ref().map(ResolvedStyle::name), Some("dark"));
        Ok(())
    }
}
