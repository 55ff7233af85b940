//! Pick the most readable text style for a background color.
//!
//! A style is a named color. Given a background, the style whose color has
//! the highest WCAG contrast ratio against it is selected, and a host can
//! reflect the choice as a `matched-<name>` class plus an optional
//! foreground color.
//!
//! ```rust
//! use matchstyle::{Color, ColorInput, Styles, select};
//!
//! let styles = Styles::new()
//!     .with("red", Color::RED)
//!     .with("green", Color::GREEN)
//!     .with("blue", Color::BLUE);
//!
//! let style = select(Some(&ColorInput::from("#FF0000")), Some(&styles)).unwrap();
//! assert_eq!(style.name(), "green");
//! assert_eq!(style.class_name(), "matched-green");
//! ```

pub mod color;
pub mod error;
pub mod logs;
pub mod matcher;
pub mod style;

pub use color::{Color, ColorInput, contrast_ratio, is_valid_color, parse_color};
pub use error::StyleError;
pub use matcher::{ElementStyle, Host, MatchOptions, StyleMatcher};
pub use style::{
    ResolvedStyle, StyleSelector, Styles, class_name, default_styles, no_style, select, validate,
};
