//! Style declaration errors.

use thiserror::Error;

/// Error returned when a style declaration is rejected.
///
/// This is a configuration error on the caller's side: it is raised before
/// any contrast is computed and never recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// A declared style does not resolve to a valid color.
    #[error("invalid style '{name}': expected a color, but got '{value}' ({reason})")]
    InvalidStyle {
        /// Name of the offending style
        name: String,
        /// The declared value, as written
        value: String,
        /// Why the value was rejected
        reason: String,
    },
}
