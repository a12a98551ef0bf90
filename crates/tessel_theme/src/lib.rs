//! Tessel Theme System
//!
//! Style rules keyed by element kind, style id and screen size.
//!
//! # Features
//!
//! - **Style rules**: margin, padding, minimum height, per-state backgrounds,
//!   pixel rounding, foreground color and font metrics
//! - **Responsive cascade**: a rule declared for a screen size applies to
//!   every larger size until overridden
//! - **Fallbacks**: unknown style ids resolve to the kind's `"default"` style,
//!   then to an optional base rule
//! - **TOML themes**: `[[style]]` tables loaded with [`Theme::from_toml_str`]
//!
//! # Example
//!
//! ```ignore
//! use tessel_theme::{StyleResolver, Theme};
//!
//! let theme = Theme::from_toml_str(source)?;
//! let rule = theme.resolve("button", "primary", ScreenSize::Md);
//! ```

pub mod style;
pub mod theme;

pub use style::{Background, FontMetrics, Rounding, StateBackgrounds, StyleRule, StyleState};
pub use theme::{StyleResolver, Theme, ThemeError, DEFAULT_STYLE_ID};
