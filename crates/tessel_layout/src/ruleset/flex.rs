//! Flex layout tokens
//!
//! A flex layout is declared as a whitespace separated token list with an
//! optional direction prefix:
//!
//! ```text
//! flex-column: xs-12c md-6c xs-h-40px md-offset-3c hidden-controller
//! ```
//!
//! | token | meaning |
//! |-------|---------|
//! | `{bp}-Nc` / `{bp}-Npx` | width in twelfths of the parent or in pixels |
//! | `{bp}-h-Npx` / `{bp}-h-auto` | height |
//! | `{bp}-offset-Nc` / `{bp}-offset-Npx` | horizontal offset |
//! | `{bp}-offset-y-Npx` | vertical offset |
//! | `{bp}-hidden` | zero width from that breakpoint up |
//! | `hidden-{input}` | hidden while that input source is active |
//! | `only-{input}` | hidden for every other input source |
//!
//! Every breakpoint-scoped rule cascades mobile-first: a screen size uses its
//! own entry or the nearest smaller one.

use smallvec::SmallVec;
use tessel_core::{InputSource, ScreenSize};

use crate::error::{LayoutError, Result};
use crate::ruleset::HeightRule;

/// Logical columns in a row
pub const COLUMNS: u8 = 12;

/// How a flex parent places its children
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlowDirection {
    /// Left to right, wrapping onto a new row when out of width
    #[default]
    Row,
    /// Top to bottom
    Column,
}

/// A horizontal length
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Amount {
    Columns(u8),
    Px(f32),
}

impl Amount {
    pub fn resolve(self, parent_width: f32) -> f32 {
        match self {
            Amount::Columns(columns) => parent_width * f32::from(columns) / f32::from(COLUMNS),
            Amount::Px(px) => px,
        }
    }
}

/// Width entry; `Hidden` collapses the element to zero width
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WidthRule {
    Amount(Amount),
    Hidden,
}

/// One optional value per screen size
#[derive(Clone, Debug, PartialEq)]
pub struct Breakpointed<T> {
    values: [Option<T>; 5],
}

impl<T: Copy> Breakpointed<T> {
    pub fn set(&mut self, screen: ScreenSize, value: T) {
        self.values[screen.index()] = Some(value);
    }

    /// Entry for `screen` or the nearest smaller screen size
    pub fn get(&self, screen: ScreenSize) -> Option<T> {
        self.values[..=screen.index()]
            .iter()
            .rev()
            .find_map(|value| *value)
    }
}

impl<T> Default for Breakpointed<T> {
    fn default() -> Self {
        Self {
            values: [None, None, None, None, None],
        }
    }
}

/// Parsed flex declaration
#[derive(Clone, Debug, PartialEq)]
pub struct FlexLayout {
    source: String,
    direction: FlowDirection,
    width: Breakpointed<WidthRule>,
    height: Breakpointed<HeightRule>,
    offset_x: Breakpointed<Amount>,
    offset_y: Breakpointed<f32>,
    hidden_for: SmallVec<[InputSource; 3]>,
    only_for: SmallVec<[InputSource; 3]>,
}

impl FlexLayout {
    pub fn parse(source: &str) -> Result<Self> {
        let mut layout = FlexLayout {
            source: source.to_string(),
            direction: FlowDirection::Row,
            width: Breakpointed::default(),
            height: Breakpointed::default(),
            offset_x: Breakpointed::default(),
            offset_y: Breakpointed::default(),
            hidden_for: SmallVec::new(),
            only_for: SmallVec::new(),
        };

        let tokens = match source.split_once(':') {
            Some((prefix, rest)) => {
                layout.direction = match prefix.trim() {
                    "flex-row" => FlowDirection::Row,
                    "flex-column" => FlowDirection::Column,
                    other => {
                        return Err(LayoutError::invalid_layout(other, "unknown direction"));
                    }
                };
                rest
            }
            None => source,
        };

        for token in tokens.split_whitespace() {
            layout.apply_token(token)?;
        }
        Ok(layout)
    }

    fn apply_token(&mut self, token: &str) -> Result<()> {
        if let Some(input) = token.strip_prefix("hidden-") {
            self.hidden_for.push(parse_input(token, input)?);
            return Ok(());
        }
        if let Some(input) = token.strip_prefix("only-") {
            self.only_for.push(parse_input(token, input)?);
            return Ok(());
        }

        let (bp, rule) = token
            .split_once('-')
            .ok_or_else(|| LayoutError::invalid_layout(token, "expected '<breakpoint>-<rule>'"))?;
        let screen = ScreenSize::from_id(bp)
            .ok_or_else(|| LayoutError::invalid_layout(token, "unknown breakpoint"))?;

        if rule == "hidden" {
            self.width.set(screen, WidthRule::Hidden);
        } else if let Some(height) = rule.strip_prefix("h-") {
            let height = if height == "auto" {
                HeightRule::Auto
            } else {
                HeightRule::Fixed(parse_px(token, height)?)
            };
            self.height.set(screen, height);
        } else if let Some(y) = rule.strip_prefix("offset-y-") {
            self.offset_y.set(screen, parse_px(token, y)?);
        } else if let Some(x) = rule.strip_prefix("offset-") {
            self.offset_x.set(screen, parse_amount(token, x)?);
        } else {
            self.width
                .set(screen, WidthRule::Amount(parse_amount(token, rule)?));
        }
        Ok(())
    }

    /// The declaration this layout was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn direction(&self) -> FlowDirection {
        self.direction
    }

    /// Width rule in effect; full width when nothing applies
    pub fn width_rule(&self, screen: ScreenSize) -> WidthRule {
        self.width
            .get(screen)
            .unwrap_or(WidthRule::Amount(Amount::Columns(COLUMNS)))
    }

    pub fn height_rule(&self, screen: ScreenSize) -> HeightRule {
        self.height.get(screen).unwrap_or(HeightRule::Auto)
    }

    pub fn offset_x(&self, screen: ScreenSize) -> Amount {
        self.offset_x.get(screen).unwrap_or(Amount::Px(0.0))
    }

    pub fn offset_y(&self, screen: ScreenSize) -> f32 {
        self.offset_y.get(screen).unwrap_or(0.0)
    }

    pub fn is_hidden_for(&self, input: InputSource) -> bool {
        let excluded = !self.only_for.is_empty() && !self.only_for.contains(&input);
        self.hidden_for.contains(&input) || excluded
    }
}

fn parse_input(token: &str, id: &str) -> Result<InputSource> {
    InputSource::from_id(id)
        .ok_or_else(|| LayoutError::invalid_layout(token, "unknown input source"))
}

fn parse_px(token: &str, text: &str) -> Result<f32> {
    let digits = text
        .strip_suffix("px")
        .ok_or_else(|| LayoutError::invalid_layout(token, "expected a pixel amount"))?;
    let value: f32 = digits
        .parse()
        .map_err(|_| LayoutError::invalid_layout(token, "malformed number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(LayoutError::invalid_layout(token, "amount must be non-negative"));
    }
    Ok(value)
}

fn parse_amount(token: &str, text: &str) -> Result<Amount> {
    if text.ends_with("px") {
        return parse_px(token, text).map(Amount::Px);
    }
    let digits = text
        .strip_suffix('c')
        .ok_or_else(|| LayoutError::invalid_layout(token, "expected 'c' or 'px' suffix"))?;
    let columns: u8 = digits
        .parse()
        .map_err(|_| LayoutError::invalid_layout(token, "malformed column count"))?;
    if columns > COLUMNS {
        return Err(LayoutError::invalid_layout(token, "at most 12 columns"));
    }
    Ok(Amount::Columns(columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let layout = FlexLayout::parse("").unwrap();
        assert_eq!(layout.direction(), FlowDirection::Row);
        assert_eq!(
            layout.width_rule(ScreenSize::Xl),
            WidthRule::Amount(Amount::Columns(12))
        );
        assert_eq!(layout.height_rule(ScreenSize::Xs), HeightRule::Auto);
        assert_eq!(layout.offset_y(ScreenSize::Md), 0.0);
    }

    #[test]
    fn test_direction_prefix() {
        let layout = FlexLayout::parse("flex-column: xs-6c").unwrap();
        assert_eq!(layout.direction(), FlowDirection::Column);
        assert_eq!(
            layout.width_rule(ScreenSize::Xs),
            WidthRule::Amount(Amount::Columns(6))
        );
        assert!(FlexLayout::parse("flex-grid: xs-6c").is_err());
    }

    #[test]
    fn test_mobile_first_cascade() {
        let layout = FlexLayout::parse("xs-12c md-6c xl-hidden").unwrap();
        let width = |screen| layout.width_rule(screen);
        assert_eq!(width(ScreenSize::Sm), WidthRule::Amount(Amount::Columns(12)));
        assert_eq!(width(ScreenSize::Md), WidthRule::Amount(Amount::Columns(6)));
        assert_eq!(width(ScreenSize::Lg), WidthRule::Amount(Amount::Columns(6)));
        assert_eq!(width(ScreenSize::Xl), WidthRule::Hidden);
    }

    #[test]
    fn test_heights_and_offsets() {
        let layout = FlexLayout::parse("xs-h-40px lg-h-auto sm-offset-2c md-offset-y-8px").unwrap();
        assert_eq!(layout.height_rule(ScreenSize::Md), HeightRule::Fixed(40.0));
        assert_eq!(layout.height_rule(ScreenSize::Lg), HeightRule::Auto);
        assert_eq!(layout.offset_x(ScreenSize::Xs), Amount::Px(0.0));
        assert_eq!(layout.offset_x(ScreenSize::Sm).resolve(120.0), 20.0);
        assert_eq!(layout.offset_y(ScreenSize::Xl), 8.0);
    }

    #[test]
    fn test_input_scoping() {
        let hidden = FlexLayout::parse("hidden-controller").unwrap();
        assert!(hidden.is_hidden_for(InputSource::Controller));
        assert!(!hidden.is_hidden_for(InputSource::KeyboardMouse));

        let only = FlexLayout::parse("only-touchscreen").unwrap();
        assert!(only.is_hidden_for(InputSource::KeyboardMouse));
        assert!(!only.is_hidden_for(InputSource::Touchscreen));
    }

    #[test]
    fn test_malformed_tokens() {
        for source in [
            "xs",
            "xxl-6c",
            "xs-13c",
            "xs-6",
            "xs-abcpx",
            "xs-h-6c",
            "xs--4px",
            "xs-offset-y-2c",
            "hidden-joystick",
        ] {
            let err = FlexLayout::parse(source).unwrap_err();
            assert!(
                matches!(err, LayoutError::InvalidLayout { .. }),
                "{source}: {err}"
            );
        }
    }

    #[test]
    fn test_columns_resolve_against_parent() {
        assert_eq!(Amount::Columns(3).resolve(200.0), 50.0);
        assert_eq!(Amount::Px(30.0).resolve(200.0), 30.0);
    }
}
