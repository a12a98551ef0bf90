//! Style rule value objects
//!
//! A [`StyleRule`] is immutable once resolved; render nodes hold it behind an
//! `Arc` for the duration of a layout pass.

use tessel_core::{Color, Insets};

/// Pixel snapping applied to resolved positions and sizes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rounding {
    #[default]
    None,
    Round,
    Floor,
    Ceil,
}

impl Rounding {
    pub fn apply(self, value: f32) -> f32 {
        match self {
            Rounding::None => value,
            Rounding::Round => value.round(),
            Rounding::Floor => value.floor(),
            Rounding::Ceil => value.ceil(),
        }
    }

    pub fn from_id(id: &str) -> Option<Rounding> {
        match id {
            "none" => Some(Rounding::None),
            "round" => Some(Rounding::Round),
            "floor" => Some(Rounding::Floor),
            "ceil" => Some(Rounding::Ceil),
            _ => None,
        }
    }
}

/// Fill drawn behind a node
#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    Color(Color),
    /// Named texture-atlas region
    Texture(String),
}

/// Interaction state a background variant applies to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleState {
    Normal,
    Hover,
    Action,
    Disabled,
}

/// Background variant per interaction state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateBackgrounds {
    pub normal: Option<Background>,
    pub hover: Option<Background>,
    pub action: Option<Background>,
    pub disabled: Option<Background>,
}

impl StateBackgrounds {
    /// Variant for `state`, falling back to the normal background
    pub fn get(&self, state: StyleState) -> Option<&Background> {
        let specific = match state {
            StyleState::Normal => None,
            StyleState::Hover => self.hover.as_ref(),
            StyleState::Action => self.action.as_ref(),
            StyleState::Disabled => self.disabled.as_ref(),
        };
        specific.or(self.normal.as_ref())
    }
}

/// Monospace-approximated font metrics used for text measurement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    pub size: f32,
    pub line_height: f32,
    /// Horizontal advance per character
    pub advance: f32,
}

impl FontMetrics {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            line_height: size * 1.25,
            advance: size * 0.5,
        }
    }

    /// Width of a single unwrapped line
    pub fn line_width(&self, line: &str) -> f32 {
        line.chars().count() as f32 * self.advance
    }

    /// Greedy character wrap of `text` into lines no wider than `width`.
    ///
    /// Explicit newlines always break; an empty text still occupies one line.
    pub fn wrap(&self, text: &str, width: f32) -> Vec<String> {
        let per_line = if self.advance > 0.0 {
            ((width / self.advance).floor() as usize).max(1)
        } else {
            usize::MAX
        };

        let mut lines = Vec::new();
        for raw in text.split('\n') {
            let chars: Vec<char> = raw.chars().collect();
            if chars.is_empty() {
                lines.push(String::new());
                continue;
            }
            for chunk in chars.chunks(per_line) {
                lines.push(chunk.iter().collect());
            }
        }
        lines
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::new(16.0)
    }
}

/// Resolved visual rules for one element kind, style id and screen size
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleRule {
    pub margin: Insets,
    pub padding: Insets,
    /// Minimum outer height
    pub min_height: f32,
    pub background: StateBackgrounds,
    pub rounding: Rounding,
    /// Foreground color (text, check marks, slider thumbs)
    pub color: Option<Color>,
    pub font: Option<FontMetrics>,
}

impl StyleRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_margin(mut self, margin: Insets) -> Self {
        self.margin = margin.non_negative();
        self
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding.non_negative();
        self
    }

    pub fn with_min_height(mut self, min_height: f32) -> Self {
        self.min_height = min_height.max(0.0);
        self
    }

    pub fn with_background(mut self, state: StyleState, background: Background) -> Self {
        let slot = match state {
            StyleState::Normal => &mut self.background.normal,
            StyleState::Hover => &mut self.background.hover,
            StyleState::Action => &mut self.background.action,
            StyleState::Disabled => &mut self.background.disabled,
        };
        *slot = Some(background);
        self
    }

    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_font(mut self, font: FontMetrics) -> Self {
        self.font = Some(font);
        self
    }

    /// Margin + padding per edge
    pub fn insets(&self) -> Insets {
        self.margin.add(&self.padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_falls_back_to_normal() {
        let rule = StyleRule::new()
            .with_background(StyleState::Normal, Background::Color(Color::BLACK))
            .with_background(StyleState::Hover, Background::Color(Color::WHITE));

        assert_eq!(
            rule.background.get(StyleState::Hover),
            Some(&Background::Color(Color::WHITE))
        );
        assert_eq!(
            rule.background.get(StyleState::Action),
            Some(&Background::Color(Color::BLACK))
        );
    }

    #[test]
    fn test_negative_spacing_is_clamped() {
        let rule = StyleRule::new().with_margin(Insets::new(-1.0, 2.0, 3.0, -4.0));
        assert_eq!(rule.margin, Insets::new(0.0, 2.0, 3.0, 0.0));
    }

    #[test]
    fn test_wrap() {
        let font = FontMetrics {
            size: 10.0,
            line_height: 12.0,
            advance: 10.0,
        };
        assert_eq!(font.wrap("abcdef", 30.0), vec!["abc", "def"]);
        assert_eq!(font.wrap("ab\ncd", 100.0), vec!["ab", "cd"]);
        assert_eq!(font.wrap("", 100.0), vec![""]);
        // Narrower than one glyph still makes progress
        assert_eq!(font.wrap("ab", 1.0), vec!["a", "b"]);
    }
}
