//! Style resolution
//!
//! [`Theme`] stores rules keyed by element kind and style id, each with one
//! entry per screen size it was declared for. Lookups cascade mobile-first:
//! the active screen size uses its own entry or the nearest smaller one.

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tessel_core::{Color, Insets, ScreenSize};
use thiserror::Error;

use crate::style::{Background, FontMetrics, Rounding, StyleRule, StyleState};

/// Style id every element kind falls back to
pub const DEFAULT_STYLE_ID: &str = "default";

/// Lookup contract the render tree calls during layout.
///
/// Must be deterministic in its three inputs.
pub trait StyleResolver: Send + Sync {
    fn resolve(&self, kind: &str, style_id: &str, screen: ScreenSize) -> Option<Arc<StyleRule>>;
}

/// Errors raised while loading a theme file
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to parse theme: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid color '{value}' in style {kind}/{id}")]
    InvalidColor {
        kind: String,
        id: String,
        value: String,
    },

    #[error("unknown screen size '{value}' in style {kind}/{id}")]
    UnknownScreenSize {
        kind: String,
        id: String,
        value: String,
    },

    #[error("unknown rounding mode '{value}' in style {kind}/{id}")]
    UnknownRounding {
        kind: String,
        id: String,
        value: String,
    },
}

type Cascade = BTreeMap<ScreenSize, Arc<StyleRule>>;

/// Rule table implementing [`StyleResolver`]
#[derive(Clone, Debug, Default)]
pub struct Theme {
    rules: FxHashMap<(String, String), Cascade>,
    base: Option<Arc<StyleRule>>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule used when neither the requested id nor the kind's default exists
    pub fn with_base(mut self, rule: StyleRule) -> Self {
        self.base = Some(Arc::new(rule));
        self
    }

    pub fn with_rule(
        mut self,
        kind: impl Into<String>,
        style_id: impl Into<String>,
        screen: ScreenSize,
        rule: StyleRule,
    ) -> Self {
        self.insert(kind, style_id, screen, rule);
        self
    }

    pub fn insert(
        &mut self,
        kind: impl Into<String>,
        style_id: impl Into<String>,
        screen: ScreenSize,
        rule: StyleRule,
    ) {
        self.rules
            .entry((kind.into(), style_id.into()))
            .or_default()
            .insert(screen, Arc::new(rule));
    }

    /// Number of (kind, id, screen) entries
    pub fn rule_count(&self) -> usize {
        self.rules.values().map(BTreeMap::len).sum()
    }

    /// Load `[[style]]` tables from TOML
    pub fn from_toml_str(source: &str) -> Result<Self, ThemeError> {
        let file: ThemeFile = toml::from_str(source)?;
        let mut theme = Theme::new();
        for def in file.styles {
            let screen = match def.screen.as_deref() {
                None => ScreenSize::Xs,
                Some(id) => {
                    ScreenSize::from_id(id).ok_or_else(|| ThemeError::UnknownScreenSize {
                        kind: def.kind.clone(),
                        id: def.id.clone(),
                        value: id.to_string(),
                    })?
                }
            };
            let rule = def.to_rule()?;
            theme.insert(def.kind, def.id, screen, rule);
        }
        tracing::debug!(rules = theme.rule_count(), "theme loaded");
        Ok(theme)
    }

    fn cascade(&self, kind: &str, style_id: &str, screen: ScreenSize) -> Option<Arc<StyleRule>> {
        // Tuple keys need owned strings for the lookup
        let cascade = self.rules.get(&(kind.to_string(), style_id.to_string()))?;
        cascade
            .range(..=screen)
            .next_back()
            .map(|(_, rule)| Arc::clone(rule))
    }
}

impl StyleResolver for Theme {
    fn resolve(&self, kind: &str, style_id: &str, screen: ScreenSize) -> Option<Arc<StyleRule>> {
        if let Some(rule) = self.cascade(kind, style_id, screen) {
            return Some(rule);
        }
        if style_id != DEFAULT_STYLE_ID {
            if let Some(rule) = self.cascade(kind, DEFAULT_STYLE_ID, screen) {
                tracing::warn!(kind, style_id, %screen, "style not found, using default");
                return Some(rule);
            }
        }
        self.base.clone()
    }
}

#[derive(Debug, Deserialize)]
struct ThemeFile {
    #[serde(default, rename = "style")]
    styles: Vec<StyleDef>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(untagged)]
enum InsetsDef {
    Uniform(f32),
    /// top, right, bottom, left
    Edges([f32; 4]),
}

impl From<InsetsDef> for Insets {
    fn from(def: InsetsDef) -> Self {
        match def {
            InsetsDef::Uniform(value) => Insets::uniform(value),
            InsetsDef::Edges([top, right, bottom, left]) => Insets::new(top, right, bottom, left),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FontDef {
    size: f32,
    line_height: Option<f32>,
    advance: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct BackgroundsDef {
    normal: Option<String>,
    hover: Option<String>,
    action: Option<String>,
    disabled: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StyleDef {
    kind: String,
    id: String,
    screen: Option<String>,
    margin: Option<InsetsDef>,
    padding: Option<InsetsDef>,
    #[serde(default)]
    min_height: f32,
    color: Option<String>,
    font: Option<FontDef>,
    rounding: Option<String>,
    #[serde(default)]
    background: BackgroundsDef,
}

impl StyleDef {
    fn to_rule(&self) -> Result<StyleRule, ThemeError> {
        let mut rule = StyleRule::new().with_min_height(self.min_height);

        if let Some(margin) = self.margin {
            rule = rule.with_margin(margin.into());
        }
        if let Some(padding) = self.padding {
            rule = rule.with_padding(padding.into());
        }
        if let Some(color) = &self.color {
            rule = rule.with_color(self.color(color)?);
        }
        if let Some(font) = &self.font {
            let mut metrics = FontMetrics::new(font.size);
            if let Some(line_height) = font.line_height {
                metrics.line_height = line_height;
            }
            if let Some(advance) = font.advance {
                metrics.advance = advance;
            }
            rule = rule.with_font(metrics);
        }
        if let Some(rounding) = &self.rounding {
            let mode = Rounding::from_id(rounding).ok_or_else(|| ThemeError::UnknownRounding {
                kind: self.kind.clone(),
                id: self.id.clone(),
                value: rounding.clone(),
            })?;
            rule = rule.with_rounding(mode);
        }

        let states = [
            (StyleState::Normal, &self.background.normal),
            (StyleState::Hover, &self.background.hover),
            (StyleState::Action, &self.background.action),
            (StyleState::Disabled, &self.background.disabled),
        ];
        for (state, value) in states {
            if let Some(value) = value {
                rule = rule.with_background(state, self.background_value(value)?);
            }
        }

        Ok(rule)
    }

    fn color(&self, value: &str) -> Result<Color, ThemeError> {
        Color::parse_hex(value).ok_or_else(|| ThemeError::InvalidColor {
            kind: self.kind.clone(),
            id: self.id.clone(),
            value: value.to_string(),
        })
    }

    /// `#rrggbb[aa]` is a color, `texture:<region>` a named atlas region
    fn background_value(&self, value: &str) -> Result<Background, ThemeError> {
        match value.strip_prefix("texture:") {
            Some(region) => Ok(Background::Texture(region.to_string())),
            None => self.color(value).map(Background::Color),
        }
    }
}
