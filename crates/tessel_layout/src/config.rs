//! Tree configuration
//!
//! ```toml
//! scale = 2.0
//! input_source = "controller"
//! scroll_step = 24.0
//!
//! [breakpoints]
//! sm = 600.0
//! md = 900.0
//! lg = 1200.0
//! xl = 1600.0
//! ```

use serde::{Deserialize, Deserializer};
use tessel_core::{InputSource, ScreenSize};

use crate::error::{LayoutError, Result};

/// Minimum (scaled) screen widths of each screen size above `Xs`
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    pub sm: f32,
    pub md: f32,
    pub lg: f32,
    pub xl: f32,
}

impl Breakpoints {
    pub fn thresholds(&self) -> [f32; 4] {
        [self.sm, self.md, self.lg, self.xl]
    }

    pub fn screen_size(&self, width: f32) -> ScreenSize {
        ScreenSize::from_width(width, &self.thresholds())
    }

    pub fn validate(&self) -> Result<()> {
        let thresholds = self.thresholds();
        let ascending = thresholds.windows(2).all(|pair| pair[0] < pair[1]);
        if thresholds[0] <= 0.0 || !ascending {
            return Err(LayoutError::InvalidBreakpoints);
        }
        Ok(())
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            sm: 576.0,
            md: 768.0,
            lg: 992.0,
            xl: 1200.0,
        }
    }
}

/// Settings for a [`UiTree`](crate::UiTree)
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub breakpoints: Breakpoints,
    /// Screen widths are divided by this before breakpoint lookup and layout
    pub scale: f32,
    #[serde(deserialize_with = "input_source")]
    pub input_source: InputSource,
    /// Pixels scrolled per unit of wheel movement
    pub scroll_step: f32,
}

impl UiConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: UiConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.breakpoints.validate()?;
        if self.scale <= 0.0 || !self.scale.is_finite() {
            return Err(LayoutError::InvalidScale(self.scale));
        }
        Ok(())
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            scale: 1.0,
            input_source: InputSource::KeyboardMouse,
            scroll_step: 16.0,
        }
    }
}

fn input_source<'de, D>(deserializer: D) -> std::result::Result<InputSource, D::Error>
where
    D: Deserializer<'de>,
{
    let id = String::deserialize(deserializer)?;
    InputSource::from_id(&id)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown input source '{id}'")))
}
