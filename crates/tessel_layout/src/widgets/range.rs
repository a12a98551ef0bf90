//! Range-backed widgets

use tessel_core::{DrawSurface, Point, Rect};

use super::{Actionable, DrawContext, Drawable, MeasureContext, Measurable};
use crate::error::{LayoutError, Result};
use crate::events::EventData;

/// A value clamped to `min..=max`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    min: f32,
    max: f32,
    value: f32,
}

impl ValueRange {
    pub fn new(min: f32, max: f32) -> Result<Self> {
        if min > max {
            return Err(LayoutError::InvalidRange { min, max });
        }
        Ok(Self {
            min,
            max,
            value: min,
        })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Change the bounds, re-clamping the value. Returns whether anything changed.
    pub fn set_range(&mut self, min: f32, max: f32) -> Result<bool> {
        if min > max {
            return Err(LayoutError::InvalidRange { min, max });
        }
        if min == self.min && max == self.max {
            return Ok(false);
        }
        self.min = min;
        self.max = max;
        self.value = self.value.clamp(min, max);
        Ok(true)
    }

    /// Returns whether the clamped value changed
    pub fn set_value(&mut self, value: f32) -> bool {
        let value = value.clamp(self.min, self.max);
        if value == self.value {
            return false;
        }
        self.value = value;
        true
    }

    /// Position of the value in `0.0..=1.0`
    pub fn fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            0.0
        } else {
            (self.value - self.min) / span
        }
    }

    fn set_fraction(&mut self, fraction: f32) -> bool {
        self.set_value(self.min + (self.max - self.min) * fraction.clamp(0.0, 1.0))
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            value: 0.0,
        }
    }
}

/// Draggable value picker
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Slider {
    pub(crate) range: ValueRange,
}

impl Slider {
    pub fn new(min: f32, max: f32) -> Result<Self> {
        Ok(Self {
            range: ValueRange::new(min, max)?,
        })
    }

    pub fn range(&self) -> &ValueRange {
        &self.range
    }

    fn follow_pointer(&mut self, pointer: Point, content: Rect) -> Option<EventData> {
        if content.width() <= 0.0 {
            return None;
        }
        let fraction = (pointer.x - content.x()) / content.width();
        self.range
            .set_fraction(fraction)
            .then_some(EventData::Value(self.range.value()))
    }
}

impl Measurable for Slider {
    fn content_height(&self, _content_width: f32, _ctx: &MeasureContext<'_>) -> Result<f32> {
        Ok(0.0)
    }
}

impl Drawable for Slider {
    fn draw(&self, surface: &mut dyn DrawSurface, ctx: &DrawContext<'_>) -> Result<()> {
        let color = ctx.style.color.ok_or_else(|| LayoutError::MissingColor {
            id: ctx.element_id.to_string(),
        })?;
        let content = ctx.content;
        surface.fill_rect(content, color.faded(0.35));

        let thumb = content.height();
        let x = content.x() + self.range.fraction() * (content.width() - thumb).max(0.0);
        let color = if ctx.enabled { color } else { color.faded(0.5) };
        surface.fill_rect(Rect::new(x, content.y(), thumb, thumb), color);
        Ok(())
    }
}

impl Actionable for Slider {
    fn action_begin(&mut self, pointer: Option<Point>, content: Rect) -> Option<EventData> {
        pointer.and_then(|pointer| self.follow_pointer(pointer, content))
    }

    fn drag(&mut self, pointer: Point, content: Rect) -> Option<EventData> {
        self.follow_pointer(pointer, content)
    }
}

/// Read-only fill bar
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressBar {
    pub(crate) range: ValueRange,
}

impl ProgressBar {
    pub fn new(min: f32, max: f32) -> Result<Self> {
        Ok(Self {
            range: ValueRange::new(min, max)?,
        })
    }

    pub fn range(&self) -> &ValueRange {
        &self.range
    }
}

impl Measurable for ProgressBar {
    fn content_height(&self, _content_width: f32, _ctx: &MeasureContext<'_>) -> Result<f32> {
        Ok(0.0)
    }
}

impl Drawable for ProgressBar {
    fn draw(&self, surface: &mut dyn DrawSurface, ctx: &DrawContext<'_>) -> Result<()> {
        let color = ctx.style.color.ok_or_else(|| LayoutError::MissingColor {
            id: ctx.element_id.to_string(),
        })?;
        let content = ctx.content;
        let filled = content.width() * self.range.fraction();
        if filled > 0.0 {
            surface.fill_rect(
                Rect::new(content.x(), content.y(), filled, content.height()),
                color,
            );
        }
        Ok(())
    }
}
