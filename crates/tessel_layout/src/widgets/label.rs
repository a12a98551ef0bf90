use tessel_core::{Color, DrawSurface, Point};

use super::{DrawContext, Drawable, MeasureContext, Measurable};
use crate::error::{LayoutError, Result};

/// Wrapped text
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Label {
    pub(crate) text: String,
    /// Overrides the style color
    pub(crate) color: Option<Color>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }
}

impl Measurable for Label {
    fn content_height(&self, content_width: f32, ctx: &MeasureContext<'_>) -> Result<f32> {
        let font = ctx.style.font.ok_or_else(|| LayoutError::MissingFont {
            id: ctx.element_id.to_string(),
        })?;
        let lines = font.wrap(&self.text, content_width).len();
        Ok(lines as f32 * font.line_height)
    }
}

impl Drawable for Label {
    fn draw(&self, surface: &mut dyn DrawSurface, ctx: &DrawContext<'_>) -> Result<()> {
        let font = ctx.style.font.ok_or_else(|| LayoutError::MissingFont {
            id: ctx.element_id.to_string(),
        })?;
        let mut color = self
            .color
            .or(ctx.style.color)
            .ok_or_else(|| LayoutError::MissingColor {
                id: ctx.element_id.to_string(),
            })?;
        if !ctx.enabled {
            color = color.faded(0.5);
        }

        for (row, line) in font.wrap(&self.text, ctx.content.width()).iter().enumerate() {
            let origin = Point::new(
                ctx.content.x(),
                ctx.content.y() + row as f32 * font.line_height,
            );
            surface.draw_text(line, origin, font.size, color);
        }
        Ok(())
    }
}
