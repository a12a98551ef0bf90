use tessel_core::{DrawSurface, Insets};

use super::{Actionable, DrawContext, Drawable, MeasureContext, Measurable};
use crate::error::{LayoutError, Result};
use crate::events::EventData;

/// Two-state toggle.
///
/// Sized by its style's minimum height; the check mark uses the style color.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Checkbox {
    pub(crate) checked: bool,
}

impl Checkbox {
    pub fn new(checked: bool) -> Self {
        Self { checked }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

impl Measurable for Checkbox {
    fn content_height(&self, _content_width: f32, _ctx: &MeasureContext<'_>) -> Result<f32> {
        Ok(0.0)
    }
}

impl Drawable for Checkbox {
    fn draw(&self, surface: &mut dyn DrawSurface, ctx: &DrawContext<'_>) -> Result<()> {
        if !self.checked {
            return Ok(());
        }
        let color = ctx.style.color.ok_or_else(|| LayoutError::MissingColor {
            id: ctx.element_id.to_string(),
        })?;
        let color = if ctx.enabled { color } else { color.faded(0.5) };
        let inset = ctx.content.width().min(ctx.content.height()) * 0.25;
        surface.fill_rect(ctx.content.shrink(Insets::uniform(inset)), color);
        Ok(())
    }
}

impl Actionable for Checkbox {
    fn action_end(&mut self) -> Option<EventData> {
        self.checked = !self.checked;
        Some(EventData::Toggled(self.checked))
    }
}
