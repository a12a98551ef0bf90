use tessel_core::{Color, DrawSurface};

use super::{DrawContext, Drawable, MeasureContext, Measurable};
use crate::error::Result;

/// A named texture-atlas region with its natural size
#[derive(Clone, Debug, PartialEq)]
pub struct TextureRegion {
    pub name: String,
    pub width: f32,
    pub height: f32,
}

impl TextureRegion {
    pub fn new(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }
}

/// Texture region scaled to the content width, keeping its aspect ratio.
///
/// Until the region is resolved the image measures to zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Image {
    pub(crate) region: Option<TextureRegion>,
}

impl Image {
    pub fn new(region: Option<TextureRegion>) -> Self {
        Self { region }
    }

    pub fn region(&self) -> Option<&TextureRegion> {
        self.region.as_ref()
    }
}

impl Measurable for Image {
    fn content_height(&self, content_width: f32, _ctx: &MeasureContext<'_>) -> Result<f32> {
        Ok(match &self.region {
            Some(region) if region.width > 0.0 => region.height * content_width / region.width,
            Some(region) => region.height,
            None => 0.0,
        })
    }

    fn is_ready(&self) -> bool {
        self.region.is_some()
    }
}

impl Drawable for Image {
    fn draw(&self, surface: &mut dyn DrawSurface, ctx: &DrawContext<'_>) -> Result<()> {
        if let Some(region) = &self.region {
            let tint = if ctx.enabled {
                Color::WHITE
            } else {
                Color::WHITE.faded(0.5)
            };
            surface.draw_texture(&region.name, ctx.content, tint);
        }
        Ok(())
    }
}
