//! Parent widget kinds

use tessel_core::Point;

use super::Actionable;

/// Plain grouping container
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Container {
    /// Clip children to the content area
    pub clip: bool,
}

/// Vertically scrolling, clipping container
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollBox {
    offset: f32,
    /// Height of the laid-out children
    extent: f32,
}

impl ScrollBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> Point {
        Point::new(0.0, self.offset)
    }

    pub fn extent(&self) -> f32 {
        self.extent
    }

    pub(crate) fn set_extent(&mut self, extent: f32, viewport_height: f32) {
        self.extent = extent.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset(viewport_height));
    }

    pub fn max_offset(&self, viewport_height: f32) -> f32 {
        (self.extent - viewport_height).max(0.0)
    }

    /// Scroll by `delta` pixels, returning whether the offset moved
    pub fn scroll_by(&mut self, delta: f32, viewport_height: f32) -> bool {
        let next = (self.offset + delta).clamp(0.0, self.max_offset(viewport_height));
        if next == self.offset {
            return false;
        }
        self.offset = next;
        true
    }

    pub fn scroll_to(&mut self, offset: f32, viewport_height: f32) -> bool {
        self.scroll_by(offset - self.offset, viewport_height)
    }
}

/// Shows one child at a time
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabView {
    pub(crate) active: usize,
}

impl TabView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> usize {
        self.active
    }
}

/// Clickable container
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Button;

impl Actionable for Button {}
