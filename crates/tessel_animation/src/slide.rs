//! Slide a node in from (or out to) one of its edges

use tessel_core::{DrawSurface, Rect};

use crate::easing::Easing;
use crate::effect::{Progress, VisualEffect};

/// Edge the node travels from / to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl SlideEdge {
    fn unit(self) -> (f32, f32) {
        match self {
            SlideEdge::Left => (-1.0, 0.0),
            SlideEdge::Right => (1.0, 0.0),
            SlideEdge::Top => (0.0, -1.0),
            SlideEdge::Bottom => (0.0, 1.0),
        }
    }
}

/// Offsets the drawn area from the layout target by a shrinking (slide in)
/// or growing (slide out) distance.
pub struct Slide {
    edge: SlideEdge,
    distance: f32,
    outgoing: bool,
    progress: Progress,
}

impl Slide {
    pub fn slide_in(edge: SlideEdge, distance: f32, duration: f32) -> Self {
        Self {
            edge,
            distance,
            outgoing: false,
            progress: Progress::new(duration, Easing::EaseOutCubic),
        }
    }

    pub fn slide_out(edge: SlideEdge, distance: f32, duration: f32) -> Self {
        Self {
            edge,
            distance,
            outgoing: true,
            progress: Progress::new(duration, Easing::EaseInCubic),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.progress.set_easing(easing);
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.progress = self.progress.with_delay(delay);
        self
    }

    fn offset_for(&self, t: f32) -> (f32, f32) {
        let travelled = if self.outgoing { t } else { 1.0 - t };
        let (ux, uy) = self.edge.unit();
        (ux * self.distance * travelled, uy * self.distance * travelled)
    }
}

impl VisualEffect for Slide {
    fn update(&mut self, current: &mut Rect, target: &Rect, delta: f32) -> bool {
        let t = self.progress.advance(delta);
        let (dx, dy) = self.offset_for(t);
        *current = target.offset(dx, dy);
        !(self.outgoing && self.progress.is_done())
    }

    fn interpolate(&mut self, alpha: f32) {
        self.progress.interpolate(alpha);
    }

    fn pre_render(&self, _surface: &mut dyn DrawSurface) {}

    fn post_render(&self, _surface: &mut dyn DrawSurface) {}

    fn is_finished(&self) -> bool {
        self.progress.is_done()
    }

    fn finish(&mut self) {
        self.progress.request_finish();
    }
}
