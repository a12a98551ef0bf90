//! Alpha fade in / fade out

use tessel_core::{DrawSurface, Rect};

use crate::easing::Easing;
use crate::effect::{Progress, VisualEffect};

/// Whether the node is appearing or disappearing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

/// Fades a node's alpha while keeping it on its layout target
pub struct Fade {
    direction: FadeDirection,
    progress: Progress,
}

impl Fade {
    pub fn fade_in(duration: f32) -> Self {
        Self::new(FadeDirection::In, duration, Easing::EaseOutQuad)
    }

    pub fn fade_out(duration: f32) -> Self {
        Self::new(FadeDirection::Out, duration, Easing::EaseInQuad)
    }

    pub fn new(direction: FadeDirection, duration: f32, easing: Easing) -> Self {
        Self {
            direction,
            progress: Progress::new(duration, easing),
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.progress = self.progress.with_delay(delay);
        self
    }

    /// Alpha the node is drawn with
    pub fn alpha(&self) -> f32 {
        self.alpha_for(self.progress.rendered())
    }

    fn alpha_for(&self, t: f32) -> f32 {
        match self.direction {
            FadeDirection::In => t,
            FadeDirection::Out => 1.0 - t,
        }
    }
}

impl VisualEffect for Fade {
    fn update(&mut self, current: &mut Rect, target: &Rect, delta: f32) -> bool {
        *current = *target;
        let t = self.progress.advance(delta);
        if self.progress.is_done() {
            tracing::trace!(direction = ?self.direction, "fade finished");
        }
        self.alpha_for(t) > 0.0 || self.direction == FadeDirection::In
    }

    fn interpolate(&mut self, alpha: f32) {
        self.progress.interpolate(alpha);
    }

    fn pre_render(&self, surface: &mut dyn DrawSurface) {
        surface.push_alpha(self.alpha());
    }

    fn post_render(&self, surface: &mut dyn DrawSurface) {
        surface.pop_alpha();
    }

    fn is_finished(&self) -> bool {
        self.progress.is_done()
    }

    fn finish(&mut self) {
        self.progress.request_finish();
    }
}
