//! Visual effect contract
//!
//! An effect is attached to a render node and driven by the node's update:
//! it may move the node's drawn area away from the layout target and it
//! brackets the node's draw calls with `pre_render`/`post_render`.
//!
//! Effects are never cancelled mid-frame. [`VisualEffect::finish`] only
//! requests an early finish; the effect still receives one more `update`,
//! which is where it reports completion.

use tessel_core::{DrawSurface, Rect};

use crate::easing::Easing;

/// Behaviour shared by every visual effect
pub trait VisualEffect: Send {
    /// Advance by `delta` seconds.
    ///
    /// `current` is the area the node will be drawn at this frame, `target`
    /// is the area layout computed. Returns whether the node is visible.
    fn update(&mut self, current: &mut Rect, target: &Rect, delta: f32) -> bool;

    /// Sub-frame smoothing between the last two updates
    fn interpolate(&mut self, _alpha: f32) {}

    fn pre_render(&self, surface: &mut dyn DrawSurface);

    fn post_render(&self, surface: &mut dyn DrawSurface);

    fn is_finished(&self) -> bool;

    /// Jump to the end state at the next update
    fn finish(&mut self);
}

/// Where an effect is in its timeline
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// Waiting out the start delay
    Waiting { remaining: f32 },
    Running,
    Done,
}

/// Delay + duration + easing bookkeeping shared by the built-in effects
#[derive(Clone, Debug)]
pub struct Progress {
    duration: f32,
    elapsed: f32,
    easing: Easing,
    phase: Phase,
    finish_requested: bool,
    previous: f32,
    current: f32,
    rendered: f32,
}

impl Progress {
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
            phase: Phase::Running,
            finish_requested: false,
            previous: 0.0,
            current: 0.0,
            rendered: 0.0,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        if delay > 0.0 {
            self.phase = Phase::Waiting { remaining: delay };
        }
        self
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advance and return the eased progress in `0.0..=1.0`
    pub fn advance(&mut self, delta: f32) -> f32 {
        self.previous = self.current;

        if self.finish_requested {
            self.phase = Phase::Done;
        }

        match self.phase {
            Phase::Waiting { remaining } => {
                let remaining = remaining - delta;
                if remaining > 0.0 {
                    self.phase = Phase::Waiting { remaining };
                } else {
                    self.phase = Phase::Running;
                    self.step(-remaining);
                }
            }
            Phase::Running => self.step(delta),
            Phase::Done => {}
        }

        self.current = match self.phase {
            Phase::Waiting { .. } => 0.0,
            Phase::Running => self.easing.apply(self.linear()),
            Phase::Done => 1.0,
        };
        self.rendered = self.current;
        self.current
    }

    fn step(&mut self, delta: f32) {
        self.elapsed += delta;
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.phase = Phase::Done;
        }
    }

    fn linear(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }

    /// Blend the last two eased values for sub-frame rendering
    pub fn interpolate(&mut self, alpha: f32) -> f32 {
        self.rendered = self.previous + (self.current - self.previous) * alpha.clamp(0.0, 1.0);
        self.rendered
    }

    /// Value most recently produced by `advance` or `interpolate`
    pub fn rendered(&self) -> f32 {
        self.rendered
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn request_finish(&mut self) {
        self.finish_requested = true;
    }
}
