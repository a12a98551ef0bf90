//! Tessel Animation System
//!
//! Visual effects attached to render nodes.
//!
//! # Features
//!
//! - **Easing**: quadratic and cubic curves
//! - **Effects**: [`Fade`] and [`Slide`], both with optional start delay
//! - **Early finish**: effects jump to their end state on request and still
//!   report completion through a final update

pub mod easing;
pub mod effect;
pub mod fade;
pub mod slide;

pub use easing::Easing;
pub use effect::{Phase, Progress, VisualEffect};
pub use fade::{Fade, FadeDirection};
pub use slide::{Slide, SlideEdge};
