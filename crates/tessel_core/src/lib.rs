//! Tessel Core
//!
//! Foundational types shared by every Tessel crate:
//!
//! - **Geometry**: points, sizes, rectangles and per-edge insets
//! - **Colors**: RGBA colors with hex parsing
//! - **Screen sizes**: responsive breakpoint buckets
//! - **Input vocabulary**: key codes, gamepad buttons, input sources
//! - **Draw surface**: the rendering contract and a command recorder

pub mod color;
pub mod events;
pub mod geometry;
pub mod screen;
pub mod surface;

pub use color::Color;
pub use events::{GamepadButton, InputSource, KeyCode, MouseButton, NavDirection};
pub use geometry::{Insets, Point, Rect, Size};
pub use screen::ScreenSize;
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
