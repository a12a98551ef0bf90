//! Widget kinds and their capabilities
//!
//! A render node carries one [`Widget`]. Parent kinds hold children and are
//! measured from them; leaf kinds measure and draw themselves through the
//! capability traits:
//!
//! | widget | parent | [`Measurable`] | [`Drawable`] | [`Actionable`] |
//! |--------|--------|----------------|--------------|----------------|
//! | [`Container`] | yes | | | |
//! | [`ScrollBox`] | yes | | | |
//! | [`TabView`] | yes | | | |
//! | [`Button`] | yes | | | yes |
//! | [`Label`] | | yes | yes | |
//! | [`Image`] | | yes | yes | |
//! | [`Checkbox`] | | yes | yes | yes |
//! | [`Slider`] | | yes | yes | yes |
//! | [`ProgressBar`] | | yes | yes | |
//!
//! Backgrounds are drawn by the tree for every kind from the node's style.

mod checkbox;
mod containers;
mod image;
mod label;
mod range;

pub use checkbox::Checkbox;
pub use containers::{Button, Container, ScrollBox, TabView};
pub use image::{Image, TextureRegion};
pub use label::Label;
pub use range::{ProgressBar, Slider, ValueRange};

use tessel_core::{DrawSurface, Point, Rect};
use tessel_theme::StyleRule;

use crate::error::Result;
use crate::events::EventData;
use crate::node::NodeState;

/// What a leaf sees while being measured
#[derive(Clone, Copy, Debug)]
pub struct MeasureContext<'a> {
    pub element_id: &'a str,
    pub style: &'a StyleRule,
}

/// What a widget sees while being drawn
#[derive(Clone, Copy, Debug)]
pub struct DrawContext<'a> {
    pub element_id: &'a str,
    pub style: &'a StyleRule,
    pub state: NodeState,
    pub enabled: bool,
    pub inner: Rect,
    pub content: Rect,
}

/// Preferred-size contract of leaf widgets
pub trait Measurable {
    /// Content height at the given content width
    fn content_height(&self, content_width: f32, ctx: &MeasureContext<'_>) -> Result<f32>;

    /// False while a backing asset is unresolved; the node then measures to zero
    fn is_ready(&self) -> bool {
        true
    }
}

/// Render contract of leaf widgets
pub trait Drawable {
    fn draw(&self, surface: &mut dyn DrawSurface, ctx: &DrawContext<'_>) -> Result<()>;
}

/// Begin/end activation contract.
///
/// Returned data is emitted as a widget event alongside the action event.
pub trait Actionable {
    /// Pressed; `pointer` is `None` for hotkey and gamepad activation
    fn action_begin(&mut self, _pointer: Option<Point>, _content: Rect) -> Option<EventData> {
        None
    }

    /// Released inside the node
    fn action_end(&mut self) -> Option<EventData> {
        None
    }

    /// Pointer moved while pressed
    fn drag(&mut self, _pointer: Point, _content: Rect) -> Option<EventData> {
        None
    }
}

/// Closed set of widget kinds
#[derive(Clone, Debug, PartialEq)]
pub enum Widget {
    Container(Container),
    ScrollBox(ScrollBox),
    TabView(TabView),
    Button(Button),
    Label(Label),
    Image(Image),
    Checkbox(Checkbox),
    Slider(Slider),
    ProgressBar(ProgressBar),
}

impl Widget {
    /// Element kind used for style lookup
    pub fn kind(&self) -> &'static str {
        match self {
            Widget::Container(_) => "container",
            Widget::ScrollBox(_) => "scroll_box",
            Widget::TabView(_) => "tab_view",
            Widget::Button(_) => "button",
            Widget::Label(_) => "label",
            Widget::Image(_) => "image",
            Widget::Checkbox(_) => "checkbox",
            Widget::Slider(_) => "slider",
            Widget::ProgressBar(_) => "progress_bar",
        }
    }

    pub fn is_parent(&self) -> bool {
        matches!(
            self,
            Widget::Container(_) | Widget::ScrollBox(_) | Widget::TabView(_) | Widget::Button(_)
        )
    }

    /// Whether children are clipped to the content area
    pub fn clips(&self) -> bool {
        match self {
            Widget::Container(container) => container.clip,
            Widget::ScrollBox(_) => true,
            _ => false,
        }
    }

    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            Widget::Button(_) | Widget::Checkbox(_) | Widget::Slider(_)
        )
    }

    pub fn as_measurable(&self) -> Option<&dyn Measurable> {
        match self {
            Widget::Label(label) => Some(label),
            Widget::Image(image) => Some(image),
            Widget::Checkbox(checkbox) => Some(checkbox),
            Widget::Slider(slider) => Some(slider),
            Widget::ProgressBar(bar) => Some(bar),
            _ => None,
        }
    }

    pub fn as_drawable(&self) -> Option<&dyn Drawable> {
        match self {
            Widget::Label(label) => Some(label),
            Widget::Image(image) => Some(image),
            Widget::Checkbox(checkbox) => Some(checkbox),
            Widget::Slider(slider) => Some(slider),
            Widget::ProgressBar(bar) => Some(bar),
            _ => None,
        }
    }

    pub fn as_actionable_mut(&mut self) -> Option<&mut dyn Actionable> {
        match self {
            Widget::Button(button) => Some(button),
            Widget::Checkbox(checkbox) => Some(checkbox),
            Widget::Slider(slider) => Some(slider),
            _ => None,
        }
    }

    /// Offset subtracted from child positions
    pub fn scroll_offset(&self) -> Point {
        match self {
            Widget::ScrollBox(scroll) => scroll.offset(),
            _ => Point::ZERO,
        }
    }
}
