//! Declarative elements
//!
//! Application code describes UI as a tree of [`Element`]s and hands it to
//! [`UiTree::add_child`](crate::UiTree::add_child), which mirrors it into
//! render nodes.
//!
//! ```ignore
//! let menu = Element::container("menu")
//!     .flex("flex-column: xs-12c md-6c md-offset-3c")?
//!     .navigable(VerticalNavigation)
//!     .child(Element::button("play").child(Element::label("play-text", "Play")))
//!     .child(Element::button("quit").child(Element::label("quit-text", "Quit")));
//! tree.add_child(tree.root(), menu)?;
//! ```

use tessel_core::Color;
use tessel_theme::DEFAULT_STYLE_ID;

use crate::error::Result;
use crate::navigation::NavigationStrategy;
use crate::ruleset::{ImmediateLayout, LayoutDecl};
use crate::widgets::{
    Button, Checkbox, Container, Image, Label, ProgressBar, ScrollBox, Slider, TabView,
    TextureRegion, Widget,
};

/// How an element takes part in layout and render
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Visible,
    /// Zero size, not rendered, never hit
    Hidden,
    /// Takes space but is neither rendered nor hit
    NoRender,
}

/// Description of one UI element and its children
#[derive(Debug)]
pub struct Element {
    pub(crate) id: String,
    pub(crate) style_id: String,
    pub(crate) z_index: i32,
    pub(crate) visibility: Visibility,
    pub(crate) enabled: bool,
    pub(crate) hover_enabled: bool,
    pub(crate) layout: LayoutDecl,
    pub(crate) widget: Widget,
    pub(crate) navigation: Option<Box<dyn NavigationStrategy>>,
    pub(crate) children: Vec<Element>,
}

impl Element {
    pub fn new(id: impl Into<String>, widget: Widget) -> Self {
        let hover_enabled = widget.is_actionable();
        Self {
            id: id.into(),
            style_id: DEFAULT_STYLE_ID.to_string(),
            z_index: 0,
            visibility: Visibility::Visible,
            enabled: true,
            hover_enabled,
            layout: LayoutDecl::default(),
            widget,
            navigation: None,
            children: Vec::new(),
        }
    }

    pub fn container(id: impl Into<String>) -> Self {
        Self::new(id, Widget::Container(Container::default()))
    }

    pub fn scroll_box(id: impl Into<String>) -> Self {
        Self::new(id, Widget::ScrollBox(ScrollBox::new()))
    }

    pub fn tab_view(id: impl Into<String>) -> Self {
        Self::new(id, Widget::TabView(TabView::new()))
    }

    pub fn button(id: impl Into<String>) -> Self {
        Self::new(id, Widget::Button(Button))
    }

    pub fn label(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, Widget::Label(Label::new(text)))
    }

    /// `None` while the texture is still loading
    pub fn image(id: impl Into<String>, region: Option<TextureRegion>) -> Self {
        Self::new(id, Widget::Image(Image::new(region)))
    }

    pub fn checkbox(id: impl Into<String>, checked: bool) -> Self {
        Self::new(id, Widget::Checkbox(Checkbox::new(checked)))
    }

    pub fn slider(id: impl Into<String>, min: f32, max: f32) -> Result<Self> {
        Ok(Self::new(id, Widget::Slider(Slider::new(min, max)?)))
    }

    pub fn progress_bar(id: impl Into<String>, min: f32, max: f32) -> Result<Self> {
        Ok(Self::new(id, Widget::ProgressBar(ProgressBar::new(min, max)?)))
    }

    pub fn style(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = style_id.into();
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn hover(mut self, enabled: bool) -> Self {
        self.hover_enabled = enabled;
        self
    }

    /// Flex layout declaration; malformed tokens fail here
    pub fn flex(mut self, source: &str) -> Result<Self> {
        self.layout = LayoutDecl::flex(source)?;
        Ok(self)
    }

    pub fn immediate(mut self, layout: ImmediateLayout) -> Self {
        self.layout = LayoutDecl::Immediate(layout);
        self
    }

    pub fn layout(mut self, layout: LayoutDecl) -> Self {
        self.layout = layout;
        self
    }

    /// Clip children to the content area (containers only)
    pub fn clip(mut self, clip: bool) -> Self {
        if let Widget::Container(container) = &mut self.widget {
            container.clip = clip;
        }
        self
    }

    /// Text color override (labels only)
    pub fn color(mut self, color: Color) -> Self {
        if let Widget::Label(label) = &mut self.widget {
            label.color = Some(color);
        }
        self
    }

    /// Give this element hotkey tables and directional navigation
    pub fn navigable(mut self, strategy: impl NavigationStrategy + 'static) -> Self {
        self.navigation = Some(Box::new(strategy));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }
}
