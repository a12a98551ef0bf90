//! Render nodes
//!
//! One [`RenderNode`] mirrors one element. Nodes live in the tree's arena and
//! refer to each other by [`NodeId`]; the tree drives their lifecycle:
//! layout (preferred size and offsets), update (geometry and effects),
//! interpolate (sub-frame smoothing) and render.
//!
//! Geometry per node:
//!
//! - outer area: resolved by update, the target effects animate toward
//! - inner area: outer minus margin, used for hit-testing
//! - content area: inner minus padding, where children and content go
//! - render area: outer interpolated between the last two updates

use std::cell::Cell;
use std::collections::BTreeMap;
use std::sync::Arc;

use slotmap::new_key_type;
use tessel_animation::VisualEffect;
use tessel_core::{Insets, Point, Rect, Size};
use tessel_theme::{StyleRule, StyleState};

use crate::element::{Element, Visibility};
use crate::layer::RenderLayer;
use crate::navigation::{Navigation, VerticalNavigation};
use crate::ruleset::{LayoutDecl, LayoutRuleset};
use crate::widgets::Widget;

new_key_type! {
    /// Handle of a render node inside its tree
    pub struct NodeId;
}

/// Interaction state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeState {
    #[default]
    Normal,
    Hover,
    Action,
}

impl NodeState {
    /// Background variant to draw
    pub fn style_state(self, enabled: bool) -> StyleState {
        if !enabled {
            return StyleState::Disabled;
        }
        match self {
            NodeState::Normal => StyleState::Normal,
            NodeState::Hover => StyleState::Hover,
            NodeState::Action => StyleState::Action,
        }
    }
}

/// Called once when an effect finishes
pub type EffectCallback = Box<dyn FnOnce() + Send>;

pub(crate) struct EffectSlot {
    pub(crate) effect: Box<dyn VisualEffect>,
    pub(crate) on_complete: Option<EffectCallback>,
}

/// Runtime mirror of one element
pub struct RenderNode {
    pub(crate) element_id: String,
    pub(crate) style_id: String,
    pub(crate) z_index: i32,
    /// Layer key the parent currently files this node under
    pub(crate) filed_z: i32,
    pub(crate) visibility: Visibility,
    pub(crate) enabled: bool,
    pub(crate) hover_enabled: bool,
    pub(crate) widget: Widget,

    pub(crate) decl: LayoutDecl,
    pub(crate) ruleset: LayoutRuleset,
    pub(crate) style: Option<Arc<StyleRule>>,
    pub(crate) state: NodeState,

    pub(crate) dirty: bool,
    pub(crate) subtree_dirty: Cell<bool>,
    pub(crate) subtree_dirty_valid: Cell<bool>,
    /// Laid out hidden; children are not consulted for dirtiness
    pub(crate) collapsed: bool,
    pub(crate) initial_layout_occurred: bool,
    pub(crate) initial_update_occurred: bool,
    pub(crate) hidden_by_layout_rule: bool,
    pub(crate) included_in_layout: bool,
    pub(crate) included_in_render: bool,

    pub(crate) parent: Option<NodeId>,
    /// Declaration order
    pub(crate) children: Vec<NodeId>,
    pub(crate) layers: BTreeMap<i32, RenderLayer>,
    pub(crate) navigation: Option<Navigation>,

    pub(crate) preferred: Size,
    pub(crate) offset: Point,
    /// Position assigned by the parent's placement, relative to its content origin
    pub(crate) relative: Point,
    pub(crate) content_width: f32,

    pub(crate) outer: Rect,
    pub(crate) previous_outer: Rect,
    pub(crate) render_area: Rect,
    pub(crate) effects: Vec<EffectSlot>,

    pub(crate) measure_count: u32,
}

impl RenderNode {
    /// Build a node from an element, handing back its children
    pub(crate) fn from_element(element: Element, parent: Option<NodeId>) -> (Self, Vec<Element>) {
        let Element {
            id,
            style_id,
            z_index,
            visibility,
            enabled,
            hover_enabled,
            layout,
            widget,
            navigation,
            children,
        } = element;

        let navigation = match (navigation, &widget) {
            (Some(strategy), _) => Some(Navigation::new(strategy)),
            (None, Widget::TabView(_)) => Some(Navigation::new(Box::new(VerticalNavigation))),
            (None, _) => None,
        };

        let node = Self {
            element_id: id,
            style_id,
            z_index,
            filed_z: z_index,
            visibility,
            enabled,
            hover_enabled,
            widget,
            ruleset: LayoutRuleset::from_decl(&layout),
            decl: layout,
            style: None,
            state: NodeState::Normal,
            dirty: true,
            subtree_dirty: Cell::new(false),
            subtree_dirty_valid: Cell::new(false),
            collapsed: false,
            initial_layout_occurred: false,
            initial_update_occurred: false,
            hidden_by_layout_rule: false,
            included_in_layout: false,
            included_in_render: false,
            parent,
            children: Vec::new(),
            layers: BTreeMap::new(),
            navigation,
            preferred: Size::ZERO,
            offset: Point::ZERO,
            relative: Point::ZERO,
            content_width: -1.0,
            outer: Rect::ZERO,
            previous_outer: Rect::ZERO,
            render_area: Rect::ZERO,
            effects: Vec::new(),
            measure_count: 0,
        };
        (node, children)
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    /// Element kind used for style lookup
    pub fn kind(&self) -> &'static str {
        self.widget.kind()
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_hover_enabled(&self) -> bool {
        self.hover_enabled
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn is_parent(&self) -> bool {
        self.widget.is_parent()
    }

    pub fn layout_decl(&self) -> &LayoutDecl {
        &self.decl
    }

    pub fn style(&self) -> Option<&Arc<StyleRule>> {
        self.style.as_ref()
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in declaration order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Z-indices of the layers currently holding children, ascending
    pub fn layer_keys(&self) -> impl Iterator<Item = i32> + '_ {
        self.layers.keys().copied()
    }

    pub fn layer(&self, z_index: i32) -> Option<&RenderLayer> {
        self.layers.get(&z_index)
    }

    pub fn navigation(&self) -> Option<&Navigation> {
        self.navigation.as_ref()
    }

    pub fn is_navigable(&self) -> bool {
        self.navigation.is_some()
    }

    /// Preferred outer size from the last layout
    pub fn preferred_size(&self) -> Size {
        self.preferred
    }

    /// Position relative to the parent's content origin
    pub fn relative_offset(&self) -> Point {
        self.relative
    }

    pub fn outer_area(&self) -> Rect {
        self.outer
    }

    pub fn inner_area(&self) -> Rect {
        self.outer.shrink(self.margin())
    }

    pub fn content_area(&self) -> Rect {
        self.inner_area().shrink(self.padding())
    }

    pub fn render_area(&self) -> Rect {
        self.render_area
    }

    /// How many times layout actually measured this node
    pub fn measure_count(&self) -> u32 {
        self.measure_count
    }

    pub fn has_initial_layout(&self) -> bool {
        self.initial_layout_occurred
    }

    pub fn has_initial_update(&self) -> bool {
        self.initial_update_occurred
    }

    pub fn is_hidden_by_layout_rule(&self) -> bool {
        self.hidden_by_layout_rule
    }

    pub fn is_included_in_layout(&self) -> bool {
        self.included_in_layout
    }

    pub fn is_included_in_render(&self) -> bool {
        self.included_in_render
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    pub(crate) fn margin(&self) -> Insets {
        self.style.as_ref().map(|s| s.margin).unwrap_or_default()
    }

    pub(crate) fn padding(&self) -> Insets {
        self.style.as_ref().map(|s| s.padding).unwrap_or_default()
    }

    /// Laid out, updated and visible this frame
    pub(crate) fn is_hittable(&self) -> bool {
        self.initial_update_occurred && self.included_in_render
    }

    /// Hittable, enabled and actionable: may be focused and pressed
    pub(crate) fn accepts_activation(&self) -> bool {
        self.widget.is_actionable() && self.enabled && self.is_hittable()
    }

    /// Zero the measured size for a node that takes no part in layout
    pub(crate) fn collapse(&mut self) {
        self.preferred = Size::ZERO;
        self.offset = Point::ZERO;
        self.included_in_layout = false;
        self.collapsed = self.is_parent();
    }
}

impl std::fmt::Debug for RenderNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderNode")
            .field("element_id", &self.element_id)
            .field("kind", &self.kind())
            .field("z_index", &self.z_index)
            .field("state", &self.state)
            .field("dirty", &self.dirty)
            .field("outer", &self.outer)
            .field("children", &self.children.len())
            .field("effects", &self.effects.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_dirty_and_unlaid() {
        let (node, children) = RenderNode::from_element(
            Element::container("panel").child(Element::label("text", "hi")),
            None,
        );
        assert!(node.dirty);
        assert!(!node.has_initial_layout());
        assert!(!node.is_included_in_render());
        assert_eq!(children.len(), 1);
        assert_eq!(node.kind(), "container");
    }

    #[test]
    fn test_tab_views_are_navigable_by_default() {
        let (tabs, _) = RenderNode::from_element(Element::tab_view("tabs"), None);
        assert!(tabs.is_navigable());
        let (panel, _) = RenderNode::from_element(Element::container("panel"), None);
        assert!(!panel.is_navigable());
    }

    #[test]
    fn test_style_state_prefers_disabled() {
        assert_eq!(NodeState::Hover.style_state(true), StyleState::Hover);
        assert_eq!(NodeState::Hover.style_state(false), StyleState::Disabled);
    }
}
