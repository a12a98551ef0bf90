//! Pointer, keyboard and gamepad dispatch
//!
//! Pointer input hit-tests in reverse render order: highest layer first,
//! last-added child first within a layer, descendants before their parent.
//! A node is hit through its inner area (outer minus margin), and a point
//! outside a clipping ancestor's content area hits nothing beneath it.
//!
//! Keyboard and gamepad input resolve hotkeys from the root down through the
//! active nested navigable containers, then fall back to directional
//! navigation and confirm keys.

use std::collections::VecDeque;

use smallvec::SmallVec;
use tessel_core::{GamepadButton, KeyCode, MouseButton, NavDirection, Point, Rect};

use super::UiTree;
use crate::element::Visibility;
use crate::events::{EventData, UiEventKind};
use crate::navigation::{Navigable, Navigation};
use crate::node::{NodeId, NodeState, RenderNode};
use crate::widgets::Widget;

impl UiTree {
    /// Press the topmost enabled actionable node under the pointer
    pub fn mouse_down(&mut self, x: f32, y: f32, button: MouseButton) -> Option<NodeId> {
        if button != MouseButton::Left {
            return None;
        }
        let point = Point::new(x, y);
        let hit = self.hit_actionable(self.root, point, None)?;
        self.pressed = Some(hit);
        self.press(hit, Some(point));
        self.flush_events();
        Some(hit)
    }

    /// Release the pressed node.
    ///
    /// Returns the node if the release completed an action, that is the
    /// pointer was still inside it.
    pub fn mouse_up(&mut self, x: f32, y: f32, button: MouseButton) -> Option<NodeId> {
        if button != MouseButton::Left {
            return None;
        }
        let pressed = self.pressed.take()?;
        let point = Point::new(x, y);
        let inside = self
            .nodes
            .get(pressed)
            .is_some_and(|node| node.is_hittable() && node.inner_area().contains(point));
        self.release(pressed, inside);
        self.flush_events();
        inside.then_some(pressed)
    }

    /// Update hover states; returns whether any hover-enabled node is under
    /// the pointer
    pub fn mouse_moved(&mut self, x: f32, y: f32) -> bool {
        let point = Point::new(x, y);

        if let Some(pressed) = self.pressed {
            let data = self.nodes.get_mut(pressed).and_then(|node| {
                let content = node.content_area();
                node.widget
                    .as_actionable_mut()
                    .and_then(|actionable| actionable.drag(point, content))
            });
            if let Some(data) = data {
                self.emit_widget_event(pressed, data);
            }
        }

        let hovered = self.hover_node(self.root, point, None);
        self.flush_events();
        hovered
    }

    /// Scroll the deepest scroll box under the pointer; returns whether one
    /// consumed the wheel
    pub fn mouse_scrolled(&mut self, x: f32, y: f32, amount: f32) -> bool {
        let consumed = self.scroll_node(self.root, Point::new(x, y), amount, None);
        self.flush_events();
        consumed
    }

    /// Hotkey, then arrow navigation, then enter/space on the navigation target
    pub fn key_down(&mut self, key: KeyCode) -> Option<NodeId> {
        let activated = if let Some(target) = self.hotkey(key) {
            self.activate(target)
        } else if let Some(direction) = key.nav_direction() {
            self.navigate(direction)
        } else if key == KeyCode::ENTER || key == KeyCode::SPACE {
            self.nav_target.and_then(|target| self.activate(target))
        } else {
            None
        };
        self.flush_events();
        activated
    }

    /// Release the node activated by the last key or button press
    pub fn key_up(&mut self, _key: KeyCode) -> Option<NodeId> {
        self.release_activated()
    }

    /// Button hotkey, then D-pad navigation, then South on the navigation target
    pub fn button_down(&mut self, button: GamepadButton) -> Option<NodeId> {
        let activated = if let Some(target) = self.button_hotkey(button) {
            self.activate(target)
        } else if let Some(direction) = button.nav_direction() {
            self.navigate(direction)
        } else if button == GamepadButton::South {
            self.nav_target.and_then(|target| self.activate(target))
        } else {
            None
        };
        self.flush_events();
        activated
    }

    pub fn button_up(&mut self, _button: GamepadButton) -> Option<NodeId> {
        self.release_activated()
    }

    /// Node bound to `key`, searching the root then each active nested
    /// navigable container
    pub fn hotkey(&self, key: KeyCode) -> Option<NodeId> {
        self.resolve_hotkey(|navigation| navigation.key_target(key))
    }

    pub fn button_hotkey(&self, button: GamepadButton) -> Option<NodeId> {
        self.resolve_hotkey(|navigation| navigation.button_target(button))
    }

    /// Move focus, deepest active navigable container first.
    ///
    /// Only nodes that could be activated are focused. The previous target
    /// returns to normal and the new one is hovered.
    pub fn navigate(&mut self, direction: NavDirection) -> Option<NodeId> {
        let mut chain = vec![self.root];
        while let Some(next) = chain.last().and_then(|id| self.active_nested(*id)) {
            chain.push(next);
        }

        for owner in chain.into_iter().rev() {
            let Some(order) = self
                .nodes
                .get(owner)
                .and_then(|node| node.navigation.as_ref())
                .map(|navigation| navigation.order().to_vec())
            else {
                continue;
            };
            let usable: Vec<String> = order
                .into_iter()
                .filter(|element_id| {
                    self.find_by_id(element_id)
                        .and_then(|id| self.nodes.get(id))
                        .is_some_and(RenderNode::accepts_activation)
                })
                .collect();
            let accept = |element_id: &str| usable.iter().any(|usable| usable == element_id);

            let target = self
                .nodes
                .get_mut(owner)
                .and_then(|node| node.navigation.as_mut())
                .and_then(|navigation| navigation.navigate(direction, &accept));
            let Some(found) = target.and_then(|target| self.find_by_id(&target)) else {
                continue;
            };
            self.focus(found);
            self.flush_events();
            return Some(found);
        }
        None
    }

    /// Element currently targeted by directional navigation
    pub fn navigation_target(&self) -> Option<NodeId> {
        self.nav_target
    }

    fn resolve_hotkey(&self, lookup: impl Fn(&Navigation) -> Option<&str>) -> Option<NodeId> {
        let mut current = Some(self.root);
        while let Some(id) = current {
            let node = self.nodes.get(id)?;
            let target = node.navigation.as_ref().and_then(&lookup);
            if let Some(found) = target.and_then(|target| self.find_by_id(target)) {
                return Some(found);
            }
            current = self.active_nested(id);
        }
        None
    }

    /// First navigable descendant, breadth-first, that is not hidden.
    ///
    /// Tab views only search their active child.
    fn active_nested(&self, id: NodeId) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        let mut queue: VecDeque<NodeId> = eligible_children(node).into_iter().collect();
        while let Some(current) = queue.pop_front() {
            let Some(child) = self.nodes.get(current) else {
                continue;
            };
            let hidden = child.visibility == Visibility::Hidden
                || (child.initial_layout_occurred && !child.included_in_layout);
            if hidden {
                continue;
            }
            if child.navigation.is_some() {
                return Some(current);
            }
            queue.extend(eligible_children(child));
        }
        None
    }

    fn focus(&mut self, id: NodeId) {
        if let Some(previous) = self.nav_target.replace(id) {
            let hovered = self
                .nodes
                .get(previous)
                .is_some_and(|node| node.state == NodeState::Hover);
            if previous != id && hovered {
                self.set_state(previous, NodeState::Normal);
            }
        }
        let pressed = self
            .nodes
            .get(id)
            .is_some_and(|node| node.state == NodeState::Action);
        if !pressed {
            self.set_state(id, NodeState::Hover);
        }
    }

    /// Press an actionable node from a key or button; hidden, disabled and
    /// not yet rendered nodes refuse
    fn activate(&mut self, id: NodeId) -> Option<NodeId> {
        if !self.nodes.get(id)?.accepts_activation() {
            return None;
        }
        if let Some(previous) = self.key_pressed.take() {
            self.release(previous, false);
        }
        self.key_pressed = Some(id);
        self.press(id, None);
        Some(id)
    }

    fn release_activated(&mut self) -> Option<NodeId> {
        let pressed = self.key_pressed.take()?;
        self.release(pressed, true);
        self.flush_events();
        Some(pressed)
    }

    fn press(&mut self, id: NodeId, pointer: Option<Point>) {
        self.set_state(id, NodeState::Action);
        self.emit(id, UiEventKind::ActionBegin, EventData::None);

        let data = self.nodes.get_mut(id).and_then(|node| {
            let content = node.content_area();
            node.widget
                .as_actionable_mut()
                .and_then(|actionable| actionable.action_begin(pointer, content))
        });
        if let Some(data) = data {
            self.emit_widget_event(id, data);
        }
    }

    /// End a press; only a release inside the node completes the action
    fn release(&mut self, id: NodeId, completed: bool) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !completed {
            self.set_state(id, NodeState::Normal);
            return;
        }

        let state = if node.hover_enabled {
            NodeState::Hover
        } else {
            NodeState::Normal
        };
        self.set_state(id, state);
        self.emit(id, UiEventKind::ActionEnd, EventData::None);

        let data = self
            .nodes
            .get_mut(id)
            .and_then(|node| node.widget.as_actionable_mut())
            .and_then(|actionable| actionable.action_end());
        if let Some(data) = data {
            if matches!(data, EventData::Toggled(_)) {
                self.mark_dirty(id);
            }
            self.emit_widget_event(id, data);
        }
    }

    fn emit_widget_event(&mut self, id: NodeId, data: EventData) {
        let kind = match data {
            EventData::Toggled(_) => UiEventKind::Toggled,
            EventData::Value(_) => UiEventKind::ValueChanged,
            EventData::Scroll { .. } => UiEventKind::Scrolled,
            EventData::Tab(_) => UiEventKind::TabChanged,
            EventData::None => return,
        };
        self.emit(id, kind, data);
    }

    fn hit_actionable(&self, id: NodeId, point: Point, clip: Option<Rect>) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        if !node.is_hittable() || clip.is_some_and(|clip| !clip.contains(point)) {
            return None;
        }

        let child_clip = child_clip(node, clip);
        for child in hit_order(node) {
            if let Some(hit) = self.hit_actionable(child, point, child_clip) {
                return Some(hit);
            }
        }

        let hit = node.widget.is_actionable() && node.enabled && node.inner_area().contains(point);
        hit.then_some(id)
    }

    fn hover_node(&mut self, id: NodeId, point: Point, clip: Option<Rect>) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        let inside = node.is_hittable()
            && clip.map_or(true, |clip| clip.contains(point))
            && node.inner_area().contains(point);
        let child_clip = child_clip(node, clip);
        let hover_enabled = node.hover_enabled;
        let state = node.state;

        let mut hovered = false;
        for child in hit_order(node) {
            hovered |= self.hover_node(child, point, child_clip);
        }

        if hover_enabled && state != NodeState::Action {
            if inside {
                self.set_state(id, NodeState::Hover);
            } else if state == NodeState::Hover {
                self.set_state(id, NodeState::Normal);
            }
        }
        hovered || (hover_enabled && inside)
    }

    fn scroll_node(&mut self, id: NodeId, point: Point, amount: f32, clip: Option<Rect>) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        if !node.is_hittable() || clip.is_some_and(|clip| !clip.contains(point)) {
            return false;
        }
        let child_clip = child_clip(node, clip);
        for child in hit_order(node) {
            if self.scroll_node(child, point, amount, child_clip) {
                return true;
            }
        }

        let step = self.config.scroll_step;
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        let content = node.content_area();
        let Widget::ScrollBox(scroll) = &mut node.widget else {
            return false;
        };
        if !content.contains(point) {
            return false;
        }
        if scroll.scroll_by(amount * step, content.height()) {
            let y = scroll.offset().y;
            self.emit(id, UiEventKind::Scrolled, EventData::Scroll { x: 0.0, y });
        }
        true
    }
}

/// Children in hit-test order: highest layer first, last added first
fn hit_order(node: &RenderNode) -> SmallVec<[NodeId; 16]> {
    node.layers
        .values()
        .rev()
        .flat_map(|layer| layer.iter_hit_order())
        .collect()
}

fn child_clip(node: &RenderNode, clip: Option<Rect>) -> Option<Rect> {
    if !node.widget.clips() {
        return clip;
    }
    let content = node.content_area();
    Some(match clip {
        Some(clip) => clip
            .intersection(&content)
            .unwrap_or(Rect::new(content.x(), content.y(), 0.0, 0.0)),
        None => content,
    })
}

fn eligible_children(node: &RenderNode) -> SmallVec<[NodeId; 8]> {
    match &node.widget {
        Widget::TabView(tabs) => node.children.get(tabs.active).copied().into_iter().collect(),
        _ => node.children.iter().copied().collect(),
    }
}
