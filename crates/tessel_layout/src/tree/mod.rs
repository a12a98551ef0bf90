//! The render tree
//!
//! [`UiTree`] owns every render node in a slot-map arena, the style resolver,
//! deferred and remote operation queues and the event dispatcher. A frame
//! runs as:
//!
//! 1. [`UiTree::layout`]: measure dirty subtrees (memoized)
//! 2. [`UiTree::update`]: apply queued operations, resolve geometry, step effects
//! 3. [`UiTree::interpolate`]: blend geometry for sub-frame rendering
//! 4. [`UiTree::render`]: draw visible nodes in layer order
//!
//! Input (`mouse_*`, `key_*`, `button_*`) may arrive between frames.

mod frame;
mod input;
mod layout;

use std::cell::RefCell;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use tessel_animation::VisualEffect;
use tessel_core::{Color, GamepadButton, InputSource, KeyCode, ScreenSize};
use tessel_theme::StyleResolver;
use tracing::{debug, trace, warn};

use crate::config::UiConfig;
use crate::deferred::{DeferredHandle, DeferredPhase, DeferredQueues};
use crate::element::{Element, Visibility};
use crate::error::{LayoutError, Result};
use crate::events::{EventData, EventDispatcher, UiEvent, UiEventKind};
use crate::navigation::{HotkeyOp, NavigationStrategy, VerticalNavigation};
use crate::node::{EffectCallback, EffectSlot, NodeId, NodeState, RenderNode};
use crate::remote::{RemoteHandle, RemoteOp};
use crate::ruleset::{ImmediateLayout, LayoutDecl};
use crate::widgets::{TextureRegion, Widget};

/// Element id and style id of the root node
pub const ROOT_ID: &str = "root";

/// Retained tree of render nodes
pub struct UiTree {
    nodes: SlotMap<NodeId, RenderNode>,
    root: NodeId,
    /// Nodes owning a navigation component, in attach order
    navigables: Vec<NodeId>,
    resolver: Arc<dyn StyleResolver>,
    config: UiConfig,

    /// Logical (scaled) screen dimensions
    screen_width: f32,
    screen_height: f32,
    screen: ScreenSize,
    /// Forces the next layout pass to visit every node
    screen_size_changed: bool,
    input_source: InputSource,
    clock: f64,

    deferred: DeferredQueues,
    id_cache: RefCell<FxHashMap<String, NodeId>>,
    dispatcher: EventDispatcher,
    pending_events: Vec<UiEvent>,

    /// Node holding the pointer press
    pressed: Option<NodeId>,
    /// Node activated by a key or gamepad button
    key_pressed: Option<NodeId>,
    /// Last directional navigation target
    nav_target: Option<NodeId>,

    remote_tx: Sender<RemoteOp>,
    remote_rx: Receiver<RemoteOp>,
}

impl UiTree {
    /// Create a tree holding only the root container.
    ///
    /// The root is navigable with [`VerticalNavigation`] and sized to the
    /// screen by [`UiTree::set_screen_size`].
    pub fn new(config: UiConfig, resolver: Arc<dyn StyleResolver>) -> Result<Self> {
        config.validate()?;

        let root_element = Element::container(ROOT_ID)
            .style(ROOT_ID)
            .immediate(ImmediateLayout::rect(0.0, 0.0, 0.0, 0.0))
            .navigable(VerticalNavigation);
        let (root_node, _) = RenderNode::from_element(root_element, None);

        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(root_node);
        let (remote_tx, remote_rx) = mpsc::channel();

        Ok(Self {
            nodes,
            root,
            navigables: vec![root],
            resolver,
            input_source: config.input_source,
            config,
            screen_width: 0.0,
            screen_height: 0.0,
            screen: ScreenSize::Xs,
            screen_size_changed: false,
            clock: 0.0,
            deferred: DeferredQueues::default(),
            id_cache: RefCell::new(FxHashMap::default()),
            dispatcher: EventDispatcher::new(),
            pending_events: Vec::new(),
            pressed: None,
            key_pressed: None,
            nav_target: None,
            remote_tx,
            remote_rx,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn node(&self, id: NodeId) -> Option<&RenderNode> {
        self.nodes.get(id)
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes owning a navigation component, root first
    pub fn navigable_nodes(&self) -> &[NodeId] {
        &self.navigables
    }

    pub fn screen_size(&self) -> ScreenSize {
        self.screen
    }

    pub fn input_source(&self) -> InputSource {
        self.input_source
    }

    /// Seconds accumulated by [`UiTree::update`]
    pub fn elapsed(&self) -> f64 {
        self.clock
    }

    /// Whether the next [`UiTree::layout`] has work to do
    pub fn needs_layout(&self) -> bool {
        self.screen_size_changed || self.is_dirty(self.root)
    }

    /// Resize the screen in physical pixels.
    ///
    /// A new breakpoint forces the next layout pass to visit every node.
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        let scale = self.config.scale;
        let (width, height) = (width / scale, height / scale);

        let screen = self.config.breakpoints.screen_size(width);
        if screen != self.screen {
            debug!(from = %self.screen, to = %screen, width, "screen size changed");
            self.screen = screen;
            self.screen_size_changed = true;
        }

        if width == self.screen_width && height == self.screen_height {
            return;
        }
        self.screen_width = width;
        self.screen_height = height;
        if let Some(root) = self.nodes.get_mut(self.root) {
            root.decl = LayoutDecl::Immediate(ImmediateLayout::rect(0.0, 0.0, width, height));
        }
        self.mark_dirty(self.root);
    }

    /// Switch the active input source, forcing a full re-layout
    pub fn set_input_source(&mut self, source: InputSource) {
        if source == self.input_source {
            return;
        }
        debug!(
            from = self.input_source.id(),
            to = source.id(),
            "input source changed"
        );
        self.input_source = source;
        self.screen_size_changed = true;
    }

    // ---- structure ----

    /// Attach `element` and its descendants under `parent`
    pub fn add_child(&mut self, parent: NodeId, element: Element) -> Result<NodeId> {
        let parent_node = self.node_ref(parent)?;
        if !parent_node.is_parent() {
            return Err(LayoutError::NotAParent {
                id: parent_node.element_id.clone(),
            });
        }
        validate_element(&element)?;

        let id = self.attach(parent, element);
        self.mark_dirty(parent);
        Ok(id)
    }

    fn attach(&mut self, parent: NodeId, element: Element) -> NodeId {
        let (node, children) = RenderNode::from_element(element, Some(parent));
        let z_index = node.z_index;
        let actionable = node.widget.is_actionable();
        let navigable = node.navigation.is_some();
        let element_id = node.element_id.clone();

        let id = self.nodes.insert(node);
        if navigable {
            self.navigables.push(id);
        }
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(id);
            parent_node.layers.entry(z_index).or_default().push(id);
        }

        if actionable {
            if let Some(navigation) = self
                .nearest_navigable(parent)
                .and_then(|owner| self.nodes.get_mut(owner))
                .and_then(|n| n.navigation.as_mut())
            {
                navigation.register(&element_id);
            }
        }

        for child in children {
            self.attach(id, child);
        }
        id
    }

    /// Detach and destroy a node and its subtree
    pub fn remove_child(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(LayoutError::RootRemoval);
        }
        let node = self.node_ref(id)?;
        let parent = node.parent;
        let filed_z = node.filed_z;

        let mut subtree = vec![id];
        let mut index = 0;
        while let Some(current) = subtree.get(index).copied() {
            if let Some(node) = self.nodes.get(current) {
                subtree.extend(node.children.iter().copied());
            }
            index += 1;
        }

        // Unregister while ancestors are still reachable
        for &current in &subtree {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            if !node.widget.is_actionable() {
                continue;
            }
            let element_id = node.element_id.clone();
            let owner = node.parent.and_then(|p| self.nearest_navigable(p));
            if let Some(navigation) = owner
                .and_then(|owner| self.nodes.get_mut(owner))
                .and_then(|n| n.navigation.as_mut())
            {
                navigation.unregister(&element_id);
            }
        }

        if let Some(parent_node) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent_node.children.retain(|child| *child != id);
            if let Some(layer) = parent_node.layers.get_mut(&filed_z) {
                layer.remove(id);
                if layer.is_empty() {
                    parent_node.layers.remove(&filed_z);
                }
            }
        }

        self.navigables.retain(|navigable| !subtree.contains(navigable));
        for current in subtree {
            self.nodes.remove(current);
            self.dispatcher.remove_node(current);
            for slot in [&mut self.pressed, &mut self.key_pressed, &mut self.nav_target] {
                if *slot == Some(current) {
                    *slot = None;
                }
            }
        }

        if let Some(parent) = parent {
            self.mark_dirty(parent);
        }
        Ok(())
    }

    /// Whether this node or any descendant needs layout.
    ///
    /// A parent's answer is cached until a descendant is marked dirty.
    pub fn is_dirty(&self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        if node.dirty {
            return true;
        }
        if node.collapsed || node.children.is_empty() {
            return false;
        }
        if node.subtree_dirty_valid.get() {
            return node.subtree_dirty.get();
        }
        let dirty = node.children.iter().any(|child| self.is_dirty(*child));
        node.subtree_dirty.set(dirty);
        node.subtree_dirty_valid.set(true);
        dirty
    }

    /// Flag a node for layout and invalidate every ancestor's cached answer
    pub fn mark_dirty(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.dirty = true;
        let mut parent = node.parent;
        self.id_cache.get_mut().clear();

        while let Some(current) = parent {
            let Some(ancestor) = self.nodes.get(current) else {
                break;
            };
            ancestor.subtree_dirty_valid.set(false);
            parent = ancestor.parent;
        }
    }

    /// Depth-first lookup by element id, memoized until the tree changes
    pub fn find_by_id(&self, element_id: &str) -> Option<NodeId> {
        let cached = self.id_cache.borrow().get(element_id).copied();
        if let Some(id) = cached.filter(|id| self.nodes.contains_key(*id)) {
            return Some(id);
        }

        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            if node.element_id == element_id {
                self.id_cache
                    .borrow_mut()
                    .insert(element_id.to_string(), current);
                return Some(current);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Like [`UiTree::find_by_id`], failing for unknown ids
    pub fn find_element(&self, element_id: &str) -> Result<NodeId> {
        self.find_by_id(element_id)
            .ok_or_else(|| LayoutError::UnknownElement {
                id: element_id.to_string(),
            })
    }

    // ---- events, effects, deferred work ----

    /// Register a listener for events targeting `id`
    pub fn on<F>(&mut self, id: NodeId, kind: UiEventKind, handler: F) -> Result<()>
    where
        F: Fn(&UiEvent) + Send + Sync + 'static,
    {
        self.node_ref(id)?;
        self.dispatcher.register(id, kind, handler);
        Ok(())
    }

    pub fn add_effect<E>(&mut self, id: NodeId, effect: E) -> Result<()>
    where
        E: VisualEffect + 'static,
    {
        self.push_effect(id, Box::new(effect), None)
    }

    /// Attach an effect whose `on_complete` runs once, after it finishes
    pub fn add_effect_with<E, F>(&mut self, id: NodeId, effect: E, on_complete: F) -> Result<()>
    where
        E: VisualEffect + 'static,
        F: FnOnce() + Send + 'static,
    {
        self.push_effect(id, Box::new(effect), Some(Box::new(on_complete)))
    }

    fn push_effect(
        &mut self,
        id: NodeId,
        effect: Box<dyn VisualEffect>,
        on_complete: Option<EffectCallback>,
    ) -> Result<()> {
        let node = self.node_mut(id)?;
        node.effects.push(EffectSlot { effect, on_complete });
        Ok(())
    }

    /// Ask every effect on a node to jump to its end at the next update
    pub fn finish_effects(&mut self, id: NodeId) -> Result<()> {
        let node = self.node_mut(id)?;
        for slot in &mut node.effects {
            slot.effect.finish();
        }
        Ok(())
    }

    /// Run `callback` at the start of `phase` once `delay` seconds have passed
    pub fn defer<F>(&mut self, phase: DeferredPhase, delay: f64, callback: F) -> DeferredHandle
    where
        F: FnOnce(&mut UiTree) + Send + 'static,
    {
        let handle = DeferredHandle::new();
        self.deferred.get_mut(phase).push(
            self.clock + delay.max(0.0),
            handle.clone(),
            Box::new(callback),
        );
        handle
    }

    pub fn pending_deferred(&self, phase: DeferredPhase) -> usize {
        self.deferred.get(phase).len()
    }

    /// Handle for queuing operations from other threads
    pub fn remote(&self) -> RemoteHandle {
        RemoteHandle::new(self.remote_tx.clone())
    }

    // ---- node properties ----

    pub fn set_z_index(&mut self, id: NodeId, z_index: i32) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.z_index == z_index {
            return Ok(());
        }
        node.z_index = z_index;
        self.mark_dirty(id);
        Ok(())
    }

    pub fn set_visibility(&mut self, id: NodeId, visibility: Visibility) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.visibility == visibility {
            return Ok(());
        }
        node.visibility = visibility;
        self.mark_dirty(id);
        Ok(())
    }

    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.enabled == enabled {
            return Ok(());
        }
        node.enabled = enabled;
        if !enabled && node.state == NodeState::Action {
            node.state = NodeState::Normal;
        }
        self.mark_dirty(id);
        Ok(())
    }

    pub fn set_hover_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.hover_enabled == enabled {
            return Ok(());
        }
        node.hover_enabled = enabled;
        if !enabled && node.state == NodeState::Hover {
            self.set_state(id, NodeState::Normal);
            self.flush_events();
        }
        Ok(())
    }

    pub fn set_style_id(&mut self, id: NodeId, style_id: &str) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.style_id == style_id {
            return Ok(());
        }
        node.style_id = style_id.to_string();
        self.mark_dirty(id);
        Ok(())
    }

    /// Replace the flex declaration; an unchanged source is not re-parsed
    pub fn set_flex_layout(&mut self, id: NodeId, source: &str) -> Result<()> {
        let node = self.node_ref(id)?;
        if node.decl.flex_source() == Some(source) {
            return Ok(());
        }
        let decl = LayoutDecl::flex(source)?;
        self.set_layout(id, decl)
    }

    pub fn set_immediate_layout(&mut self, id: NodeId, layout: ImmediateLayout) -> Result<()> {
        self.set_layout(id, LayoutDecl::Immediate(layout))
    }

    fn set_layout(&mut self, id: NodeId, decl: LayoutDecl) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.decl == decl {
            return Ok(());
        }
        node.decl = decl;
        self.mark_dirty(id);
        Ok(())
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<()> {
        let node = self.node_mut(id)?;
        let Widget::Label(label) = &mut node.widget else {
            return Err(wrong_kind(&node.element_id, "label"));
        };
        if label.text == text {
            return Ok(());
        }
        label.text = text.to_string();
        self.mark_dirty(id);
        Ok(())
    }

    pub fn set_label_color(&mut self, id: NodeId, color: Option<Color>) -> Result<()> {
        let node = self.node_mut(id)?;
        let Widget::Label(label) = &mut node.widget else {
            return Err(wrong_kind(&node.element_id, "label"));
        };
        if label.color == color {
            return Ok(());
        }
        label.color = color;
        self.mark_dirty(id);
        Ok(())
    }

    /// Swap an image's texture; `None` collapses it until a region arrives
    pub fn set_texture(&mut self, id: NodeId, region: Option<TextureRegion>) -> Result<()> {
        let node = self.node_mut(id)?;
        let Widget::Image(image) = &mut node.widget else {
            return Err(wrong_kind(&node.element_id, "image"));
        };
        if image.region == region {
            return Ok(());
        }
        image.region = region;
        self.mark_dirty(id);
        Ok(())
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        let Widget::Checkbox(checkbox) = &mut node.widget else {
            return Err(wrong_kind(&node.element_id, "checkbox"));
        };
        if checkbox.checked == checked {
            return Ok(());
        }
        checkbox.checked = checked;
        self.mark_dirty(id);
        Ok(())
    }

    /// Set a slider or progress bar value, clamped to its range
    pub fn set_value(&mut self, id: NodeId, value: f32) -> Result<()> {
        let node = self.node_mut(id)?;
        let changed = match &mut node.widget {
            Widget::Slider(slider) => slider.range.set_value(value),
            Widget::ProgressBar(bar) => bar.range.set_value(value),
            _ => return Err(wrong_kind(&node.element_id, "slider or progress bar")),
        };
        if changed {
            self.mark_dirty(id);
        }
        Ok(())
    }

    pub fn set_range(&mut self, id: NodeId, min: f32, max: f32) -> Result<()> {
        let node = self.node_mut(id)?;
        let changed = match &mut node.widget {
            Widget::Slider(slider) => slider.range.set_range(min, max)?,
            Widget::ProgressBar(bar) => bar.range.set_range(min, max)?,
            _ => return Err(wrong_kind(&node.element_id, "slider or progress bar")),
        };
        if changed {
            self.mark_dirty(id);
        }
        Ok(())
    }

    /// Show the child at `index`; out-of-range indices are ignored
    pub fn set_active_tab(&mut self, id: NodeId, index: usize) -> Result<()> {
        let node = self.node_mut(id)?;
        let child_count = node.children.len();
        let Widget::TabView(tabs) = &mut node.widget else {
            return Err(wrong_kind(&node.element_id, "tab view"));
        };
        if tabs.active == index {
            return Ok(());
        }
        if index >= child_count {
            warn!(element = %node.element_id, index, child_count, "tab index out of range");
            return Ok(());
        }
        tabs.active = index;

        let children = node.children.clone();
        for child in children {
            self.mark_dirty(child);
        }
        self.mark_dirty(id);
        self.emit(id, UiEventKind::TabChanged, EventData::Tab(index));
        self.flush_events();
        Ok(())
    }

    /// Scroll a scroll box to `offset`, clamped to its content
    pub fn scroll_to(&mut self, id: NodeId, offset: f32) -> Result<()> {
        let node = self.node_mut(id)?;
        let viewport = node.content_area().height();
        let Widget::ScrollBox(scroll) = &mut node.widget else {
            return Err(wrong_kind(&node.element_id, "scroll box"));
        };
        if scroll.scroll_to(offset, viewport) {
            let y = scroll.offset().y;
            self.emit(id, UiEventKind::Scrolled, EventData::Scroll { x: 0.0, y });
            self.flush_events();
        }
        Ok(())
    }

    // ---- hotkeys ----

    /// Map `key` to an element id; applied at the next update
    pub fn set_hotkey(&mut self, owner: NodeId, key: KeyCode, target: &str) -> Result<()> {
        self.queue_hotkey_op(owner, HotkeyOp::MapKey(key, target.to_string()))
    }

    pub fn unset_hotkey(&mut self, owner: NodeId, key: KeyCode) -> Result<()> {
        self.queue_hotkey_op(owner, HotkeyOp::UnmapKey(key))
    }

    pub fn set_button_hotkey(
        &mut self,
        owner: NodeId,
        button: GamepadButton,
        target: &str,
    ) -> Result<()> {
        self.queue_hotkey_op(owner, HotkeyOp::MapButton(button, target.to_string()))
    }

    pub fn unset_button_hotkey(&mut self, owner: NodeId, button: GamepadButton) -> Result<()> {
        self.queue_hotkey_op(owner, HotkeyOp::UnmapButton(button))
    }

    pub fn clear_hotkeys(&mut self, owner: NodeId) -> Result<()> {
        self.queue_hotkey_op(owner, HotkeyOp::Clear)
    }

    pub fn set_navigation_strategy<S>(&mut self, owner: NodeId, strategy: S) -> Result<()>
    where
        S: NavigationStrategy + 'static,
    {
        let node = self.node_mut(owner)?;
        match &mut node.navigation {
            Some(navigation) => {
                navigation.set_strategy(Box::new(strategy));
                Ok(())
            }
            None => Err(LayoutError::NotNavigable {
                id: node.element_id.clone(),
            }),
        }
    }

    fn queue_hotkey_op(&mut self, owner: NodeId, op: HotkeyOp) -> Result<()> {
        let node = self.node_mut(owner)?;
        match &mut node.navigation {
            Some(navigation) => {
                navigation.queue(op);
                Ok(())
            }
            None => Err(LayoutError::NotNavigable {
                id: node.element_id.clone(),
            }),
        }
    }

    fn drain_hotkey_ops(&mut self) {
        for id in &self.navigables {
            let Some(node) = self.nodes.get_mut(*id) else {
                continue;
            };
            if let Some(navigation) = node.navigation.as_mut() {
                let applied = navigation.drain();
                if applied > 0 {
                    trace!(element = %node.element_id, applied, "hotkey operations applied");
                }
            }
        }
    }

    // ---- queues ----

    fn run_deferred(&mut self, phase: DeferredPhase) {
        let due = self.deferred.get_mut(phase).take_due(self.clock);
        if !due.is_empty() {
            trace!(?phase, count = due.len(), "running deferred callbacks");
        }
        for callback in due {
            callback(self);
        }
    }

    fn apply_remote_ops(&mut self) {
        let ops: Vec<RemoteOp> = self.remote_rx.try_iter().collect();
        if ops.is_empty() {
            return;
        }
        debug!(count = ops.len(), "applying remote operations");

        for op in ops {
            match op {
                RemoteOp::AddChild { parent_id, element } => {
                    let Some(parent) = self.find_by_id(&parent_id) else {
                        warn!(
                            parent = %parent_id,
                            element = %element.id(),
                            "remote add: parent not found"
                        );
                        continue;
                    };
                    if let Err(err) = self.add_child(parent, element) {
                        warn!(parent = %parent_id, error = %err, "remote add failed");
                    }
                }
                RemoteOp::RemoveChild { id } => {
                    let Some(node) = self.find_by_id(&id) else {
                        warn!(element = %id, "remote remove: element not found");
                        continue;
                    };
                    if let Err(err) = self.remove_child(node) {
                        warn!(element = %id, error = %err, "remote remove failed");
                    }
                }
                RemoteOp::Defer {
                    phase,
                    delay,
                    handle,
                    callback,
                } => {
                    self.deferred
                        .get_mut(phase)
                        .push(self.clock + delay.max(0.0), handle, callback);
                }
            }
        }
    }

    // ---- helpers ----

    fn node_ref(&self, id: NodeId) -> Result<&RenderNode> {
        self.nodes.get(id).ok_or(LayoutError::UnknownNode)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut RenderNode> {
        self.nodes.get_mut(id).ok_or(LayoutError::UnknownNode)
    }

    /// `from` itself or its closest navigable ancestor
    fn nearest_navigable(&self, from: NodeId) -> Option<NodeId> {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = self.nodes.get(id)?;
            if node.navigation.is_some() {
                return Some(id);
            }
            current = node.parent;
        }
        None
    }

    /// Change a node's interaction state, queuing hover edge events
    pub(crate) fn set_state(&mut self, id: NodeId, state: NodeState) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let previous = node.state;
        if previous == state {
            return;
        }
        node.state = state;
        if previous == NodeState::Hover {
            self.emit(id, UiEventKind::HoverEnd, EventData::None);
        }
        if state == NodeState::Hover {
            self.emit(id, UiEventKind::HoverBegin, EventData::None);
        }
    }

    fn emit(&mut self, target: NodeId, kind: UiEventKind, data: EventData) {
        let Some(node) = self.nodes.get(target) else {
            return;
        };
        self.pending_events.push(UiEvent {
            kind,
            target,
            element_id: node.element_id.clone(),
            data,
        });
    }

    fn flush_events(&mut self) {
        let events = std::mem::take(&mut self.pending_events);
        for event in &events {
            self.dispatcher.dispatch(event);
        }
    }
}

impl std::fmt::Debug for UiTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiTree")
            .field("nodes", &self.nodes.len())
            .field("navigables", &self.navigables.len())
            .field("screen", &self.screen)
            .field("screen_width", &self.screen_width)
            .field("screen_height", &self.screen_height)
            .field("input_source", &self.input_source)
            .field("clock", &self.clock)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

/// Leaf kinds cannot declare children
fn validate_element(element: &Element) -> Result<()> {
    if !element.widget.is_parent() && !element.children.is_empty() {
        return Err(LayoutError::NotAParent {
            id: element.id.clone(),
        });
    }
    element.children.iter().try_for_each(validate_element)
}

fn wrong_kind(id: &str, expected: &'static str) -> LayoutError {
    LayoutError::WrongKind {
        id: id.to_string(),
        expected,
    }
}
