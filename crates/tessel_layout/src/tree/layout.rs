//! Layout pass
//!
//! Layout is memoized: a clean subtree is skipped entirely unless the pass
//! is forced by a breakpoint or input-source change. Within a parent,
//! layers are laid out in ascending z-order and each layer is placed with
//! the parent's placement, so children of different layers never push
//! each other around.

use std::sync::Arc;

use smallvec::SmallVec;
use tessel_core::{Point, Size};
use tessel_theme::StyleRule;
use tracing::{debug, trace};

use super::UiTree;
use crate::deferred::DeferredPhase;
use crate::element::Visibility;
use crate::error::{LayoutError, Result};
use crate::node::NodeId;
use crate::ruleset::{
    place_children, ChildBox, HeightRule, LayoutRuleset, LayoutState, Placement,
};
use crate::widgets::{MeasureContext, Widget};

impl UiTree {
    /// Measure every dirty subtree.
    ///
    /// Fails if a node's style cannot be resolved or a leaf cannot measure
    /// its content; nodes measured before the failure keep their results.
    pub fn layout(&mut self) -> Result<()> {
        self.run_deferred(DeferredPhase::PostLayout);

        let mut state = LayoutState {
            parent_width: self.screen_width,
            screen: self.screen,
            input: self.input_source,
            force: self.screen_size_changed,
        };
        if state.force {
            debug!(screen = %self.screen, "forced layout pass");
        }

        self.layout_node(self.root, &mut state, false)?;
        self.screen_size_changed = false;
        Ok(())
    }

    /// `suppressed` hides the node regardless of its own rules (inactive tabs)
    fn layout_node(&mut self, id: NodeId, state: &mut LayoutState, suppressed: bool) -> Result<()> {
        if !state.force && !self.is_dirty(id) {
            return Ok(());
        }

        let resolver = Arc::clone(&self.resolver);
        let node = self.node_mut(id)?;
        node.measure_count += 1;

        let style = resolver
            .resolve(node.kind(), &node.style_id, state.screen)
            .ok_or_else(|| LayoutError::MissingStyle {
                kind: node.kind(),
                style_id: node.style_id.clone(),
            })?;
        node.style = Some(Arc::clone(&style));

        if !node.ruleset.matches(&node.decl) {
            trace!(element = %node.element_id, "layout ruleset re-derived");
            node.ruleset = LayoutRuleset::from_decl(&node.decl);
        }

        node.hidden_by_layout_rule = false;
        if suppressed
            || node.visibility == Visibility::Hidden
            || node.ruleset.is_hidden_for(state.input)
        {
            node.collapse();
            self.finish_layout(id);
            return Ok(());
        }

        let width = node.ruleset.preferred_width(state);
        if width <= 0.0 {
            node.hidden_by_layout_rule = true;
            node.collapse();
            self.finish_layout(id);
            return Ok(());
        }

        let offset = node.ruleset.offset(state);
        let height_rule = node.ruleset.preferred_height(state);
        let insets = style.insets();
        let content_width = (width - insets.horizontal()).max(0.0);

        let height = if node.is_parent() {
            if node.collapsed {
                // Descendants may have missed forced passes while hidden
                self.dirty_descendants(id);
            }
            self.layout_children(id, content_width, height_rule, &style, state)?
        } else {
            let ready = node.widget.as_measurable().map_or(true, |m| m.is_ready());
            if !ready {
                node.collapse();
                self.finish_layout(id);
                return Ok(());
            }
            match height_rule {
                HeightRule::Fixed(height) => height,
                HeightRule::Auto => {
                    let ctx = MeasureContext {
                        element_id: &node.element_id,
                        style: &style,
                    };
                    let content_height = match node.widget.as_measurable() {
                        Some(measurable) => measurable.content_height(content_width, &ctx)?,
                        None => 0.0,
                    };
                    content_height + insets.vertical()
                }
            }
        };

        let node = self.node_mut(id)?;
        node.preferred = Size::new(width, height.max(style.min_height));
        node.offset = offset;
        node.content_width = content_width;
        node.included_in_layout = !node.preferred.is_empty();
        node.collapsed = false;
        self.finish_layout(id);
        Ok(())
    }

    /// Lay out a parent's layers and return its outer height
    fn layout_children(
        &mut self,
        id: NodeId,
        content_width: f32,
        height_rule: HeightRule,
        style: &StyleRule,
        state: &mut LayoutState,
    ) -> Result<f32> {
        let node = self.node_mut(id)?;
        if node.content_width != content_width {
            let children = node.children.clone();
            for child in children {
                if let Some(child) = self.nodes.get_mut(child) {
                    child.dirty = true;
                }
            }
        }
        self.restack_children(id);

        let fixed = match height_rule {
            HeightRule::Fixed(height) => Some(height),
            HeightRule::Auto => None,
        };

        let saved_width = state.parent_width;
        state.parent_width = content_width;
        let laid_out = self.layout_layers(id, state);
        state.parent_width = saved_width;
        let content_bottom = laid_out?;

        let insets = style.insets();
        let node = self.node_mut(id)?;
        if let Widget::ScrollBox(scroll) = &mut node.widget {
            let viewport = fixed.map_or(content_bottom, |h| (h - insets.vertical()).max(0.0));
            scroll.set_extent(content_bottom, viewport);
        }

        Ok(fixed.unwrap_or(content_bottom + insets.vertical()))
    }

    /// Lay out and place each layer, returning the lowest child bottom
    fn layout_layers(&mut self, id: NodeId, state: &mut LayoutState) -> Result<f32> {
        let node = self.node_ref(id)?;
        let (placement, active_tab) = match &node.widget {
            Widget::TabView(tabs) => (Placement::Absolute, node.children.get(tabs.active).copied()),
            _ => (node.ruleset.placement(), None),
        };
        let is_tab_view = matches!(node.widget, Widget::TabView(_));
        let layers: SmallVec<[SmallVec<[NodeId; 8]>; 4]> = node
            .layers
            .values()
            .map(|layer| layer.iter().collect())
            .collect();

        let mut bottom = 0.0_f32;
        for layer in layers {
            for &child in &layer {
                let suppressed = is_tab_view && Some(child) != active_tab;
                self.layout_node(child, state, suppressed)?;
            }

            let boxes: Vec<ChildBox> = layer
                .iter()
                .map(|child| match self.nodes.get(*child) {
                    Some(node) if node.included_in_layout => ChildBox {
                        size: node.preferred,
                        offset: node.offset,
                    },
                    _ => ChildBox {
                        size: Size::ZERO,
                        offset: Point::ZERO,
                    },
                })
                .collect();
            let positions = place_children(placement, &boxes, state.parent_width);

            for ((child, position), placed) in layer.iter().zip(positions).zip(&boxes) {
                if let Some(node) = self.nodes.get_mut(*child) {
                    node.relative = position;
                }
                if !placed.size.is_empty() {
                    bottom = bottom.max(position.y + placed.size.height);
                }
            }
        }
        Ok(bottom)
    }

    /// Move children whose z-index changed into their new layer
    fn restack_children(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let moves: SmallVec<[(NodeId, i32, i32); 4]> = node
            .children
            .iter()
            .filter_map(|child| {
                let child_node = self.nodes.get(*child)?;
                (child_node.z_index != child_node.filed_z)
                    .then_some((*child, child_node.filed_z, child_node.z_index))
            })
            .collect();

        for (child, from, to) in moves {
            if let Some(parent) = self.nodes.get_mut(id) {
                if let Some(layer) = parent.layers.get_mut(&from) {
                    layer.remove(child);
                    if layer.is_empty() {
                        parent.layers.remove(&from);
                    }
                }
                parent.layers.entry(to).or_default().push(child);
            }
            if let Some(child_node) = self.nodes.get_mut(child) {
                child_node.filed_z = to;
                trace!(element = %child_node.element_id, from, to, "restacked");
            }
        }
    }

    fn dirty_descendants(&mut self, id: NodeId) {
        let mut stack: SmallVec<[NodeId; 16]> = match self.nodes.get(id) {
            Some(node) => node.children.iter().copied().collect(),
            None => return,
        };
        let mut count = 0_usize;
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current) {
                node.dirty = true;
                node.subtree_dirty_valid.set(false);
                stack.extend(node.children.iter().copied());
                count += 1;
            }
        }
        trace!(count, "descendants of a re-shown parent marked dirty");
    }

    fn finish_layout(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.dirty = false;
            node.initial_layout_occurred = true;
            node.subtree_dirty.set(false);
            node.subtree_dirty_valid.set(true);
        }
    }
}
