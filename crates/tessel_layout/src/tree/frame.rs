//! Update, interpolate and render passes

use smallvec::SmallVec;
use tessel_core::{Color, DrawSurface, Point, Rect};
use tessel_theme::{Background, StyleRule};
use tracing::debug;

use super::UiTree;
use crate::deferred::DeferredPhase;
use crate::element::Visibility;
use crate::error::Result;
use crate::node::{EffectCallback, NodeId, RenderNode};
use crate::widgets::DrawContext;

impl UiTree {
    /// Advance the tree by `delta` seconds.
    ///
    /// Applies remote operations, due post-update callbacks and queued hotkey
    /// changes, then resolves every laid-out node's geometry and steps its
    /// effects.
    pub fn update(&mut self, delta: f32) {
        self.clock += f64::from(delta.max(0.0));
        self.apply_remote_ops();
        self.run_deferred(DeferredPhase::PostUpdate);
        self.drain_hotkey_ops();

        let viewport = Rect::new(0.0, 0.0, self.screen_width, self.screen_height);
        self.update_node(self.root, viewport, Point::ZERO, true, delta);
        self.flush_events();
    }

    fn update_node(
        &mut self,
        id: NodeId,
        parent_content: Rect,
        scroll: Point,
        parent_included: bool,
        delta: f32,
    ) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if !node.initial_layout_occurred {
            return;
        }

        let rounding = node.style.as_ref().map(|s| s.rounding).unwrap_or_default();
        let target = Rect::new(
            rounding.apply(parent_content.x() + node.relative.x - scroll.x),
            rounding.apply(parent_content.y() + node.relative.y - scroll.y),
            rounding.apply(node.preferred.width),
            rounding.apply(node.preferred.height),
        );

        node.previous_outer = node.outer;
        let mut completed: SmallVec<[EffectCallback; 2]> = SmallVec::new();
        let visible = if node.effects.is_empty() {
            node.outer = target;
            node.included_in_layout
        } else {
            let mut visible = false;
            let mut finished: SmallVec<[usize; 4]> = SmallVec::new();
            for (index, slot) in node.effects.iter_mut().enumerate() {
                visible |= slot.effect.update(&mut node.outer, &target, delta);
                if slot.effect.is_finished() {
                    finished.push(index);
                }
            }
            for index in finished.into_iter().rev() {
                let slot = node.effects.remove(index);
                completed.extend(slot.on_complete);
            }
            visible
        };
        if !node.initial_update_occurred {
            node.previous_outer = node.outer;
        }

        node.render_area = node.outer;
        node.included_in_render =
            visible && parent_included && node.visibility == Visibility::Visible;
        node.initial_update_occurred = true;

        let included = node.included_in_render;
        let content = node.content_area();
        let child_scroll = node.widget.scroll_offset();
        let children: SmallVec<[NodeId; 16]> =
            node.layers.values().flat_map(|layer| layer.iter()).collect();

        if !completed.is_empty() {
            debug!(element = %node.element_id, count = completed.len(), "effects completed");
        }
        for on_complete in completed {
            on_complete();
        }

        for child in children {
            self.update_node(child, content, child_scroll, included, delta);
        }
    }

    /// Blend every node's geometry between its last two updates
    pub fn interpolate(&mut self, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        for node in self.nodes.values_mut() {
            if !node.initial_update_occurred {
                continue;
            }
            node.render_area = node.previous_outer.lerp(&node.outer, alpha);
            for slot in &mut node.effects {
                slot.effect.interpolate(alpha);
            }
        }
    }

    /// Draw every visible node, lowest layer first.
    ///
    /// Clip regions pushed for clipping parents are popped even when a
    /// descendant fails to draw.
    pub fn render(&mut self, surface: &mut dyn DrawSurface) -> Result<()> {
        self.run_deferred(DeferredPhase::PostRender);
        self.render_node(self.root, surface)
    }

    fn render_node(&self, id: NodeId, surface: &mut dyn DrawSurface) -> Result<()> {
        let Some(node) = self.nodes.get(id) else {
            return Ok(());
        };
        if !node.is_hittable() {
            return Ok(());
        }
        let Some(style) = node.style.as_deref() else {
            return Ok(());
        };

        for slot in &node.effects {
            slot.effect.pre_render(surface);
        }
        let drawn = self.draw_node(node, style, surface);
        for slot in node.effects.iter().rev() {
            slot.effect.post_render(surface);
        }
        drawn
    }

    fn draw_node(
        &self,
        node: &RenderNode,
        style: &StyleRule,
        surface: &mut dyn DrawSurface,
    ) -> Result<()> {
        let inner = node.render_area.shrink(style.margin);
        let content = inner.shrink(style.padding);

        match style.background.get(node.state.style_state(node.enabled)) {
            Some(Background::Color(color)) => surface.fill_rect(inner, *color),
            Some(Background::Texture(region)) => surface.draw_texture(region, inner, Color::WHITE),
            None => {}
        }

        if let Some(drawable) = node.widget.as_drawable() {
            let ctx = DrawContext {
                element_id: &node.element_id,
                style,
                state: node.state,
                enabled: node.enabled,
                inner,
                content,
            };
            drawable.draw(surface, &ctx)?;
        }

        if node.layers.is_empty() {
            return Ok(());
        }

        let clips = node.widget.clips();
        if clips {
            let clip = match surface.clip() {
                Some(current) => current
                    .intersection(&content)
                    .unwrap_or(Rect::new(content.x(), content.y(), 0.0, 0.0)),
                None => content,
            };
            surface.push_clip(clip);
        }
        let drawn = node
            .layers
            .values()
            .flat_map(|layer| layer.iter())
            .try_for_each(|child| self.render_node(child, surface));
        if clips {
            surface.pop_clip();
        }
        drawn
    }
}
