//! Drawing surface abstraction
//!
//! The engine never talks to a graphics API directly. Render passes issue
//! calls against [`DrawSurface`]; hosts implement it on top of their sprite
//! batch. [`RecordingSurface`] records the calls as [`DrawCommand`]s, which is
//! what tests and headless tooling use.
//!
//! Clip, translate and alpha are stacks: every push must be matched by a pop
//! on every code path.

use smallvec::SmallVec;

use crate::color::Color;
use crate::geometry::{Point, Rect};

/// The drawing operations the render tree relies on
pub trait DrawSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn draw_text(&mut self, text: &str, origin: Point, size: f32, color: Color);

    /// Draw a named texture region stretched over `rect`
    fn draw_texture(&mut self, region: &str, rect: Rect, tint: Color);

    /// Replace the clip region until the matching [`DrawSurface::pop_clip`]
    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);

    /// Current clip region, `None` when unclipped
    fn clip(&self) -> Option<Rect>;

    fn push_translate(&mut self, dx: f32, dy: f32);

    fn pop_translate(&mut self);

    /// Multiply the alpha of everything drawn until the matching pop
    fn push_alpha(&mut self, alpha: f32);

    fn pop_alpha(&mut self);
}

/// A recorded draw call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    DrawText {
        text: String,
        origin: Point,
        size: f32,
        color: Color,
    },
    DrawTexture {
        region: String,
        rect: Rect,
        tint: Color,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
    PushTranslate {
        dx: f32,
        dy: f32,
    },
    PopTranslate,
}

/// Surface that records commands instead of drawing.
///
/// Translation is folded into recorded positions and alpha into recorded
/// colors, so commands describe what would land on screen.
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    clip_stack: SmallVec<[Rect; 8]>,
    translate_stack: SmallVec<[(f32, f32); 8]>,
    alpha_stack: SmallVec<[f32; 8]>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            clip_stack: SmallVec::new(),
            translate_stack: SmallVec::new(),
            alpha_stack: SmallVec::new(),
        }
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    pub fn translate_depth(&self) -> usize {
        self.translate_stack.len()
    }

    pub fn alpha_depth(&self) -> usize {
        self.alpha_stack.len()
    }

    /// Text of every recorded `DrawText`, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn translation(&self) -> (f32, f32) {
        self.translate_stack.last().copied().unwrap_or((0.0, 0.0))
    }

    fn alpha(&self) -> f32 {
        self.alpha_stack.last().copied().unwrap_or(1.0)
    }

    fn place(&self, rect: Rect) -> Rect {
        let (dx, dy) = self.translation();
        rect.offset(dx, dy)
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSurface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.place(rect);
        let color = color.faded(self.alpha());
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_text(&mut self, text: &str, origin: Point, size: f32, color: Color) {
        let (dx, dy) = self.translation();
        self.commands.push(DrawCommand::DrawText {
            text: text.to_string(),
            origin: Point::new(origin.x + dx, origin.y + dy),
            size,
            color: color.faded(self.alpha()),
        });
    }

    fn draw_texture(&mut self, region: &str, rect: Rect, tint: Color) {
        let rect = self.place(rect);
        let tint = tint.faded(self.alpha());
        self.commands.push(DrawCommand::DrawTexture {
            region: region.to_string(),
            rect,
            tint,
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_stack.push(rect);
        self.commands.push(DrawCommand::PushClip { rect });
    }

    fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_none() {
            tracing::warn!("RecordingSurface::pop_clip called on an empty clip stack");
        }
        self.commands.push(DrawCommand::PopClip);
    }

    fn clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    fn push_translate(&mut self, dx: f32, dy: f32) {
        let (x, y) = self.translation();
        self.translate_stack.push((x + dx, y + dy));
        self.commands.push(DrawCommand::PushTranslate { dx, dy });
    }

    fn pop_translate(&mut self) {
        if self.translate_stack.pop().is_none() {
            tracing::warn!("RecordingSurface::pop_translate called on an empty stack");
        }
        self.commands.push(DrawCommand::PopTranslate);
    }

    fn push_alpha(&mut self, alpha: f32) {
        let combined = self.alpha() * alpha.clamp(0.0, 1.0);
        self.alpha_stack.push(combined);
    }

    fn pop_alpha(&mut self) {
        self.alpha_stack.pop();
    }
}
