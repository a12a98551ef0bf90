//! Explicit pixel / percentage layout

/// A length on an immediate layout
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizeSpec {
    Px(f32),
    /// Percentage of the parent's content width
    Percent(f32),
    /// Width fills the parent, height follows content, offsets are zero
    Auto,
}

impl SizeSpec {
    pub(crate) fn resolve(self, parent_width: f32) -> Option<f32> {
        match self {
            SizeSpec::Px(px) => Some(px),
            SizeSpec::Percent(percent) => Some(parent_width * percent / 100.0),
            SizeSpec::Auto => None,
        }
    }
}

/// Literal position and size set on an element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImmediateLayout {
    pub x: SizeSpec,
    pub y: SizeSpec,
    pub width: SizeSpec,
    pub height: SizeSpec,
}

impl ImmediateLayout {
    pub fn new() -> Self {
        Self {
            x: SizeSpec::Px(0.0),
            y: SizeSpec::Px(0.0),
            width: SizeSpec::Auto,
            height: SizeSpec::Auto,
        }
    }

    /// Fixed pixel rect
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new().at(x, y).size(SizeSpec::Px(width), SizeSpec::Px(height))
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = SizeSpec::Px(x);
        self.y = SizeSpec::Px(y);
        self
    }

    pub fn size(mut self, width: SizeSpec, height: SizeSpec) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn width(mut self, width: SizeSpec) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: SizeSpec) -> Self {
        self.height = height;
        self
    }
}

impl Default for ImmediateLayout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(SizeSpec::Px(12.0).resolve(400.0), Some(12.0));
        assert_eq!(SizeSpec::Percent(25.0).resolve(400.0), Some(100.0));
        assert_eq!(SizeSpec::Auto.resolve(400.0), None);
    }

    #[test]
    fn test_rect_builder() {
        let layout = ImmediateLayout::rect(1.0, 2.0, 3.0, 4.0);
        assert_eq!(layout.x, SizeSpec::Px(1.0));
        assert_eq!(layout.height, SizeSpec::Px(4.0));
    }
}
