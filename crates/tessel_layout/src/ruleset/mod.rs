//! Layout rulesets
//!
//! A ruleset answers, for the current [`LayoutState`], an element's preferred
//! outer width and height, its offset relative to where its parent places it,
//! and whether the active input source hides it. Parents also use their own
//! ruleset to place children.
//!
//! Two variants share the contract:
//!
//! - [`ImmediateLayout`]: literal pixel or percentage values
//! - [`FlexLayout`]: breakpoint-scoped tokens, see [`flex`]

pub mod flex;
pub mod immediate;

use std::sync::Arc;

use tessel_core::{InputSource, Point, ScreenSize, Size};

pub use flex::{Amount, FlexLayout, FlowDirection, WidthRule};
pub use immediate::{ImmediateLayout, SizeSpec};

use crate::error::Result;

/// Preferred outer height
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeightRule {
    Fixed(f32),
    /// Measured from content (leaves) or children (parents)
    Auto,
}

/// State threaded through a layout pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutState {
    /// Content width of the parent currently being laid out
    pub parent_width: f32,
    pub screen: ScreenSize,
    pub input: InputSource,
    /// Re-layout every node regardless of dirty state
    pub force: bool,
}

/// Layout declared on an element
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutDecl {
    Immediate(ImmediateLayout),
    Flex(Arc<FlexLayout>),
}

impl LayoutDecl {
    /// Parse a flex declaration; malformed tokens fail here
    pub fn flex(source: &str) -> Result<Self> {
        Ok(LayoutDecl::Flex(Arc::new(FlexLayout::parse(source)?)))
    }

    /// The flex source string, if any
    pub fn flex_source(&self) -> Option<&str> {
        match self {
            LayoutDecl::Flex(layout) => Some(layout.source()),
            LayoutDecl::Immediate(_) => None,
        }
    }
}

impl Default for LayoutDecl {
    fn default() -> Self {
        LayoutDecl::Immediate(ImmediateLayout::default())
    }
}

/// How a parent positions its children
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Each child sits at its own offset
    Absolute,
    Flow(FlowDirection),
}

/// Flex rules resolved for one screen size
#[derive(Clone, Copy, Debug)]
struct ResolvedFlex {
    screen: ScreenSize,
    width: WidthRule,
    height: HeightRule,
    offset_x: Amount,
    offset_y: f32,
}

/// Evaluates a shared [`FlexLayout`], caching the cascade per screen size
#[derive(Clone, Debug)]
pub struct FlexRuleset {
    layout: Arc<FlexLayout>,
    resolved: Option<ResolvedFlex>,
}

impl FlexRuleset {
    fn new(layout: Arc<FlexLayout>) -> Self {
        Self {
            layout,
            resolved: None,
        }
    }

    fn resolve(&mut self, screen: ScreenSize) -> ResolvedFlex {
        match self.resolved {
            Some(resolved) if resolved.screen == screen => resolved,
            _ => {
                let resolved = ResolvedFlex {
                    screen,
                    width: self.layout.width_rule(screen),
                    height: self.layout.height_rule(screen),
                    offset_x: self.layout.offset_x(screen),
                    offset_y: self.layout.offset_y(screen),
                };
                self.resolved = Some(resolved);
                resolved
            }
        }
    }
}

/// The ruleset a node evaluates its declared layout with
#[derive(Clone, Debug)]
pub enum LayoutRuleset {
    Immediate(ImmediateLayout),
    Flex(FlexRuleset),
}

impl LayoutRuleset {
    pub fn from_decl(decl: &LayoutDecl) -> Self {
        match decl {
            LayoutDecl::Immediate(layout) => LayoutRuleset::Immediate(*layout),
            LayoutDecl::Flex(layout) => LayoutRuleset::Flex(FlexRuleset::new(Arc::clone(layout))),
        }
    }

    /// Whether this ruleset was derived from `decl`.
    ///
    /// Flex declarations compare by identity so an unchanged declaration is
    /// never re-derived.
    pub fn matches(&self, decl: &LayoutDecl) -> bool {
        match (self, decl) {
            (LayoutRuleset::Immediate(own), LayoutDecl::Immediate(declared)) => own == declared,
            (LayoutRuleset::Flex(own), LayoutDecl::Flex(declared)) => {
                Arc::ptr_eq(&own.layout, declared)
            }
            _ => false,
        }
    }

    pub fn preferred_width(&mut self, state: &LayoutState) -> f32 {
        match self {
            LayoutRuleset::Immediate(layout) => layout
                .width
                .resolve(state.parent_width)
                .unwrap_or(state.parent_width),
            LayoutRuleset::Flex(flex) => match flex.resolve(state.screen).width {
                WidthRule::Amount(amount) => amount.resolve(state.parent_width),
                WidthRule::Hidden => 0.0,
            },
        }
    }

    pub fn preferred_height(&mut self, state: &LayoutState) -> HeightRule {
        match self {
            LayoutRuleset::Immediate(layout) => match layout.height.resolve(state.parent_width) {
                Some(height) => HeightRule::Fixed(height),
                None => HeightRule::Auto,
            },
            LayoutRuleset::Flex(flex) => flex.resolve(state.screen).height,
        }
    }

    /// Offset relative to the position the parent assigns
    pub fn offset(&mut self, state: &LayoutState) -> Point {
        match self {
            LayoutRuleset::Immediate(layout) => Point::new(
                layout.x.resolve(state.parent_width).unwrap_or(0.0),
                layout.y.resolve(state.parent_width).unwrap_or(0.0),
            ),
            LayoutRuleset::Flex(flex) => {
                let resolved = flex.resolve(state.screen);
                Point::new(resolved.offset_x.resolve(state.parent_width), resolved.offset_y)
            }
        }
    }

    pub fn is_hidden_for(&self, input: InputSource) -> bool {
        match self {
            LayoutRuleset::Immediate(_) => false,
            LayoutRuleset::Flex(flex) => flex.layout.is_hidden_for(input),
        }
    }

    pub fn placement(&self) -> Placement {
        match self {
            LayoutRuleset::Immediate(_) => Placement::Absolute,
            LayoutRuleset::Flex(flex) => Placement::Flow(flex.layout.direction()),
        }
    }
}

/// A laid-out child as seen by its parent's placement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChildBox {
    /// Preferred outer size; zero-sized children take no space
    pub size: Size,
    pub offset: Point,
}

/// Position every child of one layer relative to the parent's content origin
pub fn place_children(
    placement: Placement,
    children: &[ChildBox],
    parent_width: f32,
) -> Vec<Point> {
    match placement {
        Placement::Absolute => children.iter().map(|child| child.offset).collect(),
        Placement::Flow(FlowDirection::Column) => {
            let mut y = 0.0;
            children
                .iter()
                .map(|child| {
                    if child.size.is_empty() {
                        return Point::new(child.offset.x, y);
                    }
                    let position = Point::new(child.offset.x, y + child.offset.y);
                    y = position.y + child.size.height;
                    position
                })
                .collect()
        }
        Placement::Flow(FlowDirection::Row) => {
            let (mut x, mut y, mut row_height) = (0.0_f32, 0.0_f32, 0.0_f32);
            children
                .iter()
                .map(|child| {
                    if child.size.is_empty() {
                        return Point::new(x, y);
                    }
                    let advance = child.offset.x + child.size.width;
                    if x > 0.0 && x + advance > parent_width {
                        y += row_height;
                        x = 0.0;
                        row_height = 0.0;
                    }
                    let position = Point::new(x + child.offset.x, y + child.offset.y);
                    x += advance;
                    row_height = row_height.max(child.offset.y + child.size.height);
                    position
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(parent_width: f32, screen: ScreenSize) -> LayoutState {
        LayoutState {
            parent_width,
            screen,
            input: InputSource::KeyboardMouse,
            force: false,
        }
    }

    fn boxed(width: f32, height: f32) -> ChildBox {
        ChildBox {
            size: Size::new(width, height),
            offset: Point::ZERO,
        }
    }

    #[test]
    fn test_row_wraps_when_out_of_width() {
        let children = [boxed(100.0, 20.0), boxed(100.0, 20.0), boxed(100.0, 20.0)];
        let positions = place_children(Placement::Flow(FlowDirection::Row), &children, 250.0);
        assert_eq!(
            positions,
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(0.0, 20.0)
            ]
        );
    }

    #[test]
    fn test_row_height_is_tallest_child() {
        let children = [boxed(60.0, 10.0), boxed(60.0, 30.0), boxed(60.0, 5.0)];
        let positions = place_children(Placement::Flow(FlowDirection::Row), &children, 150.0);
        assert_eq!(positions[2], Point::new(0.0, 30.0));
    }

    #[test]
    fn test_oversized_child_does_not_wrap_first_in_row() {
        let positions =
            place_children(Placement::Flow(FlowDirection::Row), &[boxed(400.0, 10.0)], 100.0);
        assert_eq!(positions, vec![Point::ZERO]);
    }

    #[test]
    fn test_column_stacks_and_skips_empty() {
        let children = [boxed(10.0, 10.0), boxed(0.0, 0.0), boxed(10.0, 15.0)];
        let positions = place_children(Placement::Flow(FlowDirection::Column), &children, 100.0);
        assert_eq!(positions[2], Point::new(0.0, 10.0));
    }

    #[test]
    fn test_flex_ruleset_matches_by_identity() {
        let decl = LayoutDecl::flex("xs-6c").unwrap();
        let ruleset = LayoutRuleset::from_decl(&decl);
        assert!(ruleset.matches(&decl));

        // Same source, different parse: re-derive
        let reparsed = LayoutDecl::flex("xs-6c").unwrap();
        assert!(!ruleset.matches(&reparsed));
    }

    #[test]
    fn test_flex_ruleset_follows_screen() {
        let decl = LayoutDecl::flex("xs-12c md-6c xs-h-30px").unwrap();
        let mut ruleset = LayoutRuleset::from_decl(&decl);
        assert_eq!(ruleset.preferred_width(&state(600.0, ScreenSize::Sm)), 600.0);
        assert_eq!(ruleset.preferred_width(&state(600.0, ScreenSize::Lg)), 300.0);
        assert_eq!(
            ruleset.preferred_height(&state(600.0, ScreenSize::Lg)),
            HeightRule::Fixed(30.0)
        );
    }

    #[test]
    fn test_immediate_ruleset() {
        let layout = ImmediateLayout::new()
            .at(5.0, 6.0)
            .width(SizeSpec::Percent(50.0));
        let mut ruleset = LayoutRuleset::Immediate(layout);
        let state = state(200.0, ScreenSize::Xs);
        assert_eq!(ruleset.preferred_width(&state), 100.0);
        assert_eq!(ruleset.preferred_height(&state), HeightRule::Auto);
        assert_eq!(ruleset.offset(&state), Point::new(5.0, 6.0));
        assert_eq!(ruleset.placement(), Placement::Absolute);
    }
}
