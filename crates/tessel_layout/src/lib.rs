//! Tessel Layout Engine
//!
//! A retained render tree for game and tool UIs.
//!
//! # Features
//!
//! - **Render tree**: elements mirrored into arena-allocated render nodes,
//!   children grouped into z-ordered layers
//! - **Rulesets**: immediate pixel/percentage layout and a 12-column flex
//!   mini-language with a mobile-first breakpoint cascade
//! - **Memoized layout**: dirty flags propagate lazily; clean subtrees are
//!   skipped
//! - **Input**: hit-testing in reverse render order, hover/action state
//!   machine, hotkeys and directional navigation for keyboard and gamepad
//! - **Deferred and remote work**: phase-scoped delayed callbacks and a
//!   `Send` handle for queuing tree changes from other threads
//!
//! # Example
//!
//! ```ignore
//! use tessel_layout::{Element, UiConfig, UiTree};
//!
//! let mut tree = UiTree::new(UiConfig::default(), Arc::new(theme))?;
//! tree.set_screen_size(1280.0, 720.0);
//! tree.add_child(tree.root(), Element::button("play").flex("xs-12c md-4c")?)?;
//!
//! tree.layout()?;
//! tree.update(1.0 / 60.0);
//! tree.interpolate(1.0);
//! tree.render(&mut surface)?;
//! ```

pub mod config;
pub mod deferred;
pub mod element;
pub mod error;
pub mod events;
pub mod layer;
pub mod navigation;
pub mod node;
pub mod remote;
pub mod ruleset;
pub mod tree;
pub mod widgets;

pub use config::{Breakpoints, UiConfig};
pub use deferred::{DeferredCallback, DeferredHandle, DeferredPhase};
pub use element::{Element, Visibility};
pub use error::{LayoutError, Result};
pub use events::{EventData, UiEvent, UiEventKind};
pub use layer::RenderLayer;
pub use navigation::{
    GridNavigation, HotkeyOp, Navigable, Navigation, NavigationStrategy, VerticalNavigation,
};
pub use node::{EffectCallback, NodeId, NodeState, RenderNode};
pub use remote::{RemoteHandle, RemoteOp};
pub use ruleset::{
    Amount, FlexLayout, FlowDirection, HeightRule, ImmediateLayout, LayoutDecl, LayoutRuleset,
    LayoutState, Placement, SizeSpec, WidthRule,
};
pub use tree::{UiTree, ROOT_ID};
pub use widgets::{
    Button, Checkbox, Container, Image, Label, ProgressBar, ScrollBox, Slider, TabView,
    TextureRegion, ValueRange, Widget,
};
