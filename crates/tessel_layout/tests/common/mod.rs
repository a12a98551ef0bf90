//! Shared fixtures for the render tree integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tessel_core::{Color, RecordingSurface};
use tessel_layout::{NodeId, UiConfig, UiEvent, UiEventKind, UiTree};
use tessel_theme::{FontMetrics, StyleRule, Theme};
use tracing_subscriber::EnvFilter;

pub const FRAME: f32 = 1.0 / 60.0;

/// Honour `RUST_LOG` in test output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Zero insets, a 10px font and white text
pub fn base_rule() -> StyleRule {
    StyleRule::new()
        .with_font(FontMetrics::new(10.0))
        .with_color(Color::WHITE)
}

pub fn base_theme() -> Theme {
    Theme::new().with_base(base_rule())
}

pub fn tree_with(theme: Theme, width: f32, height: f32) -> UiTree {
    init_tracing();
    let mut tree = UiTree::new(UiConfig::default(), Arc::new(theme)).expect("default config");
    tree.set_screen_size(width, height);
    tree
}

pub fn tree(width: f32, height: f32) -> UiTree {
    tree_with(base_theme(), width, height)
}

/// Run one full frame and return what was drawn
pub fn frame(tree: &mut UiTree) -> RecordingSurface {
    tree.layout().expect("layout");
    tree.update(FRAME);
    tree.interpolate(1.0);
    let mut surface = RecordingSurface::new();
    tree.render(&mut surface).expect("render");
    surface
}

pub type EventLog = Arc<Mutex<Vec<UiEvent>>>;

/// Record every event of the given kinds targeting `id`
pub fn record(tree: &mut UiTree, id: NodeId, kinds: &[UiEventKind]) -> EventLog {
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    for kind in kinds {
        let sink = Arc::clone(&log);
        tree.on(id, *kind, move |event| sink.lock().unwrap().push(event.clone()))
            .unwrap();
    }
    log
}

pub fn kinds(log: &EventLog) -> Vec<UiEventKind> {
    log.lock().unwrap().iter().map(|event| event.kind).collect()
}

pub fn id(tree: &UiTree, element_id: &str) -> NodeId {
    tree.find_by_id(element_id)
        .unwrap_or_else(|| panic!("no element '{element_id}'"))
}
