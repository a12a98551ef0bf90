//! Frame phases: deferred work, remote operations, effects and render

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use common::*;
use tessel_animation::Fade;
use tessel_core::{DrawCommand, RecordingSurface, ScreenSize};
use tessel_layout::{DeferredPhase, Element, ImmediateLayout, LayoutError, UiTree};
use tessel_theme::StyleRule;

type Log = Arc<Mutex<Vec<&'static str>>>;

fn log_into(log: &Log, entry: &'static str) -> impl FnOnce(&mut UiTree) + Send + 'static {
    let log = Arc::clone(log);
    move |_| log.lock().unwrap().push(entry)
}

#[test]
fn test_deferred_callbacks_run_in_fire_order() {
    let mut tree = tree(800.0, 600.0);
    let log = Log::default();

    tree.defer(DeferredPhase::PostUpdate, 0.04, log_into(&log, "late"));
    tree.defer(DeferredPhase::PostUpdate, 0.0, log_into(&log, "first"));
    tree.defer(DeferredPhase::PostUpdate, 0.0, log_into(&log, "second"));
    let cancelled = tree.defer(DeferredPhase::PostUpdate, 0.0, log_into(&log, "cancelled"));
    cancelled.cancel();

    tree.update(FRAME);
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);

    tree.update(FRAME);
    assert_eq!(log.lock().unwrap().len(), 2);
    tree.update(FRAME);
    assert_eq!(*log.lock().unwrap(), vec!["first", "second", "late"]);
    assert_eq!(tree.pending_deferred(DeferredPhase::PostUpdate), 0);
}

#[test]
fn test_deferred_phases_are_separate() {
    let mut tree = tree(800.0, 600.0);
    let log = Log::default();
    tree.defer(DeferredPhase::PostRender, 0.0, log_into(&log, "render"));
    tree.defer(DeferredPhase::PostLayout, 0.0, log_into(&log, "layout"));

    tree.update(FRAME);
    assert!(log.lock().unwrap().is_empty());

    tree.layout().unwrap();
    tree.render(&mut RecordingSurface::new()).unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["layout", "render"]);
}

#[test]
fn test_deferred_callback_mutates_tree() {
    let mut tree = tree(800.0, 600.0);
    tree.defer(DeferredPhase::PostUpdate, 0.0, |tree| {
        let root = tree.root();
        tree.add_child(root, Element::button("spawned")).unwrap();
    });

    assert!(tree.find_by_id("spawned").is_none());
    tree.update(FRAME);
    assert!(tree.find_by_id("spawned").is_some());
    assert!(tree.needs_layout());
}

#[test]
fn test_remote_operations_apply_on_update() {
    let mut tree = tree(800.0, 600.0);
    tree.add_child(tree.root(), Element::container("doomed")).unwrap();
    let remote = tree.remote();
    let fired = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&fired);
    thread::spawn(move || {
        assert!(remote.add_child("root", Element::button("loaded")));
        remote.add_child("missing-parent", Element::button("orphan"));
        remote.remove_child("doomed");
        remote.defer(DeferredPhase::PostUpdate, 0.0, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    })
    .join()
    .unwrap();

    assert!(tree.find_by_id("loaded").is_none());
    tree.update(FRAME);
    assert!(tree.find_by_id("loaded").is_some());
    assert!(tree.find_by_id("orphan").is_none());
    assert!(tree.find_by_id("doomed").is_none());
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // Registered with the root's navigation like any other actionable child
    let root = tree.node(tree.root()).unwrap();
    assert_eq!(root.navigation().unwrap().order(), ["loaded"]);
}

#[test]
fn test_effect_completion_fires_once() {
    let mut tree = tree(800.0, 600.0);
    let button = tree
        .add_child(
            tree.root(),
            Element::button("fading").immediate(ImmediateLayout::rect(0.0, 0.0, 50.0, 50.0)),
        )
        .unwrap();
    let completed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&completed);
    tree.add_effect_with(button, Fade::fade_in(0.1), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    tree.layout().unwrap();
    tree.update(FRAME);
    assert_eq!(tree.node(button).unwrap().effect_count(), 1);
    assert!(tree.node(button).unwrap().is_included_in_render());

    for _ in 0..10 {
        tree.update(FRAME);
    }
    assert_eq!(completed.load(Ordering::SeqCst), 1);
    assert_eq!(tree.node(button).unwrap().effect_count(), 0);
}

#[test]
fn test_finish_effects_completes_on_next_update() {
    let mut tree = tree(800.0, 600.0);
    let button = tree
        .add_child(
            tree.root(),
            Element::button("fading").immediate(ImmediateLayout::rect(0.0, 0.0, 50.0, 50.0)),
        )
        .unwrap();
    tree.add_effect(button, Fade::fade_in(10.0)).unwrap();
    frame(&mut tree);

    tree.finish_effects(button).unwrap();
    assert_eq!(tree.node(button).unwrap().effect_count(), 1);
    tree.update(FRAME);
    assert_eq!(tree.node(button).unwrap().effect_count(), 0);
}

#[test]
fn test_fade_brackets_draw_calls() {
    let mut tree = tree(800.0, 600.0);
    let label = tree
        .add_child(tree.root(), Element::label("caption", "hi"))
        .unwrap();
    tree.add_effect(label, Fade::fade_in(1.0)).unwrap();
    let surface = frame(&mut tree);

    assert_eq!(surface.texts(), vec!["hi"]);
    assert_eq!(surface.alpha_depth(), 0);
}

#[test]
fn test_render_failure_keeps_clips_balanced() {
    let theme = base_theme().with_rule(
        "progress_bar",
        "default",
        ScreenSize::Xs,
        StyleRule::new(),
    );
    let mut tree = tree_with(theme, 800.0, 600.0);
    let panel = Element::container("panel")
        .clip(true)
        .immediate(ImmediateLayout::rect(0.0, 0.0, 200.0, 100.0))
        .child(
            Element::progress_bar("loading", 0.0, 1.0)
                .unwrap()
                .immediate(ImmediateLayout::rect(0.0, 0.0, 200.0, 10.0)),
        );
    tree.add_child(tree.root(), panel).unwrap();
    tree.layout().unwrap();
    tree.update(FRAME);

    let mut surface = RecordingSurface::new();
    let result = tree.render(&mut surface);
    assert!(matches!(result, Err(LayoutError::MissingColor { ref id }) if id == "loading"));
    assert_eq!(surface.clip_depth(), 0);
    assert_eq!(surface.commands().last(), Some(&DrawCommand::PopClip));
}

#[test]
fn test_interpolation_blends_moves() {
    let mut tree = tree(800.0, 600.0);
    let button = tree
        .add_child(
            tree.root(),
            Element::button("mover").immediate(ImmediateLayout::rect(0.0, 0.0, 50.0, 50.0)),
        )
        .unwrap();
    frame(&mut tree);
    assert_eq!(tree.node(button).unwrap().render_area().x(), 0.0);

    tree.set_immediate_layout(button, ImmediateLayout::rect(100.0, 0.0, 50.0, 50.0))
        .unwrap();
    tree.layout().unwrap();
    tree.update(FRAME);
    tree.interpolate(0.5);
    assert_eq!(tree.node(button).unwrap().render_area().x(), 50.0);
    tree.interpolate(1.0);
    assert_eq!(tree.node(button).unwrap().render_area().x(), 100.0);
}

#[test]
fn test_elapsed_tracks_updates() {
    let mut tree = tree(800.0, 600.0);
    tree.update(0.5);
    tree.update(0.25);
    assert_eq!(tree.elapsed(), 0.75);
}
