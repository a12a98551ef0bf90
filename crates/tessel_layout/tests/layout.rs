//! Layout pass: memoization, dirty propagation, breakpoints and visibility

mod common;

use common::*;
use tessel_core::{InputSource, Insets, ScreenSize, Size};
use tessel_layout::{
    Element, ImmediateLayout, LayoutError, SizeSpec, TextureRegion, UiEventKind, Visibility,
    Widget,
};
use tessel_theme::{StyleRule, Theme};

fn panel() -> Element {
    Element::container("panel")
        .flex("flex-column: xs-12c")
        .unwrap()
        .child(Element::label("first", "one"))
        .child(Element::label("second", "two"))
}

#[test]
fn test_clean_tree_is_not_measured_again() {
    let mut tree = tree(800.0, 600.0);
    tree.add_child(tree.root(), panel()).unwrap();
    frame(&mut tree);

    let counts = |tree: &tessel_layout::UiTree| {
        ["root", "panel", "first", "second"]
            .map(|element| tree.node(id(tree, element)).unwrap().measure_count())
    };
    assert_eq!(counts(&tree), [1, 1, 1, 1]);
    assert!(!tree.needs_layout());

    tree.layout().unwrap();
    assert_eq!(counts(&tree), [1, 1, 1, 1]);

    // Only the changed leaf and its ancestors are measured again
    let first = id(&tree, "first");
    tree.set_text(first, "changed").unwrap();
    tree.layout().unwrap();
    assert_eq!(counts(&tree), [2, 2, 2, 1]);
}

#[test]
fn test_unchanged_setters_do_not_dirty() {
    let mut tree = tree(800.0, 600.0);
    tree.add_child(tree.root(), panel()).unwrap();
    tree.add_child(tree.root(), Element::checkbox("check", false))
        .unwrap();
    frame(&mut tree);

    let first = id(&tree, "first");
    let check = id(&tree, "check");
    tree.set_text(first, "one").unwrap();
    tree.set_enabled(check, true).unwrap();
    tree.set_checked(check, false).unwrap();
    tree.set_visibility(first, Visibility::Visible).unwrap();
    tree.set_z_index(first, 0).unwrap();
    tree.set_flex_layout(id(&tree, "panel"), "flex-column: xs-12c")
        .unwrap();
    assert!(!tree.needs_layout());

    tree.set_enabled(check, false).unwrap();
    assert!(tree.is_dirty(check));
    assert!(!tree.node(check).unwrap().is_enabled());
}

#[test]
fn test_dirty_propagates_to_ancestors_only() {
    let mut tree = tree(800.0, 600.0);
    tree.add_child(tree.root(), panel()).unwrap();
    frame(&mut tree);

    let (root, panel, first, second) = (
        tree.root(),
        id(&tree, "panel"),
        id(&tree, "first"),
        id(&tree, "second"),
    );
    assert!(!tree.is_dirty(root));

    tree.mark_dirty(second);
    assert!(tree.is_dirty(second));
    assert!(tree.is_dirty(panel));
    assert!(tree.is_dirty(root));
    assert!(!tree.is_dirty(first));

    tree.layout().unwrap();
    assert!(!tree.is_dirty(root));
}

#[test]
fn test_areas_nest() {
    let theme = base_theme()
        .with_rule(
            "button",
            "default",
            ScreenSize::Xs,
            StyleRule::new()
                .with_margin(Insets::uniform(4.0))
                .with_padding(Insets::new(2.0, 3.0, 4.0, 5.0)),
        )
        .with_rule(
            "container",
            "padded",
            ScreenSize::Xs,
            StyleRule::new().with_padding(Insets::uniform(8.0)),
        );
    let mut tree = tree_with(theme, 640.0, 480.0);
    let menu = Element::container("menu")
        .style("padded")
        .flex("flex-column: xs-6c")
        .unwrap()
        .child(Element::button("a").flex("xs-12c xs-h-40px").unwrap())
        .child(Element::button("b").flex("xs-6c xs-h-40px").unwrap());
    tree.add_child(tree.root(), menu).unwrap();
    frame(&mut tree);

    for element in ["menu", "a", "b"] {
        let node = tree.node(id(&tree, element)).unwrap();
        assert!(node.outer_area().contains_rect(&node.inner_area()), "{element}");
        assert!(node.inner_area().contains_rect(&node.content_area()), "{element}");
    }

    // Column flow stacks the buttons inside the menu's content area
    let menu = tree.node(id(&tree, "menu")).unwrap();
    let b = tree.node(id(&tree, "b")).unwrap();
    assert_eq!(b.outer_area().y(), 8.0 + 40.0);
    assert_eq!(menu.preferred_size(), Size::new(320.0, 96.0));
}

#[test]
fn test_breakpoint_change_forces_full_layout() {
    let mut tree = tree(600.0, 400.0);
    let half = tree
        .add_child(
            tree.root(),
            Element::container("half")
                .flex("xs-12c md-6c xs-h-10px")
                .unwrap(),
        )
        .unwrap();
    frame(&mut tree);

    assert_eq!(tree.screen_size(), ScreenSize::Sm);
    assert_eq!(tree.node(half).unwrap().preferred_size().width, 600.0);

    tree.set_screen_size(1000.0, 400.0);
    assert_eq!(tree.screen_size(), ScreenSize::Lg);
    frame(&mut tree);
    let node = tree.node(half).unwrap();
    assert_eq!(node.preferred_size().width, 500.0);
    assert_eq!(node.measure_count(), 2);
}

/// Descendants of a parent hidden across a breakpoint change catch up once shown
#[test]
fn test_reshown_parent_relayouts_for_current_breakpoint() {
    let mut tree = tree(600.0, 400.0);
    let card = Element::container("card")
        .flex("xs-400px xs-h-50px")
        .unwrap()
        .child(
            Element::container("cell")
                .flex("xs-12c md-3c xs-h-10px")
                .unwrap()
                .child(Element::container("dot").flex("xs-12c md-6c xs-h-5px").unwrap()),
        );
    let card = tree.add_child(tree.root(), card).unwrap();
    let (cell, dot) = (id(&tree, "cell"), id(&tree, "dot"));
    frame(&mut tree);
    assert_eq!(tree.node(cell).unwrap().preferred_size().width, 400.0);
    assert_eq!(tree.node(dot).unwrap().preferred_size().width, 400.0);

    tree.set_visibility(card, Visibility::Hidden).unwrap();
    frame(&mut tree);
    tree.set_screen_size(1000.0, 400.0);
    assert_eq!(tree.screen_size(), ScreenSize::Lg);
    frame(&mut tree);
    assert_eq!(tree.node(cell).unwrap().measure_count(), 1);

    tree.set_visibility(card, Visibility::Visible).unwrap();
    frame(&mut tree);
    assert_eq!(tree.node(card).unwrap().preferred_size().width, 400.0);
    assert_eq!(tree.node(cell).unwrap().preferred_size().width, 100.0);
    assert_eq!(tree.node(dot).unwrap().preferred_size().width, 50.0);
    assert!(tree.node(dot).unwrap().is_included_in_render());
}

#[test]
fn test_breakpoint_hidden_collapses() {
    let mut tree = tree(800.0, 600.0);
    let node = tree
        .add_child(
            tree.root(),
            Element::container("sidebar")
                .flex("xs-12c md-hidden xs-h-20px")
                .unwrap(),
        )
        .unwrap();
    frame(&mut tree);

    let sidebar = tree.node(node).unwrap();
    assert!(sidebar.is_hidden_by_layout_rule());
    assert!(!sidebar.is_included_in_layout());
    assert!(!sidebar.is_included_in_render());
    assert_eq!(sidebar.preferred_size(), Size::ZERO);

    tree.set_screen_size(500.0, 600.0);
    frame(&mut tree);
    let sidebar = tree.node(node).unwrap();
    assert!(!sidebar.is_hidden_by_layout_rule());
    assert_eq!(sidebar.preferred_size(), Size::new(500.0, 20.0));
}

#[test]
fn test_hidden_subtree_is_never_measured() {
    let mut tree = tree(800.0, 600.0);
    let hidden = tree
        .add_child(tree.root(), panel().visibility(Visibility::Hidden))
        .unwrap();
    let surface = frame(&mut tree);

    let first = id(&tree, "first");
    assert_eq!(tree.node(first).unwrap().measure_count(), 0);
    assert_eq!(tree.node(hidden).unwrap().preferred_size(), Size::ZERO);
    assert!(surface.texts().is_empty());
    assert!(!tree.needs_layout());

    tree.set_visibility(hidden, Visibility::Visible).unwrap();
    let surface = frame(&mut tree);
    assert_eq!(tree.node(first).unwrap().measure_count(), 1);
    assert_eq!(surface.texts(), vec!["one", "two"]);
}

#[test]
fn test_no_render_keeps_its_space() {
    let mut tree = tree(800.0, 600.0);
    tree.add_child(tree.root(), panel()).unwrap();
    let first = id(&tree, "first");
    tree.set_visibility(first, Visibility::NoRender).unwrap();
    let surface = frame(&mut tree);

    assert_eq!(surface.texts(), vec!["two"]);
    let second = tree.node(id(&tree, "second")).unwrap();
    assert_eq!(second.relative_offset().y, 12.5);
    assert!(tree.node(first).unwrap().is_included_in_layout());
}

#[test]
fn test_input_source_hides_and_forces_layout() {
    let mut tree = tree(800.0, 600.0);
    let hint = tree
        .add_child(
            tree.root(),
            Element::container("mouse-hint")
                .flex("xs-12c xs-h-40px hidden-controller")
                .unwrap(),
        )
        .unwrap();
    frame(&mut tree);
    assert!(tree.node(hint).unwrap().is_included_in_layout());

    tree.set_input_source(InputSource::Controller);
    assert!(tree.needs_layout());
    frame(&mut tree);
    let node = tree.node(hint).unwrap();
    assert!(!node.is_included_in_layout());
    assert_eq!(node.measure_count(), 2);
}

#[test]
fn test_label_wraps_to_content_width() {
    let mut tree = tree(800.0, 600.0);
    let label = tree
        .add_child(
            tree.root(),
            Element::label("long", "aaaaaaaaaa")
                .immediate(ImmediateLayout::new().width(SizeSpec::Px(30.0))),
        )
        .unwrap();
    let surface = frame(&mut tree);

    // 5px advance: six characters per line
    assert_eq!(surface.texts(), vec!["aaaaaa", "aaaa"]);
    assert_eq!(tree.node(label).unwrap().preferred_size().height, 25.0);
}

#[test]
fn test_image_measures_zero_until_loaded() {
    let mut tree = tree(800.0, 600.0);
    let image = tree
        .add_child(
            tree.root(),
            Element::image("logo", None)
                .immediate(ImmediateLayout::new().width(SizeSpec::Px(200.0))),
        )
        .unwrap();
    frame(&mut tree);
    assert_eq!(tree.node(image).unwrap().preferred_size(), Size::ZERO);
    assert!(!tree.node(image).unwrap().is_included_in_render());

    tree.set_texture(image, Some(TextureRegion::new("logo", 100.0, 50.0)))
        .unwrap();
    frame(&mut tree);
    assert_eq!(
        tree.node(image).unwrap().preferred_size(),
        Size::new(200.0, 100.0)
    );
}

#[test]
fn test_tab_view_lays_out_active_child_only() {
    let mut tree = tree(800.0, 600.0);
    let page = |name: &str| {
        Element::container(name).immediate(ImmediateLayout::rect(0.0, 0.0, 50.0, 50.0))
    };
    let tabs = tree
        .add_child(
            tree.root(),
            Element::tab_view("tabs")
                .immediate(ImmediateLayout::rect(0.0, 0.0, 200.0, 100.0))
                .child(page("one"))
                .child(page("two")),
        )
        .unwrap();
    let log = record(&mut tree, tabs, &[UiEventKind::TabChanged]);
    frame(&mut tree);

    let (one, two) = (id(&tree, "one"), id(&tree, "two"));
    assert!(tree.node(one).unwrap().is_included_in_render());
    assert!(!tree.node(two).unwrap().is_included_in_layout());

    tree.set_active_tab(tabs, 1).unwrap();
    frame(&mut tree);
    assert!(!tree.node(one).unwrap().is_included_in_layout());
    assert!(tree.node(two).unwrap().is_included_in_render());
    assert_eq!(kinds(&log), vec![UiEventKind::TabChanged]);

    // Out of range is ignored
    tree.set_active_tab(tabs, 7).unwrap();
    assert!(matches!(
        tree.node(tabs).unwrap().widget(),
        Widget::TabView(view) if view.active() == 1
    ));
}

#[test]
fn test_z_index_change_restacks() {
    let mut tree = tree(800.0, 600.0);
    let root = tree.root();
    let a = tree.add_child(root, Element::container("a")).unwrap();
    tree.add_child(root, Element::container("b")).unwrap();
    frame(&mut tree);
    assert_eq!(tree.node(root).unwrap().layer_keys().collect::<Vec<_>>(), vec![0]);

    tree.set_z_index(a, 5).unwrap();
    frame(&mut tree);
    let root_node = tree.node(root).unwrap();
    assert_eq!(root_node.layer_keys().collect::<Vec<_>>(), vec![0, 5]);
    assert!(root_node.layer(5).unwrap().contains(a));
    assert!(!root_node.layer(0).unwrap().contains(a));
}

#[test]
fn test_structure_errors() {
    let mut tree = tree(800.0, 600.0);
    let root = tree.root();
    let label = tree.add_child(root, Element::label("text", "hi")).unwrap();

    assert!(matches!(tree.remove_child(root), Err(LayoutError::RootRemoval)));
    assert!(matches!(
        tree.add_child(label, Element::container("nested")),
        Err(LayoutError::NotAParent { .. })
    ));
    assert!(matches!(
        tree.add_child(root, Element::label("bad", "x").child(Element::container("c"))),
        Err(LayoutError::NotAParent { .. })
    ));
    assert!(matches!(
        tree.set_checked(label, true),
        Err(LayoutError::WrongKind { expected: "checkbox", .. })
    ));
    assert!(matches!(
        tree.find_element("missing"),
        Err(LayoutError::UnknownElement { .. })
    ));
}

#[test]
fn test_remove_child_destroys_subtree() {
    let mut tree = tree(800.0, 600.0);
    let panel = tree.add_child(tree.root(), panel()).unwrap();
    assert_eq!(tree.node_count(), 4);
    assert!(tree.find_by_id("first").is_some());

    tree.remove_child(panel).unwrap();
    assert_eq!(tree.node_count(), 1);
    assert!(tree.find_by_id("first").is_none());
    assert!(tree.node(panel).is_none());
    assert!(tree.is_dirty(tree.root()));
    assert!(matches!(tree.remove_child(panel), Err(LayoutError::UnknownNode)));
}

#[test]
fn test_missing_style_fails_layout() {
    let mut tree = tree_with(Theme::new(), 800.0, 600.0);
    assert!(matches!(
        tree.layout(),
        Err(LayoutError::MissingStyle { kind: "container", .. })
    ));
}

#[test]
fn test_missing_font_fails_layout() {
    let theme = Theme::new().with_base(StyleRule::new());
    let mut tree = tree_with(theme, 800.0, 600.0);
    tree.add_child(tree.root(), Element::label("text", "hi"))
        .unwrap();
    assert!(matches!(tree.layout(), Err(LayoutError::MissingFont { .. })));
}
