//! Hotkeys and directional navigation
//!
//! Every navigable container owns a [`Navigation`] component: a keyboard
//! hotkey table, a gamepad-button hotkey table, the ordered ids of the
//! actionable elements registered with it, and a pluggable
//! [`NavigationStrategy`] that picks the next focus target.
//!
//! Table mutations are queued as [`HotkeyOp`]s and only applied when the tree
//! drains them at the start of its next update, so input dispatch never
//! observes a table mid-change.

use std::collections::VecDeque;
use std::fmt;

use indexmap::IndexMap;
use tessel_core::{GamepadButton, KeyCode, NavDirection};

/// A queued hotkey table mutation
#[derive(Clone, Debug, PartialEq)]
pub enum HotkeyOp {
    MapKey(KeyCode, String),
    UnmapKey(KeyCode),
    MapButton(GamepadButton, String),
    UnmapButton(GamepadButton),
    Clear,
}

/// Picks the next focus index in a container's navigation order
pub trait NavigationStrategy: Send + fmt::Debug {
    /// `current` is the index of the focused element, if any
    fn next(&self, direction: NavDirection, len: usize, current: Option<usize>) -> Option<usize>;
}

/// Up/down through declaration order, wrapping at both ends
#[derive(Clone, Copy, Debug, Default)]
pub struct VerticalNavigation;

impl NavigationStrategy for VerticalNavigation {
    fn next(&self, direction: NavDirection, len: usize, current: Option<usize>) -> Option<usize> {
        if len == 0 {
            return None;
        }
        match (direction, current) {
            (NavDirection::Up | NavDirection::Down, None) => Some(0),
            (NavDirection::Down, Some(index)) => Some((index + 1) % len),
            (NavDirection::Up, Some(index)) => Some((index + len - 1) % len),
            _ => None,
        }
    }
}

/// Row-major grid with a fixed column count; stops at the edges
#[derive(Clone, Copy, Debug)]
pub struct GridNavigation {
    pub columns: usize,
}

impl GridNavigation {
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
        }
    }
}

impl NavigationStrategy for GridNavigation {
    fn next(&self, direction: NavDirection, len: usize, current: Option<usize>) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let Some(index) = current else {
            return Some(0);
        };
        let columns = self.columns.max(1);
        let column = index % columns;
        let target = match direction {
            NavDirection::Left if column > 0 => index - 1,
            NavDirection::Right if column + 1 < columns => index + 1,
            NavDirection::Up if index >= columns => index - columns,
            NavDirection::Down => index + columns,
            _ => return None,
        };
        (target < len).then_some(target)
    }
}

/// Hotkey and traversal capability of a navigable container
pub trait Navigable {
    fn key_target(&self, key: KeyCode) -> Option<&str>;

    fn button_target(&self, button: GamepadButton) -> Option<&str>;

    /// Move focus to the next element `accept` approves and return its id.
    ///
    /// Rejected candidates are stepped over in the same direction; the
    /// search ends at an edge or when it comes back to its first candidate.
    fn navigate(
        &mut self,
        direction: NavDirection,
        accept: &dyn Fn(&str) -> bool,
    ) -> Option<String>;
}

/// Navigation component of a container
#[derive(Debug)]
pub struct Navigation {
    keys: IndexMap<KeyCode, String>,
    buttons: IndexMap<GamepadButton, String>,
    pending: VecDeque<HotkeyOp>,
    order: Vec<String>,
    focused: Option<String>,
    strategy: Box<dyn NavigationStrategy>,
}

impl Navigation {
    pub fn new(strategy: Box<dyn NavigationStrategy>) -> Self {
        Self {
            keys: IndexMap::new(),
            buttons: IndexMap::new(),
            pending: VecDeque::new(),
            order: Vec::new(),
            focused: None,
            strategy,
        }
    }

    pub fn queue(&mut self, op: HotkeyOp) {
        self.pending.push_back(op);
    }

    pub fn pending_ops(&self) -> usize {
        self.pending.len()
    }

    /// Apply queued operations in FIFO order, returning how many ran
    pub fn drain(&mut self) -> usize {
        let count = self.pending.len();
        while let Some(op) = self.pending.pop_front() {
            match op {
                HotkeyOp::MapKey(key, target) => {
                    self.keys.insert(key, target);
                }
                HotkeyOp::UnmapKey(key) => {
                    self.keys.shift_remove(&key);
                }
                HotkeyOp::MapButton(button, target) => {
                    self.buttons.insert(button, target);
                }
                HotkeyOp::UnmapButton(button) => {
                    self.buttons.shift_remove(&button);
                }
                HotkeyOp::Clear => {
                    self.keys.clear();
                    self.buttons.clear();
                }
            }
        }
        count
    }

    /// Append an element id to the traversal order
    pub fn register(&mut self, element_id: &str) {
        if !self.order.iter().any(|id| id == element_id) {
            self.order.push(element_id.to_string());
        }
    }

    pub fn unregister(&mut self, element_id: &str) {
        self.order.retain(|id| id != element_id);
        if self.focused.as_deref() == Some(element_id) {
            self.focused = None;
        }
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn NavigationStrategy>) {
        self.strategy = strategy;
    }
}

impl Navigable for Navigation {
    fn key_target(&self, key: KeyCode) -> Option<&str> {
        self.keys.get(&key).map(String::as_str)
    }

    fn button_target(&self, button: GamepadButton) -> Option<&str> {
        self.buttons.get(&button).map(String::as_str)
    }

    fn navigate(
        &mut self,
        direction: NavDirection,
        accept: &dyn Fn(&str) -> bool,
    ) -> Option<String> {
        let len = self.order.len();
        let mut current = self
            .focused
            .as_ref()
            .and_then(|focused| self.order.iter().position(|id| id == focused));
        let mut first = None;

        for _ in 0..len {
            let next = self.strategy.next(direction, len, current)?;
            if first == Some(next) {
                return None;
            }
            first.get_or_insert(next);

            let id = self.order.get(next)?;
            if accept(id) {
                self.focused = Some(id.clone());
                return Some(id.clone());
            }
            current = Some(next);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn any(_: &str) -> bool {
        true
    }

    #[test]
    fn test_ops_apply_only_on_drain() {
        let mut nav = Navigation::new(Box::new(VerticalNavigation));
        nav.queue(HotkeyOp::MapKey(KeyCode::ESCAPE, "cancel".into()));
        assert_eq!(nav.key_target(KeyCode::ESCAPE), None);

        assert_eq!(nav.drain(), 1);
        assert_eq!(nav.key_target(KeyCode::ESCAPE), Some("cancel"));
        assert_eq!(nav.drain(), 0);
    }

    #[test]
    fn test_ops_apply_in_fifo_order() {
        let mut nav = Navigation::new(Box::new(VerticalNavigation));
        nav.queue(HotkeyOp::MapButton(GamepadButton::East, "a".into()));
        nav.queue(HotkeyOp::Clear);
        nav.queue(HotkeyOp::MapButton(GamepadButton::East, "b".into()));
        nav.queue(HotkeyOp::MapKey(KeyCode::ENTER, "c".into()));
        nav.queue(HotkeyOp::UnmapKey(KeyCode::ENTER));
        nav.drain();

        assert_eq!(nav.button_target(GamepadButton::East), Some("b"));
        assert_eq!(nav.key_target(KeyCode::ENTER), None);
    }

    #[test]
    fn test_vertical_wraps() {
        let mut nav = Navigation::new(Box::new(VerticalNavigation));
        for id in ["a", "b", "c"] {
            nav.register(id);
        }
        assert_eq!(nav.navigate(NavDirection::Down, &any).as_deref(), Some("a"));
        assert_eq!(nav.navigate(NavDirection::Down, &any).as_deref(), Some("b"));
        assert_eq!(nav.navigate(NavDirection::Up, &any).as_deref(), Some("a"));
        assert_eq!(nav.navigate(NavDirection::Up, &any).as_deref(), Some("c"));
        assert_eq!(nav.navigate(NavDirection::Left, &any), None);
        assert_eq!(nav.focused(), Some("c"));
    }

    #[test]
    fn test_rejected_targets_are_stepped_over() {
        let mut nav = Navigation::new(Box::new(VerticalNavigation));
        for id in ["a", "b", "c"] {
            nav.register(id);
        }
        let not_b = |id: &str| id != "b";
        assert_eq!(nav.navigate(NavDirection::Down, &not_b).as_deref(), Some("a"));
        assert_eq!(nav.navigate(NavDirection::Down, &not_b).as_deref(), Some("c"));
        assert_eq!(nav.navigate(NavDirection::Up, &not_b).as_deref(), Some("a"));

        let none = |_: &str| false;
        assert_eq!(nav.navigate(NavDirection::Down, &none), None);
        assert_eq!(nav.focused(), Some("a"));
    }

    #[test]
    fn test_grid_rejection_stops_at_edge() {
        let mut nav = Navigation::new(Box::new(GridNavigation::new(3)));
        for id in ["a", "b", "c"] {
            nav.register(id);
        }
        let not_c = |id: &str| id != "c";
        assert_eq!(nav.navigate(NavDirection::Right, &not_c).as_deref(), Some("a"));
        assert_eq!(nav.navigate(NavDirection::Right, &not_c).as_deref(), Some("b"));
        assert_eq!(nav.navigate(NavDirection::Right, &not_c), None);
        assert_eq!(nav.focused(), Some("b"));
    }

    #[test]
    fn test_grid_stops_at_edges() {
        let grid = GridNavigation::new(3);
        // 0 1 2
        // 3 4
        assert_eq!(grid.next(NavDirection::Right, 5, Some(1)), Some(2));
        assert_eq!(grid.next(NavDirection::Right, 5, Some(2)), None);
        assert_eq!(grid.next(NavDirection::Down, 5, Some(1)), Some(4));
        assert_eq!(grid.next(NavDirection::Down, 5, Some(2)), None);
        assert_eq!(grid.next(NavDirection::Up, 5, Some(4)), Some(1));
        assert_eq!(grid.next(NavDirection::Left, 5, Some(3)), None);
    }

    #[test]
    fn test_unregister_clears_focus() {
        let mut nav = Navigation::new(Box::new(VerticalNavigation));
        nav.register("a");
        nav.register("a");
        assert_eq!(nav.order().len(), 1);
        nav.navigate(NavDirection::Down, &any);
        nav.unregister("a");
        assert_eq!(nav.focused(), None);
        assert_eq!(nav.navigate(NavDirection::Down, &any), None);
    }
}
