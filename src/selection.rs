//! Selection state for single and multiple mode.
//!
//! A [`Selection`] is a snapshot owned by the caller. Transitions never edit
//! it in place: [`Selection::select`] and [`Selection::remove`] return the
//! replacement value, which the widget hands to the change notifier.
//!
//! Membership is decided by [`Item::same_option`] everywhere, so toggling,
//! removal and the "selected" marker in the list always agree.

use crate::option::Item;
use serde::{Deserialize, Serialize};

/// Whether a widget holds one value or an ordered list of values.
///
/// Fixed for the lifetime of a widget instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// At most one value. Selecting replaces it.
    #[default]
    Single,
    /// An ordered list. Selecting toggles membership.
    Multiple,
}

/// The current value of the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    /// Single mode: one value or nothing.
    Single(Option<T>),
    /// Multiple mode: values in selection order.
    Multiple(Vec<T>),
}

impl<T: Item> Selection<T> {
    /// An empty selection for the given mode.
    pub fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Selection::Single(None),
            SelectionMode::Multiple => Selection::Multiple(Vec::new()),
        }
    }

    /// The mode this value belongs to.
    pub fn mode(&self) -> SelectionMode {
        match self {
            Selection::Single(_) => SelectionMode::Single,
            Selection::Multiple(_) => SelectionMode::Multiple,
        }
    }

    /// Reshapes the value for another mode. A list handed to a single-mode
    /// widget keeps its first entry; a single value becomes a one-element list.
    pub fn coerce(self, mode: SelectionMode) -> Self {
        match (self, mode) {
            (Selection::Single(v), SelectionMode::Multiple) => {
                Selection::Multiple(v.into_iter().collect())
            }
            (Selection::Multiple(v), SelectionMode::Single) => {
                Selection::Single(v.into_iter().next())
            }
            (same, _) => same,
        }
    }

    /// Selected values as a slice, in selection order.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Selection::Single(v) => v.as_slice(),
            Selection::Multiple(v) => v,
        }
    }

    /// Iterates over the selected values.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Number of selected values.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Whether `option` is part of the selection.
    pub fn contains(&self, option: &T) -> bool {
        self.iter().any(|selected| selected.same_option(option))
    }

    /// The value after the user picks `option`.
    ///
    /// Single mode replaces the value. Multiple mode removes `option` if it is
    /// already selected, otherwise appends it.
    pub fn select(&self, option: &T) -> Self {
        match self {
            Selection::Single(_) => Selection::Single(Some(option.clone())),
            Selection::Multiple(values) => {
                if self.contains(option) {
                    self.remove(option)
                } else {
                    let mut next = values.clone();
                    next.push(option.clone());
                    Selection::Multiple(next)
                }
            }
        }
    }

    /// The value with `option` detached. Single mode has no removal and
    /// returns the value unchanged.
    pub fn remove(&self, option: &T) -> Self {
        match self {
            Selection::Single(v) => Selection::Single(v.clone()),
            Selection::Multiple(values) => Selection::Multiple(
                values
                    .iter()
                    .filter(|v| !v.same_option(option))
                    .cloned()
                    .collect(),
            ),
        }
    }

    /// Consumes the selection, returning the values.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Selection::Single(v) => v.into_iter().collect(),
            Selection::Multiple(v) => v,
        }
    }
}

impl<T: Item> Default for Selection<T> {
    fn default() -> Self {
        Selection::Single(None)
    }
}

impl<T: Item> From<Vec<T>> for Selection<T> {
    fn from(values: Vec<T>) -> Self {
        Selection::Multiple(values)
    }
}

impl<T: Item> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        Selection::Single(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::Choice;
    use serde_json::json;

    fn multi(values: &[&str]) -> Selection<String> {
        Selection::Multiple(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_multiple_toggle_on_then_off() {
        let start = multi(&["React"]);
        let added = start.select(&"Vue".to_string());
        assert_eq!(added, multi(&["React", "Vue"]));

        let removed = added.select(&"React".to_string());
        assert_eq!(removed, multi(&["Vue"]));
    }

    #[test]
    fn test_double_toggle_keeps_order_of_others() {
        let start = multi(&["a", "b", "c"]);
        for option in ["a", "b", "c", "d"] {
            let option = option.to_string();
            let twice = start.select(&option).select(&option);
            let others = |s: &Selection<String>| -> Vec<String> {
                s.iter().filter(|v| **v != option).cloned().collect()
            };
            assert_eq!(others(&twice), others(&start));
            assert_eq!(twice.contains(&option), start.contains(&option));
        }
    }

    #[test]
    fn test_absent_option_toggled_twice_is_identity() {
        let start = multi(&["x", "y"]);
        let z = "z".to_string();
        assert_eq!(start.select(&z).select(&z), start);
    }

    #[test]
    fn test_select_does_not_mutate_snapshot() {
        let start = multi(&["React"]);
        let _ = start.select(&"Vue".to_string());
        assert_eq!(start, multi(&["React"]));
    }

    #[test]
    fn test_single_replaces() {
        let s: Selection<String> = Selection::empty(SelectionMode::Single);
        assert!(s.is_empty());
        let s = s.select(&"X".to_string());
        assert_eq!(s, Selection::Single(Some("X".to_string())));
        let s = s.select(&"X".to_string());
        // single mode never toggles off
        assert_eq!(s, Selection::Single(Some("X".to_string())));
        assert_eq!(s.remove(&"X".to_string()), s);
    }

    #[test]
    fn test_membership_uses_ids() {
        let selected = Selection::Multiple(vec![Choice::identified(1, json!({ "name": "A (old)" }))]);
        let fresh = Choice::identified(1, json!({ "name": "A" }));
        let other = Choice::identified(2, json!({ "name": "B" }));
        assert!(selected.contains(&fresh));
        assert!(!selected.contains(&other));

        let removed = selected.remove(&fresh);
        assert!(removed.is_empty());
    }

    #[test]
    fn test_coerce_between_modes() {
        let s = Selection::Single(Some("a".to_string()));
        assert_eq!(s.clone().coerce(SelectionMode::Multiple), multi(&["a"]));
        assert_eq!(
            multi(&["a", "b"]).coerce(SelectionMode::Single),
            Selection::Single(Some("a".to_string()))
        );
        let empty: Selection<String> = Selection::Single(None);
        assert_eq!(empty.coerce(SelectionMode::Multiple), multi(&[]));
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&SelectionMode::Multiple).unwrap(), "\"multiple\"");
        let m: SelectionMode = serde_json::from_str("\"single\"").unwrap();
        assert_eq!(m, SelectionMode::Single);
    }
}
