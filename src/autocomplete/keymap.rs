//! Key bindings for the autocomplete component.

use crate::key::{self, new_binding, with_help, with_keys_str, Binding};

/// Commands the autocomplete responds to. Anything else goes to the input.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Highlight the next option, wrapping to the first.
    pub next: Binding,
    /// Highlight the previous option, wrapping to the last.
    pub previous: Binding,
    /// Select (or toggle) the highlighted option.
    pub commit: Binding,
    /// Close the list and leave the input.
    pub cancel: Binding,
    /// Open the list without typing.
    pub open: Binding,
    /// Multiple mode: detach the last selected value when the input is empty.
    pub remove_last: Binding,
}

/// The default bindings.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        next: new_binding(vec![with_keys_str(&["down", "ctrl+n"]), with_help("↓", "next")]),
        previous: new_binding(vec![with_keys_str(&["up", "ctrl+p"]), with_help("↑", "previous")]),
        commit: new_binding(vec![with_keys_str(&["enter", "tab"]), with_help("enter", "select")]),
        cancel: new_binding(vec![with_keys_str(&["esc"]), with_help("esc", "close")]),
        open: new_binding(vec![
            with_keys_str(&["ctrl+space", "alt+down"]),
            with_help("ctrl+space", "open"),
        ]),
        remove_last: new_binding(vec![
            with_keys_str(&["backspace"]),
            with_help("backspace", "remove last"),
        ]),
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.next, &self.previous, &self.commit, &self.cancel]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.next, &self.previous, &self.open],
            vec![&self.commit, &self.remove_last, &self.cancel],
        ]
    }
}
