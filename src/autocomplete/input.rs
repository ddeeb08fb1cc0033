//! Host input surface.
//!
//! The autocomplete only needs a text field it can read, clear and focus. That
//! contract is [`InputSurface`]; [`LineInput`] is the built-in single-line
//! implementation used unless the host plugs in its own.

use crate::key::{matches_binding, new_binding, with_keys_str, Binding};
use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A text-entry control the autocomplete reads from and writes to.
pub trait InputSurface: Send {
    /// Current text.
    fn value(&self) -> String;
    /// Replaces the text, moving the caret to the end.
    fn set_value(&mut self, value: &str);
    /// Gives the control keyboard focus.
    fn focus(&mut self);
    /// Removes keyboard focus.
    fn blur(&mut self);
    /// Whether the control has focus.
    fn focused(&self) -> bool;
    /// Applies an editing key. Returns true if the text changed.
    fn handle_key(&mut self, msg: &KeyMsg) -> bool;
    /// Text shown while the control is empty.
    fn set_placeholder(&mut self, placeholder: &str);
    /// Renders the control.
    fn view(&self) -> String;
}

/// Editing bindings for [`LineInput`].
#[derive(Debug, Clone)]
pub struct LineKeyMap {
    /// Move caret one grapheme left.
    pub character_backward: Binding,
    /// Move caret one grapheme right.
    pub character_forward: Binding,
    /// Move caret to start.
    pub line_start: Binding,
    /// Move caret to end.
    pub line_end: Binding,
    /// Delete the grapheme before the caret.
    pub delete_character_backward: Binding,
    /// Delete the grapheme under the caret.
    pub delete_character_forward: Binding,
    /// Delete the word before the caret.
    pub delete_word_backward: Binding,
    /// Delete everything before the caret.
    pub delete_before_cursor: Binding,
}

impl Default for LineKeyMap {
    fn default() -> Self {
        Self {
            character_backward: new_binding(vec![with_keys_str(&["left", "ctrl+b"])]),
            character_forward: new_binding(vec![with_keys_str(&["right", "ctrl+f"])]),
            line_start: new_binding(vec![with_keys_str(&["home", "ctrl+a"])]),
            line_end: new_binding(vec![with_keys_str(&["end", "ctrl+e"])]),
            delete_character_backward: new_binding(vec![with_keys_str(&["backspace", "ctrl+h"])]),
            delete_character_forward: new_binding(vec![with_keys_str(&["delete", "ctrl+d"])]),
            delete_word_backward: new_binding(vec![with_keys_str(&["alt+backspace", "ctrl+w"])]),
            delete_before_cursor: new_binding(vec![with_keys_str(&["ctrl+u"])]),
        }
    }
}

/// Built-in single-line text field.
#[derive(Debug, Clone)]
pub struct LineInput {
    value: String,
    // caret position in graphemes
    pos: usize,
    focus: bool,
    /// Maximum display width in columns. 0 means unlimited.
    pub width: usize,
    /// Placeholder text.
    pub placeholder: String,
    /// Style for typed text.
    pub text_style: Style,
    /// Style for the placeholder.
    pub placeholder_style: Style,
    /// Style for the caret cell.
    pub cursor_style: Style,
    /// Editing bindings.
    pub key_map: LineKeyMap,
}

impl Default for LineInput {
    fn default() -> Self {
        Self::new()
    }
}

impl LineInput {
    /// An empty, unfocused field.
    pub fn new() -> Self {
        Self {
            value: String::new(),
            pos: 0,
            focus: false,
            width: 0,
            placeholder: String::new(),
            text_style: Style::new(),
            placeholder_style: Style::new().foreground(Color::from("240")),
            cursor_style: Style::new().reverse(true),
            key_map: LineKeyMap::default(),
        }
    }

    /// Caret position in graphemes.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn graphemes(&self) -> Vec<&str> {
        self.value.graphemes(true).collect()
    }

    fn byte_offset(&self, grapheme: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn insert(&mut self, ch: char) {
        let at = self.byte_offset(self.pos);
        self.value.insert(at, ch);
        // a combining mark may merge into the previous grapheme
        let count = self.value[..at + ch.len_utf8()].graphemes(true).count();
        self.pos = count;
    }

    fn delete_range(&mut self, start: usize, end: usize) -> bool {
        if start >= end {
            return false;
        }
        let from = self.byte_offset(start);
        let to = self.byte_offset(end);
        self.value.replace_range(from..to, "");
        self.pos = start;
        true
    }

    fn word_start_before(&self, pos: usize) -> usize {
        let graphemes = self.graphemes();
        let mut i = pos;
        while i > 0 && graphemes[i - 1].trim().is_empty() {
            i -= 1;
        }
        while i > 0 && !graphemes[i - 1].trim().is_empty() {
            i -= 1;
        }
        i
    }
}

impl InputSurface for LineInput {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.pos = self.graphemes().len();
    }

    fn focus(&mut self) {
        self.focus = true;
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }

    fn handle_key(&mut self, msg: &KeyMsg) -> bool {
        if !self.focus {
            return false;
        }
        let len = self.graphemes().len();
        let km = self.key_map.clone();

        if matches_binding(msg, &km.delete_word_backward) {
            let start = self.word_start_before(self.pos);
            self.delete_range(start, self.pos)
        } else if matches_binding(msg, &km.delete_before_cursor) {
            self.delete_range(0, self.pos)
        } else if matches_binding(msg, &km.delete_character_backward) {
            self.pos > 0 && self.delete_range(self.pos - 1, self.pos)
        } else if matches_binding(msg, &km.delete_character_forward) {
            self.pos < len && self.delete_range(self.pos, self.pos + 1)
        } else if matches_binding(msg, &km.character_backward) {
            self.pos = self.pos.saturating_sub(1);
            false
        } else if matches_binding(msg, &km.character_forward) {
            self.pos = (self.pos + 1).min(len);
            false
        } else if matches_binding(msg, &km.line_start) {
            self.pos = 0;
            false
        } else if matches_binding(msg, &km.line_end) {
            self.pos = len;
            false
        } else if let KeyCode::Char(ch) = msg.key {
            if msg.modifiers.contains(KeyModifiers::CONTROL)
                || msg.modifiers.contains(KeyModifiers::ALT)
            {
                return false;
            }
            self.insert(ch);
            true
        } else {
            false
        }
    }

    fn set_placeholder(&mut self, placeholder: &str) {
        self.placeholder = placeholder.to_string();
    }

    fn view(&self) -> String {
        if self.value.is_empty() {
            let caret = if self.focus {
                self.cursor_style.render(" ")
            } else {
                String::new()
            };
            return format!("{}{}", caret, self.placeholder_style.render(&self.placeholder));
        }

        let graphemes = self.graphemes();
        let mut start = 0;
        if self.width > 0 {
            // keep the caret cell visible by dropping graphemes from the left
            let mut used = 1;
            start = self.pos;
            while start > 0 && used + graphemes[start - 1].width() <= self.width {
                used += graphemes[start - 1].width();
                start -= 1;
            }
        }

        let before: String = graphemes[start..self.pos].concat();
        let mut out = self.text_style.render(&before);
        if self.focus {
            let under = graphemes.get(self.pos).copied().unwrap_or(" ");
            out.push_str(&self.cursor_style.render(under));
            if self.pos + 1 < graphemes.len() {
                out.push_str(&self.text_style.render(&graphemes[self.pos + 1..].concat()));
            }
        } else if self.pos < graphemes.len() {
            out.push_str(&self.text_style.render(&graphemes[self.pos..].concat()));
        }
        out
    }
}
