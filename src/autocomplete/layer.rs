//! Floating layer collaborator.
//!
//! The autocomplete tells the layer whether it is open and which row must be
//! visible; the layer owns everything about how the option list is framed and
//! scrolled. Outside dismissal arrives as a [`DismissMsg`], which the widget
//! treats exactly like the cancel command.

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use std::ops::Range;

/// Sent by the host when the user dismisses the layer from outside (a click
/// elsewhere, focus moving to another component).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissMsg {
    /// Identifier of the autocomplete that should close. `0` targets every
    /// instance.
    pub id: i64,
}

/// A positioned container for the option list.
pub trait FloatingLayer: Send {
    /// Shows or hides the container.
    fn set_open(&mut self, open: bool);

    /// Whether the container is shown.
    fn is_open(&self) -> bool;

    /// Makes row `index` of `len` rows visible.
    fn scroll_into_view(&mut self, index: usize, len: usize);

    /// Rows currently inside the visible window.
    fn visible_range(&self, len: usize) -> Range<usize>;

    /// Frames the rendered rows. Only rows inside the visible window are shown.
    fn render(&self, rows: &[String]) -> String;
}

/// Default layer: a boxed window of at most `max_visible` rows drawn directly
/// below the input.
#[derive(Debug, Clone)]
pub struct Dropdown {
    open: bool,
    offset: usize,
    /// Rows shown before the list scrolls.
    pub max_visible: usize,
    /// Inner width in columns. 0 sizes the box to its widest row.
    pub width: usize,
    /// Style for the frame characters.
    pub border_style: Style,
    /// Style for the "more above/below" hints.
    pub hint_style: Style,
}

impl Default for Dropdown {
    fn default() -> Self {
        Self::new(6)
    }
}

impl Dropdown {
    /// A closed dropdown showing up to `max_visible` rows.
    pub fn new(max_visible: usize) -> Self {
        Self {
            open: false,
            offset: 0,
            max_visible: max_visible.max(1),
            width: 0,
            border_style: Style::new().foreground(Color::from("240")),
            hint_style: Style::new().foreground(Color::from("240")),
        }
    }

    /// First visible row.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl FloatingLayer for Dropdown {
    fn set_open(&mut self, open: bool) {
        self.open = open;
        if !open {
            self.offset = 0;
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn scroll_into_view(&mut self, index: usize, len: usize) {
        let per_view = self.max_visible.max(1);
        if len == 0 {
            self.offset = 0;
            return;
        }

        // Scroll down if the row is below the window
        if index >= self.offset + per_view {
            self.offset = index + 1 - per_view;
        }
        // Scroll up if the row is above the window
        if index < self.offset {
            self.offset = index;
        }
        self.offset = self.offset.min(len.saturating_sub(per_view));
    }

    fn visible_range(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        let end = (start + self.max_visible.max(1)).min(len);
        start..end
    }

    fn render(&self, rows: &[String]) -> String {
        let range = self.visible_range(rows.len());
        let mut body: Vec<String> = Vec::new();
        if range.start > 0 {
            body.push(self.hint_style.render(&format!("↑ {} more", range.start)));
        }
        body.extend(rows[range.clone()].iter().cloned());
        if range.end < rows.len() {
            body.push(self.hint_style.render(&format!("↓ {} more", rows.len() - range.end)));
        }

        let inner = if self.width > 0 {
            self.width
        } else {
            body.iter().map(|r| lipgloss::width_visible(r)).max().unwrap_or(0)
        };

        let bar = "─".repeat(inner + 2);
        let mut out = Vec::with_capacity(body.len() + 2);
        out.push(self.border_style.render(&format!("╭{}╮", bar)));
        for row in body {
            let pad = inner.saturating_sub(lipgloss::width_visible(&row));
            out.push(format!(
                "{} {}{} {}",
                self.border_style.render("│"),
                row,
                " ".repeat(pad),
                self.border_style.render("│")
            ));
        }
        out.push(self.border_style.render(&format!("╰{}╯", bar)));
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("row {}", i)).collect()
    }

    #[test]
    fn test_scroll_down_and_up() {
        let mut d = Dropdown::new(3);
        d.set_open(true);
        d.scroll_into_view(4, 10);
        assert_eq!(d.visible_range(10), 2..5);
        d.scroll_into_view(0, 10);
        assert_eq!(d.visible_range(10), 0..3);
        d.scroll_into_view(9, 10);
        assert_eq!(d.visible_range(10), 7..10);
    }

    #[test]
    fn test_window_never_passes_end() {
        let mut d = Dropdown::new(4);
        d.scroll_into_view(9, 10);
        assert_eq!(d.offset(), 6);
        // list shrinks under the window
        d.scroll_into_view(1, 2);
        assert_eq!(d.visible_range(2), 0..2);
    }

    #[test]
    fn test_close_resets_scroll() {
        let mut d = Dropdown::new(2);
        d.set_open(true);
        d.scroll_into_view(5, 6);
        d.set_open(false);
        assert_eq!(d.offset(), 0);
        assert!(!d.is_open());
    }

    #[test]
    fn test_render_shows_window_and_hints() {
        let mut d = Dropdown::new(2);
        d.set_open(true);
        d.scroll_into_view(2, 5);
        let plain = strip_ansi_escapes::strip_str(d.render(&rows(5)));
        assert!(plain.contains("↑ 1 more"));
        assert!(plain.contains("row 1"));
        assert!(plain.contains("row 2"));
        assert!(!plain.contains("row 3"));
        assert!(plain.contains("↓ 2 more"));
        assert!(plain.starts_with('╭'));
    }

    #[test]
    fn test_frame_pads_rows_with_escape_sequences() {
        let d = Dropdown::new(4);
        let rows = vec![
            "\u{1b}]8;;http://x\u{1b}\\link\u{1b}]8;;\u{1b}\\".to_string(),
            "\u{1b}[1mbold\u{1b}[0m".to_string(),
            "日本語".to_string(),
        ];
        let out = d.render(&rows);
        let widths: Vec<usize> = out.lines().map(|l| lipgloss::width_visible(l)).collect();
        // widest row is "日本語" (6 columns) plus borders and padding
        assert!(widths.iter().all(|w| *w == 10), "{:?}", widths);
    }
}
