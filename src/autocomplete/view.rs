//! Rendering for the autocomplete component.

use super::model::Model;
use crate::option::Item;
use lipgloss_extras::prelude::*;

/// Styles used when rendering the autocomplete.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Label above the input.
    pub label: Style,
    /// Description below the widget.
    pub description: Style,
    /// An option row.
    pub option: Style,
    /// The highlighted option row.
    pub highlighted: Style,
    /// The check mark after selected options.
    pub selected_mark: Style,
    /// A selected value shown as a chip in multiple mode.
    pub chip: Style,
    /// The "no options" message.
    pub empty: Style,
    /// Applied to the input line while disabled.
    pub disabled: Style,
    /// Prefix of the highlighted row.
    pub cursor_prefix: String,
    /// Marker appended to selected rows.
    pub check: String,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            label: Style::new().bold(true),
            description: Style::new().foreground(Color::from("243")).italic(true),
            option: Style::new(),
            highlighted: Style::new()
                .foreground(Color::from("#EE6FF8"))
                .bold(true),
            selected_mark: Style::new().foreground(Color::from("#04B575")),
            chip: Style::new()
                .foreground(Color::from("#1E3A8A"))
                .background(Color::from("#DBEAFE"))
                .padding(0, 1, 0, 1),
            empty: Style::new().foreground(Color::from("240")),
            disabled: Style::new().faint(true),
            cursor_prefix: "› ".to_string(),
            check: "✓".to_string(),
        }
    }
}

impl<T: Item> Model<T> {
    /// Renders the widget: label, input line, option list when open,
    /// selected chips in multiple mode, and description.
    pub fn view(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        if let Some(label) = &self.label {
            lines.push(self.styles.label.render(label));
        }

        let mut input_line = String::new();
        if self.is_multiple() && !self.is_open() && !self.value().is_empty() {
            input_line.push_str(&self.chips_view());
            input_line.push(' ');
        }
        input_line.push_str(&self.input.view());
        let spinner = self.loading.view();
        if !spinner.is_empty() {
            input_line.push(' ');
            input_line.push_str(&spinner);
        }
        if self.disabled() {
            input_line = self.styles.disabled.render(&input_line);
        }
        lines.push(input_line);

        if self.is_open() {
            lines.push(self.layer.render(&self.option_rows()));
            if self.is_multiple() && !self.value().is_empty() {
                lines.push(self.chips_view());
            }
        }

        if let Some(description) = &self.description {
            lines.push(self.styles.description.render(description));
        }

        lines.join("\n")
    }

    fn option_rows(&self) -> Vec<String> {
        if self.filtered().is_empty() {
            return vec![self.styles.empty.render(&self.empty_text)];
        }

        let pad = " ".repeat(self.styles.cursor_prefix.chars().count());
        self.filtered()
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let selected = self.is_selected(option);
                let body = match &self.render_fn {
                    Some(render) => render(option, selected),
                    None => self.default_row(option, selected),
                };
                if self.highlighted() == Some(index) {
                    self.styles
                        .highlighted
                        .render(&format!("{}{}", self.styles.cursor_prefix, body))
                } else {
                    format!("{}{}", pad, self.styles.option.render(&body))
                }
            })
            .collect()
    }

    fn default_row(&self, option: &T, selected: bool) -> String {
        let label = self.label_of(option);
        if selected {
            format!("{} {}", label, self.styles.selected_mark.render(&self.styles.check))
        } else {
            label
        }
    }

    fn chips_view(&self) -> String {
        let close = if self.disabled() { "" } else { " ×" };
        self.value()
            .iter()
            .map(|v| self.styles.chip.render(&format!("{}{}", self.label_of(v), close)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
