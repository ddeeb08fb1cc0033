//! Core state of the autocomplete component.

use super::input::{InputSurface, LineInput};
use super::keymap::{default_key_map, KeyMap};
use super::layer::{Dropdown, FloatingLayer};
use super::loading::Loading;
use super::view::Styles;
use crate::config::Settings;
use crate::debounce::{Debounced, Debouncer, Scheduler};
use crate::filter::{self, FilterFunc};
use crate::highlight::Highlight;
use crate::option::{label_of, Item, LabelFunc};
use crate::selection::{Selection, SelectionMode};
use bubbletea_rs::Cmd;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Called with the replacement value every time the selection changes.
pub type ChangeFunc<T> = Box<dyn FnMut(&Selection<T>) + Send>;

/// Called with the committed query once typing settles.
pub type InputChangeFunc = Box<dyn FnMut(&str) + Send>;

/// Renders one option row. Receives the option and whether it is selected.
pub type RenderFunc<T> = Box<dyn Fn(&T, bool) -> String + Send>;

/// A searchable select over options of type `T`.
///
/// The widget owns its query, highlight and open state. The option set and
/// the selection are snapshots supplied by the caller: the widget replaces
/// them wholesale and reports every selection change through the change
/// notifier, never editing them in place.
///
/// # Examples
///
/// ```rust
/// use bubbletea_autocomplete::autocomplete::Model;
/// use bubbletea_autocomplete::Selection;
///
/// let options = vec!["React".to_string(), "Vue".to_string(), "Svelte".to_string()];
/// let mut picker = Model::new(options)
///     .with_multiple(true)
///     .with_on_change(Box::new(|value: &Selection<String>| {
///         println!("selected {} frameworks", value.len());
///     }));
///
/// picker.open();
/// picker.select(&"Vue".to_string());
/// assert_eq!(picker.value().as_slice(), &["Vue".to_string()]);
/// assert!(picker.is_open());
/// ```
pub struct Model<T: Item> {
    id: i64,
    options: Vec<T>,
    filtered: Vec<T>,
    value: Selection<T>,
    mode: SelectionMode,
    raw: String,
    committed: String,
    highlight: Highlight,
    disabled: bool,
    pub(super) debouncer: Debouncer,
    pub(super) input: Box<dyn InputSurface>,
    pub(super) layer: Box<dyn FloatingLayer>,
    pub(super) loading: Loading,
    pub(super) label_fn: Option<LabelFunc<T>>,
    filter_fn: Option<FilterFunc<T>>,
    pub(super) render_fn: Option<RenderFunc<T>>,
    on_change: Option<ChangeFunc<T>>,
    on_input_change: Option<InputChangeFunc>,

    /// Key bindings.
    pub key_map: KeyMap,
    /// Visual styles.
    pub styles: Styles,
    /// Label rendered above the input.
    pub label: Option<String>,
    /// Help text rendered below the widget.
    pub description: Option<String>,
    /// Text shown when no option matches.
    pub empty_text: String,
}

impl<T: Item> Model<T> {
    /// Creates a single-selection autocomplete over `options` with default
    /// settings.
    pub fn new(options: Vec<T>) -> Self {
        Self::from_settings(options, &Settings::default())
    }

    /// Creates an autocomplete configured from plain-data settings.
    pub fn from_settings(options: Vec<T>, settings: &Settings) -> Self {
        let mode = settings.mode();
        let mut input = LineInput::new();
        input.set_placeholder(&settings.placeholder);

        let mut loading = Loading::new();
        // the animation starts once the host runs `init_cmd`
        let _ = loading.set_active(settings.loading);

        Self {
            id: next_id(),
            filtered: options.clone(),
            options,
            value: Selection::empty(mode),
            mode,
            raw: String::new(),
            committed: String::new(),
            highlight: Highlight::new(),
            disabled: settings.disabled,
            debouncer: Debouncer::new(settings.debounce()),
            input: Box::new(input),
            layer: Box::new(Dropdown::new(settings.max_visible)),
            loading,
            label_fn: None,
            filter_fn: None,
            render_fn: None,
            on_change: None,
            on_input_change: None,
            key_map: default_key_map(),
            styles: Styles::default(),
            label: settings.label.clone(),
            description: settings.description.clone(),
            empty_text: settings.empty_text.clone(),
        }
    }

    /// Commands the host should run once after construction.
    pub fn init_cmd(&self) -> Option<Cmd> {
        self.loading.resume()
    }

    /// Switches between single and multiple selection. Meant for
    /// construction; the current value is reshaped for the new mode.
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.mode = if multiple {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        };
        self.value = std::mem::take(&mut self.value).coerce(self.mode);
        self
    }

    /// Sets the initial value.
    pub fn with_value(mut self, value: Selection<T>) -> Self {
        self.set_value(value);
        self
    }

    /// Sets the debounce delay. Zero filters on every keystroke.
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debouncer.set_delay(delay);
        self
    }

    /// Replaces the scheduler driving the debounce delay.
    pub fn with_scheduler(mut self, scheduler: Box<dyn Scheduler>) -> Self {
        self.debouncer.set_scheduler(scheduler);
        self
    }

    /// Overrides how options are labelled.
    pub fn with_label_fn(mut self, f: LabelFunc<T>) -> Self {
        self.label_fn = Some(f);
        self.refilter();
        self
    }

    /// Replaces the default substring filter.
    pub fn with_filter_fn(mut self, f: FilterFunc<T>) -> Self {
        self.filter_fn = Some(f);
        self.refilter();
        self
    }

    /// Overrides how option rows are rendered.
    pub fn with_render_fn(mut self, f: RenderFunc<T>) -> Self {
        self.render_fn = Some(f);
        self
    }

    /// Registers the selection change notifier.
    pub fn with_on_change(mut self, f: ChangeFunc<T>) -> Self {
        self.on_change = Some(f);
        self
    }

    /// Registers the settled-input notifier, e.g. to start a remote search.
    pub fn with_on_input_change(mut self, f: InputChangeFunc) -> Self {
        self.on_input_change = Some(f);
        self
    }

    /// Plugs in a custom text field.
    pub fn with_input(mut self, mut input: Box<dyn InputSurface>) -> Self {
        input.set_value(&self.raw);
        self.input = input;
        self
    }

    /// Plugs in a custom floating layer.
    pub fn with_layer(mut self, layer: Box<dyn FloatingLayer>) -> Self {
        self.layer = layer;
        self
    }

    /// Sets the input placeholder.
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.input.set_placeholder(placeholder);
        self
    }

    /// Sets the label shown above the input.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the description shown below the widget.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Starts the widget disabled.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    /// Unique identifier of this instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Selection mode, fixed at construction.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Whether multiple values can be selected.
    pub fn is_multiple(&self) -> bool {
        self.mode == SelectionMode::Multiple
    }

    /// The current selection snapshot.
    pub fn value(&self) -> &Selection<T> {
        &self.value
    }

    /// Replaces the selection snapshot, e.g. after the caller changed it.
    /// Does not invoke the change notifier.
    pub fn set_value(&mut self, value: Selection<T>) {
        self.value = value.coerce(self.mode);
    }

    /// The full option set.
    pub fn options(&self) -> &[T] {
        &self.options
    }

    /// Replaces the option set and re-filters it with the committed query.
    pub fn set_options(&mut self, options: Vec<T>) {
        debug!(id = self.id, count = options.len(), "options replaced");
        self.options = options;
        self.refilter();
    }

    /// Options matching the committed query, in display order.
    pub fn filtered(&self) -> &[T] {
        &self.filtered
    }

    /// Index of the highlighted option within [`Model::filtered`].
    pub fn highlighted(&self) -> Option<usize> {
        self.highlight.index()
    }

    /// The highlighted option.
    pub fn highlighted_option(&self) -> Option<&T> {
        self.highlight.index().and_then(|i| self.filtered.get(i))
    }

    /// Text as typed, updated on every keystroke.
    pub fn raw_query(&self) -> &str {
        &self.raw
    }

    /// Settled query used for filtering.
    pub fn committed_query(&self) -> &str {
        &self.committed
    }

    /// Whether the option list is shown.
    pub fn is_open(&self) -> bool {
        self.layer.is_open()
    }

    /// Whether interaction is ignored.
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Enables or disables the widget. Disabling closes the list, leaves the
    /// input and drops any pending query.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.debouncer.cancel();
            self.cancel();
        }
    }

    /// Whether the loading indicator is shown.
    pub fn loading(&self) -> bool {
        self.loading.active()
    }

    /// Shows or hides the loading indicator. Returns the animation command.
    pub fn set_loading(&mut self, loading: bool) -> Option<Cmd> {
        self.loading.set_active(loading)
    }

    /// Whether `option` is part of the current selection.
    pub fn is_selected(&self, option: &T) -> bool {
        self.value.contains(option)
    }

    /// Display label for `option`, honouring the caller's label function.
    pub fn label_of(&self, option: &T) -> String {
        label_of(option, self.label_fn.as_ref())
    }

    /// Opens the option list and focuses the input.
    pub fn open(&mut self) {
        if self.disabled {
            return;
        }
        self.input.focus();
        if self.layer.is_open() {
            return;
        }
        debug!(id = self.id, "autocomplete opened");
        self.layer.set_open(true);
        self.revalidate();
    }

    /// Closes the option list. Focus is left alone.
    pub fn close(&mut self) {
        if !self.layer.is_open() {
            return;
        }
        debug!(id = self.id, "autocomplete closed");
        self.layer.set_open(false);
        self.revalidate();
    }

    /// Closes the list and removes focus from the input. The selection is
    /// untouched and a pending query still settles.
    pub fn cancel(&mut self) {
        self.close();
        self.input.blur();
    }

    /// Highlights the next option, wrapping to the first.
    pub fn next(&mut self) {
        if self.layer.is_open() && self.highlight.next(self.filtered.len()) {
            self.scroll_to_highlight();
        }
    }

    /// Highlights the previous option, wrapping to the last.
    pub fn previous(&mut self) {
        if self.layer.is_open() && self.highlight.previous(self.filtered.len()) {
            self.scroll_to_highlight();
        }
    }

    /// Highlights a specific row, e.g. the one under the pointer.
    pub fn hover(&mut self, index: usize) {
        if self.layer.is_open() && self.highlight.set(index, self.filtered.len()) {
            self.scroll_to_highlight();
        }
    }

    /// Selects (or toggles) the highlighted option. No-op when nothing is
    /// highlighted.
    pub fn commit(&mut self) {
        if let Some(option) = self.highlighted_option().cloned() {
            self.select(&option);
        }
    }

    /// Applies a user pick of `option`.
    ///
    /// Single mode replaces the value and closes the list. Multiple mode
    /// toggles membership and keeps the list open with focus on the input.
    /// Either way the query is cleared.
    pub fn select(&mut self, option: &T) {
        if self.disabled {
            return;
        }
        let next = self.value.select(option);
        self.emit(next);
        self.reset_query();

        match self.mode {
            SelectionMode::Single => self.close(),
            SelectionMode::Multiple => self.input.focus(),
        }
    }

    /// Detaches `option` from a multiple selection. Single mode has no removal.
    pub fn remove(&mut self, option: &T) {
        if self.disabled || self.mode == SelectionMode::Single {
            return;
        }
        let next = self.value.remove(option);
        self.emit(next);
        self.reset_query();
        self.input.focus();
    }

    /// Replaces the input text as if the user had typed it.
    pub fn set_query(&mut self, text: &str) -> Option<Cmd> {
        if self.disabled {
            return None;
        }
        self.input.set_value(text);
        self.input_changed()
    }

    /// Settles any pending query immediately.
    pub fn flush(&mut self) {
        if let Some(query) = self.debouncer.flush() {
            self.apply_committed(query);
        }
    }

    /// Reacts to the input text having changed.
    pub(super) fn input_changed(&mut self) -> Option<Cmd> {
        self.raw = self.input.value();
        self.open();
        match self.debouncer.push(&self.raw) {
            Debounced::Scheduled(cmd) => cmd,
            Debounced::Settled(query) => {
                self.apply_committed(query);
                None
            }
        }
    }

    /// Applies a query that settled after the debounce delay.
    pub(super) fn apply_committed(&mut self, query: String) {
        debug!(id = self.id, query = %query, open = self.is_open(), "query settled");
        self.committed = query;
        self.refilter();
        if let Some(notify) = self.on_input_change.as_mut() {
            notify(&self.committed);
        }
    }

    fn reset_query(&mut self) {
        self.debouncer.cancel();
        self.raw.clear();
        self.input.set_value("");
        if self.committed.is_empty() {
            // filtered list is unchanged, so the highlight stays put
            return;
        }
        // listeners that searched remotely need to learn the query is gone
        self.apply_committed(String::new());
    }

    fn emit(&mut self, next: Selection<T>) {
        debug!(id = self.id, selected = next.len(), "selection changed");
        if let Some(notify) = self.on_change.as_mut() {
            notify(&next);
        }
        self.value = next;
    }

    fn refilter(&mut self) {
        self.filtered = filter::apply(
            &self.options,
            &self.committed,
            self.filter_fn.as_ref(),
            self.label_fn.as_ref(),
        );
        self.revalidate();
    }

    /// Snaps the highlight back into range for the current list and open state.
    fn revalidate(&mut self) {
        let open = self.layer.is_open();
        if self.highlight.revalidate(open, self.filtered.len()) || open {
            self.scroll_to_highlight();
        }
    }

    fn scroll_to_highlight(&mut self) {
        if !self.layer.is_open() {
            return;
        }
        if let Some(index) = self.highlight.index() {
            trace!(id = self.id, index, "highlight moved");
            self.layer.scroll_into_view(index, self.filtered.len());
        }
    }
}

impl<T: Item> Default for Model<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
