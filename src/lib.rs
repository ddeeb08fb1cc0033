#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-autocomplete/")]

//! # bubbletea-autocomplete
//!
//! A searchable select (autocomplete / combobox) component for
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs) applications.
//!
//! ## Overview
//!
//! The component pairs a single-line text input with a floating list of
//! options. Typing narrows the list after a debounce delay, the arrow keys
//! move a highlight through the matches, and Enter picks one. It supports a
//! single value or a set of values, and works with plain strings as well as
//! structured records that carry a stable id.
//!
//! Like every bubbletea-rs component it follows the Elm Architecture with
//! `init()`, `update()` and `view()`.
//!
//! ## Building blocks
//!
//! The widget is assembled from small pieces that are usable on their own:
//!
//! - [`option`]: labelling and identity of options ([`Item`], [`Choice`])
//! - [`filter`]: the default substring filter and a fuzzy alternative
//! - [`debounce`]: a trailing-edge debouncer over an injectable [`debounce::Scheduler`]
//! - [`highlight`]: the wrapping highlight cursor
//! - [`selection`]: single and multiple selection values
//! - [`config`]: plain-data [`Settings`]
//! - [`key`]: type-safe key bindings
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_autocomplete::prelude::*;
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//!
//! struct App {
//!     fruit: Autocomplete<String>,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let options = vec!["Apple".to_string(), "Banana".to_string()];
//!         let mut fruit = Autocomplete::new(options).with_label("Fruit");
//!         let cmd = fruit.focus();
//!         (Self { fruit }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.fruit.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.fruit.view()
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! State transitions are reported through [`tracing`] at `debug` level
//! (open, close, settled queries, selection changes) and `trace` level
//! (highlight movement, debounce scheduling). Install any subscriber to see
//! them.

pub mod autocomplete;
pub mod config;
pub mod debounce;
pub mod filter;
pub mod highlight;
pub mod key;
pub mod option;
pub mod selection;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// Components implementing this trait can take part in a host's focus cycle.
/// For the autocomplete, gaining focus opens the option list and losing it
/// closes the list without touching the selection.
///
/// # Examples
///
/// ```rust
/// use bubbletea_autocomplete::prelude::*;
///
/// let mut picker = Autocomplete::new(vec!["a".to_string()]);
/// assert!(!picker.focused());
///
/// picker.focus();
/// assert!(picker.focused());
///
/// picker.blur();
/// assert!(!picker.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// Returns an optional command for the bubbletea runtime.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use autocomplete::{
    default_key_map as autocomplete_default_key_map, DismissMsg, Dropdown, FloatingLayer,
    InputSurface, KeyMap as AutocompleteKeyMap, LineInput, Model as Autocomplete, Styles,
};
pub use config::{ConfigError, Settings};
pub use debounce::{DebounceMsg, Debouncer, ManualScheduler, Scheduler, TickScheduler};
pub use filter::{default_filter, fuzzy_filter, FilterFunc};
pub use key::{
    matches, matches_binding, new_binding, with_disabled, with_help, with_keys, Binding,
    Help as KeyHelp, KeyMap, KeyPress,
};
pub use option::{Choice, ChoiceError, ChoiceId, Item, LabelFunc};
pub use selection::{Selection, SelectionMode};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_autocomplete::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Component;

    pub use crate::autocomplete::{DismissMsg, Model as Autocomplete};
    pub use crate::config::Settings;
    pub use crate::debounce::ManualScheduler;
    pub use crate::option::{Choice, ChoiceId, Item};
    pub use crate::selection::{Selection, SelectionMode};

    pub use crate::key::{
        matches, matches_binding, new_binding, with_disabled, with_help, with_keys, Binding,
        KeyMap, KeyPress,
    };
}
