//! Searchable select (autocomplete / combobox) component.
//!
//! A text input paired with a floating list of options. Typing narrows the
//! list after a debounce delay, the arrow keys move a highlight through the
//! matches, and Enter picks the highlighted option. In single mode a pick
//! replaces the value and closes the list; in multiple mode it toggles
//! membership and keeps the list open.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_autocomplete::autocomplete::Model;
//!
//! let options = vec!["Apple".to_string(), "Banana".to_string(), "Cherry".to_string()];
//! let mut fruit = Model::new(options).with_label("Fruit");
//!
//! fruit.open();
//! assert_eq!(fruit.highlighted(), Some(0));
//! fruit.commit();
//! assert_eq!(fruit.value().as_slice(), &["Apple".to_string()]);
//! ```
//!
//! # Structured options
//!
//! ```rust
//! use bubbletea_autocomplete::autocomplete::Model;
//! use bubbletea_autocomplete::{Choice, Selection};
//! use serde_json::json;
//!
//! let users = vec![
//!     Choice::identified(1, json!({"label": "Ada"})),
//!     Choice::identified(2, json!({"label": "Grace"})),
//! ];
//! // a selection restored from storage still matches by id
//! let saved = Choice::identified(2, json!({"label": "Grace H."}));
//! let picker = Model::new(users)
//!     .with_multiple(true)
//!     .with_value(Selection::from(vec![saved]));
//!
//! assert!(picker.is_selected(&picker.options()[1]));
//! ```
//!
//! # Collaborators
//!
//! The text field and the floating container are traits ([`InputSurface`] and
//! [`FloatingLayer`]) so hosts can plug in their own. The debounce clock is a
//! [`crate::debounce::Scheduler`]; tests drive it with
//! [`crate::debounce::ManualScheduler`].

pub mod input;
pub mod keymap;
pub mod layer;
pub mod loading;
mod model;
mod update;
pub mod view;


pub use input::{InputSurface, LineInput, LineKeyMap};
pub use keymap::{default_key_map, KeyMap};
pub use layer::{DismissMsg, Dropdown, FloatingLayer};
pub use loading::{Loading, LoadingTickMsg};
pub use model::{ChangeFunc, InputChangeFunc, Model, RenderFunc};
pub use view::Styles;
