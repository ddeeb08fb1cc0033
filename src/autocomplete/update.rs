//! Message handling for the autocomplete component.

use super::layer::DismissMsg;
use super::loading::LoadingTickMsg;
use super::model::Model;
use crate::debounce::DebounceMsg;
use crate::key::matches_binding;
use crate::option::Item;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use tracing::trace;

impl<T: Item> Model<T> {
    /// Processes a message and returns a command for the runtime, if any.
    ///
    /// Handles key presses, settled debounce ticks, loading animation ticks and
    /// outside dismissal. A disabled widget still animates and still lets a
    /// query that was already pending settle, but ignores all interaction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_autocomplete::autocomplete::Model;
    /// use bubbletea_rs::KeyMsg;
    /// use crossterm::event::{KeyCode, KeyModifiers};
    /// use std::time::Duration;
    ///
    /// let options = vec!["Apple".to_string(), "Banana".to_string()];
    /// let mut m = Model::new(options).with_debounce(Duration::ZERO);
    /// m.open();
    ///
    /// m.update(Box::new(KeyMsg { key: KeyCode::Down, modifiers: KeyModifiers::NONE }));
    /// m.update(Box::new(KeyMsg { key: KeyCode::Enter, modifiers: KeyModifiers::NONE }));
    /// assert_eq!(m.value().as_slice(), &["Banana".to_string()]);
    /// assert!(!m.is_open());
    /// ```
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick) = msg.downcast_ref::<LoadingTickMsg>() {
            return self.loading.update(tick);
        }

        if let Some(settled) = msg.downcast_ref::<DebounceMsg>() {
            if let Some(query) = self.debouncer.settle(settled) {
                self.apply_committed(query);
            }
            return None;
        }

        if self.disabled() {
            return None;
        }

        if let Some(dismiss) = msg.downcast_ref::<DismissMsg>() {
            if dismiss.id == 0 || dismiss.id == self.id() {
                self.cancel();
            }
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg);
        }

        None
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if !self.input.focused() {
            return None;
        }

        if self.is_open() {
            if let Some(handled) = self.handle_open_keys(key_msg) {
                return handled;
            }
        } else if matches_binding(key_msg, &self.key_map.open)
            || matches_binding(key_msg, &self.key_map.next)
            || matches_binding(key_msg, &self.key_map.previous)
        {
            self.open();
            return None;
        } else if matches_binding(key_msg, &self.key_map.cancel) {
            self.cancel();
            return None;
        }

        if matches_binding(key_msg, &self.key_map.remove_last)
            && self.is_multiple()
            && self.raw_query().is_empty()
        {
            if let Some(last) = self.value().as_slice().last().cloned() {
                trace!(id = self.id(), "removing last selected value");
                self.remove(&last);
            }
            return None;
        }

        if self.input.handle_key(key_msg) {
            return self.input_changed();
        }
        None
    }

    fn handle_open_keys(&mut self, key_msg: &KeyMsg) -> Option<Option<Cmd>> {
        if matches_binding(key_msg, &self.key_map.next) {
            self.next();
        } else if matches_binding(key_msg, &self.key_map.previous) {
            self.previous();
        } else if matches_binding(key_msg, &self.key_map.commit) {
            if self.highlighted().is_none() {
                // let a query typed faster than the delay take effect
                self.flush();
            } else {
                self.commit();
            }
        } else if matches_binding(key_msg, &self.key_map.cancel) {
            self.cancel();
        } else {
            return None;
        }
        Some(None)
    }
}

impl<T: Item> Component for Model<T> {
    /// Focusing the autocomplete opens its option list.
    fn focus(&mut self) -> Option<Cmd> {
        self.open();
        None
    }

    fn blur(&mut self) {
        self.cancel();
    }

    fn focused(&self) -> bool {
        self.input.focused()
    }
}

impl<T: Item> BubbleTeaModel for Model<T> {
    fn init() -> (Self, Option<Cmd>) {
        let model = Self::default();
        let cmd = model.init_cmd();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
