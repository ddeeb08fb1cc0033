//! Type-safe key bindings for the autocomplete component.
//!
//! A [`Binding`] groups one or more key presses under a single action together
//! with the short help text shown to users. Bindings can be built from
//! crossterm key codes directly or parsed from strings such as `"ctrl+n"`.
//!
//! ```rust
//! use bubbletea_autocomplete::key::{matches_binding, new_binding, with_keys_str};
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let next = new_binding(vec![with_keys_str(&["down", "ctrl+n"])]).with_help("↓", "next");
//!
//! let msg = KeyMsg { key: KeyCode::Char('n'), modifiers: KeyModifiers::CONTROL };
//! assert!(matches_binding(&msg, &next));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifiers held while pressing it.
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    /// Returns true when this press corresponds to the given key message.
    ///
    /// Shift is ignored for character keys since the terminal already folds
    /// it into the character itself.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if self.code != msg.key {
            return false;
        }
        match self.code {
            KeyCode::Char(_) => {
                self.modifiers.difference(KeyModifiers::SHIFT)
                    == msg.modifiers.difference(KeyModifiers::SHIFT)
            }
            _ => self.modifiers == msg.modifiers,
        }
    }
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, e.g. `"↓/ctrl+n"`.
    pub key: String,
    /// What the binding does.
    pub desc: String,
}

/// A named action bound to one or more key presses.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

/// Builder option applied by [`new_binding`].
pub enum BindingOpt {
    /// Adds key presses to the binding.
    Keys(Vec<KeyPress>),
    /// Sets the help text.
    Help(String, String),
    /// Starts the binding disabled.
    Disabled,
}

impl Binding {
    /// Creates a binding from key codes or `(code, modifiers)` pairs.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the help text for the binding.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Key presses that trigger this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Help text for this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether the binding is active. Disabled or key-less bindings never match.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Returns true if the key message triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// Builds a binding from a list of options.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        match opt {
            BindingOpt::Keys(keys) => binding.keys.extend(keys),
            BindingOpt::Help(key, desc) => binding.help = Help { key, desc },
            BindingOpt::Disabled => binding.disabled = true,
        }
    }
    binding
}

/// Option adding already-built key presses.
pub fn with_keys(keys: Vec<KeyPress>) -> BindingOpt {
    BindingOpt::Keys(keys)
}

/// Option adding key presses parsed from strings like `"ctrl+n"` or `"esc"`.
///
/// Unknown key names are skipped.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    BindingOpt::Keys(keys.iter().filter_map(|k| parse_key(k)).collect())
}

/// Option setting the help text.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    BindingOpt::Help(key.to_string(), desc.to_string())
}

/// Option starting the binding disabled.
pub fn with_disabled() -> BindingOpt {
    BindingOpt::Disabled
}

/// Returns true if the key message triggers the binding.
pub fn matches_binding(msg: &KeyMsg, binding: &Binding) -> bool {
    binding.matches(msg)
}

/// Returns true if the key message triggers any of the bindings.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Parses a key description such as `"ctrl+n"`, `"alt+down"` or `"enter"`.
pub fn parse_key(s: &str) -> Option<KeyPress> {
    let mut modifiers = KeyModifiers::NONE;
    let mut parts: Vec<&str> = s.split('+').collect();
    // "+" on its own or "ctrl++" ends with an empty segment
    let name = match parts.pop()? {
        "" if s.ends_with('+') => {
            parts.pop();
            "+"
        }
        name => name,
    };

    for m in parts {
        match m {
            "ctrl" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let code = match name {
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "esc" | "escape" => KeyCode::Esc,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pgup" => KeyCode::PageUp,
        "pgdown" | "pgdn" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };

    Some(KeyPress { code, modifiers })
}

/// Exposes bindings for help rendering.
pub trait KeyMap {
    /// Bindings shown in the compact one-line help.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings grouped into columns for the expanded help.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(parse_key("enter"), Some(KeyPress::from(KeyCode::Enter)));
        assert_eq!(
            parse_key("ctrl+n"),
            Some(KeyPress::from((KeyCode::Char('n'), KeyModifiers::CONTROL)))
        );
        assert_eq!(
            parse_key("alt+down"),
            Some(KeyPress::from((KeyCode::Down, KeyModifiers::ALT)))
        );
        assert_eq!(
            parse_key("ctrl+space"),
            Some(KeyPress::from((KeyCode::Char(' '), KeyModifiers::CONTROL)))
        );
        assert_eq!(parse_key("hyper+x"), None);
        assert_eq!(parse_key("nonsense"), None);
    }

    #[test]
    fn test_binding_matches_modifiers() {
        let b = new_binding(vec![with_keys_str(&["down", "ctrl+n"])]);
        assert!(b.matches(&key(KeyCode::Down, KeyModifiers::NONE)));
        assert!(b.matches(&key(KeyCode::Char('n'), KeyModifiers::CONTROL)));
        assert!(!b.matches(&key(KeyCode::Char('n'), KeyModifiers::NONE)));
        assert!(!b.matches(&key(KeyCode::Down, KeyModifiers::ALT)));
    }

    #[test]
    fn test_shift_ignored_for_chars() {
        let b = Binding::new(vec![KeyCode::Char('G')]);
        assert!(b.matches(&key(KeyCode::Char('G'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut b = new_binding(vec![with_keys_str(&["enter"]), with_help("enter", "select")]);
        assert_eq!(b.help().desc, "select");
        b.set_enabled(false);
        assert!(!b.matches(&key(KeyCode::Enter, KeyModifiers::NONE)));

        let d = new_binding(vec![with_keys_str(&["tab"]), with_disabled()]);
        assert!(!d.enabled());
    }
}
