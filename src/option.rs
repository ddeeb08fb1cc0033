//! Option identity and labeling.
//!
//! Every option shown by the autocomplete implements [`Item`], which answers
//! two questions: what text represents the option, and whether two options are
//! the same entry. The second answer is the single source of truth for
//! selection membership, toggling and removal.
//!
//! Plain strings implement [`Item`] directly. For structured records the crate
//! ships [`Choice`], which makes the shape of an option explicit instead of
//! guessing at fields at runtime:
//!
//! - [`Choice::Primitive`] is a bare string.
//! - [`Choice::Identified`] carries a stable id; identity is the id alone.
//! - [`Choice::Plain`] has no id; identity is deep structural equality.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_autocomplete::option::{Choice, Item};
//! use serde_json::json;
//!
//! let fresh = Choice::identified(1, json!({ "name": "A" }));
//! let stale = Choice::identified(1, json!({ "name": "A (old)" }));
//! assert!(fresh.same_option(&stale));
//! assert_eq!(fresh.label(), "A");
//! ```

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// An entry that can be offered and selected by the autocomplete.
///
/// `Send + 'static` is required because the widget is moved into the
/// bubbletea-rs runtime.
pub trait Item: Clone + Send + 'static {
    /// Human readable text for the option.
    fn label(&self) -> String;

    /// Identity test used for membership, toggling and removal.
    ///
    /// Must be total, reflexive and symmetric.
    fn same_option(&self, other: &Self) -> bool;
}

impl Item for String {
    fn label(&self) -> String {
        self.clone()
    }

    fn same_option(&self, other: &Self) -> bool {
        self == other
    }
}

/// Caller supplied labeling function. Overrides [`Item::label`] entirely.
pub type LabelFunc<T> = Box<dyn Fn(&T) -> String + Send>;

/// Resolves the label for an option, preferring the caller's function.
pub fn label_of<T: Item>(option: &T, custom: Option<&LabelFunc<T>>) -> String {
    match custom {
        Some(f) => f(option),
        None => option.label(),
    }
}

/// A stable identity key carried by an [`Choice::Identified`] option.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChoiceId {
    /// String identifier.
    Text(String),
    /// Integer identifier.
    Int(i64),
}

impl ChoiceId {
    /// Reads an id from a JSON value. Anything other than a string or an
    /// integer is not an id.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(ChoiceId::Text(s.clone())),
            Value::Number(n) => n.as_i64().map(ChoiceId::Int),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            ChoiceId::Text(s) => Value::String(s.clone()),
            ChoiceId::Int(i) => Value::from(*i),
        }
    }
}

impl From<i64> for ChoiceId {
    fn from(id: i64) -> Self {
        ChoiceId::Int(id)
    }
}

impl From<i32> for ChoiceId {
    fn from(id: i32) -> Self {
        ChoiceId::Int(id.into())
    }
}

impl From<&str> for ChoiceId {
    fn from(id: &str) -> Self {
        ChoiceId::Text(id.to_string())
    }
}

impl From<String> for ChoiceId {
    fn from(id: String) -> Self {
        ChoiceId::Text(id)
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceId::Text(s) => f.write_str(s),
            ChoiceId::Int(i) => write!(f, "{}", i),
        }
    }
}

/// Errors produced when converting JSON into a [`Choice`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChoiceError {
    /// The JSON value is neither a string nor an object.
    #[error("unsupported option shape: expected a string or an object, got {0}")]
    Unsupported(&'static str),
}

/// A primitive or structured option.
#[derive(Debug, Clone, PartialEq)]
pub enum Choice {
    /// A bare string option.
    Primitive(String),
    /// A record with a stable id. The id is kept out of `fields`.
    Identified {
        /// Identity key.
        id: ChoiceId,
        /// Remaining fields of the record.
        fields: Map<String, Value>,
    },
    /// A record without an id.
    Plain {
        /// All fields of the record.
        fields: Map<String, Value>,
    },
}

impl Choice {
    /// A primitive string option.
    pub fn text(s: impl Into<String>) -> Self {
        Choice::Primitive(s.into())
    }

    /// An identified record. Non-object `fields` yield an empty record.
    ///
    /// An `id` entry inside `fields` is dropped in favour of `id`.
    pub fn identified(id: impl Into<ChoiceId>, fields: Value) -> Self {
        let mut fields = into_map(fields);
        fields.remove("id");
        Choice::Identified {
            id: id.into(),
            fields,
        }
    }

    /// A record without identity. Non-object `fields` yield an empty record.
    pub fn plain(fields: Value) -> Self {
        Choice::Plain {
            fields: into_map(fields),
        }
    }

    /// The option's id, if it carries one.
    pub fn id(&self) -> Option<&ChoiceId> {
        match self {
            Choice::Identified { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Looks up a field of a structured option.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Choice::Primitive(_) => None,
            Choice::Identified { fields, .. } | Choice::Plain { fields } => fields.get(name),
        }
    }

    /// Converts the option back into JSON, re-inserting the id.
    pub fn to_value(&self) -> Value {
        match self {
            Choice::Primitive(s) => Value::String(s.clone()),
            Choice::Identified { id, fields } => {
                let mut map = fields.clone();
                map.insert("id".to_string(), id.to_value());
                Value::Object(map)
            }
            Choice::Plain { fields } => Value::Object(fields.clone()),
        }
    }

    fn record_label(&self) -> String {
        if let Choice::Primitive(s) = self {
            return s.clone();
        }
        for key in ["label", "name"] {
            if let Some(text) = self.field(key).and_then(field_text) {
                return text;
            }
        }
        serde_json::to_string(&self.to_value()).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Item for Choice {
    fn label(&self) -> String {
        self.record_label()
    }

    fn same_option(&self, other: &Self) -> bool {
        match (self, other) {
            (Choice::Primitive(a), Choice::Primitive(b)) => a == b,
            (Choice::Identified { id: a, .. }, Choice::Identified { id: b, .. }) => a == b,
            (Choice::Primitive(_), _) | (_, Choice::Primitive(_)) => false,
            _ => self.to_value() == other.to_value(),
        }
    }
}

impl TryFrom<Value> for Choice {
    type Error = ChoiceError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Choice::Primitive(s)),
            Value::Object(mut fields) => {
                match fields.get("id").and_then(ChoiceId::from_value) {
                    Some(id) => {
                        fields.remove("id");
                        Ok(Choice::Identified { id, fields })
                    }
                    // a malformed id stays in the record and takes part in
                    // structural comparison
                    None => Ok(Choice::Plain { fields }),
                }
            }
            Value::Null => Err(ChoiceError::Unsupported("null")),
            Value::Bool(_) => Err(ChoiceError::Unsupported("bool")),
            Value::Number(_) => Err(ChoiceError::Unsupported("number")),
            Value::Array(_) => Err(ChoiceError::Unsupported("array")),
        }
    }
}

impl From<&str> for Choice {
    fn from(s: &str) -> Self {
        Choice::Primitive(s.to_string())
    }
}

impl From<String> for Choice {
    fn from(s: String) -> Self {
        Choice::Primitive(s)
    }
}

impl Serialize for Choice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitive_label_is_itself() {
        assert_eq!(Choice::text("Apple").label(), "Apple");
        assert_eq!("Apple".to_string().label(), "Apple");
    }

    #[test]
    fn test_label_prefers_label_then_name() {
        let both = Choice::plain(json!({ "label": "Shown", "name": "Hidden" }));
        assert_eq!(both.label(), "Shown");

        let name_only = Choice::identified(3, json!({ "name": "Named" }));
        assert_eq!(name_only.label(), "Named");

        let empty_label = Choice::plain(json!({ "label": "", "name": "Fallback" }));
        assert_eq!(empty_label.label(), "Fallback");
    }

    #[test]
    fn test_label_falls_back_to_serialization() {
        let odd = Choice::plain(json!({ "b": 2, "a": 1 }));
        // keys are sorted, so the text is stable
        assert_eq!(odd.label(), r#"{"a":1,"b":2}"#);

        let with_id = Choice::identified("x", json!({ "code": 7 }));
        assert_eq!(with_id.label(), r#"{"code":7,"id":"x"}"#);
    }

    #[test]
    fn test_custom_label_fn_wins() {
        let f: LabelFunc<Choice> = Box::new(|c| {
            let id = c.id().map(|i| i.to_string()).unwrap_or_default();
            format!("<{}>", id)
        });
        let c = Choice::identified(9, json!({ "label": "Nine" }));
        assert_eq!(label_of(&c, Some(&f)), "<9>");
        assert_eq!(label_of(&c, None), "Nine");
    }

    #[test]
    fn test_same_option_by_id_ignores_other_fields() {
        let a = Choice::identified(1, json!({ "name": "A" }));
        let stale = Choice::identified(1, json!({ "name": "A (old)" }));
        let b = Choice::identified(2, json!({ "name": "A" }));
        assert!(a.same_option(&stale));
        assert!(stale.same_option(&a));
        assert!(!a.same_option(&b));
    }

    #[test]
    fn test_same_option_structural_fallback() {
        let a = Choice::plain(json!({ "name": "A", "tags": ["x"] }));
        let a2 = Choice::plain(json!({ "tags": ["x"], "name": "A" }));
        let a3 = Choice::plain(json!({ "name": "A", "tags": ["y"] }));
        assert!(a.same_option(&a));
        assert!(a.same_option(&a2));
        assert!(!a.same_option(&a3));
    }

    #[test]
    fn test_mixed_shapes_never_panic() {
        let prim = Choice::text("A");
        let rec = Choice::plain(json!({ "name": "A" }));
        let ided = Choice::identified(1, json!({ "name": "A" }));
        assert!(!prim.same_option(&rec));
        assert!(!rec.same_option(&prim));
        assert!(!rec.same_option(&ided));
        assert!(!ided.same_option(&rec));
    }

    #[test]
    fn test_string_ids_and_int_ids_differ() {
        let a = Choice::identified("1", json!({}));
        let b = Choice::identified(1, json!({}));
        assert!(!a.same_option(&b));
    }

    #[test]
    fn test_try_from_json() {
        assert_eq!(Choice::try_from(json!("Kiwi")), Ok(Choice::text("Kiwi")));

        let ided = Choice::try_from(json!({ "id": 4, "name": "Four" })).unwrap();
        assert_eq!(ided.id(), Some(&ChoiceId::Int(4)));
        assert_eq!(ided.field("name"), Some(&json!("Four")));

        let malformed = Choice::try_from(json!({ "id": 1.5, "name": "Half" })).unwrap();
        assert!(malformed.id().is_none());
        assert_eq!(malformed.field("id"), Some(&json!(1.5)));

        assert_eq!(
            Choice::try_from(json!([1, 2])),
            Err(ChoiceError::Unsupported("array"))
        );
        assert_eq!(Choice::try_from(Value::Null), Err(ChoiceError::Unsupported("null")));
    }

    #[test]
    fn test_serialize_reinserts_id() {
        let c = Choice::identified(2, json!({ "name": "B" }));
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v, json!({ "id": 2, "name": "B" }));
        assert_eq!(Choice::try_from(v).unwrap(), c);
    }
}
