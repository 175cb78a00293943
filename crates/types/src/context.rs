//! The data an expression is evaluated against.
//!
//! `ctx` is free-form wizard state. `fields` holds the current value and
//! validity of every form field by name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Per-field state keyed by field name.
pub type FieldMap = BTreeMap<String, FieldState>;

/// Current value and validity of a single form field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Additional per-field metadata (e.g. `touched`, `dirty`) supplied by the host.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldState {
    pub fn new(value: impl Into<Value>, valid: bool) -> Self {
        Self {
            value: value.into(),
            valid,
            error: None,
            extra: Map::new(),
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Looks up a member of the record by name.
    ///
    /// Returns `None` for members that are not set, including an absent `error`.
    pub fn member(&self, name: &str) -> Option<Cow<'_, Value>> {
        match name {
            "value" => Some(Cow::Borrowed(&self.value)),
            "valid" => Some(Cow::Owned(Value::Bool(self.valid))),
            "error" => self
                .error
                .as_ref()
                .map(|e| Cow::Owned(Value::String(e.clone()))),
            other => self.extra.get(other).map(Cow::Borrowed),
        }
    }

    /// The record as a plain JSON object.
    pub fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(3 + self.extra.len());
        for (k, v) in &self.extra {
            map.insert(k.clone(), v.clone());
        }
        map.insert("value".to_string(), self.value.clone());
        map.insert("valid".to_string(), Value::Bool(self.valid));
        if let Some(error) = &self.error {
            map.insert("error".to_string(), Value::String(error.clone()));
        }
        Value::Object(map)
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// The `{ ctx, fields }` pair an expression is evaluated against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionContext {
    #[serde(default = "empty_object")]
    pub ctx: Value,
    #[serde(default)]
    pub fields: FieldMap,
}

impl Default for ExpressionContext {
    fn default() -> Self {
        Self {
            ctx: empty_object(),
            fields: FieldMap::new(),
        }
    }
}

impl ExpressionContext {
    pub fn new(ctx: Value) -> Self {
        Self {
            ctx,
            fields: FieldMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, state: FieldState) -> Self {
        self.fields.insert(name.into(), state);
        self
    }

    /// All fields as a JSON object of records.
    pub fn fields_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(name, state)| (name.clone(), state.to_json()))
                .collect(),
        )
    }
}
