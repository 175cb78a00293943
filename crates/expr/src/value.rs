//! Runtime values produced while evaluating an expression.

use serde_json::Value;
use std::borrow::Cow;

/// A JSON value, or the absence of one.
///
/// Paths that do not resolve yield [`ExprValue::Undefined`] instead of an
/// error, and that propagates through comparisons and logic like any other
/// value. Values are borrowed from the context or the AST where possible.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ExprValue<'a> {
    #[default]
    Undefined,
    Json(Cow<'a, Value>),
}

impl<'a> ExprValue<'a> {
    pub fn borrowed(value: &'a Value) -> Self {
        ExprValue::Json(Cow::Borrowed(value))
    }

    pub fn owned(value: impl Into<Value>) -> Self {
        ExprValue::Json(Cow::Owned(value.into()))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ExprValue::Undefined => None,
            ExprValue::Json(v) => Some(v.as_ref()),
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            ExprValue::Undefined => None,
            ExprValue::Json(v) => Some(v.into_owned()),
        }
    }

    /// Detaches the value from whatever it borrows.
    pub fn into_owned(self) -> ExprValue<'static> {
        match self {
            ExprValue::Undefined => ExprValue::Undefined,
            ExprValue::Json(v) => ExprValue::Json(Cow::Owned(v.into_owned())),
        }
    }

    /// True for `undefined` and `null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self.as_json(), None | Some(Value::Null))
    }

    /// `undefined`, `null`, `false`, `0`, `NaN` and `""` are falsy; everything
    /// else, including empty arrays and objects, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self.as_json() {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }

    /// Resolves one path segment against this value.
    ///
    /// Objects are indexed by key, arrays by numeric segment, and `length`
    /// is available on arrays and strings. Anything else is undefined.
    pub fn member(self, segment: &str) -> ExprValue<'a> {
        match self {
            ExprValue::Undefined => ExprValue::Undefined,
            ExprValue::Json(Cow::Borrowed(value)) => lookup(value, segment),
            ExprValue::Json(Cow::Owned(value)) => lookup(&value, segment).into_owned(),
        }
    }
}

impl From<bool> for ExprValue<'_> {
    fn from(b: bool) -> Self {
        ExprValue::Json(Cow::Owned(Value::Bool(b)))
    }
}

fn lookup<'v>(value: &'v Value, segment: &str) -> ExprValue<'v> {
    match value {
        Value::Object(map) => map
            .get(segment)
            .map(ExprValue::borrowed)
            .unwrap_or_default(),
        Value::Array(items) if segment == "length" => ExprValue::owned(items.len()),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|idx| items.get(idx))
            .map(ExprValue::borrowed)
            .unwrap_or_default(),
        Value::String(s) if segment == "length" => ExprValue::owned(s.chars().count()),
        _ => ExprValue::Undefined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        let falsy = [json!(null), json!(false), json!(0), json!(0.0), json!("")];
        for v in &falsy {
            assert!(!ExprValue::borrowed(v).is_truthy(), "{} should be falsy", v);
        }
        let truthy = [json!(true), json!(-1), json!("0"), json!([]), json!({})];
        for v in &truthy {
            assert!(ExprValue::borrowed(v).is_truthy(), "{} should be truthy", v);
        }
        assert!(!ExprValue::Undefined.is_truthy());
    }

    #[test]
    fn test_member_navigation() {
        let data = json!({ "vehicle": { "tags": ["a", "b"], "vin": null } });
        let root = ExprValue::borrowed(&data);

        let tags = root.clone().member("vehicle").member("tags");
        assert_eq!(tags.clone().member("1").as_json(), Some(&json!("b")));
        assert_eq!(tags.clone().member("length").as_json(), Some(&json!(2)));
        assert_eq!(tags.member("7"), ExprValue::Undefined);

        let vin = root.clone().member("vehicle").member("vin");
        assert_eq!(vin.as_json(), Some(&json!(null)));
        assert!(vin.is_nullish());
        assert_eq!(vin.member("anything"), ExprValue::Undefined);

        assert_eq!(root.member("missing").member("deeper"), ExprValue::Undefined);
    }

    #[test]
    fn test_member_on_owned_value() {
        let owned = ExprValue::owned(json!({ "name": "Ada" }));
        assert_eq!(owned.clone().member("name").as_json(), Some(&json!("Ada")));
        assert_eq!(
            owned.member("name").member("length").as_json(),
            Some(&json!(3))
        );
    }
}
