//! Typed field access over a JSON object that records, rather than returns,
//! every problem it finds.
//!
//! Each accessor returns `Some(value)` only for a present, well-typed,
//! in-range field. Anything else yields `None` plus a diagnostic, so the
//! caller's overlay simply leaves the field unset and the module default
//! flows through during resolution.

use serde_json::{Map, Value};

use super::diagnostics::Diagnostics;
use crate::schema::NamedVariants;

/// Name of the JSON type of `value`, distinguishing integers from other numbers.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Largest magnitude below which every whole `f64` is exact.
const MAX_SAFE_FLOAT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Integer value of a float written with a zero fraction, such as `5.0`.
fn whole_number(value: &Value) -> Option<i128> {
    let n = value.as_f64()?;
    (n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_FLOAT_INTEGER)
        .then(|| n as i128)
}

/// Join a parent path and a key; an empty parent yields the bare key.
pub(crate) fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// Inclusive integer range; `max: None` means unbounded above.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IntBound {
    pub min: u64,
    pub max: Option<u64>,
}

impl IntBound {
    pub const fn at_least(min: u64) -> Self {
        Self { min, max: None }
    }

    pub const fn between(min: u64, max: u64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    fn contains(&self, value: i128) -> bool {
        value >= i128::from(self.min) && self.max.is_none_or(|max| value <= i128::from(max))
    }

    fn describe(&self) -> String {
        match self.max {
            Some(max) => format!("{}..={max}", self.min),
            None => format!(">= {}", self.min),
        }
    }
}

/// Range for floating-point fields.
#[derive(Debug, Clone, Copy)]
pub(crate) enum NumberBound {
    /// `min <= x <= max`
    Closed(f64, f64),
    /// `min < x < max`
    Open(f64, f64),
    /// `min < x <= max`
    LeftOpen(f64, f64),
}

impl NumberBound {
    fn contains(&self, value: f64) -> bool {
        match *self {
            Self::Closed(min, max) => value >= min && value <= max,
            Self::Open(min, max) => value > min && value < max,
            Self::LeftOpen(min, max) => value > min && value <= max,
        }
    }

    fn describe(&self) -> String {
        match *self {
            Self::Closed(min, max) => format!("{min} <= x <= {max}"),
            Self::Open(min, max) => format!("{min} < x < {max}"),
            Self::LeftOpen(min, max) => format!("{min} < x <= {max}"),
        }
    }
}

/// Reader over one JSON object located at `path`.
pub(crate) struct ObjectReader<'a, 'd> {
    object: &'a Map<String, Value>,
    path: String,
    diags: &'d mut Diagnostics,
}

impl<'a, 'd> ObjectReader<'a, 'd> {
    /// Create a reader and report every key not in `known_fields`.
    pub fn new(
        object: &'a Map<String, Value>,
        path: impl Into<String>,
        known_fields: &[&str],
        diags: &'d mut Diagnostics,
    ) -> Self {
        let path = path.into();
        for key in object.keys() {
            if !known_fields.contains(&key.as_str()) {
                diags.schema(
                    child_path(&path, key),
                    format!("one of: {}", known_fields.join(", ")),
                    "unknown field",
                );
            }
        }
        Self {
            object,
            path,
            diags,
        }
    }

    pub fn field_path(&self, key: &str) -> String {
        child_path(&self.path, key)
    }

    pub fn diags(&mut self) -> &mut Diagnostics {
        &mut *self.diags
    }

    /// The raw value at `key`; no type checking.
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key)
    }

    fn mistyped(&mut self, key: &str, expected: &str, value: &Value) {
        let path = self.field_path(key);
        self.diags.schema(path, expected, json_type(value));
    }

    pub fn bool(&mut self, key: &str) -> Option<bool> {
        let value = self.object.get(key)?;
        match value.as_bool() {
            Some(b) => Some(b),
            None => {
                self.mistyped(key, "boolean", value);
                None
            }
        }
    }

    /// A non-empty string. Empty strings are a cardinality violation.
    pub fn string(&mut self, key: &str) -> Option<String> {
        let value = self.object.get(key)?;
        match value.as_str() {
            Some("") => {
                let path = self.field_path(key);
                self.diags.range(path, "\"\"", "non-empty string");
                None
            }
            Some(s) => Some(s.to_string()),
            None => {
                self.mistyped(key, "string", value);
                None
            }
        }
    }

    pub fn integer(&mut self, key: &str, bound: IntBound) -> Option<u64> {
        let value = self.object.get(key)?;
        let parsed = value
            .as_i64()
            .map(i128::from)
            .or_else(|| value.as_u64().map(i128::from))
            .or_else(|| whole_number(value));
        let Some(n) = parsed else {
            self.mistyped(key, "integer", value);
            return None;
        };
        if !bound.contains(n) {
            let path = self.field_path(key);
            self.diags.range(path, n, bound.describe());
            return None;
        }
        u64::try_from(n).ok()
    }

    pub fn number(&mut self, key: &str, bound: NumberBound) -> Option<f64> {
        let value = self.object.get(key)?;
        let Some(n) = value.as_f64() else {
            self.mistyped(key, "number", value);
            return None;
        };
        if !bound.contains(n) {
            let path = self.field_path(key);
            self.diags.range(path, value, bound.describe());
            return None;
        }
        Some(n)
    }

    /// A string drawn from the closed set `T`.
    pub fn named<T: NamedVariants>(&mut self, key: &str) -> Option<T> {
        let value = self.object.get(key)?;
        let Some(text) = value.as_str() else {
            self.mistyped(key, "string", value);
            return None;
        };
        match T::from_name(text) {
            Some(variant) => Some(variant),
            None => {
                let path = self.field_path(key);
                self.diags.schema(path, T::expected(), value.to_string());
                None
            }
        }
    }

    /// The nested object at `key`, or `None` (with a diagnostic if mistyped).
    pub fn object(&mut self, key: &str) -> Option<&'a Map<String, Value>> {
        let value = self.object.get(key)?;
        match value.as_object() {
            Some(map) => Some(map),
            None => {
                self.mistyped(key, "object", value);
                None
            }
        }
    }

    /// The array at `key`, or `None` (with a diagnostic if mistyped).
    pub fn array(&mut self, key: &str) -> Option<&'a Vec<Value>> {
        let value = self.object.get(key)?;
        match value.as_array() {
            Some(items) => Some(items),
            None => {
                self.mistyped(key, "array", value);
                None
            }
        }
    }
}
