//! Backend query-expression strings.
//!
//! Appwrite encodes each list constraint as a small JSON object, e.g.
//! `{"attribute":"name","method":"equal","values":["x"]}`. One expression
//! per constraint; a list of them fully determines a list request, with
//! the backend combining them by implicit AND.

use serde_json::{json, Value};
use std::fmt;

/// One opaque backend query expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryExpression(String);

/// Scalars are sent as one-element value arrays; arrays pass through.
fn wrap(value: Value) -> Value {
    match value {
        Value::Array(_) => value,
        other => Value::Array(vec![other]),
    }
}

fn attr_values(method: &str, attribute: &str, values: Value) -> QueryExpression {
    QueryExpression(
        json!({
            "method": method,
            "attribute": attribute,
            "values": wrap(values),
        })
        .to_string(),
    )
}

fn attr_only(method: &str, attribute: &str) -> QueryExpression {
    QueryExpression(
        json!({
            "method": method,
            "attribute": attribute,
        })
        .to_string(),
    )
}

impl QueryExpression {
    pub fn equal(attribute: &str, value: impl Into<Value>) -> Self {
        attr_values("equal", attribute, value.into())
    }

    pub fn not_equal(attribute: &str, value: impl Into<Value>) -> Self {
        attr_values("notEqual", attribute, value.into())
    }

    pub fn greater_than(attribute: &str, value: impl Into<Value>) -> Self {
        attr_values("greaterThan", attribute, value.into())
    }

    pub fn greater_than_equal(attribute: &str, value: impl Into<Value>) -> Self {
        attr_values("greaterThanEqual", attribute, value.into())
    }

    pub fn less_than(attribute: &str, value: impl Into<Value>) -> Self {
        attr_values("lessThan", attribute, value.into())
    }

    pub fn less_than_equal(attribute: &str, value: impl Into<Value>) -> Self {
        attr_values("lessThanEqual", attribute, value.into())
    }

    /// Full-text search over an attribute.
    pub fn search(attribute: &str, value: impl Into<String>) -> Self {
        attr_values("search", attribute, Value::String(value.into()))
    }

    pub fn between(attribute: &str, low: Value, high: Value) -> Self {
        attr_values("between", attribute, Value::Array(vec![low, high]))
    }

    pub fn starts_with(attribute: &str, value: impl Into<Value>) -> Self {
        attr_values("startsWith", attribute, value.into())
    }

    pub fn ends_with(attribute: &str, value: impl Into<Value>) -> Self {
        attr_values("endsWith", attribute, value.into())
    }

    pub fn is_null(attribute: &str) -> Self {
        attr_only("isNull", attribute)
    }

    pub fn is_not_null(attribute: &str) -> Self {
        attr_only("isNotNull", attribute)
    }

    pub fn order_asc(attribute: &str) -> Self {
        attr_only("orderAsc", attribute)
    }

    pub fn order_desc(attribute: &str) -> Self {
        attr_only("orderDesc", attribute)
    }

    pub fn limit(count: u64) -> Self {
        QueryExpression(json!({"method": "limit", "values": [count]}).to_string())
    }

    pub fn offset(count: u64) -> Self {
        QueryExpression(json!({"method": "offset", "values": [count]}).to_string())
    }

    /// Returns the expression string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
