//! Runtime Value Representation
//!
//! Defines the closed set of values flowing through registers, the data
//! stack and host calls.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::host::HostRef;

/// Runtime value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// Signed integer
    Number(i64),

    /// Boolean value
    Boolean(bool),

    /// Immutable text
    Text(String),

    /// Handle to a host table entry
    Host(HostRef),

    /// Program offset, the target of CALL_FUNC
    Address(usize),
}

impl Value {
    /// Kind name for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Boolean(_) => "Boolean",
            Value::Text(_) => "Text",
            Value::Host(_) => "HostFunction",
            Value::Address(_) => "Address",
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Structural equality between values of the same comparable kind.
    ///
    /// Returns `None` for mixed kinds and for host handles or addresses.
    pub fn equals(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Some(a == b),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a == b),
            (Value::Text(a), Value::Text(b)) => Some(a == b),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Number(0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Text(s) => f.write_str(s),
            Value::Host(r) => write!(f, "<host #{}>", r.index()),
            Value::Address(a) => write!(f, "@{}", a),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_stable() {
        assert_eq!(Value::Number(-15).to_string(), "-15");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Boolean(false).to_string(), "false");
        assert_eq!(Value::from("Is a negative number").to_string(), "Is a negative number");
        assert_eq!(Value::Address(17).to_string(), "@17");
        assert_eq!(Value::Host(HostRef::new(1)).to_string(), "<host #1>");
    }

    #[test]
    fn default_is_number_zero() {
        assert_eq!(Value::default(), Value::Number(0));
    }
}
