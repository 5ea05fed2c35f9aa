//! Flash Value Types
//!
//! This module defines the values a flash store can hold. Flash entries are
//! dynamically typed: a handler may stash a status message, a raw payload,
//! a count, or a list of validation errors for the next request to pick up.
//!
//! Rather than type-erasing values behind `Any`, values are a tagged variant
//! enum. Callers match or use the `as_*` accessors to get the concrete type
//! back at read time.
//!
//! ## Examples
//!
//! Text: `FlashValue::text("profile updated")`
//! Integer: `FlashValue::integer(3)`
//! List: `FlashValue::list(vec!["name required".into(), "email taken".into()])`

use bytes::Bytes;
use std::fmt;

/// A value stored under a flash key.
///
/// This enum covers the value shapes handlers typically hand off between
/// requests. Reading a value back is a match (or an `as_*` accessor), not a
/// downcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashValue {
    /// Human-readable text, the common case for one-shot status messages.
    Text(String),

    /// Binary-safe payload. `Bytes` keeps clones cheap since the store
    /// clones values out on every read.
    Bytes(Bytes),

    /// 64-bit signed integer (counts, record ids).
    Integer(i64),

    /// Boolean marker.
    Bool(bool),

    /// A list of values, e.g. several validation errors for one form.
    List(Vec<FlashValue>),
}

impl FlashValue {
    /// Creates a new text value.
    ///
    /// # Example
    /// ```
    /// use flashscope::store::value::FlashValue;
    /// let notice = FlashValue::text("profile updated");
    /// ```
    pub fn text(s: impl Into<String>) -> Self {
        FlashValue::Text(s.into())
    }

    /// Creates a new binary value.
    pub fn bytes(data: impl Into<Bytes>) -> Self {
        FlashValue::Bytes(data.into())
    }

    /// Creates a new integer value.
    pub fn integer(n: i64) -> Self {
        FlashValue::Integer(n)
    }

    /// Creates a new boolean value.
    pub fn bool(b: bool) -> Self {
        FlashValue::Bool(b)
    }

    /// Creates a list value.
    pub fn list(values: Vec<FlashValue>) -> Self {
        FlashValue::List(values)
    }

    /// Returns true if this value is text.
    pub fn is_text(&self) -> bool {
        matches!(self, FlashValue::Text(_))
    }

    /// Returns true if this value is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, FlashValue::List(_))
    }

    /// Attempts to view this value as a string slice.
    ///
    /// Works for `Text` always and for `Bytes` when the payload is valid
    /// UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlashValue::Text(s) => Some(s),
            FlashValue::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Attempts to view this value as raw bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FlashValue::Bytes(b) => Some(b),
            FlashValue::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Attempts to extract the inner integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FlashValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract the inner boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlashValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to view the inner list.
    pub fn as_list(&self) -> Option<&[FlashValue]> {
        match self {
            FlashValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// Consumes self and returns the inner list if this is a List variant.
    pub fn into_list(self) -> Option<Vec<FlashValue>> {
        match self {
            FlashValue::List(values) => Some(values),
            _ => None,
        }
    }
}

impl fmt::Display for FlashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashValue::Text(s) => write!(f, "\"{}\"", s),
            FlashValue::Bytes(data) => {
                if let Ok(s) = std::str::from_utf8(data) {
                    write!(f, "\"{}\"", s)
                } else {
                    write!(f, "(binary data, {} bytes)", data.len())
                }
            }
            FlashValue::Integer(n) => write!(f, "(integer) {}", n),
            FlashValue::Bool(b) => write!(f, "(bool) {}", b),
            FlashValue::List(values) => {
                if values.is_empty() {
                    write!(f, "(empty list)")
                } else {
                    writeln!(f)?;
                    for (i, v) in values.iter().enumerate() {
                        writeln!(f, "{}) {}", i + 1, v)?;
                    }
                    Ok(())
                }
            }
        }
    }
}

impl From<&str> for FlashValue {
    fn from(s: &str) -> Self {
        FlashValue::Text(s.to_string())
    }
}

impl From<String> for FlashValue {
    fn from(s: String) -> Self {
        FlashValue::Text(s)
    }
}

impl From<Bytes> for FlashValue {
    fn from(data: Bytes) -> Self {
        FlashValue::Bytes(data)
    }
}

impl From<i64> for FlashValue {
    fn from(n: i64) -> Self {
        FlashValue::Integer(n)
    }
}

impl From<bool> for FlashValue {
    fn from(b: bool) -> Self {
        FlashValue::Bool(b)
    }
}

impl From<Vec<FlashValue>> for FlashValue {
    fn from(values: Vec<FlashValue>) -> Self {
        FlashValue::List(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_accessors() {
        let value = FlashValue::text("saved");
        assert!(value.is_text());
        assert_eq!(value.as_str(), Some("saved"));
        assert_eq!(value.as_bytes(), Some(b"saved".as_ref()));
        assert_eq!(value.as_integer(), None);
    }

    #[test]
    fn test_bytes_utf8_view() {
        let value = FlashValue::bytes(Bytes::from("payload"));
        assert_eq!(value.as_str(), Some("payload"));

        let binary = FlashValue::bytes(Bytes::from(vec![0xff, 0xfe]));
        assert_eq!(binary.as_str(), None);
        assert_eq!(binary.as_bytes(), Some([0xff, 0xfe].as_ref()));
    }

    #[test]
    fn test_integer_and_bool() {
        assert_eq!(FlashValue::integer(42).as_integer(), Some(42));
        assert_eq!(FlashValue::integer(-1).as_integer(), Some(-1));
        assert_eq!(FlashValue::bool(true).as_bool(), Some(true));
        assert_eq!(FlashValue::bool(true).as_integer(), None);
    }

    #[test]
    fn test_list() {
        let value = FlashValue::list(vec!["a".into(), "b".into()]);
        assert!(value.is_list());
        assert_eq!(value.as_list().map(|l| l.len()), Some(2));

        let inner = value.into_list().unwrap();
        assert_eq!(inner[0].as_str(), Some("a"));
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(FlashValue::from("x"), FlashValue::Text("x".to_string()));
        assert_eq!(FlashValue::from(7i64), FlashValue::Integer(7));
        assert_eq!(FlashValue::from(false), FlashValue::Bool(false));
        assert_eq!(
            FlashValue::from(Bytes::from("b")),
            FlashValue::Bytes(Bytes::from("b"))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(FlashValue::text("hi").to_string(), "\"hi\"");
        assert_eq!(FlashValue::integer(3).to_string(), "(integer) 3");
        assert_eq!(
            FlashValue::list(vec![]).to_string(),
            "(empty list)"
        );
    }
}
