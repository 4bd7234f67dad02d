// PinSpy - Host-side Peripheral Simulation
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::interrupt::Callback;
use crate::signals::Level;
use pinspy_config::ScriptValue;
use std::fmt;

/// A parameter or return value carried by a [`CallEvent`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Text(String),
    /// Opaque identity of a routine handed to the hardware API.
    Handle(usize),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "\"{}\"", v),
            Value::Handle(v) => write!(f, "<fn {:#x}>", v),
        }
    }
}

macro_rules! int_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(v as i64)
                }
            }
        )*
    };
}

int_value!(u8, u16, u32, i8, i16, i32, i64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Level> for Value {
    fn from(level: Level) -> Self {
        Value::Int(level.as_raw())
    }
}

impl From<&Callback> for Value {
    fn from(cb: &Callback) -> Self {
        Value::Handle(cb.id())
    }
}

impl From<&ScriptValue> for Value {
    fn from(v: &ScriptValue) -> Self {
        match v {
            ScriptValue::Int(i) => Value::Int(*i),
            ScriptValue::Bool(b) => Value::Bool(*b),
            ScriptValue::Text(s) => Value::Text(s.clone()),
        }
    }
}

/// Conversion from an override return value to a stub's return type.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Level {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(Level::from(*v != 0)),
            Value::Bool(b) => Some(Level::from(*b)),
            _ => None,
        }
    }
}

macro_rules! int_from_value {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Int(v) => <$ty>::try_from(*v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

int_from_value!(u8, u16, u32, i32, i64);

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Int(v) => Some(*v != 0),
            _ => None,
        }
    }
}

/// One stub invocation: the API name plus its named arguments, in call order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CallEvent {
    pub name: String,
    pub params: Vec<(String, Value)>,
}

impl CallEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn with(mut self, param: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.push((param.into(), value.into()));
        self
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}

impl fmt::Display for CallEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (idx, (name, value)) in self.params.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_event_display() {
        let ev = CallEvent::new("digitalWrite")
            .with("pin", 13u8)
            .with("value", Level::High);
        assert_eq!(ev.to_string(), "digitalWrite(pin=13, value=1)");
        assert_eq!(ev.param("pin"), Some(&Value::Int(13)));
        assert_eq!(ev.param("mode"), None);
        assert_eq!(CallEvent::new("millis").to_string(), "millis()");
    }

    #[test]
    fn test_level_from_value() {
        assert_eq!(Level::from_value(&Value::Int(0)), Some(Level::Low));
        assert_eq!(Level::from_value(&Value::Int(7)), Some(Level::High));
        assert_eq!(Level::from_value(&Value::Bool(true)), Some(Level::High));
        assert_eq!(Level::from_value(&Value::Text("HIGH".into())), None);
    }

    #[test]
    fn test_int_from_value_checks_range() {
        assert_eq!(u32::from_value(&Value::Int(1500)), Some(1500));
        assert_eq!(u32::from_value(&Value::Int(-1)), None);
        assert_eq!(u8::from_value(&Value::Int(300)), None);
        assert_eq!(u16::from_value(&Value::Bool(true)), None);
    }
}
