//! Declared model parameters, merged from `key=value` strings.
//!
//! A [`Form`] lists every parameter a program accepts, with a default value and
//! an about message. User input (typically the positional command line
//! arguments) is merged on top; unknown keys and values of the wrong kind are
//! rejected. Values keep the kind of their default, so `nodes=100` stays an int
//! and `barrel=2` is read as a float when the default was a float.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;




// ============================================================================
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    B(bool),
    I(i64),
    F(f64),
    S(String),
}

impl From<bool> for Value { fn from(a: bool) -> Self { Value::B(a) } }
impl From<i64>  for Value { fn from(a: i64)  -> Self { Value::I(a) } }
impl From<f64>  for Value { fn from(a: f64)  -> Self { Value::F(a) } }
impl From<&str> for Value { fn from(a: &str) -> Self { Value::S(a.into()) } }

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::B(_) => "bool",
            Value::I(_) => "int",
            Value::F(_) => "float",
            Value::S(_) => "string",
        }
    }

    pub fn same_kind_as(&self, other: &Value) -> bool {
        self.kind() == other.kind()
    }

    /// Parse `text` as a value of the same kind as `self`.
    fn parse_like(&self, key: &str, text: &str) -> Result<Value, ConfigError> {
        let bad = || ConfigError::Malformed { key: key.into(), kind: self.kind() };
        match self {
            Value::B(_) => text.parse().map(Value::B).map_err(|_| bad()),
            Value::I(_) => text.parse().map(Value::I).map_err(|_| bad()),
            Value::F(_) => text.parse().map(Value::F).map_err(|_| bad()),
            Value::S(_) => Ok(Value::S(text.into())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::B(x) => x.fmt(f),
            Value::I(x) => x.fmt(f),
            Value::F(x) => x.fmt(f),
            Value::S(x) => x.fmt(f),
        }
    }
}




// ============================================================================
#[derive(Clone, Debug)]
pub struct Parameter {
    pub value: Value,
    pub about: String,
}




// ============================================================================
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("config key '{0}' is not a valid key")]
    UnknownKey(String),

    #[error("config key '{key}' has the wrong type (expected {expected})")]
    WrongType { key: String, expected: &'static str },

    #[error("config key '{key}' is a badly formed {kind}")]
    Malformed { key: String, kind: &'static str },

    #[error("config argument '{0}' is not of the form key=value")]
    BadArgument(String),

    #[error("config key '{0}' is given more than once")]
    Duplicate(String),
}




// ============================================================================
#[derive(Clone, Debug, Default)]
pub struct Form {
    parameter_map: BTreeMap<String, Parameter>,
}




// ============================================================================
impl Form {
    pub fn new() -> Form {
        Form::default()
    }

    pub fn item<T: Into<Value>>(mut self, key: &str, default: T, about: &str) -> Self {
        self.parameter_map.insert(key.into(), Parameter { value: default.into(), about: about.into() });
        self
    }

    pub fn merge_value_map(mut self, items: &BTreeMap<String, Value>) -> Result<Self, ConfigError> {
        for (key, new_value) in items {
            let parameter = self.parameter_map
                .get_mut(key)
                .ok_or_else(|| ConfigError::UnknownKey(key.clone()))?;

            if !parameter.value.same_kind_as(new_value) {
                return Err(ConfigError::WrongType { key: key.clone(), expected: parameter.value.kind() });
            }
            parameter.value = new_value.clone();
        }
        Ok(self)
    }

    pub fn merge_string_map(mut self, dict: BTreeMap<String, String>) -> Result<Self, ConfigError> {
        for (key, text) in &dict {
            let parameter = self.parameter_map
                .get_mut(key)
                .ok_or_else(|| ConfigError::UnknownKey(key.clone()))?;
            parameter.value = parameter.value.parse_like(key, text)?;
        }
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Result<&Value, ConfigError> {
        self.parameter_map
            .get(key)
            .map(|p| &p.value)
            .ok_or_else(|| ConfigError::UnknownKey(key.into()))
    }

    pub fn float(&self, key: &str) -> Result<f64, ConfigError> {
        match self.get(key)? {
            Value::F(x) => Ok(*x),
            _ => Err(ConfigError::WrongType { key: key.into(), expected: "float" }),
        }
    }

    pub fn int(&self, key: &str) -> Result<i64, ConfigError> {
        match self.get(key)? {
            Value::I(x) => Ok(*x),
            _ => Err(ConfigError::WrongType { key: key.into(), expected: "int" }),
        }
    }

    pub fn bool(&self, key: &str) -> Result<bool, ConfigError> {
        match self.get(key)? {
            Value::B(x) => Ok(*x),
            _ => Err(ConfigError::WrongType { key: key.into(), expected: "bool" }),
        }
    }

    pub fn string(&self, key: &str) -> Result<String, ConfigError> {
        match self.get(key)? {
            Value::S(x) => Ok(x.clone()),
            _ => Err(ConfigError::WrongType { key: key.into(), expected: "string" }),
        }
    }
}




// ============================================================================
impl<'a> IntoIterator for &'a Form {
    type Item     = <&'a BTreeMap<String, Parameter> as IntoIterator>::Item;
    type IntoIter = <&'a BTreeMap<String, Parameter> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.parameter_map.iter()
    }
}




// ============================================================================
pub fn to_string_map_from_key_val_pairs<T: IntoIterator<Item=String>>(args: T) -> Result<BTreeMap<String, String>, ConfigError> {
    let mut result = BTreeMap::new();

    for arg in args {
        let (key, value) = match arg.split_once('=') {
            Some((k, v)) if !k.is_empty() && !v.contains('=') => (k, v),
            _ => return Err(ConfigError::BadArgument(arg.clone())),
        };
        if result.contains_key(key) {
            return Err(ConfigError::Duplicate(key.into()));
        }
        result.insert(key.to_string(), value.to_string());
    }
    Ok(result)
}
