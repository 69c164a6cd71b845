// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Typed cell values
//!
//! A [`Value`] is one decoded cell of a projected row. The set of variants
//! mirrors the column types used by the profile schema; every variant except
//! [`Value::Null`] corresponds to exactly one [`ColumnType`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DecodeError;

/// Declared SQL type of a projected column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// BIGINT / INTEGER
    Int,
    /// DOUBLE PRECISION / NUMERIC
    Float,
    /// BOOLEAN
    Bool,
    /// TEXT / VARCHAR
    Text,
    /// DATE
    Date,
    /// TIMESTAMPTZ
    Timestamp,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Bool => "bool",
            ColumnType::Text => "text",
            ColumnType::Date => "date",
            ColumnType::Timestamp => "timestamp",
        };
        write!(f, "{}", name)
    }
}

/// One cell of a row
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Name of the variant, used in decode error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::Timestamp(_) => "timestamp",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether a non-null value can be stored in a column of type `ty`
    pub fn fits(&self, ty: ColumnType) -> bool {
        matches!(
            (self, ty),
            (Value::Null, _)
                | (Value::Int(_), ColumnType::Int)
                | (Value::Float(_), ColumnType::Float)
                | (Value::Bool(_), ColumnType::Bool)
                | (Value::Text(_), ColumnType::Text)
                | (Value::Date(_), ColumnType::Date)
                | (Value::Timestamp(_), ColumnType::Timestamp)
        )
    }

    /// Convert a JSON fixture cell into a value of the declared column type
    pub fn from_json(
        column: &str,
        json: &serde_json::Value,
        ty: ColumnType,
    ) -> Result<Value, DecodeError> {
        use serde_json::Value as Json;

        let mismatch = || DecodeError::TypeMismatch {
            column: column.to_string(),
            expected: ty,
            found: json_type_name(json),
        };

        match (json, ty) {
            (Json::Null, _) => Ok(Value::Null),
            (Json::Number(n), ColumnType::Int) => n.as_i64().map(Value::Int).ok_or_else(mismatch),
            (Json::Number(n), ColumnType::Float) => {
                n.as_f64().map(Value::Float).ok_or_else(mismatch)
            }
            (Json::Bool(b), ColumnType::Bool) => Ok(Value::Bool(*b)),
            (Json::String(s), ColumnType::Text) => Ok(Value::Text(s.clone())),
            (Json::String(s), ColumnType::Date) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Value::Date)
                .map_err(|e| DecodeError::Malformed {
                    column: column.to_string(),
                    message: e.to_string(),
                }),
            (Json::String(s), ColumnType::Timestamp) => DateTime::parse_from_rfc3339(s)
                .map(|dt| Value::Timestamp(dt.with_timezone(&Utc)))
                .map_err(|e| DecodeError::Malformed {
                    column: column.to_string(),
                    message: e.to_string(),
                }),
            _ => Err(mismatch()),
        }
    }
}

fn json_type_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

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

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Typed extraction of a single cell
///
/// `column` is the qualified column name and only feeds error messages.
pub trait FromValue: Sized {
    fn from_value(column: &str, value: &Value) -> Result<Self, DecodeError>;
}

macro_rules! impl_from_value {
    ($target:ty, $variant:ident, $column_type:expr) => {
        impl FromValue for $target {
            fn from_value(column: &str, value: &Value) -> Result<Self, DecodeError> {
                match value {
                    Value::$variant(v) => Ok(v.clone()),
                    Value::Null => Err(DecodeError::UnexpectedNull {
                        column: column.to_string(),
                    }),
                    other => Err(DecodeError::TypeMismatch {
                        column: column.to_string(),
                        expected: $column_type,
                        found: other.type_name(),
                    }),
                }
            }
        }
    };
}

impl_from_value!(i64, Int, ColumnType::Int);
impl_from_value!(f64, Float, ColumnType::Float);
impl_from_value!(bool, Bool, ColumnType::Bool);
impl_from_value!(String, Text, ColumnType::Text);
impl_from_value!(NaiveDate, Date, ColumnType::Date);
impl_from_value!(DateTime<Utc>, Timestamp, ColumnType::Timestamp);

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(column: &str, value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(column, other).map(Some),
        }
    }
}
