//! The `users` row.

use serde::Serialize;
use serde_json::Value;

use crate::storage::store::{StoreError, StoreResult};

/// A row of the `users` table, keyed by `id`.
///
/// `name` is a nullable column: a row written without one reads back as
/// `"name": null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Partition key, supplied by the caller.
    pub id: String,
    pub name: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }

    /// A row with a null `name` column.
    pub fn unnamed(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Bind a request body to the insert statement's columns.
    ///
    /// The body is not validated: whatever `id` and `name` hold is bound
    /// positionally, the way the driver would bind them. Values the `text`
    /// columns cannot hold fail the same way a driver bind error does.
    ///
    /// # Returns
    /// The row to write, or `StoreError::Bind` when a value cannot be bound
    pub fn from_body(body: &Value) -> StoreResult<Self> {
        let id = match body.get("id") {
            Some(Value::String(s)) => s.clone(),
            // A numeric key is written as its decimal text.
            Some(Value::Number(n)) => n.to_string(),
            None | Some(Value::Null) => {
                return Err(StoreError::Bind(
                    "no value bound for partition key column id".to_string(),
                ))
            }
            Some(other) => return Err(type_mismatch("id", other)),
        };

        let name = match body.get("name") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => return Err(type_mismatch("name", other)),
        };

        Ok(Self { id, name })
    }
}

fn type_mismatch(column: &str, value: &Value) -> StoreError {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    StoreError::Bind(format!("column {} expects text, got {}", column, kind))
}
