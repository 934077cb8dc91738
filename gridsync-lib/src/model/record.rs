//! Dynamic store document

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

/// A raw document as the store holds it.
///
/// Records carry field values as a `HashMap<String, Value>`, so the store
/// never needs schema knowledge. Typed getters provide tolerant access: a
/// missing or mistyped field reads as `None` rather than failing, and the
/// typed layer ([`Column`](crate::model::Column), [`Row`](crate::model::Row))
/// supplies defaults on top.
///
/// # Example
///
/// ```
/// use gridsync_lib::model::Record;
/// use uuid::Uuid;
///
/// let record = Record::new(Uuid::new_v4())
///     .set("name", "Status")
///     .set("order", 3);
///
/// assert_eq!(record.get_str("name"), Some("Status"));
/// assert_eq!(record.get_i64("order"), Some(3));
/// assert_eq!(record.get_i64("createdAt"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: Uuid,
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates an empty record with the given id.
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            fields: HashMap::new(),
        }
    }

    /// Returns the document id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Sets a field value, consuming and returning the record for chaining.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns a reference to the raw field value, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Merges another record's fields into this one, overwriting duplicates.
    ///
    /// This is the store's `update` semantics: fields absent from `other`
    /// are left untouched.
    pub fn merge(&mut self, other: &Record) {
        for (field, value) in &other.fields {
            self.fields.insert(field.clone(), value.clone());
        }
    }

    /// Returns the field as a string slice, if present and a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Returns the field as an `i64`, if present and numeric.
    ///
    /// Accepts floating-point values with no fractional part, since JSON
    /// stores do not distinguish integer from float.
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        let value = self.fields.get(field)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f.trunc() as i64))
    }

    /// Returns the field as a vector of strings, if present and an array.
    ///
    /// Non-string elements read as empty strings rather than dropping, so
    /// positional alignment is preserved.
    pub fn get_str_array(&self, field: &str) -> Option<Vec<String>> {
        let array = self.fields.get(field)?.as_array()?;
        Some(
            array
                .iter()
                .map(|v| v.as_str().unwrap_or_default().to_string())
                .collect(),
        )
    }
}
