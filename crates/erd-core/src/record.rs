//! Serialization of entity records into flat field maps.
//!
//! A record only ever serializes its own direct attributes; related records
//! are reached through explicit accessor methods, never embedded.

use serde::{Serialize, ser::Error as _};
use serde_json::{Map, Value};

/// A row of one entity in the schema registry.
///
/// # Examples
///
/// ```
/// use erd_core::record::Record;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Tag {
///     id: i64,
///     label: String,
/// }
///
/// impl Record for Tag {
///     const ENTITY: &'static str = "tag";
/// }
///
/// let map = Tag { id: 7, label: "rust".into() }.to_map().unwrap();
/// assert_eq!(map["id"], 7);
/// assert_eq!(map["label"], "rust");
/// assert_eq!(map.len(), 2);
/// ```
pub trait Record: Serialize {
    /// Name of the entity this record belongs to.
    const ENTITY: &'static str;

    /// Maps each direct attribute name to its value.
    ///
    /// # Errors
    ///
    /// Fails if the record does not serialize to a flat object.
    fn to_map(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(serde_json::Error::custom(format!(
                "record of entity `{}` serialized to a non-object value: {other}",
                Self::ENTITY
            ))),
        }
    }
}
