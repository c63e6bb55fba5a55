use crate::common::Value;
use crate::errors::{ErrorKind, MappingError, MappingResult};
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

use super::FIELD_SEPARATOR;

type FieldVec = SmallVec<[String; 8]>;

/// Represents a raw document: an insertion-ordered mapping of storage
/// field names to [Value]s.
///
/// Raw documents are produced by the binary document codec and read by the
/// entity decoder. Keys are stored literally; a dotted key such as
/// `"address.zip"` is a single storage name, not a nested access path.
/// Translating dotted field expressions into storage paths is the job of
/// the path resolver, not of this type.
///
/// Nesting is expressed through [Value::Document] values:
///
/// ```ignore
/// let doc = doc!{
///     name: "Alice",
///     address: {
///         city: "New York",
///         zip: 10001,
///     },
/// };
/// assert_eq!(doc.get("name"), Some(&Value::String("Alice".to_string())));
/// ```
#[derive(Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Document {
    data: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: IndexMap::new(),
        }
    }

    /// Checks if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Associates the specified [Value] with the specified key in this
    /// document. If the key already exists, its value is replaced.
    ///
    /// The key is stored literally; no splitting on the field separator
    /// happens here.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty.
    pub fn put<T: Into<Value>>(&mut self, key: impl Into<String>, value: T) -> MappingResult<()> {
        let key = key.into();
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(MappingError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        self.data.insert(key, value.into());
        Ok(())
    }

    /// Returns a reference to the [Value] associated with the key, or
    /// `None` if this document contains no mapping for the key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Checks if this document contains a mapping for the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Removes the key and its value from the document. Removing a
    /// non-existent key succeeds without error.
    pub fn remove(&mut self, key: &str) {
        self.data.shift_remove(key);
    }

    /// Returns the number of entries in the document (top level only).
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns an iterator over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    /// Retrieves all field paths (top level and embedded) in this document.
    ///
    /// Embedded fields of nested document values are represented using the
    /// field separator, e.g. `"address.zip"`.
    pub fn fields(&self) -> FieldVec {
        self.collect_fields("")
    }

    fn collect_fields(&self, prefix: &str) -> FieldVec {
        let mut fields = FieldVec::new();
        for (key, value) in &self.data {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}{}{}", prefix, FIELD_SEPARATOR, key)
            };
            match value {
                Value::Document(nested) => {
                    fields.extend(nested.collect_fields(&path));
                }
                _ => fields.push(path),
            }
        }
        fields
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Hash for Document {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for (key, value) in &self.data {
            key.hash(state);
            value.hash(state);
        }
    }
}

/// Strips the surrounding quotes a `stringify!`-ed string-literal key
/// carries, so both `name: ...` and `"name": ...` work in [`crate::doc!`].
pub fn normalize(key: &str) -> String {
    key.trim_matches('"').to_string()
}

/// Creates a [Document] from literal key-value pairs.
///
/// Keys can be bare identifiers or string literals. Values can be
/// expressions, nested documents in braces, or arrays in brackets.
///
/// ```ignore
/// let doc = doc!{
///     name: "Alice",
///     age: 30,
///     address: {
///         city: "New York",
///         zip: 10001,
///     },
///     tags: ["admin", "user"],
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document
    () => {
        $crate::document::Document::new()
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::document::Document::new();
            $(
                doc.put($crate::document::normalize(stringify!($key)), $crate::doc_value!($value))
                    .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
/// Handles nested documents, arrays, and expressions.
#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, function call, arithmetic in parens, literals, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
