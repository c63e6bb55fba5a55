use crate::common::{Convertible, Value, ValueKind};
use crate::errors::{ErrorKind, MappingError, MappingResult};
use std::any::Any;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

type Setter = Arc<dyn Fn(&mut dyn Any, &Value) -> MappingResult<()> + Send + Sync>;
type Getter = Arc<dyn Fn(&dyn Any) -> MappingResult<Value> + Send + Sync>;

/// Describes one mapped field of an entity type.
///
/// A field model carries the logical field name, the storage name it is
/// persisted under (possibly aliased), the declared [ValueKind], and the
/// raw↔typed conversion capability: a setter that assigns a converted raw
/// value into a live entity and a getter that reads the field back out as
/// a raw value.
///
/// Conversion goes through [Convertible], so a field declared over `V`
/// accepts exactly the raw values `V::from_value` accepts.
///
/// # Examples
///
/// ```ignore
/// let field = FieldModel::new::<Person, String, _, _>(
///     "name",
///     ValueKind::String,
///     |p, v| p.name = v,
///     |p| p.name.clone(),
/// );
///
/// // aliased storage name
/// let field = FieldModel::new::<Person, i32, _, _>(
///     "age",
///     ValueKind::I32,
///     |p, v| p.age = v,
///     |p| p.age,
/// ).with_storage_name("years");
/// ```
#[derive(Clone)]
pub struct FieldModel {
    name: String,
    storage_name: String,
    kind: ValueKind,
    embedded_type: Option<String>,
    setter: Setter,
    getter: Getter,
}

impl FieldModel {
    /// Creates a field model for field `name` of entity type `T` holding a
    /// value of type `V`. The storage name defaults to the logical name.
    pub fn new<T, V, S, G>(name: &str, kind: ValueKind, setter: S, getter: G) -> FieldModel
    where
        T: Any,
        V: Convertible<Output = V> + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        let field_name = name.to_string();

        let set_name = field_name.clone();
        let set: Setter = Arc::new(move |entity, value| {
            let entity = match entity.downcast_mut::<T>() {
                Some(entity) => entity,
                None => {
                    log::error!("Entity type mismatch while setting field '{}'", set_name);
                    return Err(MappingError::new(
                        &format!("Entity type mismatch while setting field '{}'", set_name),
                        ErrorKind::ObjectMappingError,
                    ));
                }
            };
            let typed = V::from_value(value)?;
            setter(entity, typed);
            Ok(())
        });

        let get_name = field_name.clone();
        let get: Getter = Arc::new(move |entity| {
            let entity = match entity.downcast_ref::<T>() {
                Some(entity) => entity,
                None => {
                    log::error!("Entity type mismatch while reading field '{}'", get_name);
                    return Err(MappingError::new(
                        &format!("Entity type mismatch while reading field '{}'", get_name),
                        ErrorKind::ObjectMappingError,
                    ));
                }
            };
            getter(entity).to_value()
        });

        FieldModel {
            storage_name: field_name.clone(),
            name: field_name,
            kind,
            embedded_type: None,
            setter: set,
            getter: get,
        }
    }

    /// Sets an aliased storage name distinct from the logical field name.
    pub fn with_storage_name(mut self, storage_name: &str) -> Self {
        self.storage_name = storage_name.to_string();
        self
    }

    /// Declares the field as an embedded document of a mapped type.
    /// Path resolution descends through this type when translating a
    /// dotted field expression.
    pub fn with_embedded_type(mut self, type_name: &str) -> Self {
        self.embedded_type = Some(type_name.to_string());
        self
    }

    /// Returns the logical field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the storage name this field is persisted under.
    pub fn storage_name(&self) -> &str {
        &self.storage_name
    }

    /// Returns the declared value kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Returns the embedded mapped type name, if this field holds one.
    pub fn embedded_type(&self) -> Option<&str> {
        self.embedded_type.as_deref()
    }

    /// Validates and normalizes a raw value against the declared kind.
    ///
    /// Null always passes. Integers widen from i32 to i64 and floats from
    /// f32 to f64 when the declared kind is the wider one; any other kind
    /// mismatch is an error.
    pub fn convert_value(&self, value: &Value) -> MappingResult<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }

        let raw_kind = value.kind();
        if raw_kind == self.kind {
            return Ok(value.clone());
        }

        match (self.kind, value) {
            (ValueKind::I64, Value::I32(v)) => Ok(Value::I64(*v as i64)),
            (ValueKind::F64, Value::F32(v)) => Ok(Value::F64(*v as f64)),
            _ => {
                log::error!(
                    "Value of kind {} cannot be stored in field '{}' of kind {}",
                    raw_kind,
                    self.name,
                    self.kind
                );
                Err(MappingError::new(
                    &format!(
                        "Value of kind {} cannot be stored in field '{}' of kind {}",
                        raw_kind, self.name, self.kind
                    ),
                    ErrorKind::ObjectMappingError,
                ))
            }
        }
    }

    /// Validates a single element destined for an array operation on this
    /// field. Fields declared as arrays carry no element kind, so their
    /// elements pass verbatim; scalar fields validate as usual.
    pub fn convert_element(&self, value: &Value) -> MappingResult<Value> {
        if self.kind == ValueKind::Array {
            Ok(value.clone())
        } else {
            self.convert_value(value)
        }
    }

    /// Converts the raw value and assigns it into the entity.
    pub fn apply(&self, entity: &mut dyn Any, raw: &Value) -> MappingResult<()> {
        let converted = self.convert_value(raw)?;
        (self.setter)(entity, &converted)
    }

    /// Reads the field out of the entity as a raw value.
    pub fn read(&self, entity: &dyn Any) -> MappingResult<Value> {
        (self.getter)(entity)
    }
}

impl Debug for FieldModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldModel")
            .field("name", &self.name)
            .field("storage_name", &self.storage_name)
            .field("kind", &self.kind)
            .field("embedded_type", &self.embedded_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Person {
        name: String,
        age: i32,
    }

    fn name_field() -> FieldModel {
        FieldModel::new::<Person, String, _, _>(
            "name",
            ValueKind::String,
            |p, v| p.name = v,
            |p| p.name.clone(),
        )
    }

    fn age_field() -> FieldModel {
        FieldModel::new::<Person, i32, _, _>(
            "age",
            ValueKind::I32,
            |p, v| p.age = v,
            |p| p.age,
        )
    }

    #[test]
    fn test_field_model_defaults() {
        let field = name_field();
        assert_eq!(field.name(), "name");
        assert_eq!(field.storage_name(), "name");
        assert_eq!(field.kind(), ValueKind::String);
        assert!(field.embedded_type().is_none());
    }

    #[test]
    fn test_with_storage_name() {
        let field = age_field().with_storage_name("years");
        assert_eq!(field.name(), "age");
        assert_eq!(field.storage_name(), "years");
    }

    #[test]
    fn test_with_embedded_type() {
        let field = name_field().with_embedded_type("Address");
        assert_eq!(field.embedded_type(), Some("Address"));
    }

    #[test]
    fn test_apply_sets_field() {
        let field = name_field();
        let mut person = Person::default();
        field
            .apply(&mut person, &Value::String("Alice".to_string()))
            .unwrap();
        assert_eq!(person.name, "Alice");
    }

    #[test]
    fn test_apply_kind_mismatch_fails() {
        let field = age_field();
        let mut person = Person::default();
        let result = field.apply(&mut person, &Value::String("thirty".to_string()));
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), &ErrorKind::ObjectMappingError);
        }
    }

    #[test]
    fn test_apply_entity_type_mismatch_fails() {
        #[derive(Default)]
        struct Other;

        let field = name_field();
        let mut other = Other;
        let result = field.apply(&mut other, &Value::String("Alice".to_string()));
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), &ErrorKind::ObjectMappingError);
        }
    }

    #[test]
    fn test_read_gets_field() {
        let field = age_field();
        let person = Person {
            name: "Ann".to_string(),
            age: 30,
        };
        assert_eq!(field.read(&person).unwrap(), Value::I32(30));
    }

    #[test]
    fn test_convert_value_null_passes() {
        let field = age_field();
        assert_eq!(field.convert_value(&Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_convert_value_widens_i32_to_i64() {
        let field = FieldModel::new::<Person, i64, _, _>(
            "age",
            ValueKind::I64,
            |p, v| p.age = v as i32,
            |p| p.age as i64,
        );
        assert_eq!(
            field.convert_value(&Value::I32(30)).unwrap(),
            Value::I64(30)
        );
    }

    #[test]
    fn test_convert_value_widens_f32_to_f64() {
        let field = FieldModel::new::<Person, f64, _, _>(
            "score",
            ValueKind::F64,
            |_, _| {},
            |_| 0.0,
        );
        assert_eq!(
            field.convert_value(&Value::F32(1.5)).unwrap(),
            Value::F64(1.5)
        );
    }

    #[test]
    fn test_convert_value_rejects_narrowing() {
        let field = age_field();
        let result = field.convert_value(&Value::I64(30));
        assert!(result.is_err());
    }

    #[test]
    fn test_convert_element_on_array_field_passes_verbatim() {
        let field = FieldModel::new::<Person, Vec<String>, _, _>(
            "tags",
            ValueKind::Array,
            |_, _| {},
            |_| Vec::new(),
        );
        assert_eq!(
            field
                .convert_element(&Value::String("a".to_string()))
                .unwrap(),
            Value::String("a".to_string())
        );
    }

    #[test]
    fn test_convert_element_on_scalar_field_validates() {
        let field = age_field();
        assert!(field.convert_element(&Value::I32(1)).is_ok());
        assert!(field
            .convert_element(&Value::String("one".to_string()))
            .is_err());
    }
}
