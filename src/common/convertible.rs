use crate::common::Value;
use crate::document::Document;
use crate::errors::{ErrorKind, MappingError, MappingResult};

/// Conversion between typed domain values and raw document [Value]s.
///
/// Field models rely on this trait for their raw↔typed conversion
/// capability: setters convert the raw value into the field's declared
/// type and getters convert the field back into a raw value.
pub trait Convertible {
    type Output;

    fn to_value(&self) -> MappingResult<Value>;
    fn from_value(value: &Value) -> MappingResult<Self::Output>;
}

impl Convertible for bool {
    type Output = bool;

    fn to_value(&self) -> MappingResult<Value> {
        Ok(Value::Bool(*self))
    }

    fn from_value(value: &Value) -> MappingResult<Self> {
        match value {
            Value::Bool(v) => Ok(*v),
            _ => {
                log::error!("Value {} is not a bool", value);
                Err(MappingError::new(
                    "Value is not a bool",
                    ErrorKind::ObjectMappingError,
                ))
            }
        }
    }
}

impl Convertible for i32 {
    type Output = i32;

    fn to_value(&self) -> MappingResult<Value> {
        Ok(Value::I32(*self))
    }

    fn from_value(value: &Value) -> MappingResult<Self> {
        match value {
            Value::I32(v) => Ok(*v),
            _ => {
                log::error!("Value {} is not an i32", value);
                Err(MappingError::new(
                    "Value is not an i32",
                    ErrorKind::ObjectMappingError,
                ))
            }
        }
    }
}

impl Convertible for i64 {
    type Output = i64;

    fn to_value(&self) -> MappingResult<Value> {
        Ok(Value::I64(*self))
    }

    fn from_value(value: &Value) -> MappingResult<Self> {
        match value {
            // i32 widens losslessly into i64
            Value::I32(v) => Ok(*v as i64),
            Value::I64(v) => Ok(*v),
            _ => {
                log::error!("Value {} is not an i64", value);
                Err(MappingError::new(
                    "Value is not an i64",
                    ErrorKind::ObjectMappingError,
                ))
            }
        }
    }
}

impl Convertible for f32 {
    type Output = f32;

    fn to_value(&self) -> MappingResult<Value> {
        Ok(Value::F32(*self))
    }

    fn from_value(value: &Value) -> MappingResult<Self> {
        match value {
            Value::F32(v) => Ok(*v),
            _ => {
                log::error!("Value {} is not an f32", value);
                Err(MappingError::new(
                    "Value is not an f32",
                    ErrorKind::ObjectMappingError,
                ))
            }
        }
    }
}

impl Convertible for f64 {
    type Output = f64;

    fn to_value(&self) -> MappingResult<Value> {
        Ok(Value::F64(*self))
    }

    fn from_value(value: &Value) -> MappingResult<Self> {
        match value {
            // f32 widens into f64
            Value::F32(v) => Ok(*v as f64),
            Value::F64(v) => Ok(*v),
            _ => {
                log::error!("Value {} is not an f64", value);
                Err(MappingError::new(
                    "Value is not an f64",
                    ErrorKind::ObjectMappingError,
                ))
            }
        }
    }
}

impl Convertible for String {
    type Output = String;

    fn to_value(&self) -> MappingResult<Value> {
        Ok(Value::String(self.clone()))
    }

    fn from_value(value: &Value) -> MappingResult<Self> {
        match value {
            Value::String(v) => Ok(v.clone()),
            _ => {
                log::error!("Value {} is not a string", value);
                Err(MappingError::new(
                    "Value is not a string",
                    ErrorKind::ObjectMappingError,
                ))
            }
        }
    }
}

impl Convertible for Document {
    type Output = Document;

    fn to_value(&self) -> MappingResult<Value> {
        Ok(Value::Document(self.clone()))
    }

    fn from_value(value: &Value) -> MappingResult<Self> {
        match value {
            Value::Document(doc) => Ok(doc.clone()),
            _ => {
                log::error!("Value {} is not a document", value);
                Err(MappingError::new(
                    "Value is not a document",
                    ErrorKind::ObjectMappingError,
                ))
            }
        }
    }
}

impl<T> Convertible for Vec<T>
where
    T: Convertible<Output = T>,
{
    type Output = Vec<T>;

    fn to_value(&self) -> MappingResult<Value> {
        let mut values = Vec::with_capacity(self.len());
        for item in self {
            values.push(item.to_value()?);
        }
        Ok(Value::Array(values))
    }

    fn from_value(value: &Value) -> MappingResult<Self::Output> {
        match value {
            Value::Array(values) => {
                let mut items = Vec::with_capacity(values.len());
                for v in values {
                    items.push(T::from_value(v)?);
                }
                Ok(items)
            }
            _ => {
                log::error!("Value {} is not an array", value);
                Err(MappingError::new(
                    "Value is not an array",
                    ErrorKind::ObjectMappingError,
                ))
            }
        }
    }
}

impl<T> Convertible for Option<T>
where
    T: Convertible<Output = T>,
{
    type Output = Option<T>;

    fn to_value(&self) -> MappingResult<Value> {
        match self {
            Some(inner) => inner.to_value(),
            None => Ok(Value::Null),
        }
    }

    fn from_value(value: &Value) -> MappingResult<Self::Output> {
        match value {
            Value::Null => Ok(None),
            other => Ok(Some(T::from_value(other)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    #[test]
    fn test_bool_roundtrip() {
        let value = true.to_value().unwrap();
        assert_eq!(value, Value::Bool(true));
        assert!(bool::from_value(&value).unwrap());
    }

    #[test]
    fn test_bool_from_wrong_kind() {
        let result = bool::from_value(&Value::I32(1));
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), &ErrorKind::ObjectMappingError);
        }
    }

    #[test]
    fn test_i32_roundtrip() {
        let value = 42i32.to_value().unwrap();
        assert_eq!(i32::from_value(&value).unwrap(), 42);
    }

    #[test]
    fn test_i64_accepts_i32_widening() {
        assert_eq!(i64::from_value(&Value::I32(42)).unwrap(), 42i64);
        assert_eq!(i64::from_value(&Value::I64(42)).unwrap(), 42i64);
    }

    #[test]
    fn test_i32_rejects_i64() {
        let result = i32::from_value(&Value::I64(42));
        assert!(result.is_err());
    }

    #[test]
    fn test_f64_accepts_f32_widening() {
        assert_eq!(f64::from_value(&Value::F32(1.5)).unwrap(), 1.5f64);
    }

    #[test]
    fn test_string_roundtrip() {
        let value = "hello".to_string().to_value().unwrap();
        assert_eq!(String::from_value(&value).unwrap(), "hello");
    }

    #[test]
    fn test_string_from_wrong_kind() {
        let result = String::from_value(&Value::Null);
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), &ErrorKind::ObjectMappingError);
        }
    }

    #[test]
    fn test_document_roundtrip() {
        let doc = doc! { name: "Alice" };
        let value = doc.to_value().unwrap();
        assert_eq!(Document::from_value(&value).unwrap(), doc);
    }

    #[test]
    fn test_vec_roundtrip() {
        let items = vec![1i32, 2, 3];
        let value = items.to_value().unwrap();
        assert_eq!(Vec::<i32>::from_value(&value).unwrap(), items);
    }

    #[test]
    fn test_vec_from_mixed_array_fails() {
        let value = Value::Array(vec![Value::I32(1), Value::String("two".to_string())]);
        let result = Vec::<i32>::from_value(&value);
        assert!(result.is_err());
    }

    #[test]
    fn test_option_none_is_null() {
        let none: Option<i32> = None;
        assert_eq!(none.to_value().unwrap(), Value::Null);
        assert_eq!(Option::<i32>::from_value(&Value::Null).unwrap(), None);
    }

    #[test]
    fn test_option_some_roundtrip() {
        let some = Some(42i32);
        let value = some.to_value().unwrap();
        assert_eq!(Option::<i32>::from_value(&value).unwrap(), Some(42));
    }
}
