use crate::common::constants::{
    MOD_EACH, OP_ADD_TO_SET, OP_INC, OP_MAX, OP_MIN, OP_POP, OP_PULL, OP_PULL_ALL, OP_PUSH,
    OP_SET, OP_SET_ON_INSERT, OP_UNSET,
};
use crate::common::Value;
use crate::document::Document;
use crate::errors::{ErrorKind, MappingError, MappingResult};
use crate::mapper::{PathTarget, TypeRegistry};
use crate::update::PushOptions;
use std::fmt::{Display, Formatter};

/// Accumulates field mutations into a mutation document.
///
/// Each call records one operation under its operator group (`$set`,
/// `$inc`, `$push`, ...); the builder groups operations by operator and
/// keeps at most one operation per translated field path within a group,
/// last call winning. Calls chain:
///
/// ```ignore
/// let mut update = UpdateBuilder::new(registry, "Person");
/// update
///     .set("name", Value::from("Ann"))?
///     .inc_by("age", Value::from(1))?
///     .unset("nickname")?;
/// let mutation = update.operations();
/// ```
///
/// Field expressions are resolved against the type model by default:
/// logical names translate to storage names, dotted paths descend through
/// embedded types, and values are checked against the declared field kind.
/// [disable_validation](Self::disable_validation) turns the builder into a
/// pass-through for schema-less use.
#[derive(Clone, Debug)]
pub struct UpdateBuilder {
    registry: TypeRegistry,
    type_name: String,
    ops: Document,
    validate_names: bool,
}

impl UpdateBuilder {
    /// Creates an update builder for the registered type `type_name`.
    pub fn new(registry: TypeRegistry, type_name: &str) -> Self {
        UpdateBuilder {
            registry,
            type_name: type_name.to_string(),
            ops: Document::new(),
            validate_names: true,
        }
    }

    /// Enables field name validation (the default).
    pub fn enable_validation(&mut self) -> &mut Self {
        self.validate_names = true;
        self
    }

    /// Disables field name validation; field expressions pass through
    /// verbatim and values are not kind-checked.
    pub fn disable_validation(&mut self) -> &mut Self {
        self.validate_names = false;
        self
    }

    /// Sets a field to a value.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidValue] for a null value.
    pub fn set(&mut self, field: &str, value: Value) -> MappingResult<&mut Self> {
        let target = self.resolve(field)?;
        let value = self.convert_scalar(&target, &value)?;
        self.add(OP_SET, field, target, value)
    }

    /// Sets every field of a pre-encoded entity document in one call.
    /// The document's fields merge into the `$set` group verbatim, so the
    /// call composes with earlier [set](Self::set) calls instead of
    /// replacing the whole group; a colliding path is overwritten,
    /// last call winning as usual.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidValue] for an empty document.
    pub fn set_entity(&mut self, entity: Document) -> MappingResult<&mut Self> {
        if entity.is_empty() {
            log::error!("Entity document cannot be empty");
            return Err(MappingError::new(
                "Entity document cannot be empty",
                ErrorKind::InvalidValue,
            ));
        }
        for (key, value) in entity.iter() {
            self.add_operation(OP_SET, key.clone(), value.clone())?;
        }
        Ok(self)
    }

    /// Sets a field only when the update results in an insert.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidValue] for a null value.
    pub fn set_on_insert(&mut self, field: &str, value: Value) -> MappingResult<&mut Self> {
        let target = self.resolve(field)?;
        let value = self.convert_scalar(&target, &value)?;
        self.add(OP_SET_ON_INSERT, field, target, value)
    }

    /// Removes a field.
    pub fn unset(&mut self, field: &str) -> MappingResult<&mut Self> {
        let target = self.resolve(field)?;
        self.add_operation(OP_UNSET, target.translated_path().to_string(), Value::I32(1))
    }

    /// Increments a numeric field by one.
    pub fn inc(&mut self, field: &str) -> MappingResult<&mut Self> {
        self.inc_by(field, Value::I32(1))
    }

    /// Increments a numeric field by the given amount.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidValue] for a null amount and
    /// [ErrorKind::InvalidArgument] for a non-numeric one.
    pub fn inc_by(&mut self, field: &str, amount: Value) -> MappingResult<&mut Self> {
        let amount = Self::require_numeric(field, amount)?;
        let target = self.resolve(field)?;
        self.add(OP_INC, field, target, amount)
    }

    /// Decrements a numeric field by one.
    pub fn dec(&mut self, field: &str) -> MappingResult<&mut Self> {
        self.dec_by(field, Value::I32(1))
    }

    /// Decrements a numeric field by the given amount. The amount is
    /// negated preserving its numeric kind and recorded as an increment.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidValue] for a null amount and
    /// [ErrorKind::InvalidArgument] for a non-numeric one.
    pub fn dec_by(&mut self, field: &str, amount: Value) -> MappingResult<&mut Self> {
        let amount = Self::require_numeric(field, amount)?;
        let negated = match amount {
            Value::I32(v) => Value::I32(-v),
            Value::I64(v) => Value::I64(-v),
            Value::F32(v) => Value::F32(-v),
            Value::F64(v) => Value::F64(-v),
            _ => unreachable!(),
        };
        let target = self.resolve(field)?;
        self.add(OP_INC, field, target, negated)
    }

    /// Sets a field to the given value if the value is less than the
    /// field's current value. Null is recorded as-is and compares low.
    pub fn min(&mut self, field: &str, value: Value) -> MappingResult<&mut Self> {
        let target = self.resolve(field)?;
        let value = self.convert_scalar(&target, &value)?;
        self.add_operation(OP_MIN, target.translated_path().to_string(), value)?;
        Ok(self)
    }

    /// Sets a field to the given value if the value is greater than the
    /// field's current value. Null is recorded as-is and compares low.
    pub fn max(&mut self, field: &str, value: Value) -> MappingResult<&mut Self> {
        let target = self.resolve(field)?;
        let value = self.convert_scalar(&target, &value)?;
        self.add_operation(OP_MAX, target.translated_path().to_string(), value)?;
        Ok(self)
    }

    /// Appends a value to a list field unless it is already present.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidValue] for a null value.
    pub fn add_to_set(&mut self, field: &str, value: Value) -> MappingResult<&mut Self> {
        let target = self.resolve(field)?;
        let value = self.convert_element(&target, &value)?;
        self.add(OP_ADD_TO_SET, field, target, value)
    }

    /// Appends each given value to a list field, skipping values already
    /// present. The values are recorded under an `$each` operand.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidArgument] for an empty value list.
    pub fn add_to_set_each(&mut self, field: &str, values: Vec<Value>) -> MappingResult<&mut Self> {
        Self::require_non_empty(field, &values)?;
        let target = self.resolve(field)?;
        let values = self.convert_elements(&target, values)?;
        let mut operand = Document::new();
        operand.put(MOD_EACH, Value::Array(values))?;
        self.add(OP_ADD_TO_SET, field, target, Value::Document(operand))
    }

    /// Appends a single value to a list field.
    pub fn push(&mut self, field: &str, value: Value) -> MappingResult<&mut Self> {
        self.push_all(field, vec![value], PushOptions::new())
    }

    /// Appends values to a list field with push modifiers. The values are
    /// recorded under an `$each` operand with the modifiers alongside.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidArgument] for an empty value list.
    pub fn push_all(
        &mut self,
        field: &str,
        values: Vec<Value>,
        options: PushOptions,
    ) -> MappingResult<&mut Self> {
        Self::require_non_empty(field, &values)?;
        let target = self.resolve(field)?;
        let values = self.convert_elements(&target, values)?;
        let mut operand = Document::new();
        operand.put(MOD_EACH, Value::Array(values))?;
        options.update(&mut operand)?;
        self.add(OP_PUSH, field, target, Value::Document(operand))
    }

    /// Removes all list elements equal to the given value (or matching the
    /// given criteria document).
    pub fn remove_all(&mut self, field: &str, value: Value) -> MappingResult<&mut Self> {
        let target = self.resolve(field)?;
        self.add(OP_PULL, field, target, value)
    }

    /// Removes all list elements equal to any of the given values.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidArgument] for an empty value list.
    pub fn remove_all_values(&mut self, field: &str, values: Vec<Value>) -> MappingResult<&mut Self> {
        Self::require_non_empty(field, &values)?;
        let target = self.resolve(field)?;
        self.add(OP_PULL_ALL, field, target, Value::Array(values))
    }

    /// Removes the first element of a list field.
    pub fn remove_first(&mut self, field: &str) -> MappingResult<&mut Self> {
        let target = self.resolve(field)?;
        self.add_operation(OP_POP, target.translated_path().to_string(), Value::I32(-1))
    }

    /// Removes the last element of a list field.
    pub fn remove_last(&mut self, field: &str) -> MappingResult<&mut Self> {
        let target = self.resolve(field)?;
        self.add_operation(OP_POP, target.translated_path().to_string(), Value::I32(1))
    }

    /// Returns the accumulated mutation document, operator groups in first-
    /// use order.
    pub fn operations(&self) -> Document {
        self.ops.clone()
    }

    /// Checks if no operation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn resolve(&self, field: &str) -> MappingResult<PathTarget> {
        let model = self.registry.get_model(&self.type_name)?;
        PathTarget::resolve(&self.registry, &model, field, self.validate_names)
    }

    fn convert_scalar(&self, target: &PathTarget, value: &Value) -> MappingResult<Value> {
        match target.field_model() {
            Some(field) => field.convert_value(value),
            None => Ok(value.clone()),
        }
    }

    fn convert_element(&self, target: &PathTarget, value: &Value) -> MappingResult<Value> {
        match target.field_model() {
            Some(field) => field.convert_element(value),
            None => Ok(value.clone()),
        }
    }

    fn convert_elements(
        &self,
        target: &PathTarget,
        values: Vec<Value>,
    ) -> MappingResult<Vec<Value>> {
        values
            .iter()
            .map(|value| self.convert_element(target, value))
            .collect()
    }

    fn require_numeric(field: &str, value: Value) -> MappingResult<Value> {
        if value.is_null() {
            log::error!("Value for field '{}' cannot be null", field);
            return Err(MappingError::new(
                &format!("Value for field '{}' cannot be null", field),
                ErrorKind::InvalidValue,
            ));
        }
        match value {
            Value::I32(_) | Value::I64(_) | Value::F32(_) | Value::F64(_) => Ok(value),
            _ => {
                log::error!("Value for field '{}' must be numeric", field);
                Err(MappingError::new(
                    &format!("Value for field '{}' must be numeric", field),
                    ErrorKind::InvalidArgument,
                ))
            }
        }
    }

    fn require_non_empty(field: &str, values: &[Value]) -> MappingResult<()> {
        if values.is_empty() {
            log::error!("Values for field '{}' cannot be empty", field);
            return Err(MappingError::new(
                &format!("Values for field '{}' cannot be empty", field),
                ErrorKind::InvalidArgument,
            ));
        }
        Ok(())
    }

    // Null-guarded funnel for the operators that reject null operands.
    fn add(
        &mut self,
        op: &str,
        field: &str,
        target: PathTarget,
        value: Value,
    ) -> MappingResult<&mut Self> {
        if value.is_null() {
            log::error!("Value for field '{}' cannot be null", field);
            return Err(MappingError::new(
                &format!("Value for field '{}' cannot be null", field),
                ErrorKind::InvalidValue,
            ));
        }
        self.add_operation(op, target.translated_path().to_string(), value)
    }

    // Insert-or-overwrite within the operator group, last call winning
    // per translated path.
    fn add_operation(&mut self, op: &str, path: String, value: Value) -> MappingResult<&mut Self> {
        let mut group = match self.ops.get(op) {
            Some(Value::Document(group)) => group.clone(),
            _ => Document::new(),
        };
        group.put(&path, value)?;
        self.ops.put(op, group)?;
        Ok(self)
    }
}

impl Display for UpdateBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{SortOrder, ValueKind};
    use crate::doc;
    use crate::mapper::{FieldModel, MappedEntity, TypeModel};

    #[derive(Default)]
    struct Address {
        city: String,
    }

    #[derive(Default)]
    struct Person {
        name: String,
        age: i32,
        tags: Vec<String>,
        address: Address,
    }

    impl MappedEntity for Address {
        fn type_model() -> MappingResult<TypeModel> {
            TypeModel::builder::<Address>("Address")
                .field(
                    FieldModel::new::<Address, String, _, _>(
                        "city",
                        ValueKind::String,
                        |a, v| a.city = v,
                        |a| a.city.clone(),
                    )
                    .with_storage_name("town"),
                )
                .build()
        }
    }

    impl MappedEntity for Person {
        fn type_model() -> MappingResult<TypeModel> {
            TypeModel::builder::<Person>("Person")
                .field(FieldModel::new::<Person, String, _, _>(
                    "name",
                    ValueKind::String,
                    |p, v| p.name = v,
                    |p| p.name.clone(),
                ))
                .field(
                    FieldModel::new::<Person, i32, _, _>(
                        "age",
                        ValueKind::I32,
                        |p, v| p.age = v,
                        |p| p.age,
                    )
                    .with_storage_name("years"),
                )
                .field(FieldModel::new::<Person, Vec<String>, _, _>(
                    "tags",
                    ValueKind::Array,
                    |p, v| p.tags = v,
                    |p| p.tags.clone(),
                ))
                .field(
                    FieldModel::new::<Person, Document, _, _>(
                        "address",
                        ValueKind::Document,
                        |_, _| {},
                        |_| Document::new(),
                    )
                    .with_embedded_type("Address"),
                )
                .build()
        }
    }

    fn builder() -> UpdateBuilder {
        let registry = TypeRegistry::new();
        registry.register_entity::<Address>().unwrap();
        registry.register_entity::<Person>().unwrap();
        UpdateBuilder::new(registry, "Person")
    }

    fn group<'a>(ops: &'a Document, op: &str) -> &'a Document {
        ops.get(op).and_then(|v| v.as_document()).unwrap()
    }

    #[test]
    fn test_set_records_under_set_group() {
        let mut update = builder();
        update.set("name", Value::from("Ann")).unwrap();
        let ops = update.operations();
        assert_eq!(
            group(&ops, "$set").get("name"),
            Some(&Value::String("Ann".to_string()))
        );
    }

    #[test]
    fn test_set_translates_storage_name() {
        let mut update = builder();
        update.set("age", Value::from(30)).unwrap();
        let ops = update.operations();
        assert_eq!(group(&ops, "$set").get("years"), Some(&Value::I32(30)));
    }

    #[test]
    fn test_set_translates_dotted_path() {
        let mut update = builder();
        update.set("address.city", Value::from("Oslo")).unwrap();
        let ops = update.operations();
        assert_eq!(
            group(&ops, "$set").get("address.town"),
            Some(&Value::String("Oslo".to_string()))
        );
    }

    #[test]
    fn test_set_null_fails() {
        let mut update = builder();
        let result = update.set("name", Value::Null);
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), &ErrorKind::InvalidValue);
        }
    }

    #[test]
    fn test_set_unknown_field_fails() {
        let mut update = builder();
        let result = update.set("salary", Value::from(100));
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), &ErrorKind::PathResolution);
        }
    }

    #[test]
    fn test_set_kind_mismatch_fails() {
        let mut update = builder();
        let result = update.set("age", Value::from("thirty"));
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), &ErrorKind::ObjectMappingError);
        }
    }

    #[test]
    fn test_disabled_validation_passes_through() {
        let mut update = builder();
        update
            .disable_validation()
            .set("salary.bonus", Value::from(100))
            .unwrap();
        let ops = update.operations();
        assert_eq!(
            group(&ops, "$set").get("salary.bonus"),
            Some(&Value::I32(100))
        );
    }

    #[test]
    fn test_last_call_wins_within_group() {
        let mut update = builder();
        update
            .set("name", Value::from("Ann"))
            .unwrap()
            .set("name", Value::from("Bea"))
            .unwrap();
        let ops = update.operations();
        let set = group(&ops, "$set");
        assert_eq!(set.size(), 1);
        assert_eq!(set.get("name"), Some(&Value::String("Bea".to_string())));
    }

    #[test]
    fn test_groups_keep_first_use_order() {
        let mut update = builder();
        update
            .inc("age")
            .unwrap()
            .set("name", Value::from("Ann"))
            .unwrap()
            .inc("age")
            .unwrap();
        let ops = update.operations();
        let keys: Vec<&String> = ops.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["$inc", "$set"]);
    }

    #[test]
    fn test_set_entity_merges_document() {
        let mut update = builder();
        update
            .set_entity(doc! { name: "Ann", years: 30 })
            .unwrap();
        let ops = update.operations();
        let set = group(&ops, "$set");
        assert_eq!(set.get("name"), Some(&Value::String("Ann".to_string())));
        assert_eq!(set.get("years"), Some(&Value::I32(30)));
    }

    #[test]
    fn test_set_entity_composes_with_prior_sets() {
        let mut update = builder();
        update
            .set("age", Value::from(30))
            .unwrap()
            .set_entity(doc! { name: "Ann" })
            .unwrap();
        let ops = update.operations();
        let set = group(&ops, "$set");
        assert_eq!(set.get("years"), Some(&Value::I32(30)));
        assert_eq!(set.get("name"), Some(&Value::String("Ann".to_string())));
    }

    #[test]
    fn test_set_entity_empty_fails() {
        let mut update = builder();
        let result = update.set_entity(Document::new());
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), &ErrorKind::InvalidValue);
        }
    }

    #[test]
    fn test_set_on_insert() {
        let mut update = builder();
        update.set_on_insert("age", Value::from(0)).unwrap();
        let ops = update.operations();
        assert_eq!(
            group(&ops, "$setOnInsert").get("years"),
            Some(&Value::I32(0))
        );
    }

    #[test]
    fn test_unset_records_marker() {
        let mut update = builder();
        update.unset("name").unwrap();
        let ops = update.operations();
        assert_eq!(group(&ops, "$unset").get("name"), Some(&Value::I32(1)));
    }

    #[test]
    fn test_inc_defaults_to_one() {
        let mut update = builder();
        update.inc("age").unwrap();
        let ops = update.operations();
        assert_eq!(group(&ops, "$inc").get("years"), Some(&Value::I32(1)));
    }

    #[test]
    fn test_inc_by_non_numeric_fails() {
        let mut update = builder();
        let result = update.inc_by("age", Value::from("one"));
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), &ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn test_inc_by_null_fails() {
        let mut update = builder();
        let result = update.inc_by("age", Value::Null);
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), &ErrorKind::InvalidValue);
        }
    }

    #[test]
    fn test_dec_negates_preserving_kind() {
        let mut update = builder();
        update.dec_by("age", Value::from(5)).unwrap();
        let ops = update.operations();
        assert_eq!(group(&ops, "$inc").get("years"), Some(&Value::I32(-5)));

        let mut update = builder();
        update
            .disable_validation()
            .dec_by("score", Value::from(1.5f64))
            .unwrap();
        let ops = update.operations();
        assert_eq!(group(&ops, "$inc").get("score"), Some(&Value::F64(-1.5)));
    }

    #[test]
    fn test_dec_by_non_numeric_fails() {
        let mut update = builder();
        let result = update.dec_by("age", Value::from("five"));
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), &ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn test_dec_by_null_fails() {
        let mut update = builder();
        let result = update.dec_by("age", Value::Null);
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), &ErrorKind::InvalidValue);
        }
    }

    #[test]
    fn test_dec_by_matches_negated_inc_by() {
        let mut dec_update = builder();
        dec_update.dec_by("age", Value::from(5)).unwrap();

        let mut inc_update = builder();
        inc_update.inc_by("age", Value::from(-5)).unwrap();

        assert_eq!(dec_update.operations(), inc_update.operations());
    }

    #[test]
    fn test_min_max_accept_null() {
        let mut update = builder();
        update
            .min("age", Value::Null)
            .unwrap()
            .max("name", Value::Null)
            .unwrap();
        let ops = update.operations();
        assert_eq!(group(&ops, "$min").get("years"), Some(&Value::Null));
        assert_eq!(group(&ops, "$max").get("name"), Some(&Value::Null));
    }

    #[test]
    fn test_add_to_set_single() {
        let mut update = builder();
        update.add_to_set("tags", Value::from("a")).unwrap();
        let ops = update.operations();
        assert_eq!(
            group(&ops, "$addToSet").get("tags"),
            Some(&Value::String("a".to_string()))
        );
    }

    #[test]
    fn test_add_to_set_each_wraps_values() {
        let mut update = builder();
        update
            .add_to_set_each("tags", vec![Value::from("a"), Value::from("b")])
            .unwrap();
        let ops = update.operations();
        let operand = group(&ops, "$addToSet")
            .get("tags")
            .and_then(|v| v.as_document())
            .unwrap();
        assert_eq!(
            operand.get("$each"),
            Some(&Value::Array(vec![Value::from("a"), Value::from("b")]))
        );
    }

    #[test]
    fn test_add_to_set_each_empty_fails() {
        let mut update = builder();
        let result = update.add_to_set_each("tags", Vec::new());
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), &ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn test_push_wraps_single_value_in_each() {
        let mut update = builder();
        update.push("tags", Value::from("a")).unwrap();
        let ops = update.operations();
        let operand = group(&ops, "$push")
            .get("tags")
            .and_then(|v| v.as_document())
            .unwrap();
        assert_eq!(
            operand.get("$each"),
            Some(&Value::Array(vec![Value::from("a")]))
        );
    }

    #[test]
    fn test_push_all_with_options() {
        let mut update = builder();
        update
            .push_all(
                "tags",
                vec![Value::from("a"), Value::from("b")],
                PushOptions::new().sort(SortOrder::Descending).slice(3),
            )
            .unwrap();
        let ops = update.operations();
        let operand = group(&ops, "$push")
            .get("tags")
            .and_then(|v| v.as_document())
            .unwrap();
        assert_eq!(
            operand.get("$each"),
            Some(&Value::Array(vec![Value::from("a"), Value::from("b")]))
        );
        assert_eq!(operand.get("$sort"), Some(&Value::I32(-1)));
        assert_eq!(operand.get("$slice"), Some(&Value::I32(3)));
    }

    #[test]
    fn test_push_all_empty_fails() {
        let mut update = builder();
        let result = update.push_all("tags", Vec::new(), PushOptions::new());
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.kind(), &ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn test_remove_all_records_pull() {
        let mut update = builder();
        update.remove_all("tags", Value::from("a")).unwrap();
        let ops = update.operations();
        assert_eq!(
            group(&ops, "$pull").get("tags"),
            Some(&Value::String("a".to_string()))
        );
    }

    #[test]
    fn test_remove_all_values_records_pull_all() {
        let mut update = builder();
        update
            .remove_all_values("tags", vec![Value::from("a"), Value::from("b")])
            .unwrap();
        let ops = update.operations();
        assert_eq!(
            group(&ops, "$pullAll").get("tags"),
            Some(&Value::Array(vec![Value::from("a"), Value::from("b")]))
        );
    }

    #[test]
    fn test_remove_first_and_last() {
        let mut update = builder();
        update.remove_first("tags").unwrap();
        let ops = update.operations();
        assert_eq!(group(&ops, "$pop").get("tags"), Some(&Value::I32(-1)));

        let mut update = builder();
        update.remove_last("tags").unwrap();
        let ops = update.operations();
        assert_eq!(group(&ops, "$pop").get("tags"), Some(&Value::I32(1)));
    }

    #[test]
    fn test_failed_call_leaves_operations_untouched() {
        let mut update = builder();
        update.set("name", Value::from("Ann")).unwrap();
        let before = update.operations();
        assert!(update.set("name", Value::Null).is_err());
        assert_eq!(update.operations(), before);
    }

    #[test]
    fn test_empty_builder() {
        let update = builder();
        assert!(update.is_empty());
        assert!(update.operations().is_empty());
    }

    #[test]
    fn test_display_renders_mutation_document() {
        let mut update = builder();
        update.set("name", Value::from("Ann")).unwrap();
        let rendered = format!("{}", update);
        assert!(rendered.contains("$set"));
        assert!(rendered.contains("Ann"));
    }
}
