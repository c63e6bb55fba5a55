use crate::common::constants::TYPE_KEY;
use crate::document::Document;
use crate::errors::{ErrorKind, MappingError, MappingResult};
use crate::mapper::FieldModel;
use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

type Factory = Arc<dyn Fn() -> Box<dyn Any + Send + Sync> + Send + Sync>;
type HookFn = Arc<dyn Fn(&mut dyn Any, &mut Document) -> MappingResult<()> + Send + Sync>;

/// A callback bound to a decode phase of an entity type.
///
/// Pre-load hooks run after the empty instance is created but before any
/// field is populated; they may inspect or mutate the raw document in
/// place. Post-load hooks run after field population with the same raw
/// document. A hook raising an error aborts the decode and propagates.
#[derive(Clone)]
pub struct LifecycleHook {
    name: String,
    inner: HookFn,
}

impl LifecycleHook {
    /// Creates a lifecycle hook for entity type `T`.
    ///
    /// # Arguments
    /// * `name` - A diagnostic identifier for the hook
    /// * `hook` - The callback receiving the entity and the raw document
    pub fn new<T, F>(name: &str, hook: F) -> Self
    where
        T: Any,
        F: Fn(&mut T, &mut Document) -> MappingResult<()> + Send + Sync + 'static,
    {
        let hook_name = name.to_string();
        let diag_name = hook_name.clone();
        let inner: HookFn = Arc::new(move |entity, document| {
            let entity = match entity.downcast_mut::<T>() {
                Some(entity) => entity,
                None => {
                    log::error!("Entity type mismatch in lifecycle hook '{}'", diag_name);
                    return Err(MappingError::new(
                        &format!("Entity type mismatch in lifecycle hook '{}'", diag_name),
                        ErrorKind::LifecycleHook,
                    ));
                }
            };
            hook(entity, document)
        });

        LifecycleHook {
            name: hook_name,
            inner,
        }
    }

    /// Returns the diagnostic name of this hook.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the hook with the entity and the raw document.
    pub fn invoke(&self, entity: &mut dyn Any, document: &mut Document) -> MappingResult<()> {
        (self.inner)(entity, document)
    }
}

impl Debug for LifecycleHook {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleHook")
            .field("name", &self.name)
            .finish()
    }
}

/// Runtime model of one mapped entity type.
///
/// A type model carries the type's name, its discriminator configuration,
/// the ordered set of [FieldModel]s, lifecycle hook lists per phase, and an
/// instance factory producing empty entities for two-phase construction
/// (instance first, fields after).
///
/// The field set is immutable once the model is built. Models are cheap to
/// clone and safe to share: all state lives behind an `Arc`.
#[derive(Clone)]
pub struct TypeModel {
    inner: Arc<TypeModelInner>,
}

struct TypeModelInner {
    type_name: String,
    type_id: TypeId,
    discriminator_key: String,
    discriminator_value: Option<String>,
    use_discriminator: bool,
    fields: Vec<FieldModel>,
    pre_load_hooks: Vec<LifecycleHook>,
    post_load_hooks: Vec<LifecycleHook>,
    factory: Factory,
}

impl TypeModel {
    /// Starts building a type model for entity type `T`.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let model = TypeModel::builder::<Person>("Person")
    ///     .field(FieldModel::new::<Person, String, _, _>(
    ///         "name", ValueKind::String,
    ///         |p, v| p.name = v,
    ///         |p| p.name.clone(),
    ///     ))
    ///     .build()?;
    /// ```
    pub fn builder<T>(type_name: &str) -> TypeModelBuilder
    where
        T: Default + Any + Send + Sync,
    {
        TypeModelBuilder {
            type_name: type_name.to_string(),
            type_id: TypeId::of::<T>(),
            discriminator_key: TYPE_KEY.to_string(),
            discriminator_value: None,
            use_discriminator: false,
            fields: Vec::new(),
            pre_load_hooks: Vec::new(),
            post_load_hooks: Vec::new(),
            factory: Arc::new(|| Box::new(T::default()) as Box<dyn Any + Send + Sync>),
        }
    }

    /// Returns the mapped type name.
    pub fn type_name(&self) -> &str {
        &self.inner.type_name
    }

    /// Returns the `TypeId` of the mapped Rust type.
    pub fn type_id(&self) -> TypeId {
        self.inner.type_id
    }

    /// Returns the storage name of the discriminator field.
    pub fn discriminator_key(&self) -> &str {
        &self.inner.discriminator_key
    }

    /// Returns the discriminator value written for this type, if any.
    pub fn discriminator_value(&self) -> Option<&str> {
        self.inner.discriminator_value.as_deref()
    }

    /// Checks if this model participates in polymorphic discriminator
    /// resolution.
    pub fn use_discriminator(&self) -> bool {
        self.inner.use_discriminator
    }

    /// Returns the ordered field models of this type.
    pub fn fields(&self) -> &[FieldModel] {
        &self.inner.fields
    }

    /// Looks up a field model by logical name or storage name.
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.inner
            .fields
            .iter()
            .find(|f| f.name() == name || f.storage_name() == name)
    }

    /// Creates an empty instance of the mapped type via the instance
    /// factory. Fields carry their factory defaults until populated.
    pub fn new_instance(&self) -> Box<dyn Any + Send + Sync> {
        (self.inner.factory)()
    }

    /// Runs all pre-load hooks in registration order. The first failing
    /// hook aborts; its error propagates verbatim.
    pub fn run_pre_load(&self, entity: &mut dyn Any, document: &mut Document) -> MappingResult<()> {
        for hook in &self.inner.pre_load_hooks {
            log::debug!(
                "Running pre-load hook '{}' for type '{}'",
                hook.name(),
                self.inner.type_name
            );
            hook.invoke(entity, document)?;
        }
        Ok(())
    }

    /// Runs all post-load hooks in registration order. The first failing
    /// hook aborts; its error propagates verbatim.
    pub fn run_post_load(&self, entity: &mut dyn Any, document: &mut Document) -> MappingResult<()> {
        for hook in &self.inner.post_load_hooks {
            log::debug!(
                "Running post-load hook '{}' for type '{}'",
                hook.name(),
                self.inner.type_name
            );
            hook.invoke(entity, document)?;
        }
        Ok(())
    }
}

impl Debug for TypeModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeModel")
            .field("type_name", &self.inner.type_name)
            .field("discriminator_key", &self.inner.discriminator_key)
            .field("discriminator_value", &self.inner.discriminator_value)
            .field("use_discriminator", &self.inner.use_discriminator)
            .field("fields", &self.inner.fields)
            .finish()
    }
}

/// Fluent builder for [TypeModel].
pub struct TypeModelBuilder {
    type_name: String,
    type_id: TypeId,
    discriminator_key: String,
    discriminator_value: Option<String>,
    use_discriminator: bool,
    fields: Vec<FieldModel>,
    pre_load_hooks: Vec<LifecycleHook>,
    post_load_hooks: Vec<LifecycleHook>,
    factory: Factory,
}

impl TypeModelBuilder {
    /// Enables discriminator usage and sets the value stored for this type.
    pub fn discriminator(mut self, value: &str) -> Self {
        self.use_discriminator = true;
        self.discriminator_value = Some(value.to_string());
        self
    }

    /// Overrides the storage name of the discriminator field
    /// (default `_type`).
    pub fn discriminator_key(mut self, key: &str) -> Self {
        self.discriminator_key = key.to_string();
        self
    }

    /// Appends a field model. Field order is the population order during
    /// decode.
    pub fn field(mut self, field: FieldModel) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a pre-load hook. Hooks run in registration order.
    pub fn pre_load(mut self, hook: LifecycleHook) -> Self {
        self.pre_load_hooks.push(hook);
        self
    }

    /// Appends a post-load hook. Hooks run in registration order.
    pub fn post_load(mut self, hook: LifecycleHook) -> Self {
        self.post_load_hooks.push(hook);
        self
    }

    /// Validates the model and freezes it.
    ///
    /// # Errors
    ///
    /// Returns a [ErrorKind::ValidationError] if two fields share a
    /// storage name.
    pub fn build(self) -> MappingResult<TypeModel> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.storage_name().to_string()) {
                log::error!(
                    "Duplicate storage name '{}' in type model '{}'",
                    field.storage_name(),
                    self.type_name
                );
                return Err(MappingError::new(
                    &format!(
                        "Duplicate storage name '{}' in type model '{}'",
                        field.storage_name(),
                        self.type_name
                    ),
                    ErrorKind::ValidationError,
                ));
            }
        }

        Ok(TypeModel {
            inner: Arc::new(TypeModelInner {
                type_name: self.type_name,
                type_id: self.type_id,
                discriminator_key: self.discriminator_key,
                discriminator_value: self.discriminator_value,
                use_discriminator: self.use_discriminator,
                fields: self.fields,
                pre_load_hooks: self.pre_load_hooks,
                post_load_hooks: self.post_load_hooks,
                factory: self.factory,
            }),
        })
    }
}

/// Trait implemented by entity types that describe their own mapping.
///
/// Mirrors the two-phase construction contract: the `Default` bound
/// provides the empty-shell instance, and `type_model()` supplies the
/// field-setter capability set.
///
/// # Usage
/// ```ignore
/// impl MappedEntity for Person {
///     fn type_model() -> MappingResult<TypeModel> {
///         TypeModel::builder::<Person>("Person")
///             .field(...)
///             .build()
///     }
/// }
///
/// registry.register_entity::<Person>()?;
/// ```
pub trait MappedEntity: Default + Any + Send + Sync {
    /// Builds the type model describing this entity type.
    fn type_model() -> MappingResult<TypeModel>;
}
