use crate::errors::{ErrorKind, MappingError, MappingResult};
use crate::mapper::{MappedEntity, TypeModel};
use dashmap::DashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Concurrent registry of mapped entity types.
///
/// The registry indexes [TypeModel]s by type name and, for types that use
/// a discriminator, by discriminator value. Registration is append-or-
/// overwrite: re-registering a type name replaces the previous model.
///
/// Cloning a registry is cheap and shares the underlying maps, so a single
/// registry can be handed to decoders and update builders alike.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    models: Arc<DashMap<String, TypeModel>>,
    discriminators: Arc<DashMap<String, String>>,
}

impl TypeRegistry {
    /// Creates an empty type registry.
    pub fn new() -> Self {
        TypeRegistry {
            models: Arc::new(DashMap::new()),
            discriminators: Arc::new(DashMap::new()),
        }
    }

    /// Registers a type model. If the model carries a discriminator value,
    /// that value is indexed for polymorphic lookup as well.
    pub fn register(&self, model: TypeModel) {
        if let Some(discriminator) = model.discriminator_value() {
            self.discriminators
                .insert(discriminator.to_string(), model.type_name().to_string());
        }
        self.models.insert(model.type_name().to_string(), model);
    }

    /// Builds and registers the type model of a [MappedEntity].
    pub fn register_entity<T: MappedEntity>(&self) -> MappingResult<()> {
        let model = T::type_model()?;
        self.register(model);
        Ok(())
    }

    /// Looks up a registered model by type name.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [ErrorKind::TypeNotRegistered] if the type
    /// name is unknown.
    pub fn get_model(&self, type_name: &str) -> MappingResult<TypeModel> {
        match self.models.get(type_name) {
            Some(model) => Ok(model.clone()),
            None => {
                log::error!("Type '{}' is not registered", type_name);
                Err(MappingError::new(
                    &format!("Type '{}' is not registered", type_name),
                    ErrorKind::TypeNotRegistered,
                ))
            }
        }
    }

    /// Resolves a discriminator value to the model registered under it.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [ErrorKind::DecodeFailure] if no registered
    /// type maps the discriminator value.
    pub fn lookup_discriminator(&self, discriminator: &str) -> MappingResult<TypeModel> {
        match self.discriminators.get(discriminator) {
            Some(type_name) => self.get_model(type_name.value()),
            None => {
                log::error!(
                    "No registered type maps discriminator value '{}'",
                    discriminator
                );
                Err(MappingError::new(
                    &format!(
                        "No registered type maps discriminator value '{}'",
                        discriminator
                    ),
                    ErrorKind::DecodeFailure,
                ))
            }
        }
    }

    /// Checks if a type name is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.models.contains_key(type_name)
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Checks if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Debug for TypeRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.models.iter().map(|e| e.key().clone()).collect();
        f.debug_struct("TypeRegistry")
            .field("types", &names)
            .finish()
    }
}
