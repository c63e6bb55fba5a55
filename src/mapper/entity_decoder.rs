use crate::codec::DocumentCodec;
use crate::common::Value;
use crate::document::Document;
use crate::errors::{ErrorKind, MappingError, MappingResult};
use crate::mapper::{TypeModel, TypeRegistry};
use std::any::Any;

/// Decodes binary documents into live entities of a registered type.
///
/// The decode pipeline runs in a fixed order:
///
/// 1. the raw bytes are materialized into a [Document],
/// 2. the effective type model is resolved, consulting the discriminator
///    field for polymorphic types,
/// 3. an empty instance is created through the model's factory,
/// 4. pre-load hooks run against the instance and the raw document,
/// 5. each mapped field present in the document is converted and assigned,
/// 6. post-load hooks run with the same raw document.
///
/// Hooks observe the raw document after discriminator resolution, so a
/// pre-load hook mutating the discriminator field does not change which
/// type is constructed.
#[derive(Clone, Debug)]
pub struct EntityDecoder {
    codec: DocumentCodec,
    registry: TypeRegistry,
    type_name: String,
}

impl EntityDecoder {
    /// Creates a decoder producing entities of the registered type
    /// `type_name` (or one of its discriminated subtypes).
    pub fn new(registry: TypeRegistry, type_name: &str) -> Self {
        EntityDecoder {
            codec: DocumentCodec::new(),
            registry,
            type_name: type_name.to_string(),
        }
    }

    /// Decodes a binary document into an entity.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::EncodingError] if the bytes are malformed,
    /// [ErrorKind::TypeNotRegistered] if the target type is unknown,
    /// [ErrorKind::DecodeFailure] if the discriminator maps no type or a
    /// field value cannot be converted, and propagates hook errors
    /// verbatim.
    pub fn decode(&self, bytes: &[u8]) -> MappingResult<Box<dyn Any + Send + Sync>> {
        let document = self.codec.decode(bytes)?;
        self.decode_document(document)
    }

    /// Decodes an already-materialized raw document into an entity.
    pub fn decode_document(
        &self,
        mut document: Document,
    ) -> MappingResult<Box<dyn Any + Send + Sync>> {
        let model = self.effective_model(&document)?;

        let mut entity = model.new_instance();
        model.run_pre_load(entity.as_mut(), &mut document)?;
        self.populate_fields(&model, entity.as_mut(), &document)?;
        model.run_post_load(entity.as_mut(), &mut document)?;

        Ok(entity)
    }

    /// Decodes a binary document and downcasts the entity to `T`.
    ///
    /// # Errors
    ///
    /// In addition to [decode](Self::decode) errors, returns
    /// [ErrorKind::DecodeFailure] if the decoded entity is not a `T`
    /// (e.g. the discriminator resolved to a different subtype).
    pub fn decode_as<T: Any>(&self, bytes: &[u8]) -> MappingResult<T> {
        let entity: Box<dyn Any> = self.decode(bytes)?;
        match entity.downcast::<T>() {
            Ok(typed) => Ok(*typed),
            Err(_) => {
                log::error!(
                    "Decoded entity of type '{}' does not match the requested type",
                    self.type_name
                );
                Err(MappingError::new(
                    &format!(
                        "Decoded entity of type '{}' does not match the requested type",
                        self.type_name
                    ),
                    ErrorKind::DecodeFailure,
                ))
            }
        }
    }

    /// Resolves the model to construct, consulting the discriminator field
    /// when the base model is polymorphic. The discriminator branch is
    /// taken only for a present, non-empty string value; anything else
    /// falls back to the base model.
    fn effective_model(&self, document: &Document) -> MappingResult<TypeModel> {
        let base = self.registry.get_model(&self.type_name)?;
        if !base.use_discriminator() {
            return Ok(base);
        }

        match document.get(base.discriminator_key()) {
            Some(Value::String(discriminator)) if !discriminator.is_empty() => {
                self.registry.lookup_discriminator(discriminator)
            }
            _ => Ok(base),
        }
    }

    fn populate_fields(
        &self,
        model: &TypeModel,
        entity: &mut dyn Any,
        document: &Document,
    ) -> MappingResult<()> {
        for field in model.fields() {
            if field.storage_name() == model.discriminator_key() {
                continue;
            }
            if let Some(value) = document.get(field.storage_name()) {
                if let Err(cause) = field.apply(entity, value) {
                    log::error!(
                        "Failed to decode field '{}' of type '{}'",
                        field.name(),
                        model.type_name()
                    );
                    return Err(MappingError::new_with_cause(
                        &format!(
                            "Failed to decode field '{}' of type '{}'",
                            field.name(),
                            model.type_name()
                        ),
                        ErrorKind::DecodeFailure,
                        cause,
                    ));
                }
            }
        }
        Ok(())
    }
}
