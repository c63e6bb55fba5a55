use crate::codec::DocumentCodec;
use crate::document::Document;
use crate::errors::MappingResult;
use crate::mapper::TypeRegistry;
use std::any::Any;

/// Encodes live entities of a registered type into raw documents.
///
/// The inverse of the decode pipeline: for a polymorphic type the
/// discriminator field is written first, then each mapped field is read
/// through its getter in declaration order. Lifecycle hooks are a decode
/// concern and do not run here.
#[derive(Clone, Debug)]
pub struct EntityEncoder {
    codec: DocumentCodec,
    registry: TypeRegistry,
    type_name: String,
}

impl EntityEncoder {
    /// Creates an encoder for the registered type `type_name`.
    pub fn new(registry: TypeRegistry, type_name: &str) -> Self {
        EntityEncoder {
            codec: DocumentCodec::new(),
            registry,
            type_name: type_name.to_string(),
        }
    }

    /// Encodes an entity into a raw document.
    ///
    /// # Errors
    ///
    /// Returns [crate::errors::ErrorKind::TypeNotRegistered] if the type
    /// is unknown and [crate::errors::ErrorKind::ObjectMappingError] if the
    /// entity is not an instance of the registered type.
    pub fn encode(&self, entity: &dyn Any) -> MappingResult<Document> {
        let model = self.registry.get_model(&self.type_name)?;
        let mut document = Document::new();

        if model.use_discriminator() {
            if let Some(discriminator) = model.discriminator_value() {
                document.put(model.discriminator_key(), discriminator)?;
            }
        }

        for field in model.fields() {
            let value = field.read(entity)?;
            document.put(field.storage_name(), value)?;
        }

        Ok(document)
    }

    /// Encodes an entity into its binary representation.
    pub fn encode_to_bytes(&self, entity: &dyn Any) -> MappingResult<Vec<u8>> {
        let document = self.encode(entity)?;
        self.codec.encode(&document)
    }
}
