use crate::document::Document;
use crate::errors::{ErrorKind, MappingError, MappingResult};

/// Encodes and decodes the binary wire representation of a [Document].
///
/// The codec fully materializes documents on decode; the entity decoder
/// needs random field access (discriminator lookup, hook inspection, field
/// population), so streaming is not an option at this layer.
///
/// The codec is stateless: it is cheap to clone and safe to share between
/// threads for concurrent encode/decode calls.
#[derive(Clone, Debug, Default)]
pub struct DocumentCodec;

impl DocumentCodec {
    /// Creates a new document codec.
    pub fn new() -> Self {
        DocumentCodec
    }

    /// Decodes a raw document from its binary representation.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [ErrorKind::EncodingError] if the bytes do
    /// not form a valid document.
    pub fn decode(&self, bytes: &[u8]) -> MappingResult<Document> {
        bincode::deserialize(bytes).map_err(|err| {
            log::error!("Failed to decode document: {}", err);
            MappingError::new(
                &format!("Failed to decode document: {}", err),
                ErrorKind::EncodingError,
            )
        })
    }

    /// Encodes a document into its binary representation.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [ErrorKind::EncodingError] if serialization
    /// fails.
    pub fn encode(&self, document: &Document) -> MappingResult<Vec<u8>> {
        bincode::serialize(document).map_err(|err| {
            log::error!("Failed to encode document: {}", err);
            MappingError::new(
                &format!("Failed to encode document: {}", err),
                ErrorKind::EncodingError,
            )
        })
    }
}
