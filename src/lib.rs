//! # Docmap - Object-Document Mapping Core
//!
//! Docmap is the mapping layer of a document database: it moves data
//! between live Rust entities and the raw documents a store persists, and
//! it builds the mutation documents a store applies on update.
//!
//! ## Key Features
//!
//! - **Documents**: Ordered, nested raw documents with a binary codec
//! - **Type Models**: Per-type field mappings with aliased storage names
//! - **Lifecycle Hooks**: Pre-load and post-load callbacks around decode
//! - **Polymorphism**: Discriminator-based subtype resolution on decode
//! - **Path Resolution**: Dotted field expressions translated through
//!   embedded types
//! - **Update Building**: Fluent accumulation of field mutations into a
//!   grouped mutation document
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docmap::mapper::{EntityDecoder, TypeRegistry};
//! use docmap::update::UpdateBuilder;
//! use docmap::common::Value;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Register the mapped types once
//! let registry = TypeRegistry::new();
//! registry.register_entity::<Person>()?;
//!
//! // Decode a stored document into an entity
//! let decoder = EntityDecoder::new(registry.clone(), "Person");
//! let person: Person = decoder.decode_as(&bytes)?;
//!
//! // Accumulate an update against the same model
//! let mut update = UpdateBuilder::new(registry, "Person");
//! update
//!     .set("name", Value::from("Ann"))?
//!     .inc("age")?;
//! let mutation = update.operations();
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [errors::MappingResult]. Errors carry an
//! [errors::ErrorKind], a message, an optional cause chain, and a captured
//! backtrace.

pub mod codec;
pub mod common;
pub mod document;
pub mod errors;
pub mod mapper;
pub mod update;
