mod entity_decoder;
mod entity_encoder;
mod field_model;
mod path_target;
mod registry;
mod type_model;

pub use entity_decoder::EntityDecoder;
pub use entity_encoder::EntityEncoder;
pub use field_model::FieldModel;
pub use path_target::PathTarget;
pub use registry::TypeRegistry;
pub use type_model::{LifecycleHook, MappedEntity, TypeModel, TypeModelBuilder};
