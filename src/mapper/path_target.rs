use crate::common::constants::FIELD_SEPARATOR;
use crate::errors::{ErrorKind, MappingError, MappingResult};
use crate::mapper::{FieldModel, TypeModel, TypeRegistry};

/// A resolved field path expression.
///
/// A path target translates a dotted logical field expression (e.g.
/// `address.city`) into the dotted storage path it is persisted under,
/// substituting aliased storage names segment by segment. When resolution
/// is validated against a type model, the target also carries the
/// [FieldModel] of the final segment so callers can value-check against the
/// declared field kind.
#[derive(Clone, Debug)]
pub struct PathTarget {
    translated_path: String,
    field_model: Option<FieldModel>,
}

impl PathTarget {
    /// Resolves a field expression against a type model.
    ///
    /// With `validate` off the expression passes through verbatim and no
    /// field model is attached. With `validate` on, each segment must match
    /// a field of the current model by logical or storage name; segments
    /// descend through embedded mapped types. Once a segment lands on a
    /// field with no embedded type, any remaining segments pass through
    /// unvalidated (e.g. positional or map-key segments).
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidArgument] for an empty expression and
    /// [ErrorKind::PathResolution] when a validated segment matches no
    /// field.
    pub fn resolve(
        registry: &TypeRegistry,
        model: &TypeModel,
        expression: &str,
        validate: bool,
    ) -> MappingResult<PathTarget> {
        if expression.is_empty() {
            log::error!("Field expression cannot be empty");
            return Err(MappingError::new(
                "Field expression cannot be empty",
                ErrorKind::InvalidArgument,
            ));
        }

        if !validate {
            return Ok(PathTarget {
                translated_path: expression.to_string(),
                field_model: None,
            });
        }

        let mut segments = Vec::new();
        let mut current_model = model.clone();
        let mut current_field: Option<FieldModel> = None;
        let mut iter = expression.split(FIELD_SEPARATOR).peekable();

        while let Some(segment) = iter.next() {
            let field = match current_model.field(segment) {
                Some(field) => field.clone(),
                None => {
                    log::error!(
                        "Could not resolve path segment '{}' of '{}' against type '{}'",
                        segment,
                        expression,
                        current_model.type_name()
                    );
                    return Err(MappingError::new(
                        &format!(
                            "Could not resolve path segment '{}' of '{}' against type '{}'",
                            segment,
                            expression,
                            current_model.type_name()
                        ),
                        ErrorKind::PathResolution,
                    ));
                }
            };

            segments.push(field.storage_name().to_string());

            if iter.peek().is_some() {
                match field.embedded_type() {
                    Some(type_name) => {
                        current_model = registry.get_model(type_name)?;
                        current_field = None;
                    }
                    None => {
                        // unmapped tail, pass the rest through verbatim
                        segments.extend(iter.map(|s| s.to_string()));
                        return Ok(PathTarget {
                            translated_path: segments.join(&FIELD_SEPARATOR.to_string()),
                            field_model: None,
                        });
                    }
                }
            } else {
                current_field = Some(field);
            }
        }

        Ok(PathTarget {
            translated_path: segments.join(&FIELD_SEPARATOR.to_string()),
            field_model: current_field,
        })
    }

    /// Returns the translated storage path.
    pub fn translated_path(&self) -> &str {
        &self.translated_path
    }

    /// Returns the field model of the final segment, if resolution was
    /// validated and the segment is mapped.
    pub fn field_model(&self) -> Option<&FieldModel> {
        self.field_model.as_ref()
    }
}
