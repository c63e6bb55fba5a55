use crate::common::constants::{MOD_POSITION, MOD_SLICE, MOD_SORT};
use crate::common::SortOrder;
use crate::document::Document;
use crate::errors::MappingResult;

/// Modifiers applied to a list-append operation.
///
/// Options merge into the `$each` operand of the push operator: `$slice`
/// caps the stored list length, `$sort` orders it (either a whole-element
/// sort direction or a per-field sort document), and `$position` picks the
/// insertion offset.
///
/// Setting a whole-element sort clears a previously set field sort and
/// vice versa, since the wire format allows only one `$sort` shape.
///
/// # Examples
///
/// ```ignore
/// builder.push_all(
///     "scores",
///     vec![Value::from(50), Value::from(60)],
///     PushOptions::new().sort(SortOrder::Descending).slice(3),
/// )?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct PushOptions {
    slice: Option<i32>,
    sort: Option<SortOrder>,
    sort_document: Option<Document>,
    position: Option<i32>,
}

impl PushOptions {
    /// Creates an empty set of push modifiers.
    pub fn new() -> Self {
        PushOptions::default()
    }

    /// Caps the stored list to `size` elements after the append.
    pub fn slice(mut self, size: i32) -> Self {
        self.slice = Some(size);
        self
    }

    /// Sorts whole elements in the given direction.
    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort = Some(order);
        self.sort_document = None;
        self
    }

    /// Sorts document elements by the fields of a sort document.
    pub fn sort_by(mut self, sort_document: Document) -> Self {
        self.sort_document = Some(sort_document);
        self.sort = None;
        self
    }

    /// Inserts the new elements at the given offset instead of the end.
    pub fn position(mut self, position: i32) -> Self {
        self.position = Some(position);
        self
    }

    /// Checks if no modifier is set.
    pub fn is_empty(&self) -> bool {
        self.slice.is_none()
            && self.sort.is_none()
            && self.sort_document.is_none()
            && self.position.is_none()
    }

    /// Merges the set modifiers into a push operand document.
    pub fn update(&self, operand: &mut Document) -> MappingResult<()> {
        if let Some(slice) = self.slice {
            operand.put(MOD_SLICE, slice)?;
        }
        if let Some(sort) = self.sort {
            operand.put(MOD_SORT, sort.as_i32())?;
        }
        if let Some(sort_document) = &self.sort_document {
            operand.put(MOD_SORT, sort_document.clone())?;
        }
        if let Some(position) = self.position {
            operand.put(MOD_POSITION, position)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Value;
    use crate::doc;

    #[test]
    fn test_default_is_empty() {
        assert!(PushOptions::new().is_empty());
    }

    #[test]
    fn test_update_merges_all_modifiers() {
        let options = PushOptions::new()
            .slice(3)
            .sort(SortOrder::Descending)
            .position(0);
        let mut operand = Document::new();
        options.update(&mut operand).unwrap();
        assert_eq!(operand.get(MOD_SLICE), Some(&Value::I32(3)));
        assert_eq!(operand.get(MOD_SORT), Some(&Value::I32(-1)));
        assert_eq!(operand.get(MOD_POSITION), Some(&Value::I32(0)));
    }

    #[test]
    fn test_sort_by_document() {
        let options = PushOptions::new().sort_by(doc! { score: (-1) });
        let mut operand = Document::new();
        options.update(&mut operand).unwrap();
        let sort = operand.get(MOD_SORT).and_then(|v| v.as_document()).unwrap();
        assert_eq!(sort.get("score"), Some(&Value::I32(-1)));
    }

    #[test]
    fn test_sort_shapes_are_exclusive() {
        let options = PushOptions::new()
            .sort_by(doc! { score: (-1) })
            .sort(SortOrder::Ascending);
        let mut operand = Document::new();
        options.update(&mut operand).unwrap();
        assert_eq!(operand.get(MOD_SORT), Some(&Value::I32(1)));

        let options = PushOptions::new()
            .sort(SortOrder::Ascending)
            .sort_by(doc! { score: (-1) });
        let mut operand = Document::new();
        options.update(&mut operand).unwrap();
        assert!(operand.get(MOD_SORT).unwrap().as_document().is_some());
    }

    #[test]
    fn test_empty_options_merge_nothing() {
        let mut operand = Document::new();
        PushOptions::new().update(&mut operand).unwrap();
        assert!(operand.is_empty());
    }
}
