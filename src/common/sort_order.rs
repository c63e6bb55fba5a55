/// Specifies the direction for array sorting in push modifiers.
///
/// # Purpose
/// Defines whether array elements should be sorted in ascending (low to high)
/// or descending (high to low) order when a push operation carries a sort
/// modifier.
///
/// # Variants
/// - `Ascending`: Sort from smallest to largest value (A to Z, 0 to 9)
/// - `Descending`: Sort from largest to smallest value (Z to A, 9 to 0)
///
/// # Usage
/// Used with [`crate::update::PushOptions`]:
/// ```text
/// let options = PushOptions::new().sort(SortOrder::Descending).slice(10);
/// ```
///
/// # Characteristics
/// - **Copy**: Can be copied instead of cloned
/// - **Comparable**: Can be compared for equality
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest, A-Z)
    Ascending,
    /// Sort in descending order (largest to smallest, Z-A)
    Descending,
}

impl SortOrder {
    /// Returns the wire representation of the sort direction (1 or -1).
    pub fn as_i32(&self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_as_i32() {
        assert_eq!(SortOrder::Ascending.as_i32(), 1);
        assert_eq!(SortOrder::Descending.as_i32(), -1);
    }
}
