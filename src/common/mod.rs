pub mod constants;
mod convertible;
mod sort_order;
mod value;

pub use constants::*;
pub use convertible::Convertible;
pub use sort_order::SortOrder;
pub use value::{Value, ValueKind};
