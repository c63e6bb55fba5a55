mod document;

pub use document::*;

pub(crate) use crate::common::constants::FIELD_SEPARATOR;
