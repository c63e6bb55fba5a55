mod push_options;
mod update_builder;

pub use push_options::PushOptions;
pub use update_builder::UpdateBuilder;
