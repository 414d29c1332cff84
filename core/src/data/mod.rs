pub mod binding;
pub mod document;
pub mod enum_tables;
pub mod registry;

pub use binding::{Binding, GetAccessor, SetAccessor};
pub use document::Document;
pub use enum_tables::EnumTableStore;
pub use registry::ParamRegistry;
