pub mod access;
pub mod entry;
pub mod value;
