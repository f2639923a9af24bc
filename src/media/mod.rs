//! File entities and the services they depend on: classification by
//! extension and category interning.

pub mod category;
pub mod file;
pub mod kind;

pub use category::{Category, CategoryInterner};
pub use file::MediaFile;
pub use kind::{MediaKind, classify};
