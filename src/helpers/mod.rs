pub mod file_storage;
pub(crate) mod json;
pub mod redirect;

pub use file_storage::{FileStorage, Namespace, StorageError};
pub use json::*;
