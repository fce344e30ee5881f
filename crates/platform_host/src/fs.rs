//! In-memory virtual file system: records, path helpers and the entry store.

pub mod path;
pub mod store;
pub mod types;
