pub mod files;
pub mod metadata;
pub mod parser;
pub mod serializer;
pub mod store;

pub use files::{ensure_data_dir, init_local_dir, log_file};
pub use metadata::{load_metadata, save_metadata, AppMetadata};
pub use parser::parse_tasks;
pub use serializer::serialize_tasks;
pub use store::{FileStore, KeyValueStore, META_KEY, TODOS_KEY};

#[cfg(test)]
pub use store::MemoryStore;
