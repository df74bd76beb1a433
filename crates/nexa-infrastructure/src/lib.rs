pub mod config_service;
pub mod debounce;
pub mod paths;
pub mod state_codec;
pub mod state_repository;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::NexaPaths;
pub use crate::state_repository::{DebouncedStateRepository, PersistenceEvent};
pub use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore};
