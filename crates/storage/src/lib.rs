//! Persistence for practice progress: a key-value contract, its in-memory
//! and `SQLite` backends, and the per-profile progress repository.

pub mod progress;
pub mod repository;
pub mod sqlite;

pub use progress::ProgressRepository;
pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};
pub use sqlite::{SqliteInitError, SqliteStore};
