//! Local persistence
//!
//! - **kv**: String key-value storage (file-backed or in-memory)
//! - **settings**: Typed user settings with write-through persistence
//! - **items**: Task and note lists stored as JSON arrays
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use studydash::store::{FileStore, KeyValueStore, SettingKey, SettingsStore};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let kv: Arc<dyn KeyValueStore> = Arc::new(FileStore::open("./data")?);
//!     let mut settings = SettingsStore::load(kv)?;
//!
//!     settings.set(SettingKey::Theme, "dark")?;
//!     assert_eq!(settings.get(SettingKey::Theme), "dark");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod items;
pub mod kv;
pub mod settings;

pub use error::{StoreError, StoreResult};
pub use items::{add_note, load_notes, load_tasks, pending_tasks, save_tasks, Note, Task};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use settings::{FontSize, SettingEffect, SettingKey, Settings, SettingsStore, Theme};
