//! # Studydash
//!
//! Personal study dashboard core: persisted settings, notes and tasks
//! overview, voice commands and a local AI assistant.
//!
//! ## Modules
//!
//! - [`store`]: Key-value persistence, settings, tasks and notes
//! - [`connectivity`]: Online/offline monitor gating network features
//! - [`ai`]: Client for the local AI backend
//! - [`voice`]: Keyword router for voice transcripts
//! - [`dashboard`]: Greeting, counts and quote rendering
//! - [`app`]: Dashboard context and event queue
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use studydash::ai::{AiClient, AiClientConfig};
//! use studydash::app::{AppEvent, Dashboard};
//! use studydash::connectivity::{ConnectivityMonitor, ManualProbe};
//! use studydash::store::{MemoryStore, SettingsStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = SettingsStore::load(Arc::new(MemoryStore::new()))?;
//!     let monitor = ConnectivityMonitor::start(Arc::new(ManualProbe::new(true))).await;
//!     let ai = AiClient::new(AiClientConfig::default(), monitor.handle())?;
//!     let mut dashboard = Dashboard::new(settings, monitor, ai);
//!
//!     for update in dashboard
//!         .handle(AppEvent::VoiceTranscript("add note revise chapter 4".into()))
//!         .await
//!     {
//!         println!("{update:?}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod app;
pub mod config;
pub mod connectivity;
pub mod dashboard;
pub mod logging;
pub mod store;
pub mod voice;

pub use ai::{AiClient, AiClientConfig, AiError};

pub use app::{event_queue, run, AppEvent, Dashboard, UiUpdate};

pub use config::{Config, ConfigError, LoggingConfig};

pub use connectivity::{
    ConnectivityHandle, ConnectivityMonitor, ConnectivityProbe, ConnectivityState, HttpProbe,
    ManualProbe,
};

pub use dashboard::DashboardView;

pub use store::{
    FileStore, FontSize, KeyValueStore, MemoryStore, Note, SettingEffect, SettingKey, Settings,
    SettingsStore, StoreError, StoreResult, Task, Theme,
};

pub use voice::VoiceCommand;
