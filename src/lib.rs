//! Herokron database
//!
//! A local, file-backed store for Heroku API keys, the apps each key owns,
//! a Discord webhook and an embed color.
//!
//! ## Features
//!
//! - **Self-healing**: A missing, corrupt or outdated database is replaced with defaults on open
//! - **Write-through**: Every mutation is on disk before it is visible in memory
//! - **Sync**: App lists are refreshed from the Heroku Platform API per key or all at once
//!
//! ## Layout
//!
//! ```text
//! Linux:   ~/.local/share/Herokron/db.json
//! macOS:   ~/Library/Application Support/Herokron/db.json
//! Windows: ~/AppData/Roaming/Herokron/db.json
//! ```

pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod heroku;
pub mod paths;
pub mod store;
pub mod webhook;

pub use config::HerokronConfig;
pub use document::{Document, RegistryEntry, SchemaViolation};
pub use error::{HerokronError, Result};
pub use heroku::{AppSource, HerokuClient, SourceError};
pub use store::Store;
pub use webhook::{Webhook, WebhookUrl};
