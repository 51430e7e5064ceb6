//! # propcrm
//!
//! Workspace provisioning for a multi-tenant property CRM: every new
//! workspace is prefilled with the views, favorites, webhooks and feature
//! flags of a template workspace, with metadata ids remapped through their
//! shared standard ids. Usable both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! propcrm = { version = "0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::path::Path;
//! use propcrm::config::ProvisionConfig;
//! use propcrm::provision::Provisioner;
//! use propcrm::server::{AppState, create_router};
//! use propcrm::store::{SqliteStore, Store};
//!
//! let store: Arc<dyn Store> = Arc::new(SqliteStore::new("./data/propcrm.db").unwrap());
//! store.initialize().unwrap();
//!
//! let config = ProvisionConfig::load(Path::new("./data")).unwrap();
//! let state = Arc::new(AppState {
//!     provisioner: Provisioner::new(Arc::clone(&store), config),
//!     store,
//! });
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes CLI module. Disable with `default-features = false`.

pub mod auth;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod metadata;
pub mod prefill;
pub mod provision;
pub mod server;
pub mod store;
pub mod types;
