//! Library crate for usrlist-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - Record store and the in-memory seed directory (`store`)
//! - Search filtering and page slicing (`search`)
//! - Query coordination with the loading flag (`query`)
//! - Shared current-page state (`pagination`)
//! - Publish-subscribe value cell behind both of the above (`observable`)
//! - Application state, key handling and event loop (`app`)
//! - UI rendering and widgets (`ui`)
//! - CLI options, logging setup and error types (`config`, `logging`, `error`)
//!
//! It is used by the `usrlist-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod observable;
pub mod pagination;
pub mod query;
pub mod search;
pub mod store;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
pub use error::{Error, Result};
