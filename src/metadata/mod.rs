//! Metadata provider module.
//!
//! This module defines the schema shapes the analyser works on and the
//! providers that produce them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MetadataProvider                           │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │  fetch(schema) -> Option<Vec<Table>>   (single await)     │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │     PostgresMetadataProvider  JsonFileProvider  Static...       │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │          RawTable / RawColumn  (catalog JSON rows)              │
//! │                    └──► Table / Column                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use relmap::metadata::{JsonFileProvider, MetadataProvider};
//!
//! let provider = JsonFileProvider::new("./dump.json");
//! let tables = provider.fetch("public").await?.unwrap_or_default();
//! ```

mod error;
pub mod postgres;
mod provider;
pub mod raw;
mod types;

pub use error::{MetadataError, MetadataResult};
pub use postgres::{PostgresMetadataProvider, QueryClient};
pub use provider::{
    JsonFileProvider, MetadataProvider, MetadataProviderExt, StaticMetadataProvider,
    TimeoutProvider,
};
pub use types::*;
