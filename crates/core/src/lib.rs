//! Core types and shared functionality for ustawka.
//!
//! This crate provides:
//! - The act data model and identifier parsing
//! - Cache implementation with SQLite backend
//! - The cache-coordinating service and its collaborator traits
//! - Unified error types
//! - Configuration structures and request counters

pub mod cache;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod service;

pub use cache::CacheDb;
pub use config::AppConfig;
pub use error::Error;
pub use metrics::{Metrics, MetricsSnapshot};
pub use models::{Act, ActDetails, ActId};
pub use service::{ActService, ActsSource, ActsStore, Board};
