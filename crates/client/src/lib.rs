//! Client code for ustawka.
//!
//! This crate provides the HTTP client for the Sejm ELI registry, used by the
//! server as the origin behind the act cache.

pub mod sejm;

pub use sejm::{ActsPage, SejmClient, SejmConfig, SejmError};
