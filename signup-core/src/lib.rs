//! Core of the Mergington activity signup service.
//!
//! This crate provides everything below the HTTP layer:
//! - `Activity` records and the `Activities` mapping
//! - `ActivityStore`, the JSON-file-backed store with atomic writes
//! - `SignupConfig` for locating the data file and server settings

pub mod activity;
pub mod config;
pub mod defaults;
pub mod error;
pub mod store;

pub use crate::activity::{Activities, Activity};
pub use crate::config::SignupConfig;
pub use crate::error::{SignupError, SignupResult};
pub use crate::store::ActivityStore;
