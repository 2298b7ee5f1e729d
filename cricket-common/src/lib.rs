//! # Cricket Common Library
//!
//! Shared code for the cricket match services:
//! - Error type shared by storage and configuration code
//! - Configuration loading (CLI > TOML > compiled defaults)
//! - Database initialization and row models for the `Matches` table

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
