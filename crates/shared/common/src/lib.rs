//! Common utilities shared across the credential services.
//!
//! This crate provides:
//! - Unified error handling (one error kind per caller-visible failure)
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
