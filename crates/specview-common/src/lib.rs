//! specview Common - Shared configuration and errors
//!
//! This crate provides the configuration file model and the error type
//! shared by every specview crate.

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};
