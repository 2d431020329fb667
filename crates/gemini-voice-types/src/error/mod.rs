//! Typed error definitions for Gemini Voice.
//!
//! This module provides a structured error hierarchy:
//!
//! - [`ItemError`] - everything that can go wrong while processing one batch item
//! - [`ProviderError`] - an opaque failure reported by the generation service
//! - [`BatchError`] - the aborting failure surfaced when failure isolation is off
//! - [`ConfigError`] - configuration file loading and validation

mod config;
mod item;
mod provider;

pub use config::ConfigError;
pub use item::ItemError;
pub use provider::ProviderError;

use thiserror::Error;

/// A batch run aborted at the first failing item.
///
/// Produced only when `continue_on_fail` is off. Items before `item_index`
/// were processed, but their records are not delivered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Item {item_index} failed: {source}")]
pub struct BatchError {
    /// Position of the failing item in the input batch
    pub item_index: usize,
    /// What went wrong with that item
    pub source: ItemError,
}

impl BatchError {
    pub fn new(item_index: usize, source: ItemError) -> Self {
        Self { item_index, source }
    }
}
