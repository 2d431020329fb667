//! # Gemini Voice Types
//!
//! Core types, models, and error definitions for the Gemini Voice batch pipeline.
//!
//! This crate provides the foundational type system for the workspace:
//!
//! - **`error`** - Typed error taxonomy for per-item failures, batch aborts and configuration
//! - **`models`** - Batch models (InputItem, ItemConfig, NormalizedResult, OutputRecord, BatchConfig)
//! - **`protocol`** - Gemini GenerateContent request types
//!
//! ## Architecture Role
//!
//! `gemini-voice-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!          gemini-voice-types (this crate)
//!                   │
//!                   ▼
//!          gemini-voice-core
//!                   │
//!                   ▼
//!          gemini-voice-cli
//! ```
//!
//! Output-facing types serialize with the camelCase keys downstream consumers expect
//! (`pairedItem`, `aiTextResponse`, `mimeType`, ...).

pub mod error;
pub mod models;
pub mod protocol;

// Re-export error types for convenience
pub use error::{BatchError, ConfigError, ItemError, ProviderError};

// Re-export core model types
pub use models::{
    ApiConfig, ApiCredentials, BatchConfig, BinaryDescriptor, ErrorRecord, InputItem, ItemConfig,
    ItemDefaults, NormalizedResult, OutputProfile, OutputRecord, PairedItem,
};
