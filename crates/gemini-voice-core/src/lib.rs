//! # Gemini Voice Core
//!
//! Batch pipeline that calls Gemini `generateContent` once per input item and turns
//! each answer into an output record with text and an optional audio attachment.
//!
//! ## Architecture
//!
//! ```text
//! gemini-voice-core/src/
//! ├── pipeline/        # request builder, normalizer, assembler, batch driver
//! ├── ports.rs         # collaborator traits (credentials, parameters, client, packager, observer)
//! ├── adapters/        # default implementations of the ports
//! ├── upstream/        # reqwest-based Gemini REST client
//! ├── audio.rs         # audio MIME sniffing and extension mapping
//! ├── config.rs        # config file loading + env overrides
//! └── logger.rs        # tracing subscriber setup
//! ```
//!
//! The batch driver is the only component with control flow; everything it calls
//! is a pure function of its input or sits behind a port.

#![allow(clippy::map_err_ignore, reason = "Error context is provided in the replacement message")]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

pub mod adapters;
pub mod audio;
pub mod config;
pub mod error;
pub mod logger;
pub mod pipeline;
pub mod ports;
pub mod upstream;

// Re-export commonly used types
pub use adapters::{
    CredentialChain, EnvCredentials, FileCredentials, InlineBinaryPackager, ItemParameters,
    StaticCredentials, TracingObserver,
};
pub use error::{AppError, AppResult};
pub use pipeline::BatchDriver;
pub use ports::{BatchObserver, BinaryPackager, CredentialSource, GenerationClient, ParameterSource};
pub use upstream::GeminiRestClient;
