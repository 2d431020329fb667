//! Gemini REST upstream.

pub mod client;

pub use client::GeminiRestClient;
