//! Firebox AI is a session-scoped chat assistant over Google's Gemini API.
//!
//! # Overview
//! This crate provides the building blocks of the Firebox AI front-end:
//!
//! - A model client for the Gemini `generateContent` endpoint
//! - An optional "refinement" pass that rewrites answers for tone and
//!   substitutes possessive tokens with the Firebox product description
//! - Image intake (decode + grayscale conversion) for uploaded files
//! - An append-only session transcript and the interaction loop that
//!   drives one query or upload per cycle
//!
//! # Architecture
//! The crate is organized into modules that handle different aspects of a
//! chat session:

/// Append-only transcript and role-tagged chat messages
pub mod chat;

/// Client for the Gemini text-generation endpoint
pub mod client;

/// Startup configuration and credential validation
pub mod config;

/// Error types and handling
pub mod error;

/// Image upload intake: MIME sniffing and grayscale decode
pub mod intake;

/// Token substitution and refinement prompt construction
pub mod rewrite;

/// Interaction loop state and per-cycle stepping
pub mod session;

pub use async_trait::async_trait;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
/// This is a no-op if the feature is not enabled.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
