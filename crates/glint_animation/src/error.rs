//! Animation error types

use thiserror::Error;

/// Animation-related errors
///
/// Native failures are surfaced unmodified; the players perform no retries
/// and no recovery. An operation either completes its contract fully or
/// returns an error with the lifecycle flags unchanged.
#[derive(Error, Debug)]
pub enum AnimationError {
    /// Failed to create the native animation handle
    #[error("Failed to create native animation: {0}")]
    CreateFailed(String),

    /// A call into the native animation handle failed
    #[error("Native animation call failed: {0}")]
    Native(String),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
