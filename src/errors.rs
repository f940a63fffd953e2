//! Unified application error type.
//! All modules (core, boundary, config, utils) return AppError to keep the
//! error handling consistent and classifiable by the retry layer.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Transport (transient)
    // ---------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Transfer failed with status {status}")]
    TransferFailed { status: u16 },

    // ---------------------------
    // Authorization / identity
    // ---------------------------
    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("Not authenticated: missing worker identity")]
    Unauthenticated,

    // ---------------------------
    // Lifecycle errors
    // ---------------------------
    #[error("Invalid shift transition: {0}")]
    InvalidTransition(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // ---------------------------
    // Document errors
    // ---------------------------
    #[error("Downloaded artifact is empty: {0}")]
    EmptyArtifact(String),

    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Short actionable message for the UI layer. The core never prints
    /// these itself.
    pub fn user_hint(&self) -> &'static str {
        match self {
            AppError::Network(_) | AppError::Timeout(_) | AppError::TransferFailed { .. } => {
                "Check your connection and try again."
            }
            AppError::Permission(_) => "Contact support or sign in again.",
            AppError::Unauthenticated => "Sign in again before clocking in or out.",
            AppError::InvalidTransition(_) | AppError::Validation(_) => {
                "Refresh your schedule and retry the action."
            }
            AppError::EmptyArtifact(_) => "Ask for the document to be re-uploaded at the source.",
            AppError::Io(_) | AppError::Other(_) => "Something went wrong. Try again.",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
