//! Shared types for the cowork booking platform
//!
//! Domain models, request payloads with their boundary validation rules,
//! and the unified error/response types used by the server and by any
//! Rust client.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
