//! Data models
//!
//! Shared between the server and any Rust client.
//! Rows without money columns derive `sqlx::FromRow` behind the `db` feature;
//! money is stored as integer cents and mapped by the repositories.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod booking;
pub mod device;
pub mod money;
pub mod room;
pub mod workspace;

// Re-exports
pub use booking::*;
pub use device::*;
pub use room::*;
pub use workspace::*;
