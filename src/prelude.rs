//! Prelude module for weekend_count crate.
//!
//! Re-exports the derive_more macros used across the crate.

pub use derive_more::Display;
