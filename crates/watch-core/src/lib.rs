//! Core domain layer for chatwatch.
//!
//! Defines the classification event model, the connection status vocabulary,
//! the error taxonomy, the stream identifier extractor, the tier router and
//! CLI settings shared by every other crate in the workspace.

pub mod error;
pub mod extractor;
pub mod models;
pub mod router;
pub mod settings;
