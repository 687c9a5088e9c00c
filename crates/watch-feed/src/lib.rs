//! Event ingestion layer for chatwatch.
//!
//! Responsible for decoding raw socket payloads into classification events
//! and for holding the three ordered display lanes the dashboard renders.

pub mod decoder;
pub mod feed;

pub use watch_core as core;
