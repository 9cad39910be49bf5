//! Data models for Grind TUI
//!
//! This module contains the core data structures:
//! - Problem, difficulty, and dataset section types for problems.json
//! - Progress snapshot and import payload classification
//! - Enums for view and filter state

pub mod enums;
pub mod problem;
pub mod snapshot;

// Re-exports for convenient access
pub use enums::{SortDir, SortKey, StatusFilter, View};
pub use problem::{normalize, DatasetItem, DatasetSection, Difficulty, Problem};
pub use snapshot::{classify_import, ImportPayload, Snapshot};
