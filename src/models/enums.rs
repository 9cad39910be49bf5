//! Enums used throughout the Grind TUI
//!
//! This module contains the various enum types used for view selection,
//! filtering, and sorting of the problem table.

/// Which of the three views is currently visible.
/// Exactly one view is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Topics, // Collapsible topic groups
    Table, // Flat filterable/sortable table
    Stats, // Aggregate statistics
}

impl View {
    pub fn next(&self) -> Self {
        match self {
            View::Topics => View::Table,
            View::Table => View::Stats,
            View::Stats => View::Topics,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            View::Topics => View::Stats,
            View::Table => View::Topics,
            View::Stats => View::Table,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Topics => "Topics",
            View::Table => "All Problems",
            View::Stats => "Stats",
        }
    }
}

/// Sort key for the all-problems table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Title,
    Topic,      // Ties broken by title
    Difficulty, // Easy < Medium < Hard, ties broken by title
}

impl SortKey {
    pub fn cycle(&self) -> Self {
        match self {
            SortKey::Title => SortKey::Topic,
            SortKey::Topic => SortKey::Difficulty,
            SortKey::Difficulty => SortKey::Title,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Title => "Title",
            SortKey::Topic => "Topic",
            SortKey::Difficulty => "Difficulty",
        }
    }
}

/// Sort direction for the all-problems table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn flip(&self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
}

/// Status filter for the all-problems table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Done,
    Todo,
}

impl StatusFilter {
    /// Cycle through all -> done -> todo -> all
    pub fn cycle(current: Option<StatusFilter>) -> Option<StatusFilter> {
        match current {
            None => Some(StatusFilter::Done),
            Some(StatusFilter::Done) => Some(StatusFilter::Todo),
            Some(StatusFilter::Todo) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::Done => "done",
            StatusFilter::Todo => "todo",
        }
    }
}
