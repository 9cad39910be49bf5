//! Application state and core logic for the Grind TUI.
//!
//! This module contains the `App` struct which owns the loaded dataset, the
//! progress store, and all view state. It is the single writer for progress
//! mutations; the renderers only read the cached view models.
//!
//! View-model rebuilds mirror the original render calls: filter, search, and
//! sort changes rebuild only the table view; every store mutation rebuilds
//! all three views; a dataset replacement rebuilds everything.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::{error, info, warn};

use crate::celebrate::Celebration;
use crate::dataset::{self, LoadedDataset};
use crate::models::{
    classify_import, normalize, DatasetSection, Difficulty, ImportPayload, Problem, SortDir,
    SortKey, StatusFilter, View,
};
use crate::query::{self, Filters, StatsSummary};
use crate::store::{ProgressStore, ToggleOutcome};

/// Fixed export file name, written to the working directory
pub const EXPORT_FILE_NAME: &str = "grind-progress.json";

/// Modal overlay state. While an overlay is up it captures all input.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    None,
    /// Reset confirmation; `y` proceeds, anything else cancels
    ConfirmReset,
    /// Blocking error notice; any key dismisses
    Error(String),
    /// Blocking info notice; any key dismisses
    Info(String),
    /// Single-line text prompt
    Prompt { kind: PromptKind, input: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Search,
    ImportPath,
}

/// One visible line in the topics view
#[derive(Debug, Clone, PartialEq)]
pub enum TopicEntry {
    Header {
        topic: String,
        done: usize,
        total: usize,
        percent: u8,
        collapsed: bool,
    },
    /// Index into `App::problems`
    Row(usize),
}

/// Application state
pub struct App {
    // Dataset (read-only after load, replaceable via import or reload)
    pub problems: Vec<Problem>,
    pub topics: Vec<String>,
    pub dataset_source: Option<PathBuf>,
    index_by_id: HashMap<String, usize>,

    pub store: ProgressStore,
    pub celebration: Celebration,

    // View state
    pub view: View,
    pub filters: Filters,
    pub sort_key: SortKey,
    pub sort_dir: SortDir,
    pub collapsed: HashSet<String>,
    pub topics_selected: usize,
    pub table_selected: usize,
    pub overlay: Overlay,
    /// Dismissible non-blocking banner (degraded data and similar)
    pub notice: Option<String>,

    // Topic filter options are populated once from the first dataset and
    // deliberately not refreshed on dataset swaps (matches the original's
    // populate-once behavior, with an explicit flag instead of a UI probe)
    pub topic_filter_options: Vec<String>,
    topic_filter_initialized: bool,

    // Cached view models (indices into `problems`)
    pub topics_entries: Vec<TopicEntry>,
    pub table_rows: Vec<usize>,
    pub stats: StatsSummary,

    pub dataset_needs_reload: Arc<Mutex<bool>>,
    celebrate_requested: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(dataset: LoadedDataset, store: ProgressStore, reduced_motion: bool) -> Self {
        let mut app = Self {
            problems: Vec::new(),
            topics: Vec::new(),
            dataset_source: dataset.source.clone(),
            index_by_id: HashMap::new(),
            store,
            celebration: Celebration::new(reduced_motion),
            view: View::default(),
            filters: Filters::default(),
            sort_key: SortKey::default(),
            sort_dir: SortDir::default(),
            collapsed: HashSet::new(),
            topics_selected: 0,
            table_selected: 0,
            overlay: Overlay::None,
            notice: dataset.notice.clone(),
            topic_filter_options: Vec::new(),
            topic_filter_initialized: false,
            topics_entries: Vec::new(),
            table_rows: Vec::new(),
            stats: StatsSummary {
                done: 0,
                total: 0,
                percent: 0,
                by_difficulty: Vec::new(),
                by_topic: Vec::new(),
            },
            dataset_needs_reload: Arc::new(Mutex::new(false)),
            celebrate_requested: false,
            should_quit: false,
        };
        app.install_dataset(dataset.problems, dataset.topics);
        app
    }

    // ------------------------------------------------------------------
    // Dataset handling
    // ------------------------------------------------------------------

    fn install_dataset(&mut self, problems: Vec<Problem>, topics: Vec<String>) {
        self.problems = problems;
        self.topics = topics;
        self.index_by_id = self
            .problems
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        if !self.topic_filter_initialized {
            self.topic_filter_options = self.topics.clone();
            self.topic_filter_initialized = true;
        }

        self.rebuild_all();
    }

    /// Replace the dataset wholesale. The done set and point total are left
    /// untouched; stale ids simply stop counting in the views.
    pub fn replace_dataset(&mut self, sections: Vec<DatasetSection>) {
        let (problems, topics) = normalize(sections);
        info!(
            problems = problems.len(),
            topics = topics.len(),
            "dataset replaced"
        );
        self.install_dataset(problems, topics);
    }

    /// Reload the dataset from its source file if the watcher flagged it
    pub fn reload_dataset_if_needed(&mut self) {
        let needs_reload = {
            let Ok(mut flag) = self.dataset_needs_reload.lock() else {
                return;
            };
            if *flag {
                *flag = false;
                true
            } else {
                false
            }
        };
        if !needs_reload {
            return;
        }

        let Some(path) = self.dataset_source.clone() else {
            return;
        };
        match dataset::read_sections(&path) {
            Ok(sections) => self.replace_dataset(sections),
            Err(e) => warn!("dataset reload skipped: {e}"),
        }
    }

    // ------------------------------------------------------------------
    // View-model rebuilds
    // ------------------------------------------------------------------

    fn rebuild_topics(&mut self) {
        let sections = query::topic_sections(&self.problems, &self.topics, self.store.done());
        let mut entries = Vec::new();
        for section in &sections {
            let collapsed = self.collapsed.contains(section.topic);
            entries.push(TopicEntry::Header {
                topic: section.topic.to_string(),
                done: section.done_count,
                total: section.rows.len(),
                percent: section.percent,
                collapsed,
            });
            if !collapsed {
                for row in &section.rows {
                    entries.push(TopicEntry::Row(self.index_by_id[&row.id]));
                }
            }
        }
        self.topics_entries = entries;
        self.topics_selected = self
            .topics_selected
            .min(self.topics_entries.len().saturating_sub(1));
    }

    fn rebuild_table(&mut self) {
        let rows = query::table_rows(
            &self.problems,
            self.store.done(),
            &self.filters,
            self.sort_key,
            self.sort_dir,
        );
        self.table_rows = rows.iter().map(|p| self.index_by_id[&p.id]).collect();
        self.table_selected = self
            .table_selected
            .min(self.table_rows.len().saturating_sub(1));
    }

    fn rebuild_stats(&mut self) {
        self.stats = query::stats(&self.problems, &self.topics, self.store.done());
    }

    fn rebuild_all(&mut self) {
        self.rebuild_topics();
        self.rebuild_table();
        self.rebuild_stats();
    }

    // ------------------------------------------------------------------
    // Progress mutations
    // ------------------------------------------------------------------

    /// Toggle the done state of the currently selected problem, if any
    pub fn toggle_selected(&mut self) {
        let Some(index) = self.selected_problem() else {
            return;
        };
        let problem = self.problems[index].clone();
        let desired = !self.store.is_done(&problem.id);
        match self.store.set_done(&problem, desired) {
            Ok(ToggleOutcome::Marked) => {
                self.celebrate_requested = true;
                self.rebuild_all();
            }
            Ok(ToggleOutcome::Unmarked) => self.rebuild_all(),
            Ok(ToggleOutcome::NoChange) => {}
            Err(e) => self.report_error(format!("Failed to save progress: {e}")),
        }
    }

    /// The problem the selection currently points at, per active view
    pub fn selected_problem(&self) -> Option<usize> {
        match self.view {
            View::Topics => match self.topics_entries.get(self.topics_selected) {
                Some(TopicEntry::Row(index)) => Some(*index),
                _ => None,
            },
            View::Table => self.table_rows.get(self.table_selected).copied(),
            View::Stats => None,
        }
    }

    /// Link of the selected problem, shown in the footer of the list views
    pub fn selected_link(&self) -> Option<&str> {
        self.selected_problem()
            .map(|index| self.problems[index].link.as_str())
    }

    pub fn request_reset(&mut self) {
        self.overlay = Overlay::ConfirmReset;
    }

    /// Called when the reset confirmation is accepted
    pub fn confirm_reset(&mut self) {
        self.overlay = Overlay::None;
        match self.store.reset() {
            Ok(()) => {
                info!("progress reset");
                self.rebuild_all();
            }
            Err(e) => self.report_error(format!("Failed to reset progress: {e}")),
        }
    }

    // ------------------------------------------------------------------
    // Export / import
    // ------------------------------------------------------------------

    /// Write the progress snapshot to ./grind-progress.json, pretty-printed
    pub fn export_progress(&mut self) {
        let snapshot = self.store.export_snapshot();
        let result = serde_json::to_string_pretty(&snapshot)
            .map_err(std::io::Error::other)
            .and_then(|text| std::fs::write(EXPORT_FILE_NAME, text));
        match result {
            Ok(()) => {
                info!("exported progress to {EXPORT_FILE_NAME}");
                self.overlay = Overlay::Info(format!("Progress exported to {EXPORT_FILE_NAME}"));
            }
            Err(e) => self.report_error(format!("Export failed: {e}")),
        }
    }

    /// Import a file by path: a dataset-shaped document replaces the problem
    /// list, anything else is applied as a progress snapshot. Malformed
    /// input surfaces a blocking error and leaves state unchanged.
    pub fn import_from_path(&mut self, path: &str) {
        let text = match std::fs::read_to_string(path.trim()) {
            Ok(text) => text,
            Err(e) => {
                self.report_error(format!("Could not read {path}: {e}"));
                return;
            }
        };
        match classify_import(&text) {
            Ok(ImportPayload::Dataset(sections)) => {
                self.replace_dataset(sections);
                self.overlay = Overlay::Info("Dataset loaded from file.".to_string());
            }
            Ok(ImportPayload::Snapshot(raw)) => match self.store.import_snapshot(&raw) {
                Ok(()) => {
                    info!("imported progress snapshot from {path}");
                    self.rebuild_all();
                }
                Err(e) => self.report_error(format!("Import failed: {e}")),
            },
            Err(e) => self.report_error(format!("Invalid JSON: {e}")),
        }
    }

    // ------------------------------------------------------------------
    // Filters and sorting (table view only)
    // ------------------------------------------------------------------

    pub fn set_search(&mut self, search: String) {
        self.filters.search = search;
        self.rebuild_table();
    }

    pub fn cycle_topic_filter(&mut self) {
        let options = &self.topic_filter_options;
        self.filters.topic = match &self.filters.topic {
            None => options.first().cloned(),
            Some(current) => options
                .iter()
                .position(|t| t == current)
                .and_then(|i| options.get(i + 1))
                .cloned(),
        };
        self.rebuild_table();
    }

    pub fn cycle_difficulty_filter(&mut self) {
        self.filters.difficulty = match &self.filters.difficulty {
            None => Some(Difficulty::Easy),
            Some(Difficulty::Easy) => Some(Difficulty::Medium),
            Some(Difficulty::Medium) => Some(Difficulty::Hard),
            _ => None,
        };
        self.rebuild_table();
    }

    pub fn cycle_status_filter(&mut self) {
        self.filters.status = StatusFilter::cycle(self.filters.status);
        self.rebuild_table();
    }

    pub fn cycle_sort_key(&mut self) {
        self.sort_key = self.sort_key.cycle();
        self.rebuild_table();
    }

    pub fn flip_sort_dir(&mut self) {
        self.sort_dir = self.sort_dir.flip();
        self.rebuild_table();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.rebuild_table();
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn select_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn move_selection(&mut self, delta: isize) {
        let (selected, len) = match self.view {
            View::Topics => (&mut self.topics_selected, self.topics_entries.len()),
            View::Table => (&mut self.table_selected, self.table_rows.len()),
            View::Stats => return,
        };
        if len == 0 {
            return;
        }
        let new = selected.saturating_add_signed(delta).min(len - 1);
        *selected = new;
    }

    /// Enter on a topic header toggles its collapse state
    pub fn toggle_collapse(&mut self) {
        if self.view != View::Topics {
            return;
        }
        let Some(TopicEntry::Header { topic, .. }) = self.topics_entries.get(self.topics_selected)
        else {
            return;
        };
        let topic = topic.clone();
        if !self.collapsed.remove(&topic) {
            self.collapsed.insert(topic);
        }
        self.rebuild_topics();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // ------------------------------------------------------------------
    // Celebration plumbing
    // ------------------------------------------------------------------

    /// Manual trigger (debug affordance), independent of progress state
    pub fn test_celebration(&mut self) {
        self.celebrate_requested = true;
    }

    /// Consumed by the event loop, which knows the drawing area
    pub fn take_celebration_request(&mut self) -> bool {
        std::mem::take(&mut self.celebrate_requested)
    }

    fn report_error(&mut self, message: String) {
        error!("{message}");
        self.overlay = Overlay::Error(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ProgressDb;
    use std::io::Write;

    fn dataset_json() -> &'static str {
        r#"[
            {
                "topic": "Arrays & Hashing",
                "items": [
                    {"id": "two-sum", "title": "Two Sum", "link": "https://x/ts", "difficulty": "Easy"},
                    {"id": "group-anagrams", "title": "Group Anagrams", "link": "https://x/ga", "difficulty": "Medium"}
                ]
            },
            {
                "topic": "Two Pointers",
                "items": [
                    {"id": "valid-palindrome", "title": "Valid Palindrome", "link": "https://x/vp", "difficulty": "Easy"}
                ]
            }
        ]"#
    }

    fn test_app() -> App {
        let sections: Vec<DatasetSection> = serde_json::from_str(dataset_json()).unwrap();
        let (problems, topics) = normalize(sections);
        let dataset = LoadedDataset {
            problems,
            topics,
            source: None,
            notice: None,
        };
        let store = ProgressStore::load(ProgressDb::open_in_memory().unwrap());
        App::new(dataset, store, true)
    }

    fn select_row(app: &mut App, id: &str) {
        let pos = app
            .topics_entries
            .iter()
            .position(|e| matches!(e, TopicEntry::Row(i) if app.problems[*i].id == id))
            .unwrap();
        app.topics_selected = pos;
    }

    #[test]
    fn test_initial_view_models() {
        let app = test_app();
        // 2 headers + 3 rows, all topics expanded
        assert_eq!(app.topics_entries.len(), 5);
        assert_eq!(app.table_rows.len(), 3);
        assert_eq!(app.stats.total, 3);
        assert_eq!(app.topic_filter_options, app.topics);
    }

    #[test]
    fn test_toggle_selected_marks_and_scores() {
        let mut app = test_app();
        select_row(&mut app, "two-sum");
        app.toggle_selected();

        assert!(app.store.is_done("two-sum"));
        assert_eq!(app.store.points(), 10.0);
        assert!(app.take_celebration_request());
        assert_eq!(app.stats.done, 1);

        // Toggle back: no celebration, counts drop
        select_row(&mut app, "two-sum");
        app.toggle_selected();
        assert!(!app.store.is_done("two-sum"));
        assert_eq!(app.store.points(), 0.0);
        assert!(!app.take_celebration_request());
        assert_eq!(app.stats.done, 0);
    }

    #[test]
    fn test_topics_header_shows_section_progress() {
        let mut app = test_app();
        select_row(&mut app, "two-sum");
        app.toggle_selected();

        match &app.topics_entries[0] {
            TopicEntry::Header {
                topic,
                done,
                total,
                percent,
                ..
            } => {
                assert_eq!(topic, "Arrays & Hashing");
                assert_eq!((*done, *total, *percent), (1, 2, 50));
            }
            other => panic!("expected header, got {:?}", other),
        }
    }

    #[test]
    fn test_toggle_on_header_is_noop() {
        let mut app = test_app();
        app.topics_selected = 0; // header line
        app.toggle_selected();
        assert_eq!(app.store.done_count(), 0);
    }

    #[test]
    fn test_collapse_hides_rows() {
        let mut app = test_app();
        app.topics_selected = 0;
        app.toggle_collapse();
        // First topic's two rows disappear
        assert_eq!(app.topics_entries.len(), 3);

        app.toggle_collapse();
        assert_eq!(app.topics_entries.len(), 5);
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let mut app = test_app();
        select_row(&mut app, "two-sum");
        app.toggle_selected();

        app.request_reset();
        assert_eq!(app.overlay, Overlay::ConfirmReset);
        // Still intact until confirmed
        assert_eq!(app.store.done_count(), 1);

        app.confirm_reset();
        assert_eq!(app.store.done_count(), 0);
        assert_eq!(app.store.points(), 0.0);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn test_filter_changes_affect_table_only() {
        let mut app = test_app();
        app.set_search("two".to_string());

        assert_eq!(app.table_rows.len(), 1);
        // Topics and stats views are untouched by filters
        assert_eq!(app.topics_entries.len(), 5);
        assert_eq!(app.stats.total, 3);
    }

    #[test]
    fn test_cycle_topic_filter_walks_options() {
        let mut app = test_app();
        app.cycle_topic_filter();
        assert_eq!(app.filters.topic.as_deref(), Some("Arrays & Hashing"));
        assert_eq!(app.table_rows.len(), 2);

        app.cycle_topic_filter();
        assert_eq!(app.filters.topic.as_deref(), Some("Two Pointers"));
        app.cycle_topic_filter();
        assert_eq!(app.filters.topic, None);
        assert_eq!(app.table_rows.len(), 3);
    }

    #[test]
    fn test_replace_dataset_keeps_progress_and_filter_options() {
        let mut app = test_app();
        select_row(&mut app, "two-sum");
        app.toggle_selected();

        let sections: Vec<DatasetSection> = serde_json::from_str(
            r#"[{"topic": "Stack", "items": [
                {"id": "valid-parentheses", "title": "Valid Parentheses", "link": "https://x/vpn", "difficulty": "Easy"}
            ]}]"#,
        )
        .unwrap();
        app.replace_dataset(sections);

        assert_eq!(app.topics, vec!["Stack"]);
        // Stale id stays in the done set and points are untouched
        assert!(app.store.is_done("two-sum"));
        assert_eq!(app.store.points(), 10.0);
        // ...but it no longer counts toward stats
        assert_eq!(app.stats.done, 0);
        assert_eq!(app.store.recompute_points(&app.problems), 0.0);
        // Topic filter options were populated once and stay as they were
        assert_eq!(
            app.topic_filter_options,
            vec!["Arrays & Hashing", "Two Pointers"]
        );
    }

    #[test]
    fn test_selected_link_follows_selection() {
        let mut app = test_app();

        // Header lines carry no link
        app.topics_selected = 0;
        assert_eq!(app.selected_link(), None);

        select_row(&mut app, "two-sum");
        assert_eq!(app.selected_link(), Some("https://x/ts"));

        // Table default sort is title ascending: Group Anagrams first
        app.view = View::Table;
        app.table_selected = 0;
        assert_eq!(app.selected_link(), Some("https://x/ga"));

        app.view = View::Stats;
        assert_eq!(app.selected_link(), None);
    }

    #[test]
    fn test_reload_reads_dataset_source_when_flagged() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"topic": "Arrays", "items": [
                {{"id": "two-sum", "title": "Two Sum", "link": "https://x/ts", "difficulty": "Easy"}}
            ]}}]"#
        )
        .unwrap();

        let dataset = dataset::load(Some(file.path()));
        let store = ProgressStore::load(ProgressDb::open_in_memory().unwrap());
        let mut app = App::new(dataset, store, true);
        assert_eq!(app.topics, vec!["Arrays"]);

        std::fs::write(
            file.path(),
            r#"[{"topic": "Stack", "items": [
                {"id": "min-stack", "title": "Min Stack", "link": "https://x/ms", "difficulty": "Medium"}
            ]}]"#,
        )
        .unwrap();

        // Nothing reloads until the watcher flags the file
        app.reload_dataset_if_needed();
        assert_eq!(app.topics, vec!["Arrays"]);

        *app.dataset_needs_reload.lock().unwrap() = true;
        app.reload_dataset_if_needed();
        assert_eq!(app.topics, vec!["Stack"]);
        assert_eq!(app.problems[0].id, "min-stack");
        // Consumed: a second pass does not re-read
        assert!(!*app.dataset_needs_reload.lock().unwrap());
    }

    #[test]
    fn test_import_snapshot_file() {
        let mut app = test_app();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"done": ["two-sum"], "points": 10}}"#).unwrap();

        app.import_from_path(&file.path().display().to_string());
        assert!(app.store.is_done("two-sum"));
        assert_eq!(app.store.points(), 10.0);
        assert_eq!(app.stats.done, 1);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn test_import_dataset_file() {
        let mut app = test_app();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"topic": "Stack", "items": [
                {{"id": "min-stack", "title": "Min Stack", "link": "https://x/ms", "difficulty": "Medium"}}
            ]}}]"#
        )
        .unwrap();

        app.import_from_path(&file.path().display().to_string());
        assert_eq!(app.topics, vec!["Stack"]);
        assert!(matches!(app.overlay, Overlay::Info(_)));
    }

    #[test]
    fn test_import_malformed_file_leaves_state() {
        let mut app = test_app();
        select_row(&mut app, "two-sum");
        app.toggle_selected();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        app.import_from_path(&file.path().display().to_string());

        assert!(matches!(app.overlay, Overlay::Error(_)));
        assert!(app.store.is_done("two-sum"));
        assert_eq!(app.store.points(), 10.0);
    }

    #[test]
    fn test_import_missing_file_reports_error() {
        let mut app = test_app();
        app.import_from_path("/nonexistent/progress.json");
        assert!(matches!(app.overlay, Overlay::Error(_)));
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = test_app();
        app.view = View::Table;
        app.move_selection(100);
        assert_eq!(app.table_selected, app.table_rows.len() - 1);
        app.move_selection(-100);
        assert_eq!(app.table_selected, 0);

        // Filtering down clamps the selection
        app.move_selection(100);
        app.set_search("two".to_string());
        assert_eq!(app.table_selected, 0);
    }

    #[test]
    fn test_test_celebration_request() {
        let mut app = test_app();
        app.test_celebration();
        assert!(app.take_celebration_request());
        assert!(!app.take_celebration_request());
    }
}
