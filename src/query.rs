//! Pure projections from (dataset, progress) to view models.
//!
//! Everything in this module is free of terminal concerns so the filter,
//! sort, and aggregation logic can be tested without a UI. Counts are
//! recomputed from the done set on every call; for list sizes in the
//! hundreds this is cheap enough for interactive use.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{Difficulty, Problem, SortDir, SortKey, StatusFilter};

/// Active filters for the all-problems table. All predicates are optional
/// and conjunctive.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    /// Case-insensitive substring match on the title
    pub search: String,
    /// Exact topic match
    pub topic: Option<String>,
    /// Exact difficulty match
    pub difficulty: Option<Difficulty>,
    /// Done/todo match
    pub status: Option<StatusFilter>,
}

impl Filters {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || self.topic.is_some()
            || self.difficulty.is_some()
            || self.status.is_some()
    }

    pub fn clear(&mut self) {
        *self = Filters::default();
    }

    fn matches(&self, problem: &Problem, done: &HashSet<String>) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty() && !problem.title.to_lowercase().contains(&search) {
            return false;
        }
        if let Some(topic) = &self.topic {
            if &problem.topic != topic {
                return false;
            }
        }
        if let Some(difficulty) = &self.difficulty {
            if &problem.difficulty != difficulty {
                return false;
            }
        }
        match self.status {
            Some(StatusFilter::Done) if !done.contains(&problem.id) => return false,
            Some(StatusFilter::Todo) if done.contains(&problem.id) => return false,
            _ => {}
        }
        true
    }
}

fn directed(ord: Ordering, dir: SortDir) -> Ordering {
    match dir {
        SortDir::Asc => ord,
        SortDir::Desc => ord.reverse(),
    }
}

/// Filter and sort the flat problem list for the all-problems table.
/// Topic and difficulty sorts tie-break on title ascending.
pub fn table_rows<'a>(
    problems: &'a [Problem],
    done: &HashSet<String>,
    filters: &Filters,
    key: SortKey,
    dir: SortDir,
) -> Vec<&'a Problem> {
    let mut rows: Vec<&Problem> = problems.iter().filter(|p| filters.matches(p, done)).collect();
    rows.sort_by(|a, b| match key {
        SortKey::Title => directed(a.title.cmp(&b.title), dir),
        SortKey::Topic => {
            directed(a.topic.cmp(&b.topic), dir).then_with(|| a.title.cmp(&b.title))
        }
        SortKey::Difficulty => directed(a.difficulty.rank().cmp(&b.difficulty.rank()), dir)
            .then_with(|| a.title.cmp(&b.title)),
    });
    rows
}

/// One topic group for the topics view
#[derive(Debug)]
pub struct TopicSection<'a> {
    pub topic: &'a str,
    /// Problems in dataset order
    pub rows: Vec<&'a Problem>,
    pub done_count: usize,
    pub percent: u8,
}

/// Group problems by topic, in dataset topic order. Topics without problems
/// are skipped here (they still show up as 0/0 in the stats view).
pub fn topic_sections<'a>(
    problems: &'a [Problem],
    topics: &'a [String],
    done: &HashSet<String>,
) -> Vec<TopicSection<'a>> {
    topics
        .iter()
        .filter_map(|topic| {
            let rows: Vec<&Problem> = problems.iter().filter(|p| &p.topic == topic).collect();
            if rows.is_empty() {
                return None;
            }
            let done_count = rows.iter().filter(|p| done.contains(&p.id)).count();
            let percent = percent_of(done_count, rows.len());
            Some(TopicSection {
                topic,
                rows,
                done_count,
                percent,
            })
        })
        .collect()
}

/// One done/total line in a stats breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub label: String,
    pub done: usize,
    pub total: usize,
}

/// Aggregate statistics over the whole dataset
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    pub done: usize,
    pub total: usize,
    pub percent: u8,
    pub by_difficulty: Vec<Breakdown>,
    pub by_topic: Vec<Breakdown>,
}

pub fn stats(problems: &[Problem], topics: &[String], done: &HashSet<String>) -> StatsSummary {
    let done_count = problems.iter().filter(|p| done.contains(&p.id)).count();

    let by_difficulty = Difficulty::TIERS
        .iter()
        .map(|tier| {
            let of_tier: Vec<&Problem> =
                problems.iter().filter(|p| &p.difficulty == tier).collect();
            Breakdown {
                label: tier.label().to_string(),
                done: of_tier.iter().filter(|p| done.contains(&p.id)).count(),
                total: of_tier.len(),
            }
        })
        .collect();

    let by_topic = topics
        .iter()
        .map(|topic| {
            let of_topic: Vec<&Problem> = problems.iter().filter(|p| &p.topic == topic).collect();
            Breakdown {
                label: topic.clone(),
                done: of_topic.iter().filter(|p| done.contains(&p.id)).count(),
                total: of_topic.len(),
            }
        })
        .collect();

    StatsSummary {
        done: done_count,
        total: problems.len(),
        percent: percent_of(done_count, problems.len()),
        by_difficulty,
        by_topic,
    }
}

/// `round(100 * done / total)`, zero when total is zero
pub fn percent_of(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((done as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(id: &str, title: &str, topic: &str, difficulty: Difficulty) -> Problem {
        Problem {
            id: id.to_string(),
            title: title.to_string(),
            link: format!("https://example.com/{id}"),
            difficulty,
            topic: topic.to_string(),
        }
    }

    fn sample() -> (Vec<Problem>, Vec<String>) {
        let problems = vec![
            problem("two-sum", "Two Sum", "Arrays & Hashing", Difficulty::Easy),
            problem("group-anagrams", "Group Anagrams", "Arrays & Hashing", Difficulty::Medium),
            problem("valid-palindrome", "Valid Palindrome", "Two Pointers", Difficulty::Easy),
            problem("trap-water", "Trapping Rain Water", "Two Pointers", Difficulty::Hard),
        ];
        let topics = vec!["Arrays & Hashing".to_string(), "Two Pointers".to_string()];
        (problems, topics)
    }

    fn done_of(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_sort_is_title_ascending() {
        let (problems, _) = sample();
        let rows = table_rows(
            &problems,
            &HashSet::new(),
            &Filters::default(),
            SortKey::default(),
            SortDir::default(),
        );
        let titles: Vec<&str> = rows.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Group Anagrams", "Trapping Rain Water", "Two Sum", "Valid Palindrome"]
        );
    }

    #[test]
    fn test_search_filter_case_insensitive() {
        let (problems, _) = sample();
        let filters = Filters {
            search: "two".to_string(),
            ..Filters::default()
        };
        let rows = table_rows(
            &problems,
            &HashSet::new(),
            &filters,
            SortKey::Title,
            SortDir::Asc,
        );
        let ids: Vec<&str> = rows.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["two-sum"]);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let (problems, _) = sample();
        let done = done_of(&["two-sum"]);

        let both = Filters {
            search: "two".to_string(),
            difficulty: Some(Difficulty::Easy),
            ..Filters::default()
        };
        let combined: HashSet<&str> = table_rows(&problems, &done, &both, SortKey::Title, SortDir::Asc)
            .iter()
            .map(|p| p.id.as_str())
            .collect();

        // Same set as intersecting the two predicates applied independently
        let search_only = Filters {
            search: "two".to_string(),
            ..Filters::default()
        };
        let diff_only = Filters {
            difficulty: Some(Difficulty::Easy),
            ..Filters::default()
        };
        let a: HashSet<&str> = table_rows(&problems, &done, &search_only, SortKey::Title, SortDir::Asc)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        let b: HashSet<&str> = table_rows(&problems, &done, &diff_only, SortKey::Title, SortDir::Asc)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        let expected: HashSet<&str> = a.intersection(&b).copied().collect();

        assert_eq!(combined, expected);
    }

    #[test]
    fn test_status_filter() {
        let (problems, _) = sample();
        let done = done_of(&["two-sum", "trap-water"]);

        let done_filter = Filters {
            status: Some(StatusFilter::Done),
            ..Filters::default()
        };
        let rows = table_rows(&problems, &done, &done_filter, SortKey::Title, SortDir::Asc);
        assert_eq!(rows.len(), 2);

        let todo_filter = Filters {
            status: Some(StatusFilter::Todo),
            ..Filters::default()
        };
        let rows = table_rows(&problems, &done, &todo_filter, SortKey::Title, SortDir::Asc);
        let ids: Vec<&str> = rows.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["group-anagrams", "valid-palindrome"]);
    }

    #[test]
    fn test_topic_sort_ties_break_on_title() {
        let (problems, _) = sample();
        let rows = table_rows(
            &problems,
            &HashSet::new(),
            &Filters::default(),
            SortKey::Topic,
            SortDir::Asc,
        );
        let ids: Vec<&str> = rows.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["group-anagrams", "two-sum", "trap-water", "valid-palindrome"]
        );
    }

    #[test]
    fn test_difficulty_sort_orders_tiers() {
        let (problems, _) = sample();
        let rows = table_rows(
            &problems,
            &HashSet::new(),
            &Filters::default(),
            SortKey::Difficulty,
            SortDir::Asc,
        );
        let ranks: Vec<u8> = rows.iter().map(|p| p.difficulty.rank()).collect();
        assert_eq!(ranks, vec![1, 1, 2, 3]);

        let rows = table_rows(
            &problems,
            &HashSet::new(),
            &Filters::default(),
            SortKey::Difficulty,
            SortDir::Desc,
        );
        assert_eq!(rows[0].id, "trap-water");
        // Equal-rank rows still come out title-ascending
        let easy_titles: Vec<&str> = rows
            .iter()
            .filter(|p| p.difficulty == Difficulty::Easy)
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(easy_titles, vec!["Two Sum", "Valid Palindrome"]);
    }

    #[test]
    fn test_topic_sections_counts_and_percent() {
        let (problems, topics) = sample();
        let done = done_of(&["two-sum"]);

        let sections = topic_sections(&problems, &topics, &done);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].topic, "Arrays & Hashing");
        assert_eq!(sections[0].done_count, 1);
        assert_eq!(sections[0].rows.len(), 2);
        assert_eq!(sections[0].percent, 50);
        assert_eq!(sections[1].done_count, 0);
        assert_eq!(sections[1].percent, 0);
    }

    #[test]
    fn test_single_problem_topic_full_percent() {
        let problems = vec![problem("two-sum", "Two Sum", "Arrays", Difficulty::Easy)];
        let topics = vec!["Arrays".to_string()];
        let done = done_of(&["two-sum"]);

        let sections = topic_sections(&problems, &topics, &done);
        assert_eq!(sections[0].done_count, 1);
        assert_eq!(sections[0].rows.len(), 1);
        assert_eq!(sections[0].percent, 100);
    }

    #[test]
    fn test_topic_sections_skip_empty_topics() {
        let (problems, mut topics) = sample();
        topics.push("Graphs".to_string());

        let sections = topic_sections(&problems, &topics, &HashSet::new());
        assert!(sections.iter().all(|s| s.topic != "Graphs"));
    }

    #[test]
    fn test_stats_breakdowns() {
        let (problems, mut topics) = sample();
        topics.push("Graphs".to_string());
        let done = done_of(&["two-sum", "valid-palindrome"]);

        let summary = stats(&problems, &topics, &done);
        assert_eq!(summary.done, 2);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.percent, 50);

        assert_eq!(summary.by_difficulty.len(), 3);
        assert_eq!(summary.by_difficulty[0], Breakdown { label: "Easy".to_string(), done: 2, total: 2 });
        assert_eq!(summary.by_difficulty[1], Breakdown { label: "Medium".to_string(), done: 0, total: 1 });
        assert_eq!(summary.by_difficulty[2], Breakdown { label: "Hard".to_string(), done: 0, total: 1 });

        // Topic breakdown follows dataset order and keeps empty topics as 0/0
        assert_eq!(summary.by_topic.len(), 3);
        assert_eq!(summary.by_topic[2], Breakdown { label: "Graphs".to_string(), done: 0, total: 0 });
    }

    #[test]
    fn test_stats_ignore_stale_done_ids() {
        let (problems, topics) = sample();
        let done = done_of(&["two-sum", "not-in-dataset"]);

        let summary = stats(&problems, &topics, &done);
        assert_eq!(summary.done, 1);
    }

    #[test]
    fn test_percent_of_rounding_and_zero_total() {
        assert_eq!(percent_of(0, 0), 0);
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 67);
        assert_eq!(percent_of(3, 3), 100);
    }
}
