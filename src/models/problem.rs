//! Problem and dataset data structures
//!
//! This module contains the core data structures for loading and working with
//! topic-grouped problem list files (problems.json).

use serde::Deserialize;

/// Problem difficulty tier - determines point value and badge styling
///
/// The wire format is a plain string. `Easy`/`Medium`/`Hard` are recognized;
/// anything else is preserved as `Other` and scores zero points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Other(String),
}

// Custom deserializer so unrecognized difficulty strings are accepted
// instead of failing the whole dataset.
impl<'de> serde::Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct DifficultyVisitor;

        impl<'de> Visitor<'de> for DifficultyVisitor {
            type Value = Difficulty;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a difficulty string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Difficulty::from_label(value))
            }
        }

        deserializer.deserialize_str(DifficultyVisitor)
    }
}

impl Difficulty {
    /// The three recognized tiers, in rank order
    pub const TIERS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn from_label(label: &str) -> Self {
        match label {
            "Easy" => Difficulty::Easy,
            "Medium" => Difficulty::Medium,
            "Hard" => Difficulty::Hard,
            other => Difficulty::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Other(s) => s,
        }
    }

    /// Point value awarded when a problem of this tier is marked done.
    /// Unknown tiers score zero rather than failing.
    pub fn points(&self) -> f64 {
        match self {
            Difficulty::Easy => 10.0,
            Difficulty::Medium => 20.0,
            Difficulty::Hard => 30.0,
            Difficulty::Other(_) => 0.0,
        }
    }

    /// Ordinal for sorting: Easy < Medium < Hard, unknown tiers last
    pub fn rank(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Other(_) => 4,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One trackable practice problem
///
/// `topic` is denormalized from the section grouping during `normalize` so
/// the flat list carries everything the views need.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub id: String,
    pub title: String,
    pub link: String,
    pub difficulty: Difficulty,
    pub topic: String,
}

/// One item as it appears inside a dataset section
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatasetItem {
    pub id: String,
    pub title: String,
    pub link: String,
    pub difficulty: Difficulty,
}

/// One section of the dataset file: a topic name plus its problems, in order
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatasetSection {
    pub topic: String,
    pub items: Vec<DatasetItem>,
}

/// Flatten a topic-grouped dataset into the problem list and the ordered
/// topic-name list. Item order within each topic and topic order across the
/// file are both preserved.
pub fn normalize(sections: Vec<DatasetSection>) -> (Vec<Problem>, Vec<String>) {
    let topics: Vec<String> = sections.iter().map(|s| s.topic.clone()).collect();
    let problems: Vec<Problem> = sections
        .into_iter()
        .flat_map(|section| {
            let topic = section.topic;
            section
                .items
                .into_iter()
                .map(move |item| Problem {
                    id: item.id,
                    title: item.title,
                    link: item.link,
                    difficulty: item.difficulty,
                    topic: topic.clone(),
                })
        })
        .collect();
    (problems, topics)
}
