//! Table sort state: which column is active and in which direction.

#[cfg(test)]
#[path = "sort_test.rs"]
mod sort_test;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::roster::Student;

/// Column a table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Id,
    Name,
    /// The vertical-axis score, which is the score the table displays.
    Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Spec after the user clicks the `key` column header.
    ///
    /// Clicking the column already sorted ascending flips it to descending;
    /// anything else sorts `key` ascending.
    #[must_use]
    pub fn request(current: Option<Self>, key: SortKey) -> Self {
        let direction = match current {
            Some(spec) if spec.key == key && spec.direction == SortDirection::Asc => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Self { key, direction }
    }

    /// Header glyph for `key` under `current`.
    #[must_use]
    pub fn indicator(current: Option<Self>, key: SortKey) -> &'static str {
        match current {
            Some(spec) if spec.key == key => match spec.direction {
                SortDirection::Asc => "↑",
                SortDirection::Desc => "↓",
            },
            _ => "↕",
        }
    }

    fn compare(self, a: &Student, b: &Student) -> Ordering {
        let ord = match self.key {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Score => a.scores.y.total_cmp(&b.scores.y),
        };
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Borrowed view of `students` in `spec` order. Stable; `None` keeps input order.
#[must_use]
pub fn sort_students(students: &[Student], spec: Option<SortSpec>) -> Vec<&Student> {
    let mut sorted: Vec<&Student> = students.iter().collect();
    if let Some(spec) = spec {
        sorted.sort_by(|a, b| spec.compare(a, b));
    }
    sorted
}
