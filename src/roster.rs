//! Roster model: student records and the in-memory roster that owns them.
//!
//! The roster is an ordered list unique by [`StudentId`]. Order is insertion
//! order and carries no ranking; table views sort a borrowed copy via
//! [`Roster::sorted`]. The only mutations are whole-roster replacement
//! (import, demo), appending a student, and updating one student's scores.

#[cfg(test)]
#[path = "roster_test.rs"]
mod roster_test;

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::avatar::AvatarGenerator;
use crate::sort::{SortSpec, sort_students};

/// Stable identifier for a student (the `massar_numbr` column).
pub type StudentId = i64;

/// A student's two chart scores.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scores {
    /// Horizontal axis score.
    pub x: f64,
    /// Vertical axis score.
    pub y: f64,
}

impl Scores {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rounded average of the two scores.
    #[must_use]
    pub fn mean(&self) -> f64 {
        ((self.x + self.y) / 2.0).round()
    }
}

/// One student on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub photo_url: String,
    pub scores: Scores,
}

impl Student {
    /// Derived mean score. Always computed from the live scores.
    #[must_use]
    pub fn mean_score(&self) -> f64 {
        self.scores.mean()
    }
}

/// Ordered collection of students, unique by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self { students: Vec::new() }
    }

    /// Build a roster from `students`, reassigning any repeated id.
    #[must_use]
    pub fn from_students(students: Vec<Student>) -> Self {
        let mut roster = Self::new();
        roster.replace(students);
        roster
    }

    /// Initial roster: `count` students named `Student 1..=count` with
    /// integer scores drawn uniformly from `[10, 20]`.
    pub fn demo<R: Rng>(count: usize, rng: &mut R, avatars: &AvatarGenerator) -> Self {
        let students = (1..=count)
            .map(|i| {
                let name = format!("Student {i}");
                let x = f64::from(rng.random_range(10_u8..=20));
                let y = f64::from(rng.random_range(10_u8..=20));
                Student {
                    id: StudentId::try_from(i).unwrap_or(StudentId::MAX),
                    photo_url: avatars.url(&name),
                    name,
                    scores: Scores::new(x, y),
                }
            })
            .collect();
        Self { students }
    }

    /// All students in roster order.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Look up a student by id.
    #[must_use]
    pub fn get(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Replace every student at once. Returns the new roster size.
    ///
    /// Ids must be unique; a repeated id keeps its first holder and later
    /// holders are moved to fresh ids above the current maximum.
    pub fn replace(&mut self, mut students: Vec<Student>) -> usize {
        ensure_unique_ids(&mut students);
        self.students = students;
        self.students.len()
    }

    /// Set one student's scores. Returns false if no student has `id`.
    pub fn update_scores(&mut self, id: StudentId, scores: Scores) -> bool {
        let Some(student) = self.students.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        student.scores = scores;
        true
    }

    /// Append a student with zero scores, returning its new id.
    ///
    /// A blank `photo_url` falls back to an avatar seeded by `name`.
    pub fn add(&mut self, name: &str, photo_url: Option<&str>, avatars: &AvatarGenerator) -> StudentId {
        let id = self.next_id();
        let photo_url = match photo_url.map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => avatars.url(name),
        };
        self.students.push(Student { id, name: name.to_string(), photo_url, scores: Scores::default() });
        id
    }

    /// One above the largest id in use, or 1 for an empty roster. Once the
    /// largest possible id is taken, the smallest unused positive id.
    #[must_use]
    pub fn next_id(&self) -> StudentId {
        IdAllocator::new(self.students.iter().map(|s| s.id)).allocate()
    }

    /// Students ordered by `spec`; roster order when `spec` is `None`.
    #[must_use]
    pub fn sorted(&self, spec: Option<SortSpec>) -> Vec<&Student> {
        sort_students(&self.students, spec)
    }
}

/// Hands out ids not already present in a set of taken ids.
///
/// Counts up from one above the largest taken id. When that runs off the top
/// of the range it wraps to 1 and continues with the smallest unused positive id.
#[derive(Debug, Clone)]
pub(crate) struct IdAllocator {
    taken: HashSet<StudentId>,
    cursor: StudentId,
}

impl IdAllocator {
    pub(crate) fn new(ids: impl IntoIterator<Item = StudentId>) -> Self {
        let taken: HashSet<StudentId> = ids.into_iter().collect();
        let cursor = taken.iter().max().map_or(1, |&max| max.max(0).checked_add(1).unwrap_or(1));
        Self { taken, cursor }
    }

    /// Reserve and return the next free id.
    pub(crate) fn allocate(&mut self) -> StudentId {
        while self.taken.contains(&self.cursor) {
            self.cursor = self.cursor.checked_add(1).unwrap_or(1);
        }
        let id = self.cursor;
        self.taken.insert(id);
        id
    }
}

fn ensure_unique_ids(students: &mut [Student]) {
    let mut ids = IdAllocator::new(students.iter().map(|s| s.id));
    let mut seen = HashSet::with_capacity(students.len());
    for student in students.iter_mut() {
        if !seen.insert(student.id) {
            let new_id = ids.allocate();
            tracing::warn!(id = student.id, new_id, name = %student.name, "duplicate student id reassigned");
            student.id = new_id;
            seen.insert(new_id);
        }
    }
}
