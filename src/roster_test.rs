#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::sort::{SortDirection, SortKey};

fn student(id: StudentId, name: &str, x: f64, y: f64) -> Student {
    Student { id, name: name.into(), photo_url: format!("https://img.example.test/{id}.png"), scores: Scores::new(x, y) }
}

// =============================================================
// Scores / Student
// =============================================================

#[test]
fn mean_is_rounded_average() {
    assert_eq!(Scores::new(15.0, 16.0).mean(), 16.0);
    assert_eq!(Scores::new(12.0, 14.0).mean(), 13.0);
    assert_eq!(Scores::new(10.2, 10.2).mean(), 10.0);
    assert_eq!(Scores::default().mean(), 0.0);
}

#[test]
fn mean_tracks_score_updates() {
    let mut roster = Roster::from_students(vec![student(1, "Ann", 10.0, 10.0)]);
    assert!(roster.update_scores(1, Scores::new(18.0, 20.0)));
    assert_eq!(roster.get(1).unwrap().mean_score(), 19.0);
}

#[test]
fn student_serializes_to_json() {
    let json = serde_json::to_value(student(7, "Gus", 12.0, 13.5)).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "Gus");
    assert_eq!(json["scores"]["y"], 13.5);
}

// =============================================================
// Roster basics
// =============================================================

#[test]
fn new_roster_is_empty() {
    let roster = Roster::new();
    assert!(roster.is_empty());
    assert_eq!(roster.len(), 0);
    assert_eq!(roster.next_id(), 1);
}

#[test]
fn get_finds_by_id() {
    let roster = Roster::from_students(vec![student(3, "Cy", 11.0, 12.0), student(9, "Di", 13.0, 14.0)]);
    assert_eq!(roster.get(9).unwrap().name, "Di");
    assert!(roster.get(4).is_none());
}

#[test]
fn update_scores_unknown_id_is_rejected() {
    let mut roster = Roster::from_students(vec![student(1, "Ann", 10.0, 10.0)]);
    assert!(!roster.update_scores(2, Scores::new(20.0, 20.0)));
    assert_eq!(roster.get(1).unwrap().scores, Scores::new(10.0, 10.0));
}

#[test]
fn replace_swaps_every_student() {
    let mut roster = Roster::from_students(vec![student(1, "Ann", 10.0, 10.0)]);
    let count = roster.replace(vec![student(5, "Eve", 11.0, 11.0), student(6, "Fay", 12.0, 12.0)]);
    assert_eq!(count, 2);
    assert!(roster.get(1).is_none());
    assert_eq!(roster.students()[0].name, "Eve");
}

#[test]
fn replace_reassigns_repeated_ids() {
    let mut roster = Roster::new();
    roster.replace(vec![student(4, "A", 10.0, 10.0), student(4, "B", 10.0, 10.0), student(2, "C", 10.0, 10.0)]);
    let ids: Vec<StudentId> = roster.students().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![4, 5, 2]);
}

// =============================================================
// add / next_id
// =============================================================

#[test]
fn add_uses_next_id_and_zero_scores() {
    let avatars = AvatarGenerator::default();
    let mut roster = Roster::from_students(vec![student(3, "Cy", 11.0, 12.0), student(8, "Hal", 13.0, 14.0)]);
    let id = roster.add("Ivy", None, &avatars);
    assert_eq!(id, 9);
    let ivy = roster.get(9).unwrap();
    assert_eq!(ivy.scores, Scores::default());
    assert_eq!(ivy.mean_score(), 0.0);
    assert_eq!(ivy.photo_url, avatars.url("Ivy"));
}

#[test]
fn add_keeps_supplied_photo() {
    let avatars = AvatarGenerator::default();
    let mut roster = Roster::new();
    let id = roster.add("Jo", Some("https://img.example.test/jo.png"), &avatars);
    assert_eq!(id, 1);
    assert_eq!(roster.get(1).unwrap().photo_url, "https://img.example.test/jo.png");
}

#[test]
fn add_treats_blank_photo_as_missing() {
    let avatars = AvatarGenerator::default();
    let mut roster = Roster::new();
    roster.add("Kim", Some("   "), &avatars);
    assert_eq!(roster.get(1).unwrap().photo_url, avatars.url("Kim"));
}

#[test]
fn add_after_largest_possible_id_stays_unique() {
    let avatars = AvatarGenerator::default();
    let mut roster = Roster::from_students(vec![student(StudentId::MAX, "Top", 10.0, 10.0), student(1, "One", 10.0, 10.0)]);
    let first = roster.add("Cy", None, &avatars);
    let second = roster.add("Di", None, &avatars);
    assert_eq!((first, second), (2, 3));
    assert_eq!(roster.get(StudentId::MAX).unwrap().name, "Top");
    assert_eq!(roster.get(2).unwrap().name, "Cy");
}

#[test]
fn replace_reassigns_repeated_largest_id() {
    let mut roster = Roster::new();
    roster.replace(vec![student(StudentId::MAX, "A", 10.0, 10.0), student(StudentId::MAX, "B", 10.0, 10.0)]);
    let ids: Vec<StudentId> = roster.students().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![StudentId::MAX, 1]);
    assert!(roster.update_scores(1, Scores::new(19.0, 18.0)));
    assert_eq!(roster.get(StudentId::MAX).unwrap().scores, Scores::new(10.0, 10.0));
}

#[test]
fn next_id_ignores_negative_ids() {
    let roster = Roster::from_students(vec![student(-5, "Neg", 10.0, 10.0)]);
    assert_eq!(roster.next_id(), 1);
}

// =============================================================
// demo
// =============================================================

#[test]
fn demo_roster_has_sequential_ids_and_scores_in_domain() {
    let mut rng = StdRng::seed_from_u64(7);
    let roster = Roster::demo(20, &mut rng, &AvatarGenerator::default());
    assert_eq!(roster.len(), 20);
    for (i, s) in roster.students().iter().enumerate() {
        assert_eq!(s.id, StudentId::try_from(i + 1).unwrap());
        assert_eq!(s.name, format!("Student {}", i + 1));
        assert!((10.0..=20.0).contains(&s.scores.x));
        assert!((10.0..=20.0).contains(&s.scores.y));
        assert_eq!(s.scores.x.fract(), 0.0);
    }
}

#[test]
fn demo_roster_is_deterministic_for_a_seed() {
    let avatars = AvatarGenerator::default();
    let a = Roster::demo(5, &mut StdRng::seed_from_u64(42), &avatars);
    let b = Roster::demo(5, &mut StdRng::seed_from_u64(42), &avatars);
    assert_eq!(a, b);
}

// =============================================================
// sorted
// =============================================================

#[test]
fn sorted_without_spec_keeps_roster_order() {
    let roster = Roster::from_students(vec![student(2, "Bo", 10.0, 19.0), student(1, "Al", 10.0, 11.0)]);
    let names: Vec<&str> = roster.sorted(None).iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Bo", "Al"]);
}

#[test]
fn sorted_does_not_reorder_roster() {
    let roster = Roster::from_students(vec![student(2, "Bo", 10.0, 19.0), student(1, "Al", 10.0, 11.0)]);
    let spec = SortSpec::new(SortKey::Id, SortDirection::Asc);
    assert_eq!(roster.sorted(Some(spec))[0].id, 1);
    assert_eq!(roster.students()[0].id, 2);
}
