#![allow(clippy::float_cmp)]

use super::*;
use crate::roster::Roster;

fn avatars() -> AvatarGenerator {
    AvatarGenerator::default()
}

fn student(id: StudentId, name: &str, photo: &str, x: f64, y: f64) -> Student {
    Student { id, name: name.into(), photo_url: photo.into(), scores: Scores::new(x, y) }
}

// =============================================================
// Header validation
// =============================================================

#[test]
fn missing_name_header_is_rejected() {
    let err = import("massar_numbr,x_score,y_score\n1,12,14", &avatars()).unwrap_err();
    assert_eq!(err, CodecError::MissingFields { fields: vec!["name".into()] });
    assert_eq!(err.to_string(), "missing required fields: name");
}

#[test]
fn empty_text_is_rejected() {
    assert!(import("", &avatars()).is_err());
}

#[test]
fn headers_are_trimmed_and_case_insensitive() {
    let students = import(" NAME , X_Score ,Y_SCORE\nAlice,12,17", &avatars()).unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].name, "Alice");
    assert_eq!(students[0].scores, Scores::new(12.0, 17.0));
}

#[test]
fn header_only_yields_empty_roster() {
    let students = import("massar_numbr,name\n", &avatars()).unwrap();
    assert!(students.is_empty());
}

// =============================================================
// Row defaults
// =============================================================

#[test]
fn name_only_row_gets_defaults() {
    let students = import("name\nAlice", &avatars()).unwrap();
    assert_eq!(students.len(), 1);
    let alice = &students[0];
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.scores, Scores::new(0.0, 0.0));
    assert_eq!(alice.mean_score(), 0.0);
    assert_eq!(alice.id, 1);
    assert_eq!(alice.photo_url, avatars().url("Alice"));
}

#[test]
fn unparseable_scores_default_to_zero() {
    let students = import("name,x_score,y_score\nBob,abc,\nCy,NaN,13", &avatars()).unwrap();
    assert_eq!(students[0].scores, Scores::new(0.0, 0.0));
    assert_eq!(students[1].scores, Scores::new(0.0, 13.0));
}

#[test]
fn fractional_scores_are_kept() {
    let students = import("name,x_score,y_score\nDee,15.25,11.5", &avatars()).unwrap();
    assert_eq!(students[0].scores, Scores::new(15.25, 11.5));
}

#[test]
fn short_rows_fill_missing_columns() {
    let students = import("massar_numbr,name,photo,x_score,y_score\n4,Eve", &avatars()).unwrap();
    assert_eq!(students[0].id, 4);
    assert_eq!(students[0].scores, Scores::default());
    assert_eq!(students[0].photo_url, avatars().url("Eve"));
}

#[test]
fn blank_name_becomes_unknown() {
    let students = import("massar_numbr,name,x_score\n3,,12", &avatars()).unwrap();
    assert_eq!(students[0].name, "Unknown");
    assert_eq!(students[0].photo_url, avatars().url("Unknown"));
}

#[test]
fn mean_column_is_ignored() {
    let students = import("name,x_score,y_score,mean_score\nFay,12,14,99", &avatars()).unwrap();
    assert_eq!(students[0].mean_score(), 13.0);
}

#[test]
fn blank_lines_and_crlf_are_skipped() {
    let text = "name,x_score\r\nGus,11\r\n\r\n   \r\nHal,12\r\n";
    let students = import(text, &avatars()).unwrap();
    let names: Vec<&str> = students.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Gus", "Hal"]);
}

#[test]
fn supplied_photo_is_kept() {
    let students = import("name,photo\nIvy,https://img.example.test/ivy.png", &avatars()).unwrap();
    assert_eq!(students[0].photo_url, "https://img.example.test/ivy.png");
}

// =============================================================
// Ids
// =============================================================

#[test]
fn massar_numbr_column_supplies_ids() {
    let students = import("massar_numbr,name\n17,Jo\n4,Kim", &avatars()).unwrap();
    assert_eq!(students[0].id, 17);
    assert_eq!(students[1].id, 4);
}

#[test]
fn id_column_is_accepted_when_massar_numbr_absent() {
    let students = import("id,name\n8,Lu", &avatars()).unwrap();
    assert_eq!(students[0].id, 8);
}

#[test]
fn massar_numbr_wins_over_id() {
    let students = import("id,massar_numbr,name\n8,21,Mo", &avatars()).unwrap();
    assert_eq!(students[0].id, 21);
}

#[test]
fn placeholder_ids_start_above_explicit_ids() {
    let students = import("massar_numbr,name\n,Ned\n7,Ola\nx,Pam", &avatars()).unwrap();
    let ids: Vec<StudentId> = students.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![8, 7, 9]);
}

#[test]
fn placeholder_ids_wrap_below_largest_possible_id() {
    let text = format!("massar_numbr,name\n{},Abe\n,Bo\n1,Cal\n,Dee", StudentId::MAX);
    let students = import(&text, &avatars()).unwrap();
    let ids: Vec<StudentId> = students.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![StudentId::MAX, 2, 1, 3]);

    let mut roster = Roster::from_students(students);
    let added = roster.add("Eve", None, &avatars());
    assert_eq!(added, 4);
    let mut unique = roster.students().iter().map(|s| s.id).collect::<Vec<_>>();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), roster.len());
}

#[test]
fn parse_rows_reports_missing_fields_as_none() {
    let rows = parse_rows("massar_numbr,name,x_score\n,Quin,oops").unwrap();
    assert_eq!(
        rows,
        vec![CsvRow { id: None, name: Some("Quin".into()), photo: None, x_score: None, y_score: None }]
    );
}

// =============================================================
// Export
// =============================================================

#[test]
fn export_writes_header_and_rows_in_order() {
    let students = vec![
        student(1, "Ann", "https://img.example.test/1.png", 12.0, 15.0),
        student(2, "Ben", "https://img.example.test/2.png", 20.0, 10.0),
    ];
    let csv = export(&students);
    assert_eq!(
        csv,
        "massar_numbr,name,photo,x_score,y_score,mean_score\n\
         1,Ann,https://img.example.test/1.png,12,15,14\n\
         2,Ben,https://img.example.test/2.png,20,10,15"
    );
}

#[test]
fn export_of_empty_roster_is_header_only() {
    assert_eq!(export(&[]), "massar_numbr,name,photo,x_score,y_score,mean_score");
}

#[test]
fn export_uses_live_scores() {
    let mut roster = Roster::from_students(vec![student(1, "Ann", "p", 12.0, 12.0)]);
    roster.update_scores(1, Scores::new(18.0, 16.0));
    assert!(export(roster.students()).ends_with("1,Ann,p,18,16,17"));
}

// =============================================================
// Round trip
// =============================================================

#[test]
fn export_then_import_preserves_ids_names_and_scores() {
    let original = vec![
        student(3, "Ann", "https://img.example.test/3.png", 12.0, 15.0),
        student(11, "Ben Ode", &avatars().url("Ben Ode"), 15.384_615_384_615_385, 19.9),
        student(4, "Cleo", "https://img.example.test/4.png", 10.0, 20.0),
    ];
    let back = import(&export(&original), &avatars()).unwrap();
    assert_eq!(back, original);
}
