use serde::Serialize;

use crate::avatar::AvatarGenerator;
use crate::chart::{ChartScale, Point, format_score};
use crate::codec;
use crate::config::AppConfig;
use crate::consts::PHOTO_SIZE_PX;
use crate::drag::DragController;
use crate::input::{ContainerRect, PointerInput, PointerPhase};
use crate::roster::{Roster, Scores, Student, StudentId};
use crate::sort::{SortKey, SortSpec};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from engine calls for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A student's scores changed (one per drag move).
    ScoresUpdated { id: StudentId, scores: Scores },
    /// The whole roster was replaced by an import or the demo roster.
    RosterReplaced { count: usize },
    /// A student was appended by manual entry.
    StudentAdded { id: StudentId },
    /// A CSV import was refused; the roster is unchanged. `message` is user-facing.
    ImportRejected { message: String },
    RenderNeeded,
}

/// Render-ready view of one student, serialized for the host renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentView {
    pub id: StudentId,
    pub name: String,
    pub photo_url: String,
    pub fallback_photo_url: String,
    pub x_score: f64,
    pub y_score: f64,
    pub mean_score: f64,
    /// Y score formatted for the chart label and table cell.
    pub score_label: String,
    pub center_x: f64,
    pub center_y: f64,
}

/// Core engine state: the roster owner and everything that does not touch the DOM.
///
/// Separated from [`crate::web::ChartHost`] so it can be tested without WASM/browser dependencies.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub roster: Roster,
    pub scale: ChartScale,
    pub avatars: AvatarGenerator,
    pub drag: DragController,
    pub sort: Option<SortSpec>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(AppConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            roster: Roster::new(),
            scale: config.scale,
            avatars: config.avatars,
            drag: DragController::new(),
            sort: None,
        }
    }

    // --- Roster replacement ---

    /// Replace the roster with the random demo roster.
    pub fn load_demo<R: rand::Rng>(&mut self, count: usize, rng: &mut R) -> Vec<Action> {
        let roster = Roster::demo(count, rng, &self.avatars);
        self.replace(roster.students().to_vec())
    }

    /// Import CSV text. On success the roster is replaced wholesale; on a
    /// header error it is left untouched and the rejection is reported.
    pub fn import_csv(&mut self, text: &str) -> Vec<Action> {
        match codec::import(text, &self.avatars) {
            Ok(students) => self.replace(students),
            Err(e) => {
                tracing::warn!(error = %e, "csv import rejected");
                vec![Action::ImportRejected { message: e.to_string() }]
            }
        }
    }

    fn replace(&mut self, students: Vec<Student>) -> Vec<Action> {
        if self.drag.cancel().is_some() {
            tracing::debug!("drag cancelled by roster replacement");
        }
        let count = self.roster.replace(students);
        tracing::info!(count, "roster replaced");
        vec![Action::RosterReplaced { count }, Action::RenderNeeded]
    }

    /// Current roster as CSV text.
    #[must_use]
    pub fn export_csv(&self) -> String {
        let csv = codec::export(self.roster.students());
        tracing::info!(count = self.roster.len(), "roster exported");
        csv
    }

    /// Append a student by manual entry.
    pub fn add_student(&mut self, name: &str, photo_url: Option<&str>) -> Vec<Action> {
        let id = self.roster.add(name, photo_url, &self.avatars);
        tracing::info!(id, %name, "student added");
        vec![Action::StudentAdded { id }, Action::RenderNeeded]
    }

    /// Apply a score update for `id`. Unknown ids produce no actions.
    pub fn update_scores(&mut self, id: StudentId, scores: Scores) -> Vec<Action> {
        if self.roster.update_scores(id, scores) {
            vec![Action::ScoresUpdated { id, scores }, Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Pointer input ---

    /// Pointer pressed on student `id` at client position `pointer`.
    pub fn on_pointer_down(&mut self, id: StudentId, pointer: Point, rect: ContainerRect) -> Vec<Action> {
        let Some(center) = self.student_center(id) else {
            return Vec::new();
        };
        self.drag.start(id, pointer, rect, center);
        Vec::new()
    }

    /// Pointer moved. While dragging, each call updates one student's scores.
    pub fn on_pointer_move(&mut self, pointer: Point, rect: ContainerRect) -> Vec<Action> {
        let Self { roster, scale, drag, .. } = self;
        let mut actions = Vec::new();
        drag.on_move(pointer, rect, scale, |id, scores| {
            if roster.update_scores(id, scores) {
                actions.push(Action::ScoresUpdated { id, scores });
            }
        });
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.drag.end();
        Vec::new()
    }

    /// Pointer left the chart or the touch was cancelled.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.drag.cancel();
        Vec::new()
    }

    /// Dispatch a unified pointer event. A `Start` targets the topmost
    /// student under the pointer, if any.
    pub fn handle_pointer(&mut self, input: PointerInput, rect: ContainerRect) -> Vec<Action> {
        match input.phase {
            PointerPhase::Start => match self.student_at(rect.to_local(input.client)) {
                Some(id) => self.on_pointer_down(id, input.client, rect),
                None => Vec::new(),
            },
            PointerPhase::Move => self.on_pointer_move(input.client, rect),
            PointerPhase::End => self.on_pointer_up(),
            PointerPhase::Cancel => self.on_pointer_cancel(),
        }
    }

    // --- Sorting ---

    /// Column header clicked: toggle or switch the sort.
    pub fn request_sort(&mut self, key: SortKey) -> Vec<Action> {
        self.sort = Some(SortSpec::request(self.sort, key));
        vec![Action::RenderNeeded]
    }

    #[must_use]
    pub fn sort_indicator(&self, key: SortKey) -> &'static str {
        SortSpec::indicator(self.sort, key)
    }

    #[must_use]
    pub fn sorted_students(&self) -> Vec<&Student> {
        self.roster.sorted(self.sort)
    }

    // --- Queries ---

    #[must_use]
    pub fn students(&self) -> &[Student] {
        self.roster.students()
    }

    #[must_use]
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.roster.get(id)
    }

    /// Rendered center of a student in chart-local pixels, clamped to the plot
    /// area so out-of-domain scores still draw on the chart.
    #[must_use]
    pub fn student_center(&self, id: StudentId) -> Option<Point> {
        self.roster.get(id).map(|s| self.center_of(s))
    }

    fn center_of(&self, student: &Student) -> Point {
        let p = self.scale.scores_to_point(student.scores);
        Point::new(self.scale.clamp_pixel(p.x), self.scale.clamp_pixel(p.y))
    }

    /// Topmost student whose photo covers chart-local `local`. Later roster
    /// entries draw above earlier ones.
    #[must_use]
    pub fn student_at(&self, local: Point) -> Option<StudentId> {
        let half = PHOTO_SIZE_PX / 2.0;
        self.roster
            .students()
            .iter()
            .rev()
            .find(|s| {
                let c = self.center_of(s);
                (local.x - c.x).abs() <= half && (local.y - c.y).abs() <= half
            })
            .map(|s| s.id)
    }

    /// Render-ready rows for every student, in roster order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<StudentView> {
        self.roster.students().iter().map(|s| self.view_of(s)).collect()
    }

    /// Render-ready rows in the current table sort order.
    #[must_use]
    pub fn sorted_snapshot(&self) -> Vec<StudentView> {
        self.sorted_students().into_iter().map(|s| self.view_of(s)).collect()
    }

    fn view_of(&self, s: &Student) -> StudentView {
        let center = self.center_of(s);
        StudentView {
            id: s.id,
            name: s.name.clone(),
            photo_url: s.photo_url.clone(),
            fallback_photo_url: self.avatars.fallback_photo(s),
            x_score: s.scores.x,
            y_score: s.scores.y,
            mean_score: s.mean_score(),
            score_label: format_score(s.scores.y),
            center_x: center.x,
            center_y: center.y,
        }
    }
}
