//! Drag gesture state machine.
//!
//! ```text
//! Idle --Start(id, pointer, center)--> Dragging { id, offset }
//! Dragging --Move(pointer)--> Dragging        (emits one score update)
//! Dragging --End | Cancel--> Idle
//! ```
//!
//! Only one pointer is assumed active: a `Start` while already dragging
//! replaces the tracked student. `Move`, `End`, and `Cancel` while idle are
//! ignored. Every `Move` while dragging yields exactly one update; nothing is
//! batched, and no `Move` is assumed to be the last one before `End`.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::chart::{ChartScale, Point};
use crate::input::{ContainerRect, DragState, PointerInput, PointerPhase};
use crate::roster::{Scores, StudentId};

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Id of the student being dragged, if any.
    #[must_use]
    pub fn dragged(&self) -> Option<StudentId> {
        match self.state {
            DragState::Dragging { student_id, .. } => Some(student_id),
            DragState::Idle => None,
        }
    }

    /// Begin dragging `student_id`.
    ///
    /// `center` is the student's rendered center in container-local pixels.
    /// The pointer-to-center offset is kept so the student does not jump to
    /// the pointer on the first move.
    pub fn start(&mut self, student_id: StudentId, pointer: Point, rect: ContainerRect, center: Point) {
        let local = rect.to_local(pointer);
        if let DragState::Dragging { student_id: previous, .. } = self.state {
            tracing::debug!(previous, student_id, "drag restarted on new student");
        }
        self.state = DragState::Dragging { student_id, offset_x: local.x - center.x, offset_y: local.y - center.y };
        tracing::debug!(student_id, "drag started");
    }

    /// Move the dragged student under the pointer and report its new scores.
    ///
    /// Returns the update that was passed to `on_update`, or `None` when idle.
    pub fn on_move<F>(
        &mut self,
        pointer: Point,
        rect: ContainerRect,
        scale: &ChartScale,
        mut on_update: F,
    ) -> Option<(StudentId, Scores)>
    where
        F: FnMut(StudentId, Scores),
    {
        let DragState::Dragging { student_id, offset_x, offset_y } = self.state else {
            return None;
        };
        let local = rect.to_local(pointer);
        let position = Point::new(scale.clamp_pixel(local.x - offset_x), scale.clamp_pixel(local.y - offset_y));
        let scores = scale.point_to_scores(position);
        on_update(student_id, scores);
        Some((student_id, scores))
    }

    /// Finish the gesture. Returns the student that was being dragged.
    pub fn end(&mut self) -> Option<StudentId> {
        let dragged = self.dragged();
        self.state = DragState::Idle;
        if let Some(student_id) = dragged {
            tracing::debug!(student_id, "drag ended");
        }
        dragged
    }

    /// Abandon the gesture (pointer left the chart, touch cancelled).
    ///
    /// Scores already reported by earlier moves are kept.
    pub fn cancel(&mut self) -> Option<StudentId> {
        self.end()
    }

    /// Dispatch a unified pointer event.
    ///
    /// `target` is the student under a `Start` event together with its
    /// rendered center; a `Start` with no target is ignored.
    pub fn handle<F>(
        &mut self,
        input: PointerInput,
        rect: ContainerRect,
        scale: &ChartScale,
        target: Option<(StudentId, Point)>,
        on_update: F,
    ) -> Option<(StudentId, Scores)>
    where
        F: FnMut(StudentId, Scores),
    {
        match input.phase {
            PointerPhase::Start => {
                if let Some((student_id, center)) = target {
                    self.start(student_id, input.client, rect, center);
                }
                None
            }
            PointerPhase::Move => self.on_move(input.client, rect, scale, on_update),
            PointerPhase::End => {
                self.end();
                None
            }
            PointerPhase::Cancel => {
                self.cancel();
                None
            }
        }
    }
}
