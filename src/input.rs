//! Input model: the unified pointer event and the drag gesture state.
//!
//! Mouse and touch events are normalized by the host into [`PointerInput`]
//! before they reach the drag controller, so the state machine never knows
//! which device produced an event. [`DragState`] is the gesture being tracked
//! between pointer-down and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::chart::Point;
use crate::roster::StudentId;

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Mouse down or first touch on a student.
    Start,
    /// Pointer moved while pressed (or not; the controller decides).
    Move,
    /// Mouse up or touch end.
    End,
    /// Pointer left the chart or the touch was cancelled.
    Cancel,
}

/// A device-agnostic pointer event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub client: Point,
    pub phase: PointerPhase,
}

impl PointerInput {
    #[must_use]
    pub fn new(client_x: f64, client_y: f64, phase: PointerPhase) -> Self {
        Self { client: Point::new(client_x, client_y), phase }
    }
}

/// Origin of the chart container's bounding box in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
}

impl ContainerRect {
    #[must_use]
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Convert a client-space point to container-local coordinates.
    #[must_use]
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }

    /// Convert a container-local point to client coordinates.
    #[must_use]
    pub fn to_client(&self, local: Point) -> Point {
        Point::new(local.x + self.left, local.y + self.top)
    }
}

/// State of the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A student is being moved across the chart.
    Dragging {
        /// Id of the student being dragged.
        student_id: StudentId,
        /// Pointer x minus the student's rendered center x at pointer-down.
        offset_x: f64,
        /// Pointer y minus the student's rendered center y at pointer-down.
        offset_y: f64,
    },
}
