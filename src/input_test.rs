#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn drag_state_default_is_idle() {
    assert_eq!(DragState::default(), DragState::Idle);
}

#[test]
fn pointer_input_new_sets_client_and_phase() {
    let input = PointerInput::new(12.0, 34.0, PointerPhase::Move);
    assert_eq!(input.client, Point::new(12.0, 34.0));
    assert_eq!(input.phase, PointerPhase::Move);
}

#[test]
fn container_rect_local_and_client_are_inverse() {
    let rect = ContainerRect::new(100.0, 50.0);
    let local = rect.to_local(Point::new(130.0, 95.0));
    assert_eq!(local, Point::new(30.0, 45.0));
    assert_eq!(rect.to_client(local), Point::new(130.0, 95.0));
}

#[test]
fn default_rect_is_identity() {
    let rect = ContainerRect::default();
    assert_eq!(rect.to_local(Point::new(7.0, 8.0)), Point::new(7.0, 8.0));
}

#[test]
fn dragging_variants_compare_by_fields() {
    let a = DragState::Dragging { student_id: 1, offset_x: 2.0, offset_y: 3.0 };
    let b = DragState::Dragging { student_id: 1, offset_x: 2.0, offset_y: 3.0 };
    let c = DragState::Dragging { student_id: 2, offset_x: 2.0, offset_y: 3.0 };
    assert_eq!(a, b);
    assert_ne!(a, c);
}
