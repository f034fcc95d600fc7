use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn single(x: f64, y: f64) -> ContactSample {
    ContactSample { first: pt(x, y), second: None }
}

fn double(x0: f64, y0: f64, x1: f64, y1: f64) -> ContactSample {
    ContactSample { first: pt(x0, y0), second: Some(pt(x1, y1)) }
}

// =============================================================
// ContactSample
// =============================================================

#[test]
fn sample_from_empty_list_is_none() {
    assert!(ContactSample::from_contacts(&[]).is_none());
}

#[test]
fn sample_from_one_contact() {
    let sample = ContactSample::from_contacts(&[pt(10.0, 20.0)]);
    assert_eq!(sample, Some(single(10.0, 20.0)));
}

#[test]
fn sample_from_two_contacts() {
    let sample = ContactSample::from_contacts(&[pt(1.0, 2.0), pt(3.0, 4.0)]);
    assert_eq!(sample, Some(double(1.0, 2.0, 3.0, 4.0)));
}

#[test]
fn sample_ignores_contacts_beyond_second() {
    let sample = ContactSample::from_contacts(&[pt(1.0, 2.0), pt(3.0, 4.0), pt(99.0, 99.0)]);
    assert_eq!(sample, Some(double(1.0, 2.0, 3.0, 4.0)));
}

#[test]
fn single_sample_is_not_double() {
    assert!(!single(0.0, 0.0).is_double());
}

#[test]
fn two_contact_sample_is_double() {
    assert!(double(0.0, 0.0, 1.0, 1.0).is_double());
}

// =============================================================
// GestureState
// =============================================================

#[test]
fn gesture_state_default_is_idle() {
    assert_eq!(GestureState::default(), GestureState::Idle);
}

#[test]
fn tracking_single_sample_is_single_active() {
    let sample = single(5.0, 5.0);
    assert_eq!(GestureState::tracking(sample), GestureState::SingleActive { prev: sample });
}

#[test]
fn tracking_double_sample_is_double_active() {
    let sample = double(0.0, 0.0, 10.0, 0.0);
    assert_eq!(GestureState::tracking(sample), GestureState::DoubleActive { prev: sample });
}

#[test]
fn prev_for_matching_single_mode() {
    let prev = single(1.0, 1.0);
    let state = GestureState::tracking(prev);
    assert_eq!(state.prev_for(&single(2.0, 2.0)), Some(prev));
}

#[test]
fn prev_for_matching_double_mode() {
    let prev = double(0.0, 0.0, 4.0, 0.0);
    let state = GestureState::tracking(prev);
    assert_eq!(state.prev_for(&double(1.0, 0.0, 5.0, 0.0)), Some(prev));
}

#[test]
fn prev_for_idle_is_none() {
    let state = GestureState::Idle;
    assert!(state.prev_for(&single(0.0, 0.0)).is_none());
    assert!(state.prev_for(&double(0.0, 0.0, 1.0, 1.0)).is_none());
}

#[test]
fn prev_for_single_state_rejects_double_sample() {
    let state = GestureState::tracking(single(1.0, 1.0));
    assert!(state.prev_for(&double(0.0, 0.0, 1.0, 1.0)).is_none());
}

#[test]
fn prev_for_double_state_rejects_single_sample() {
    let state = GestureState::tracking(double(0.0, 0.0, 1.0, 1.0));
    assert!(state.prev_for(&single(0.0, 0.0)).is_none());
}

#[test]
fn double_active_prev_always_carries_second_slot() {
    // The invariant: a DoubleActive state is only ever built from a double
    // sample, so its previous sample has slot 1 populated.
    let state = GestureState::tracking(double(0.0, 0.0, 3.0, 4.0));
    match state {
        GestureState::DoubleActive { prev } => assert!(prev.second.is_some()),
        other => panic!("expected DoubleActive, got {other:?}"),
    }
}
