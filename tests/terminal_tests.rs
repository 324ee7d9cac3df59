//! Tests for the eager terminal operations on the synchronous path.

mod support;

use std::sync::{Arc, Mutex};

use pullars::{Outcome, Sequence, SequenceError};
use rstest::rstest;
use support::ready_value;

// =============================================================================
// every / some
// =============================================================================

#[rstest]
fn test_every_true_when_all_elements_pass() {
    let outcome = Sequence::new(vec![1, 2, 3]).every(|x, _| Outcome::ready(x < 5));
    assert!(ready_value(outcome));
}

#[rstest]
fn test_every_false_on_first_failing_element() {
    let outcome = Sequence::new(vec![1, 7, 3]).every(|x, _| Outcome::ready(x < 5));
    assert!(!ready_value(outcome));
}

#[rstest]
fn test_every_on_empty_sequence_is_vacuously_true() {
    let empty: Vec<i32> = Vec::new();
    assert!(ready_value(
        Sequence::new(empty).every(|_, _| Outcome::ready(false))
    ));
}

#[rstest]
fn test_some_true_on_first_passing_element() {
    let outcome = Sequence::new(vec![1, 2, 3]).some(|x, _| Outcome::ready(x % 2 == 0));
    assert!(ready_value(outcome));
}

#[rstest]
fn test_some_false_when_nothing_passes() {
    let outcome = Sequence::new(vec![1, 3, 5]).some(|x, _| Outcome::ready(x % 2 == 0));
    assert!(!ready_value(outcome));
}

#[rstest]
fn test_some_on_empty_sequence_is_false() {
    let empty: Vec<i32> = Vec::new();
    assert!(!ready_value(
        Sequence::new(empty).some(|_, _| Outcome::ready(true))
    ));
}

#[rstest]
fn test_every_short_circuit_skips_later_callbacks() {
    let calls = Arc::new(Mutex::new(0));
    let counter = calls.clone();
    let outcome = Sequence::new(vec![1, 9, 3, 4]).every(move |x, _| {
        *counter.lock().unwrap() += 1;
        Outcome::ready(x < 5)
    });
    assert!(!ready_value(outcome));
    assert_eq!(*calls.lock().unwrap(), 2);
}

// =============================================================================
// find
// =============================================================================

#[rstest]
fn test_find_returns_the_first_match() {
    let outcome = Sequence::new(vec![1, 2, 3]).find(|x, _| Outcome::ready(*x == 2));
    assert_eq!(ready_value(outcome), Some(2));
}

#[rstest]
fn test_find_returns_none_when_exhausted() {
    let outcome = Sequence::new(vec![1, 2, 3]).find(|x, _| Outcome::ready(*x > 10));
    assert_eq!(ready_value(outcome), None);
}

#[rstest]
fn test_find_sees_transformed_elements() {
    let outcome = Sequence::with_transform(vec![1, 2, 3], |x| Outcome::ready(x * 10))
        .find(|x, _| Outcome::ready(*x == 20));
    assert_eq!(ready_value(outcome), Some(20));
}

// =============================================================================
// for_each
// =============================================================================

#[rstest]
fn test_for_each_visits_every_element_in_order() {
    let visited = Arc::new(Mutex::new(Vec::new()));
    let recorder = visited.clone();
    let outcome = Sequence::new(vec![1, 2, 3]).for_each(move |x, i| {
        recorder.lock().unwrap().push((i, x));
        Outcome::ready(())
    });
    ready_value(outcome);
    assert_eq!(*visited.lock().unwrap(), vec![(0, 1), (1, 2), (2, 3)]);
}

// =============================================================================
// reduce / fold
// =============================================================================

#[rstest]
fn test_reduce_sums_without_an_initial_value() {
    let outcome = Sequence::new(vec![1, 2, 3]).reduce(|acc, x, _| Outcome::ready(acc + x));
    assert_eq!(ready_value(outcome), 6);
}

#[rstest]
fn test_reduce_of_empty_sequence_fails_with_contract_text() {
    let empty: Vec<i32> = Vec::new();
    let outcome = Sequence::new(empty).reduce(|acc, x, _| Outcome::ready(acc + x));
    let error = outcome.into_ready().unwrap().unwrap_err();
    assert_eq!(
        format!("{error}"),
        "Reduce of empty iterable with no initial value"
    );
}

#[rstest]
fn test_reduce_indexing_starts_at_one() {
    let indices = Arc::new(Mutex::new(Vec::new()));
    let recorder = indices.clone();
    let outcome = Sequence::new(vec![10, 20, 30]).reduce(move |acc, x, i| {
        recorder.lock().unwrap().push(i);
        Outcome::ready(acc + x)
    });
    assert_eq!(ready_value(outcome), 60);
    // The seed element is index 0; the callback first runs at index 1.
    assert_eq!(*indices.lock().unwrap(), vec![1, 2]);
}

#[rstest]
fn test_fold_uses_the_initial_accumulator() {
    let outcome = Sequence::new(vec![1, 2, 3]).fold(0, |acc, x, _| Outcome::ready(acc + x));
    assert_eq!(ready_value(outcome), 6);
}

#[rstest]
fn test_fold_indexing_starts_at_zero() {
    let outcome = Sequence::new(vec![5, 5, 5]).fold(Vec::new(), |mut acc, x, i| {
        acc.push((i, x));
        Outcome::ready(acc)
    });
    assert_eq!(ready_value(outcome), vec![(0, 5), (1, 5), (2, 5)]);
}

#[rstest]
fn test_fold_of_empty_sequence_returns_the_initial_value() {
    let empty: Vec<i32> = Vec::new();
    let outcome = Sequence::new(empty).fold(41, |acc, x, _| Outcome::ready(acc + x));
    assert_eq!(ready_value(outcome), 41);
}

// =============================================================================
// to_vec / at
// =============================================================================

#[rstest]
fn test_to_vec_of_empty_sequence_is_empty() {
    let empty: Vec<i32> = Vec::new();
    assert!(ready_value(Sequence::new(empty).to_vec()).is_empty());
}

#[rstest]
fn test_at_returns_the_indexed_element() {
    assert_eq!(ready_value(Sequence::new(vec![1, 2, 3]).at(0)), Some(1));
    assert_eq!(ready_value(Sequence::new(vec![1, 2, 3]).at(2)), Some(3));
}

#[rstest]
fn test_at_beyond_the_end_is_none() {
    assert_eq!(ready_value(Sequence::new(vec![1, 2, 3]).at(5)), None);
}

#[rstest]
fn test_at_applies_the_transform_to_the_target() {
    let outcome = Sequence::with_transform(vec![1, 2, 3], |x| Outcome::ready(x * 2)).at(1);
    assert_eq!(ready_value(outcome), Some(4));
}

// =============================================================================
// Callback failures
// =============================================================================

#[rstest]
fn test_predicate_failure_surfaces_from_every() {
    let outcome = Sequence::new(vec![1, 2]).every(|_, _| {
        Outcome::<bool>::error(SequenceError::message("predicate broke"))
    });
    let error = outcome.into_ready().unwrap().unwrap_err();
    assert_eq!(format!("{error}"), "predicate broke");
}

#[rstest]
fn test_action_failure_surfaces_from_for_each() {
    let outcome = Sequence::new(vec![1, 2]).for_each(|x, _| {
        if x == 2 {
            Outcome::error(SequenceError::message("action broke"))
        } else {
            Outcome::ready(())
        }
    });
    assert!(outcome.into_ready().unwrap().is_err());
}
