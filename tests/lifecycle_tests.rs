//! Tests for the resource lifecycle protocol: release and failure
//! notifications propagate to the leaf source exactly once, and only when
//! the contract says so.

mod support;

use pullars::{Outcome, Sequence, SequenceError};
use rstest::rstest;
use support::{DeferredSource, ProbeSource, probed_results, probed_vec, ready_value};

// =============================================================================
// Short-circuit release: exactly once on early termination
// =============================================================================

#[rstest]
fn test_every_releases_once_on_short_circuit() {
    let (source, counters) = probed_vec(vec![1, 9, 3]);
    let result = ready_value(Sequence::new(source).every(|x, _| Outcome::ready(x < 5)));
    assert!(!result);
    assert_eq!(counters.releases(), 1);
}

#[rstest]
fn test_every_does_not_release_on_natural_exhaustion() {
    let (source, counters) = probed_vec(vec![1, 2, 3]);
    let result = ready_value(Sequence::new(source).every(|x, _| Outcome::ready(x < 5)));
    assert!(result);
    assert_eq!(counters.releases(), 0);
}

#[rstest]
fn test_some_releases_once_on_match() {
    let (source, counters) = probed_vec(vec![1, 2, 3]);
    let result = ready_value(Sequence::new(source).some(|x, _| Outcome::ready(x == 2)));
    assert!(result);
    assert_eq!(counters.releases(), 1);
}

#[rstest]
fn test_some_does_not_release_when_exhausted() {
    let (source, counters) = probed_vec(vec![1, 2, 3]);
    let result = ready_value(Sequence::new(source).some(|x, _| Outcome::ready(x > 10)));
    assert!(!result);
    assert_eq!(counters.releases(), 0);
}

#[rstest]
fn test_find_releases_once_on_match_and_not_on_miss() {
    let (source, counters) = probed_vec(vec![1, 2, 3]);
    let found = ready_value(Sequence::new(source).find(|x, _| Outcome::ready(*x == 2)));
    assert_eq!(found, Some(2));
    assert_eq!(counters.releases(), 1);

    let (source, counters) = probed_vec(vec![1, 2, 3]);
    let found = ready_value(Sequence::new(source).find(|x, _| Outcome::ready(*x == 9)));
    assert_eq!(found, None);
    assert_eq!(counters.releases(), 0);
}

#[rstest]
fn test_take_releases_once_when_the_budget_exhausts() {
    let (source, counters) = probed_vec(vec![1, 2, 3, 4]);
    let collected = ready_value(Sequence::new(source).take(2).to_vec());
    assert_eq!(collected, vec![1, 2]);
    // One release from the spent budget; to_vec's completion release is
    // absorbed by the adapter's at-most-once guard.
    assert_eq!(counters.releases(), 1);
}

#[rstest]
fn test_take_zero_releases_without_pulling() {
    let (source, counters) = probed_vec(vec![1, 2, 3]);
    let collected = ready_value(Sequence::new(source).take(0).to_vec());
    assert!(collected.is_empty());
    assert_eq!(counters.pulls(), 0);
    assert_eq!(counters.releases(), 1);
}

#[rstest]
fn test_slice_end_bound_releases_once() {
    let (source, counters) = probed_vec(vec![1, 2, 3, 4, 5]);
    let collected = ready_value(Sequence::new(source).slice(1, 3).to_vec());
    assert_eq!(collected, vec![2, 3]);
    assert_eq!(counters.releases(), 1);
}

#[rstest]
fn test_empty_slice_releases_nothing() {
    let (source, counters) = probed_vec(vec![1, 2, 3]);
    let collected = ready_value(Sequence::new(source).slice(2, 2).to_vec());
    assert!(collected.is_empty());
    assert_eq!(counters.pulls(), 0);
    assert_eq!(counters.releases(), 0);
}

#[rstest]
fn test_at_releases_once_on_hit_and_on_exhaustion() {
    let (source, counters) = probed_vec(vec![1, 2, 3]);
    assert_eq!(ready_value(Sequence::new(source).at(1)), Some(2));
    assert_eq!(counters.releases(), 1);

    let (source, counters) = probed_vec(vec![1, 2, 3]);
    assert_eq!(ready_value(Sequence::new(source).at(9)), None);
    assert_eq!(counters.releases(), 1);
}

#[rstest]
fn test_to_vec_releases_once_after_the_drain() {
    let (source, counters) = probed_vec(vec![1, 2, 3]);
    ready_value(Sequence::new(source).to_vec());
    assert_eq!(counters.releases(), 1);
}

// =============================================================================
// concat release reach
// =============================================================================

#[rstest]
fn test_concat_early_release_before_the_second_is_active() {
    let (first, first_counters) = probed_vec(vec![1, 2]);
    let (second, second_counters) = probed_vec(vec![3, 4]);
    let collected = ready_value(
        Sequence::new(first)
            .concat(second)
            .take(1)
            .to_vec(),
    );
    assert_eq!(collected, vec![1]);
    assert_eq!(first_counters.releases(), 1);
    // The second operand was never reached, so it is not released.
    assert_eq!(second_counters.releases(), 0);
}

#[rstest]
fn test_concat_early_release_reaches_both_active_handles() {
    let (first, first_counters) = probed_vec(vec![1, 2]);
    let (second, second_counters) = probed_vec(vec![3, 4]);
    let collected = ready_value(
        Sequence::new(first)
            .concat(second)
            .take(3)
            .to_vec(),
    );
    assert_eq!(collected, vec![1, 2, 3]);
    assert_eq!(first_counters.releases(), 1);
    assert_eq!(second_counters.releases(), 1);
}

// =============================================================================
// Failure notifications
// =============================================================================

#[rstest]
fn test_callback_failure_notifies_the_leaf_exactly_once() {
    let (source, counters) = probed_vec(vec![1, 2, 3]);
    let outcome = Sequence::new(source)
        .map(|x, _| {
            if x == 2 {
                Outcome::error(SequenceError::message("bad"))
            } else {
                Outcome::ready(x)
            }
        })
        .to_vec();
    assert!(outcome.into_ready().unwrap().is_err());
    // The map adapter notifies its upstream; the terminal's own
    // notification is absorbed by the adapter's guard.
    assert_eq!(counters.failures(), 1);
}

#[rstest]
fn test_upstream_error_converted_by_map_error_notifies_nothing() {
    let (source, counters) = probed_results(vec![
        Ok(1),
        Err(SequenceError::message("gap")),
        Ok(3),
    ]);
    let collected = ready_value(
        Sequence::new(source)
            .map_error(|_| Outcome::ready(0))
            .to_vec(),
    );
    assert_eq!(collected, vec![1, 0, 3]);
    assert_eq!(counters.failures(), 0);
}

#[rstest]
fn test_unconverted_upstream_error_notifies_once() {
    let (source, counters) = probed_results(vec![Ok(1), Err(SequenceError::message("gap"))]);
    let outcome = Sequence::new(source).to_vec();
    assert!(outcome.into_ready().unwrap().is_err());
    assert_eq!(counters.failures(), 1);
}

// =============================================================================
// Enumeration adapters
// =============================================================================

#[rstest]
fn test_dropping_the_iterator_midway_releases_once() {
    let (source, counters) = probed_vec(vec![1, 2, 3]);
    let mut iter = Sequence::new(source).iter();
    assert_eq!(iter.next().unwrap().unwrap(), 1);
    drop(iter);
    assert_eq!(counters.releases(), 1);
}

#[rstest]
fn test_exhausting_the_iterator_releases_nothing_extra() {
    let (source, counters) = probed_vec(vec![1, 2]);
    let collected: Vec<i32> = Sequence::new(source).iter().map(Result::unwrap).collect();
    assert_eq!(collected, vec![1, 2]);
    assert_eq!(counters.releases(), 0);
}

// =============================================================================
// Asynchronous paths honor the same discipline
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_take_releases_once_over_a_deferred_source() {
    let (source, counters) = ProbeSource::new(DeferredSource::new(vec![1, 2, 3, 4]));
    let collected = Sequence::new(source).take(2).to_vec().await.unwrap();
    assert_eq!(collected, vec![1, 2]);
    assert_eq!(counters.releases(), 1);
}

#[rstest]
#[tokio::test]
async fn test_some_releases_once_with_a_deferred_predicate() {
    let (source, counters) = ProbeSource::new(DeferredSource::new(vec![1, 2, 3]));
    let result = Sequence::new(source)
        .some(|x, _| Outcome::defer(async move { Ok(x == 2) }))
        .await
        .unwrap();
    assert!(result);
    assert_eq!(counters.releases(), 1);
}
