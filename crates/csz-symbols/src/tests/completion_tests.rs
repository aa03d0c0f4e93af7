use super::*;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

#[test]
fn test_start_of_pairs_finish_with_start() {
    assert_eq!(
        CompletionPart::start_of(CompletionPart::FINISH_TYPE),
        Some(CompletionPart::START_TYPE)
    );
    assert_eq!(
        CompletionPart::start_of(CompletionPart::FINISH_EXPLICIT_INTERFACE),
        Some(CompletionPart::START_EXPLICIT_INTERFACE)
    );
    assert_eq!(CompletionPart::start_of(CompletionPart::ATTRIBUTES), None);
    assert_eq!(CompletionPart::start_of(CompletionPart::START_TYPE), None);
    assert_eq!(CompletionPart::start_of(CompletionPart::TYPE), None);
}

#[test]
fn test_parts_of_other_kinds_start_complete() {
    let state = CompletionState::for_parts(CompletionPart::PARAMETER_SYMBOL_ALL);
    assert!(state.has_complete(CompletionPart::BASE_TYPE));
    assert!(state.has_complete(CompletionPart::OVERRIDE_CHECKS));
    assert!(!state.has_complete(CompletionPart::ATTRIBUTES));
    assert!(!state.has_complete(CompletionPart::DEFAULT_VALUE));
    assert_eq!(state.next_incomplete_part(), Some(CompletionPart::ATTRIBUTES));
}

#[test]
fn test_empty_part_set_is_complete_immediately() {
    let state = CompletionState::for_parts(CompletionPart::empty());
    assert!(state.is_all_complete());
    assert_eq!(state.next_incomplete_part(), None);
}

#[test]
fn test_next_incomplete_part_walks_in_bit_order() {
    let state = CompletionState::for_parts(CompletionPart::METHOD_SYMBOL_ALL);
    assert!(state.note_complete(CompletionPart::ATTRIBUTES));
    assert_eq!(state.next_incomplete_part(), Some(CompletionPart::START_TYPE));
    assert!(state.try_start(CompletionPart::START_TYPE));
    assert_eq!(state.next_incomplete_part(), Some(CompletionPart::FINISH_TYPE));
    state.mark_done(CompletionPart::FINISH_TYPE);
    assert_eq!(
        state.next_incomplete_part(),
        Some(CompletionPart::START_PARAMETERS)
    );
}

#[test]
fn test_note_complete_reports_first_setter_only() {
    let state = CompletionState::for_parts(CompletionPart::TYPE_SYMBOL_ALL);
    assert!(state.note_complete(CompletionPart::MEMBERS_COMPLETED));
    assert!(!state.note_complete(CompletionPart::MEMBERS_COMPLETED));
}

#[test]
fn test_bits_are_never_cleared() {
    let state = CompletionState::for_parts(CompletionPart::PROPERTY_SYMBOL_ALL);
    let mut seen = state.completed();
    while let Some(part) = state.next_incomplete_part() {
        state.note_complete(part);
        let now = state.completed();
        assert!(now.contains(seen));
        seen = now;
    }
    assert!(state.is_all_complete());
}

#[test]
fn test_exactly_one_thread_claims_a_start_part() {
    let state = Arc::new(CompletionState::for_parts(CompletionPart::TYPE_SYMBOL_ALL));
    let winners = AtomicUsize::new(0);
    std::thread::scope(|scope| {
        for _ in 0..16 {
            scope.spawn(|| {
                if state.try_start(CompletionPart::START_BASE_TYPE) {
                    winners.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    state.mark_done(CompletionPart::FINISH_BASE_TYPE);
                } else {
                    state
                        .spin_until_done(CompletionPart::FINISH_BASE_TYPE, &CancellationToken::none())
                        .expect("not cancelled");
                }
                assert!(state.has_complete(CompletionPart::BASE_TYPE));
            });
        }
    });
    assert_eq!(winners.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn test_spin_until_done_observes_cancellation() {
    let state = CompletionState::for_parts(CompletionPart::TYPE_SYMBOL_ALL);
    let token = CancellationToken::new();
    token.cancel();
    assert_eq!(
        state.spin_until_done(CompletionPart::FINISH_MEMBER_CHECKS, &token),
        Err(OperationCancelled)
    );
}

#[test]
fn test_spin_until_done_returns_when_already_complete() {
    let state = CompletionState::for_parts(CompletionPart::TYPE_SYMBOL_ALL);
    let token = CancellationToken::new();
    token.cancel();
    // Already-complete parts never poll the token.
    assert_eq!(
        state.spin_until_done(CompletionPart::FINISH_TYPE, &token),
        Ok(())
    );
}
