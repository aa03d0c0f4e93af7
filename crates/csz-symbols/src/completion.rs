//! Per-symbol completion state.
//!
//! Each symbol owns a monotonic bitset of completed parts. Paired parts
//! (`START_*`/`FINISH_*`) bracket work that produces diagnostics: exactly one
//! thread claims the start bit, does the work, commits its diagnostics and
//! sets the finish bit. Every other thread that needs the result waits for
//! the finish bit. Bits are only ever set, never cleared.

use bitflags::bitflags;
use csz_common::limits::{
    SPIN_WAIT_MAX_YIELD_SHIFT, SPIN_WAIT_SLEEP_AFTER, SPIN_WAIT_SLEEP_MICROS,
    SPIN_WAIT_SPIN_ROUNDS,
};
use csz_common::{CancellationToken, OperationCancelled};
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CompletionPart: u32 {
        const ATTRIBUTES = 1 << 0;
        const START_TYPE = 1 << 1;
        const FINISH_TYPE = 1 << 2;
        const START_PARAMETERS = 1 << 3;
        const FINISH_PARAMETERS = 1 << 4;
        const START_DEFAULT_VALUE = 1 << 5;
        const FINISH_DEFAULT_VALUE = 1 << 6;
        const START_BASE_TYPE = 1 << 7;
        const FINISH_BASE_TYPE = 1 << 8;
        const START_INTERFACES = 1 << 9;
        const FINISH_INTERFACES = 1 << 10;
        const START_CONSTRAINTS = 1 << 11;
        const FINISH_CONSTRAINTS = 1 << 12;
        const START_SYNTHESIZED_EXPLICIT_IMPLEMENTATIONS = 1 << 13;
        const FINISH_SYNTHESIZED_EXPLICIT_IMPLEMENTATIONS = 1 << 14;
        const START_DECLARATION_CHECKS = 1 << 15;
        const FINISH_DECLARATION_CHECKS = 1 << 16;
        const START_OVERRIDE_CHECKS = 1 << 17;
        const FINISH_OVERRIDE_CHECKS = 1 << 18;
        const START_MEMBER_CHECKS = 1 << 19;
        const FINISH_MEMBER_CHECKS = 1 << 20;
        const START_EXPLICIT_INTERFACE = 1 << 21;
        const FINISH_EXPLICIT_INTERFACE = 1 << 22;
        const MEMBERS_COMPLETED = 1 << 23;

        const TYPE = Self::START_TYPE.bits() | Self::FINISH_TYPE.bits();
        const PARAMETERS = Self::START_PARAMETERS.bits() | Self::FINISH_PARAMETERS.bits();
        const DEFAULT_VALUE = Self::START_DEFAULT_VALUE.bits() | Self::FINISH_DEFAULT_VALUE.bits();
        const BASE_TYPE = Self::START_BASE_TYPE.bits() | Self::FINISH_BASE_TYPE.bits();
        const INTERFACES = Self::START_INTERFACES.bits() | Self::FINISH_INTERFACES.bits();
        const CONSTRAINTS = Self::START_CONSTRAINTS.bits() | Self::FINISH_CONSTRAINTS.bits();
        const SYNTHESIZED_EXPLICIT_IMPLEMENTATIONS =
            Self::START_SYNTHESIZED_EXPLICIT_IMPLEMENTATIONS.bits()
                | Self::FINISH_SYNTHESIZED_EXPLICIT_IMPLEMENTATIONS.bits();
        const DECLARATION_CHECKS =
            Self::START_DECLARATION_CHECKS.bits() | Self::FINISH_DECLARATION_CHECKS.bits();
        const OVERRIDE_CHECKS =
            Self::START_OVERRIDE_CHECKS.bits() | Self::FINISH_OVERRIDE_CHECKS.bits();
        const MEMBER_CHECKS = Self::START_MEMBER_CHECKS.bits() | Self::FINISH_MEMBER_CHECKS.bits();
        const EXPLICIT_INTERFACE =
            Self::START_EXPLICIT_INTERFACE.bits() | Self::FINISH_EXPLICIT_INTERFACE.bits();

        const TYPE_SYMBOL_ALL = Self::ATTRIBUTES.bits()
            | Self::BASE_TYPE.bits()
            | Self::INTERFACES.bits()
            | Self::CONSTRAINTS.bits()
            | Self::SYNTHESIZED_EXPLICIT_IMPLEMENTATIONS.bits()
            | Self::DECLARATION_CHECKS.bits()
            | Self::MEMBER_CHECKS.bits()
            | Self::MEMBERS_COMPLETED.bits();
        const METHOD_SYMBOL_ALL = Self::ATTRIBUTES.bits()
            | Self::TYPE.bits()
            | Self::PARAMETERS.bits()
            | Self::CONSTRAINTS.bits()
            | Self::DECLARATION_CHECKS.bits()
            | Self::OVERRIDE_CHECKS.bits()
            | Self::EXPLICIT_INTERFACE.bits();
        const PROPERTY_SYMBOL_ALL = Self::ATTRIBUTES.bits()
            | Self::TYPE.bits()
            | Self::PARAMETERS.bits()
            | Self::DECLARATION_CHECKS.bits()
            | Self::OVERRIDE_CHECKS.bits()
            | Self::EXPLICIT_INTERFACE.bits();
        const PARAMETER_SYMBOL_ALL =
            Self::ATTRIBUTES.bits() | Self::TYPE.bits() | Self::DEFAULT_VALUE.bits();
    }
}

impl CompletionPart {
    /// The `START_*` bit paired with a `FINISH_*` bit.
    pub fn start_of(finish: CompletionPart) -> Option<CompletionPart> {
        const PAIRED_FINISH: u32 = CompletionPart::FINISH_TYPE.bits()
            | CompletionPart::FINISH_PARAMETERS.bits()
            | CompletionPart::FINISH_DEFAULT_VALUE.bits()
            | CompletionPart::FINISH_BASE_TYPE.bits()
            | CompletionPart::FINISH_INTERFACES.bits()
            | CompletionPart::FINISH_CONSTRAINTS.bits()
            | CompletionPart::FINISH_SYNTHESIZED_EXPLICIT_IMPLEMENTATIONS.bits()
            | CompletionPart::FINISH_DECLARATION_CHECKS.bits()
            | CompletionPart::FINISH_OVERRIDE_CHECKS.bits()
            | CompletionPart::FINISH_MEMBER_CHECKS.bits()
            | CompletionPart::FINISH_EXPLICIT_INTERFACE.bits();
        let bits = finish.bits();
        if bits.count_ones() == 1 && bits & PAIRED_FINISH != 0 {
            CompletionPart::from_bits(bits >> 1)
        } else {
            None
        }
    }
}

/// Monotonic completion bitset for one symbol.
#[derive(Debug)]
pub struct CompletionState {
    completed: AtomicU32,
}

impl CompletionState {
    /// State for a symbol whose kind uses `parts`. Parts that belong to other
    /// kinds start out complete so `next_incomplete_part` never returns them.
    pub fn for_parts(parts: CompletionPart) -> Self {
        CompletionState {
            completed: AtomicU32::new(CompletionPart::all().bits() & !parts.bits()),
        }
    }

    pub fn completed(&self) -> CompletionPart {
        CompletionPart::from_bits_truncate(self.completed.load(Ordering::Acquire))
    }

    /// True if every bit of `part` is set.
    #[inline]
    pub fn has_complete(&self, part: CompletionPart) -> bool {
        self.completed().contains(part)
    }

    pub fn is_all_complete(&self) -> bool {
        self.completed().is_all()
    }

    /// Set `part` and report whether this call was the one that set it.
    pub fn note_complete(&self, part: CompletionPart) -> bool {
        let previous = self.completed.fetch_or(part.bits(), Ordering::AcqRel);
        previous & part.bits() != part.bits()
    }

    /// Claim a `START_*` part. At most one caller ever gets `true`.
    pub fn try_start(&self, start: CompletionPart) -> bool {
        debug_assert_eq!(start.bits().count_ones(), 1);
        self.note_complete(start)
    }

    /// Record that the claimed work for `finish` is done.
    ///
    /// Must be called exactly once, by the thread that claimed the matching
    /// start part.
    pub fn mark_done(&self, finish: CompletionPart) {
        if let Some(start) = CompletionPart::start_of(finish) {
            debug_assert!(
                self.has_complete(start),
                "{finish:?} marked done before {start:?} was claimed"
            );
        }
        let first = self.note_complete(finish);
        debug_assert!(first, "{finish:?} marked done twice");
    }

    /// Lowest part not yet complete, or `None` when the symbol is done.
    pub fn next_incomplete_part(&self) -> Option<CompletionPart> {
        let pending = !self.completed.load(Ordering::Acquire) & CompletionPart::all().bits();
        if pending == 0 {
            None
        } else {
            CompletionPart::from_bits(1 << pending.trailing_zeros())
        }
    }

    /// Wait until every bit of `part` is set by some thread.
    ///
    /// Spins briefly, then yields, then sleeps in short intervals. The
    /// cancellation token is polled between waits.
    pub fn spin_until_done(
        &self,
        part: CompletionPart,
        cancellation: &CancellationToken,
    ) -> Result<(), OperationCancelled> {
        let mut round = 0u32;
        while !self.has_complete(part) {
            cancellation.check()?;
            if round < SPIN_WAIT_SPIN_ROUNDS {
                for _ in 0..(1u32 << round) {
                    std::hint::spin_loop();
                }
            } else if round < SPIN_WAIT_SLEEP_AFTER {
                let yields = 1u32 << round.min(SPIN_WAIT_MAX_YIELD_SHIFT);
                for _ in 0..yields {
                    std::thread::yield_now();
                }
            } else {
                std::thread::sleep(std::time::Duration::from_micros(SPIN_WAIT_SLEEP_MICROS));
            }
            round = round.saturating_add(1);
        }
        if round > SPIN_WAIT_SPIN_ROUNDS {
            trace!(?part, rounds = round, "spin_until_done: long wait");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/completion_tests.rs"]
mod tests;
