//! Install-once protocol shared by every lazily computed facet.

use crate::compilation::Compilation;
use csz_common::DiagnosticBag;
use csz_symbols::{CompletionPart, LazySlot, SymbolId};
use tracing::{debug, trace};

impl Compilation {
    /// Return the value in `slot`, computing it on first use.
    ///
    /// The computation runs without any lock and reports into a private bag.
    /// When threads race, the first install wins. Only the winner claims
    /// `finish`, commits its diagnostics and marks the part done; losers drop
    /// their value and their diagnostics.
    pub(crate) fn lazy_facet<'a, T>(
        &'a self,
        symbol: SymbolId,
        slot: &'a LazySlot<T>,
        finish: CompletionPart,
        compute: impl FnOnce(&mut DiagnosticBag) -> T,
    ) -> &'a T {
        self.lazy_facet_with(symbol, slot, finish, compute, |_| {})
    }

    /// [`Compilation::lazy_facet`] with a hook run by the winner after the
    /// value is published and before the part is marked done.
    pub(crate) fn lazy_facet_with<'a, T>(
        &'a self,
        symbol: SymbolId,
        slot: &'a LazySlot<T>,
        finish: CompletionPart,
        compute: impl FnOnce(&mut DiagnosticBag) -> T,
        on_publish: impl FnOnce(&T),
    ) -> &'a T {
        if let Some(value) = slot.get() {
            return value;
        }
        let mut diagnostics = DiagnosticBag::new();
        let value = compute(&mut diagnostics);
        let (published, won) = slot.install(value);
        if !won {
            trace!(
                symbol = symbol.0,
                ?finish,
                discarded = diagnostics.len(),
                "lazy_facet: lost install race"
            );
            return published;
        }

        let state = self.state(symbol);
        match CompletionPart::start_of(finish) {
            Some(start) => {
                // Metadata symbols start with every part complete.
                if state.completion.try_start(start) {
                    on_publish(published);
                    state.diagnostics.commit(diagnostics);
                    state.completion.mark_done(finish);
                }
            }
            None => {
                if !state.completion.has_complete(finish) {
                    on_publish(published);
                    state.diagnostics.commit(diagnostics);
                    state.completion.note_complete(finish);
                }
            }
        }
        debug!(symbol = symbol.0, ?finish, "lazy_facet: published");
        published
    }

    /// Install-once value with no completion part and no diagnostics.
    pub(crate) fn lazy_value<'a, T>(&'a self, slot: &'a LazySlot<T>, compute: impl FnOnce() -> T) -> &'a T {
        if let Some(value) = slot.get() {
            return value;
        }
        slot.install(compute()).0
    }
}

#[cfg(test)]
#[path = "tests/facet_tests.rs"]
mod tests;
