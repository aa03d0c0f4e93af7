//! Drives symbols to full completion.
//!
//! `force_complete` repeatedly takes the lowest incomplete part of a symbol.
//! Facet parts are completed by requesting the facet; composite check parts
//! are claimed with `try_start` and run by exactly one thread. A part some
//! other thread is finishing is waited for.

use crate::compilation::Compilation;
use csz_common::{CancellationToken, DiagnosticBag, OperationCancelled};
use csz_symbols::{CompletionPart, SymbolData, SymbolId};
use rayon::prelude::*;
use tracing::{debug, info_span, trace};

impl Compilation {
    /// Complete every part of `symbol`, and of its members when it is a type.
    pub fn force_complete(&self, symbol: SymbolId, cancellation: &CancellationToken) -> Result<(), OperationCancelled> {
        let completion = &self.state(symbol).completion;
        while let Some(part) = completion.next_incomplete_part() {
            cancellation.check()?;
            trace!(symbol = symbol.0, ?part, "force_complete");
            self.complete_part(symbol, part, cancellation)?;
        }
        Ok(())
    }

    /// Complete every source type and all of their members, types in
    /// parallel.
    pub fn force_complete_all(&self, cancellation: &CancellationToken) -> Result<(), OperationCancelled> {
        let types = self.arena().source_types();
        let _span = info_span!("force_complete_all", types = types.len()).entered();
        types
            .par_iter()
            .try_for_each(|&ty| self.force_complete(ty, cancellation))?;
        debug!(types = types.len(), "force_complete_all: done");
        Ok(())
    }

    fn complete_part(
        &self,
        symbol: SymbolId,
        part: CompletionPart,
        cancellation: &CancellationToken,
    ) -> Result<(), OperationCancelled> {
        let arena = self.arena();
        let completion = &self.state(symbol).completion;
        let data = &arena.symbol(symbol).data;

        if part == CompletionPart::ATTRIBUTES {
            self.attributes(symbol);
            return Ok(());
        }
        if CompletionPart::TYPE.contains(part) {
            match data {
                SymbolData::Parameter(_) => {
                    self.parameter_type(symbol);
                }
                _ => {
                    self.member_type(symbol);
                }
            }
            return completion.spin_until_done(CompletionPart::FINISH_TYPE, cancellation);
        }
        if CompletionPart::PARAMETERS.contains(part) {
            let parameters = arena.parameters_of(symbol).iter();
            for &parameter in parameters.chain(arena.type_parameters_of(symbol)) {
                self.force_complete(parameter, cancellation)?;
            }
            return self.claim(symbol, CompletionPart::FINISH_PARAMETERS, cancellation, |_| {});
        }
        if CompletionPart::DEFAULT_VALUE.contains(part) {
            self.explicit_default_value(symbol);
            return completion.spin_until_done(CompletionPart::FINISH_DEFAULT_VALUE, cancellation);
        }
        if CompletionPart::BASE_TYPE.contains(part) {
            self.base_type(symbol);
            return completion.spin_until_done(CompletionPart::FINISH_BASE_TYPE, cancellation);
        }
        if CompletionPart::INTERFACES.contains(part) {
            self.interfaces(symbol);
            return completion.spin_until_done(CompletionPart::FINISH_INTERFACES, cancellation);
        }
        if CompletionPart::CONSTRAINTS.contains(part) {
            self.constraint_clauses(symbol);
            return completion.spin_until_done(CompletionPart::FINISH_CONSTRAINTS, cancellation);
        }
        if CompletionPart::SYNTHESIZED_EXPLICIT_IMPLEMENTATIONS.contains(part) {
            self.synthesized_explicit_implementations(symbol);
            return completion.spin_until_done(CompletionPart::FINISH_SYNTHESIZED_EXPLICIT_IMPLEMENTATIONS, cancellation);
        }
        if CompletionPart::DECLARATION_CHECKS.contains(part) {
            return self.claim(symbol, CompletionPart::FINISH_DECLARATION_CHECKS, cancellation, |diagnostics| {
                match data {
                    SymbolData::Method(_) => {
                        self.check_member_modifiers(symbol, diagnostics);
                        self.check_operator(symbol, diagnostics);
                    }
                    SymbolData::Property(_) => {
                        self.check_member_modifiers(symbol, diagnostics);
                        self.check_property_accessors(symbol, diagnostics);
                    }
                    _ => {}
                }
            });
        }
        if CompletionPart::OVERRIDE_CHECKS.contains(part) {
            return self.claim(symbol, CompletionPart::FINISH_OVERRIDE_CHECKS, cancellation, |diagnostics| {
                self.check_override_or_hiding(symbol, diagnostics);
            });
        }
        if CompletionPart::EXPLICIT_INTERFACE.contains(part) {
            self.explicit_implementation(symbol);
            return completion.spin_until_done(CompletionPart::FINISH_EXPLICIT_INTERFACE, cancellation);
        }
        if CompletionPart::MEMBER_CHECKS.contains(part) {
            return self.claim(symbol, CompletionPart::FINISH_MEMBER_CHECKS, cancellation, |diagnostics| {
                self.check_type_members(symbol, diagnostics);
            });
        }
        if part == CompletionPart::MEMBERS_COMPLETED {
            for &member in arena.members(symbol) {
                self.force_complete(member, cancellation)?;
            }
            for &type_parameter in arena.type_parameters_of(symbol) {
                self.force_complete(type_parameter, cancellation)?;
            }
            completion.note_complete(CompletionPart::MEMBERS_COMPLETED);
            return Ok(());
        }
        unreachable!("{part:?} is not a completion part of {symbol:?}")
    }

    /// Run `check` once for the composite part `finish`: the thread that
    /// claims the start bit runs it and commits, every other thread waits.
    fn claim(
        &self,
        symbol: SymbolId,
        finish: CompletionPart,
        cancellation: &CancellationToken,
        check: impl FnOnce(&mut DiagnosticBag),
    ) -> Result<(), OperationCancelled> {
        let state = self.state(symbol);
        let Some(start) = CompletionPart::start_of(finish) else {
            unreachable!("{finish:?} has no start part")
        };
        if state.completion.try_start(start) {
            let mut diagnostics = DiagnosticBag::new();
            check(&mut diagnostics);
            state.diagnostics.commit(diagnostics);
            state.completion.mark_done(finish);
            trace!(symbol = symbol.0, ?finish, "claimed");
            Ok(())
        } else {
            state.completion.spin_until_done(finish, cancellation)
        }
    }
}

#[cfg(test)]
#[path = "tests/completion_driver_tests.rs"]
mod tests;
