//! csz: symbol completion and declaration checking for a C#-like language.
//!
//! The work is split across three crates, re-exported here:
//! - [`common`] (`csz-common`) - interning, locations, diagnostics, options
//! - [`symbols`] (`csz-symbols`) - the symbol arena, types and declaration syntax
//! - [`checker`] (`csz-checker`) - lazily completed facets and the checks
//!   that run over them
//!
//! A typical caller declares source types on a [`SymbolArenaBuilder`],
//! builds a [`Compilation`] and drives it with [`check`].

pub use csz_checker as checker;
pub use csz_common as common;
pub use csz_symbols as symbols;

pub mod tracing_config;

pub use csz_checker::Compilation;
pub use csz_common::{
    CancellationToken, CompilerOptions, Diagnostic, DiagnosticCategory, OperationCancelled,
    SourceLocation, diagnostic_codes,
};
pub use csz_symbols::{SymbolArena, SymbolArenaBuilder, SymbolId};

use std::sync::Arc;
use tracing::info_span;

/// Complete every source symbol of `arena` and return the diagnostics,
/// in location order with `options` applied.
pub fn check(
    arena: Arc<SymbolArena>,
    options: CompilerOptions,
    cancellation: &CancellationToken,
) -> Result<Vec<Diagnostic>, OperationCancelled> {
    let _span = info_span!("check", symbols = arena.len()).entered();
    let compilation = Compilation::new(arena, options);
    compilation.force_complete_all(cancellation)?;
    Ok(compilation.diagnostics())
}
