//! Shared builders for checker unit tests.

use crate::compilation::Compilation;
use csz_common::{CancellationToken, CompilerOptions, Diagnostic, SourceLocation};
use csz_symbols::syntax::TypeDeclarationSyntax;
use csz_symbols::{SymbolArenaBuilder, SymbolId};
use std::sync::Arc;

pub(crate) struct Fixture {
    builder: SymbolArenaBuilder,
    options: CompilerOptions,
}

impl Fixture {
    /// Fixture with nullable annotations and warnings enabled.
    pub(crate) fn new() -> Self {
        Self::with_options(CompilerOptions::nullable_enabled())
    }

    pub(crate) fn with_options(options: CompilerOptions) -> Self {
        Fixture {
            builder: SymbolArenaBuilder::new(),
            options,
        }
    }

    pub(crate) fn builder(&mut self) -> &mut SymbolArenaBuilder {
        &mut self.builder
    }

    pub(crate) fn declare(&mut self, declaration: TypeDeclarationSyntax) -> SymbolId {
        self.builder.declare_source_type(vec![Arc::new(declaration)])
    }

    pub(crate) fn declare_partial(&mut self, parts: Vec<TypeDeclarationSyntax>) -> SymbolId {
        self.builder
            .declare_source_type(parts.into_iter().map(Arc::new).collect())
    }

    pub(crate) fn compile(self) -> Compilation {
        Compilation::new(Arc::new(self.builder.build()), self.options)
    }
}

/// The first member of `ty` called `name`.
pub(crate) fn member(compilation: &Compilation, ty: SymbolId, name: &str) -> SymbolId {
    members(compilation, ty, name)[0]
}

pub(crate) fn members(compilation: &Compilation, ty: SymbolId, name: &str) -> Vec<SymbolId> {
    let arena = compilation.arena();
    let atom = arena
        .atom(name)
        .unwrap_or_else(|| panic!("no member named {name}"));
    arena.members_named(ty, atom).to_vec()
}

pub(crate) fn codes(diagnostics: &[Diagnostic]) -> Vec<u32> {
    diagnostics.iter().map(|diagnostic| diagnostic.code).collect()
}

pub(crate) fn at(offset: u32) -> SourceLocation {
    SourceLocation::new("test.cs", offset, 1)
}

/// Complete everything and return the diagnostic codes in location order.
pub(crate) fn check_all(compilation: &Compilation) -> Vec<u32> {
    compilation
        .force_complete_all(&CancellationToken::new())
        .expect("not cancelled");
    codes(&compilation.diagnostics())
}
