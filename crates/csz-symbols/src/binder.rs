//! Contract with the expression and type binder.
//!
//! The symbol layer never resolves names itself. Every facet that needs a
//! type, a constant or an attribute instance asks a `Binder`, passing the
//! scope it binds in and a scratch diagnostic bag. Implementations must be
//! re-entrant: the same binder is used concurrently by every thread
//! completing symbols.

use crate::arena::SymbolArena;
use crate::constant::{AttributeData, TypedConstant};
use crate::symbol::SymbolId;
use crate::syntax::{AttributeSyntax, ExpressionSyntax, TypeSyntax};
use crate::types::TypeWithAnnotations;
use csz_common::DiagnosticBag;

/// Where a piece of syntax is bound.
#[derive(Clone, Copy)]
pub struct BindingContext<'a> {
    pub arena: &'a SymbolArena,
    /// Innermost symbol whose type parameters are in scope (a method or a
    /// type). Names not found there are looked up in its containers.
    pub scope: SymbolId,
    /// Whether `T?` on a reference type is an annotation here.
    pub annotations_enabled: bool,
}

impl<'a> BindingContext<'a> {
    pub fn new(arena: &'a SymbolArena, scope: SymbolId, annotations_enabled: bool) -> Self {
        BindingContext {
            arena,
            scope,
            annotations_enabled,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeBindingMode {
    /// Bind only the primitive constructor arguments. Must not touch any
    /// facet that itself depends on attributes.
    Early,
    Full,
}

/// Outcome of binding a default value or attribute argument.
#[derive(Clone, Debug, PartialEq)]
pub enum BoundConstant {
    Constant(TypedConstant),
    /// Binds, but not to a compile-time constant.
    NotConstant,
    /// Binding failed; a diagnostic has already been reported.
    Error,
}

pub trait Binder: Send + Sync {
    fn bind_type(
        &self,
        cx: &BindingContext<'_>,
        syntax: &TypeSyntax,
        diagnostics: &mut DiagnosticBag,
    ) -> TypeWithAnnotations;

    /// Bind `syntax` as a constant converted to `target`.
    fn bind_constant_expression(
        &self,
        cx: &BindingContext<'_>,
        syntax: &ExpressionSyntax,
        target: &TypeWithAnnotations,
        diagnostics: &mut DiagnosticBag,
    ) -> BoundConstant;

    /// Resolve the attribute class named by `syntax`, trying the
    /// `Attribute` suffix. Only looks at names; never binds arguments.
    fn resolve_attribute_class(
        &self,
        cx: &BindingContext<'_>,
        syntax: &AttributeSyntax,
        diagnostics: &mut DiagnosticBag,
    ) -> Option<SymbolId>;

    fn bind_attribute(
        &self,
        cx: &BindingContext<'_>,
        syntax: &AttributeSyntax,
        class: SymbolId,
        mode: AttributeBindingMode,
        diagnostics: &mut DiagnosticBag,
    ) -> AttributeData;
}
