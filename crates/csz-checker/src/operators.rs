//! User-defined operator signature rules.
//!
//! Each check is keyed by the operator kind and only looks at the declared
//! parameter and return types. A wrong parameter count ends validation
//! before any kind-specific rule runs.

use crate::compilation::Compilation;
use csz_common::{DiagnosticBag, SourceLocation, diagnostic_codes};
use csz_symbols::syntax::{MethodSyntaxKind, OperatorKind};
use csz_symbols::{Accessibility, SymbolId, TypeId, TypeKind};
use tracing::trace;

/// What an operator declaration is checked against.
struct OperatorContext {
    container: SymbolId,
    /// The containing type as seen from inside itself.
    container_type: TypeId,
    /// Static abstract or virtual operator in an interface: may be declared
    /// over a type parameter constrained to the interface.
    is_interface_virtual: bool,
    location: SourceLocation,
}

impl Compilation {
    /// Signature rules for a source operator or conversion.
    pub(crate) fn check_operator(&self, method: SymbolId, diagnostics: &mut DiagnosticBag) {
        let arena = self.arena();
        let symbol = arena.symbol(method);
        let Some(kind) = symbol.as_method().and_then(|m| m.operator) else {
            return;
        };
        if !symbol.is_source() {
            return;
        }
        let Some(container) = arena.containing_type(method) else {
            return;
        };
        let in_interface = arena.type_symbol(container).kind == TypeKind::Interface;
        let cx = OperatorContext {
            container,
            container_type: arena.declared_type(container),
            is_interface_virtual: in_interface && (symbol.is_abstract() || symbol.is_virtual()),
            location: symbol.location(),
        };
        let name = self.display_member(method);

        if in_interface && (kind.is_conversion() || kind.is_equality()) && !cx.is_interface_virtual {
            diagnostics.report(
                diagnostic_codes::INTERFACES_CANT_CONTAIN_CONVERSION_OR_EQUALITY,
                &cx.location,
                &[],
            );
            return;
        }
        let must_be_public = !in_interface && symbol.accessibility != Accessibility::Public;
        if !symbol.is_static() || must_be_public {
            diagnostics.report(diagnostic_codes::OPERATORS_MUST_BE_STATIC, &cx.location, &[&name]);
        }

        let parameters = arena.parameters_of(method);
        if parameters.len() != kind.arity() {
            let code = if kind.arity() == 1 {
                diagnostic_codes::BAD_UNARY_OPERATOR_ARITY
            } else {
                diagnostic_codes::BAD_BINARY_OPERATOR_ARITY
            };
            trace!(method = method.0, ?kind, parameters = parameters.len(), "check_operator: arity");
            diagnostics.report(code, &cx.location, &[kind.display()]);
            return;
        }
        let parameter_types: Vec<TypeId> = parameters
            .iter()
            .map(|&parameter| self.parameter_type(parameter).ty)
            .collect();
        let return_type = self.member_type(method).ty;
        if parameter_types.iter().chain([&return_type]).any(|ty| arena.interner().contains_error(*ty)) {
            return;
        }

        match kind {
            OperatorKind::Implicit | OperatorKind::Explicit => {
                self.check_conversion(&cx, &name, parameter_types[0], return_type, diagnostics);
            }
            OperatorKind::Increment | OperatorKind::Decrement => {
                self.check_increment(&cx, parameter_types[0], return_type, diagnostics);
            }
            OperatorKind::True | OperatorKind::False => {
                self.check_unary(&cx, parameter_types[0], diagnostics);
                if return_type != TypeId::BOOL {
                    diagnostics.report(diagnostic_codes::TRUE_FALSE_MUST_RETURN_BOOL, &cx.location, &[]);
                }
            }
            _ if kind.is_unary() => self.check_unary(&cx, parameter_types[0], diagnostics),
            _ if kind.is_shift() => self.check_shift(&cx, parameter_types[0], parameter_types[1], diagnostics),
            _ if kind.is_equality() && cx.is_interface_virtual => {
                if !parameter_types.iter().any(|ty| self.is_self_constrained(&cx, *ty)) {
                    let interface = self.display_member(cx.container);
                    diagnostics.report(
                        diagnostic_codes::BAD_ABSTRACT_EQUALITY_OPERATOR_SIGNATURE,
                        &cx.location,
                        &[&interface],
                    );
                }
            }
            _ => {
                if !parameter_types.iter().any(|ty| self.matches_container(&cx, *ty)) {
                    let code = if cx.is_interface_virtual {
                        diagnostic_codes::BAD_ABSTRACT_BINARY_OPERATOR_SIGNATURE
                    } else {
                        diagnostic_codes::BAD_BINARY_OPERATOR_SIGNATURE
                    };
                    diagnostics.report(code, &cx.location, &[]);
                }
            }
        }
    }

    /// `ty` is the containing type, `ty?` over it, or (for interface
    /// virtual operators) a type parameter constrained to it.
    fn matches_container(&self, cx: &OperatorContext, ty: TypeId) -> bool {
        let stripped = self.arena().interner().strip_nullable(ty);
        self.same_type(stripped, cx.container_type) || (cx.is_interface_virtual && self.is_self_constrained(cx, stripped))
    }

    /// A type parameter of the containing interface whose constraints
    /// include the interface itself.
    fn is_self_constrained(&self, cx: &OperatorContext, ty: TypeId) -> bool {
        let arena = self.arena();
        let Some(type_parameter) = arena.interner().type_parameter_symbol(ty) else {
            return false;
        };
        if arena.type_parameter(type_parameter).owner != cx.container {
            return false;
        }
        self.type_parameter_constraints(type_parameter).is_some_and(|clause| {
            clause
                .constraint_types
                .iter()
                .any(|constraint| self.same_type(constraint.ty, cx.container_type))
        })
    }

    fn check_unary(&self, cx: &OperatorContext, parameter: TypeId, diagnostics: &mut DiagnosticBag) {
        if !self.matches_container(cx, parameter) {
            let code = if cx.is_interface_virtual {
                diagnostic_codes::BAD_ABSTRACT_UNARY_OPERATOR_SIGNATURE
            } else {
                diagnostic_codes::BAD_UNARY_OPERATOR_SIGNATURE
            };
            diagnostics.report(code, &cx.location, &[]);
        }
    }

    fn check_increment(
        &self,
        cx: &OperatorContext,
        parameter: TypeId,
        return_type: TypeId,
        diagnostics: &mut DiagnosticBag,
    ) {
        if !self.matches_container(cx, parameter) {
            let code = if cx.is_interface_virtual {
                diagnostic_codes::BAD_ABSTRACT_INC_DEC_SIGNATURE
            } else {
                diagnostic_codes::BAD_INC_DEC_SIGNATURE
            };
            diagnostics.report(code, &cx.location, &[]);
            return;
        }
        let interner = self.arena().interner();
        let returns_parameter = self.same_type(return_type, parameter) || self.is_derived_from(return_type, parameter);
        let returns_self_type = cx.is_interface_virtual
            && self.is_self_constrained(cx, return_type)
            && !interner.is_type_parameter(parameter);
        if !returns_parameter && !returns_self_type {
            let code = if cx.is_interface_virtual {
                diagnostic_codes::BAD_ABSTRACT_INC_DEC_RETURN_TYPE
            } else {
                diagnostic_codes::BAD_INC_DEC_RETURN_TYPE
            };
            diagnostics.report(code, &cx.location, &[]);
        }
    }

    fn check_shift(&self, cx: &OperatorContext, left: TypeId, right: TypeId, diagnostics: &mut DiagnosticBag) {
        if !self.matches_container(cx, left) {
            let code = if cx.is_interface_virtual {
                diagnostic_codes::BAD_ABSTRACT_SHIFT_OPERATOR_SIGNATURE
            } else {
                diagnostic_codes::BAD_SHIFT_OPERATOR_SIGNATURE
            };
            diagnostics.report(code, &cx.location, &[]);
            return;
        }
        let relaxed = self.options().language_version.supports_relaxed_shift_operator();
        if !relaxed && self.arena().interner().strip_nullable(right) != TypeId::INT {
            diagnostics.report(diagnostic_codes::BAD_SHIFT_OPERATOR_SIGNATURE, &cx.location, &[]);
        }
    }

    fn check_conversion(
        &self,
        cx: &OperatorContext,
        name: &str,
        source: TypeId,
        target: TypeId,
        diagnostics: &mut DiagnosticBag,
    ) {
        if source == TypeId::DYNAMIC || target == TypeId::DYNAMIC {
            diagnostics.report(diagnostic_codes::BAD_DYNAMIC_CONVERSION, &cx.location, &[name]);
            return;
        }
        let interner = self.arena().interner();
        let (source_stripped, target_stripped) = (interner.strip_nullable(source), interner.strip_nullable(target));
        let from_container = self.matches_container(cx, source);
        let to_container = self.matches_container(cx, target);
        if !from_container && !to_container {
            diagnostics.report(
                diagnostic_codes::CONVERSION_NOT_INVOLVING_CONTAINING_TYPE,
                &cx.location,
                &[],
            );
            return;
        }
        if self.same_type(source_stripped, target_stripped) {
            diagnostics.report(diagnostic_codes::IDENTITY_CONVERSION, &cx.location, &[]);
            return;
        }
        let arena = self.arena();
        if arena.is_interface_type(source_stripped) || arena.is_interface_type(target_stripped) {
            diagnostics.report(diagnostic_codes::CONVERSION_WITH_INTERFACE, &cx.location, &[name]);
            return;
        }
        // Type parameters have no base or derived relationships.
        let (own, other) = if from_container {
            (source_stripped, target_stripped)
        } else {
            (target_stripped, source_stripped)
        };
        if self.is_derived_from(own, other) {
            diagnostics.report(diagnostic_codes::CONVERSION_WITH_BASE, &cx.location, &[name]);
        } else if self.is_derived_from(other, own) {
            diagnostics.report(diagnostic_codes::CONVERSION_WITH_DERIVED, &cx.location, &[name]);
        }
    }

    /// Whether the operator was written with `checked`.
    pub(crate) fn is_checked_operator(&self, method: SymbolId) -> bool {
        self.arena().symbol(method).as_method().and_then(|m| m.syntax()).is_some_and(|syntax| {
            matches!(
                syntax.kind,
                MethodSyntaxKind::Operator { is_checked: true, .. } | MethodSyntaxKind::Conversion { is_checked: true, .. }
            )
        })
    }
}

#[cfg(test)]
#[path = "tests/operators_tests.rs"]
mod tests;
