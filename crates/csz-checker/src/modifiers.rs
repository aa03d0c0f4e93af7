//! Declaration-shape checks: modifier combinations on members and the
//! accessor layout of properties.
//!
//! These only look at what was written, so they never depend on another
//! facet and are never suppressed by later steps.

use crate::compilation::Compilation;
use csz_common::{DiagnosticBag, diagnostic_codes};
use csz_symbols::{Accessibility, DeclarationModifiers, RefKind, SymbolId, TypeKind};

/// Keyword of the first modifier in `modifiers`, in declaration order.
fn modifier_keyword(modifiers: DeclarationModifiers) -> &'static str {
    const KEYWORDS: [(DeclarationModifiers, &str); 6] = [
        (DeclarationModifiers::VIRTUAL, "virtual"),
        (DeclarationModifiers::ABSTRACT, "abstract"),
        (DeclarationModifiers::OVERRIDE, "override"),
        (DeclarationModifiers::SEALED, "sealed"),
        (DeclarationModifiers::NEW, "new"),
        (DeclarationModifiers::EXTERN, "extern"),
    ];
    KEYWORDS
        .iter()
        .find(|(flag, _)| modifiers.contains(*flag))
        .map_or("", |(_, keyword)| keyword)
}

impl Compilation {
    /// Modifier combinations on a source method or property. Accessors are
    /// covered by their property; operators by the operator validator.
    pub(crate) fn check_member_modifiers(&self, member: SymbolId, diagnostics: &mut DiagnosticBag) {
        let arena = self.arena();
        let symbol = arena.symbol(member);
        if !symbol.is_source() {
            return;
        }
        if symbol
            .as_method()
            .is_some_and(|method| method.kind.is_accessor() || method.kind.is_operator())
        {
            return;
        }
        let Some(container) = arena.containing_type(member) else {
            return;
        };
        let container_symbol = arena.symbol(container);
        let container_kind = arena.type_symbol(container).kind;
        let location = symbol.location();
        let modifiers = symbol.modifiers;
        let name = self.display_member(member);

        let is_explicit = match (symbol.as_method(), symbol.as_property()) {
            (Some(method), _) => method.is_explicit_interface_implementation(),
            (_, Some(property)) => property.is_explicit_interface_implementation(),
            _ => false,
        };
        if is_explicit {
            let dispatch = DeclarationModifiers::VIRTUAL
                | DeclarationModifiers::ABSTRACT
                | DeclarationModifiers::OVERRIDE
                | DeclarationModifiers::SEALED
                | DeclarationModifiers::NEW;
            if modifiers.intersects(dispatch) {
                diagnostics.report(
                    diagnostic_codes::BAD_MEMBER_FLAG,
                    &location,
                    &[modifier_keyword(modifiers & dispatch)],
                );
            }
            return;
        }
        if container_kind == TypeKind::Interface {
            return;
        }

        let dispatch = DeclarationModifiers::VIRTUAL | DeclarationModifiers::ABSTRACT | DeclarationModifiers::OVERRIDE;
        if symbol.is_static() {
            if modifiers.intersects(dispatch) {
                diagnostics.report(
                    diagnostic_codes::STATIC_NOT_VIRTUAL,
                    &location,
                    &[modifier_keyword(modifiers & dispatch)],
                );
            }
        } else if container_kind == TypeKind::Class && container_symbol.is_static() {
            diagnostics.report(diagnostic_codes::INSTANCE_MEMBER_IN_STATIC_CLASS, &location, &[name.as_str()]);
        }

        if container_kind == TypeKind::Struct {
            let not_in_structs = DeclarationModifiers::VIRTUAL | DeclarationModifiers::ABSTRACT | DeclarationModifiers::SEALED;
            if modifiers.intersects(not_in_structs) {
                diagnostics.report(
                    diagnostic_codes::BAD_MEMBER_FLAG,
                    &location,
                    &[modifier_keyword(modifiers & not_in_structs)],
                );
            }
            if symbol.accessibility.includes_protected() && !symbol.is_override() {
                diagnostics.report(diagnostic_codes::PROTECTED_IN_STRUCT, &location, &[name.as_str()]);
            }
        }

        if symbol.is_override() && symbol.is_new() {
            diagnostics.report(diagnostic_codes::OVERRIDE_NOT_NEW, &location, &[name.as_str()]);
        }
        if symbol.is_sealed() && !symbol.is_override() && container_kind != TypeKind::Struct {
            diagnostics.report(diagnostic_codes::SEALED_NON_OVERRIDE, &location, &[name.as_str()]);
        }
        if symbol.is_abstract() {
            if symbol.is_extern() {
                diagnostics.report(diagnostic_codes::ABSTRACT_AND_EXTERN, &location, &[name.as_str()]);
            }
            if symbol.is_sealed() {
                diagnostics.report(diagnostic_codes::ABSTRACT_AND_SEALED, &location, &[name.as_str()]);
            }
            if symbol.is_virtual() {
                diagnostics.report(
                    diagnostic_codes::ABSTRACT_NOT_VIRTUAL,
                    &location,
                    &[symbol.kind_name(), name.as_str()],
                );
            }
        }
        if symbol.is_overridable_kind() && symbol.accessibility == Accessibility::Private {
            diagnostics.report(diagnostic_codes::VIRTUAL_PRIVATE, &location, &[name.as_str()]);
        }

        if container_kind != TypeKind::Class {
            return;
        }
        let container_name = self.display_member(container);
        let introduces_virtual = (symbol.is_virtual() || symbol.is_abstract()) && !symbol.is_override();
        if container_symbol.is_sealed() && introduces_virtual {
            diagnostics.report(
                diagnostic_codes::NEW_VIRTUAL_IN_SEALED,
                &location,
                &[name.as_str(), container_name.as_str()],
            );
        }
        if symbol.is_abstract() && !container_symbol.is_abstract() {
            diagnostics.report(
                diagnostic_codes::ABSTRACT_IN_CONCRETE_CLASS,
                &location,
                &[name.as_str(), container_name.as_str()],
            );
        }
        if container_symbol.is_sealed() && symbol.accessibility.includes_protected() && !symbol.is_override() {
            diagnostics.report(diagnostic_codes::PROTECTED_IN_SEALED, &location, &[name.as_str()]);
        }
    }

    /// Accessor layout of a source property or indexer.
    pub(crate) fn check_property_accessors(&self, property: SymbolId, diagnostics: &mut DiagnosticBag) {
        let arena = self.arena();
        let symbol = arena.symbol(property);
        let Some(syntax) = symbol.as_property().and_then(|property| property.syntax()) else {
            return;
        };
        let name = self.display_member(property);
        if syntax.accessors.is_empty() {
            diagnostics.report(diagnostic_codes::PROPERTY_WITH_NO_ACCESSORS, &syntax.location, &[name.as_str()]);
            return;
        }
        if syntax.ref_kind != RefKind::None {
            if syntax.getter().is_none() {
                diagnostics.report(diagnostic_codes::REF_PROPERTY_MUST_HAVE_GET, &syntax.location, &[name.as_str()]);
            }
            if let Some(setter) = syntax.setter() {
                diagnostics.report(diagnostic_codes::REF_PROPERTY_CANNOT_HAVE_SET, &setter.location, &[name.as_str()]);
            }
        }

        let restricted: Vec<_> = syntax
            .accessors
            .iter()
            .filter_map(|accessor| accessor.accessibility.map(|accessibility| (accessor, accessibility)))
            .collect();
        if restricted.len() > 1 {
            diagnostics.report(
                diagnostic_codes::DUPLICATE_PROPERTY_ACCESSOR_MODIFIERS,
                &syntax.location,
                &[name.as_str()],
            );
        }
        let has_both = syntax.getter().is_some() && syntax.setter().is_some();
        for (accessor, accessibility) in restricted {
            let accessor_name = format!("{name}.{}", accessor.kind.keyword());
            if !has_both && !symbol.is_override() {
                diagnostics.report(
                    diagnostic_codes::ACCESSOR_MODIFIER_REQUIRES_BOTH_ACCESSORS,
                    &accessor.location,
                    &[accessor_name.as_str()],
                );
            }
            if !accessibility.is_more_restrictive_than(symbol.accessibility) {
                diagnostics.report(
                    diagnostic_codes::INVALID_PROPERTY_ACCESSOR_MODIFIER,
                    &accessor.location,
                    &[accessor_name.as_str(), name.as_str()],
                );
            }
            if accessibility == Accessibility::Private && (symbol.is_abstract() || symbol.is_virtual()) {
                diagnostics.report(
                    diagnostic_codes::PRIVATE_ABSTRACT_ACCESSOR,
                    &accessor.location,
                    &[accessor_name.as_str()],
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/modifiers_tests.rs"]
mod tests;
