//! Explicit default values of parameters.

use crate::compilation::Compilation;
use csz_common::diagnostic_codes;
use csz_symbols::symbol::ParameterSource;
use csz_symbols::{BoundConstant, CompletionPart, ConstantValue, RefKind, SymbolData, SymbolId};
use tracing::trace;

impl Compilation {
    /// The value a caller gets when omitting `parameter`.
    ///
    /// A default written in syntax wins over one supplied by
    /// `[DefaultParameterValue]`, `[DecimalConstant]` or `[DateTimeConstant]`.
    /// A default that failed to bind is `Some(ConstantValue::Bad)` so later
    /// checks know a default was written.
    pub fn explicit_default_value(&self, parameter: SymbolId) -> Option<&ConstantValue> {
        let facets = self.parameter_facets(parameter);
        self.lazy_facet(
            parameter,
            &facets.default_value,
            CompletionPart::FINISH_DEFAULT_VALUE,
            |diagnostics| {
                let arena = self.arena();
                let symbol = arena.parameter(parameter);
                match &symbol.source {
                    ParameterSource::Syntax(syntax) => {
                        let Some(expression) = &syntax.default_value else {
                            return self.default_value_from_attributes(parameter);
                        };
                        let location = expression.location();
                        if matches!(symbol.ref_kind, RefKind::Ref | RefKind::Out) {
                            diagnostics.report(diagnostic_codes::REF_OUT_DEFAULT_VALUE, location, &[]);
                            return None;
                        }
                        if symbol.is_params {
                            diagnostics.report(diagnostic_codes::DEFAULT_VALUE_FOR_PARAMS_PARAMETER, location, &[]);
                            return None;
                        }
                        let target = self.parameter_type(parameter);
                        let value = match self.binder().bind_constant_expression(
                            &self.binding_context(parameter),
                            expression,
                            target,
                            diagnostics,
                        ) {
                            BoundConstant::Constant(constant) => constant.value,
                            BoundConstant::NotConstant => {
                                diagnostics.report(
                                    diagnostic_codes::DEFAULT_VALUE_MUST_BE_CONSTANT,
                                    location,
                                    &[&*syntax.name],
                                );
                                ConstantValue::Bad
                            }
                            BoundConstant::Error => ConstantValue::Bad,
                        };
                        if self.ignores_optional_arguments(parameter) {
                            diagnostics.report(
                                diagnostic_codes::DEFAULT_VALUE_FOR_UNCONSUMED_LOCATION,
                                &syntax.location,
                                &[&*syntax.name],
                            );
                        }
                        trace!(parameter = parameter.0, value = %value, "explicit_default_value");
                        Some(value)
                    }
                    ParameterSource::AccessorCopy { original } => self.explicit_default_value(*original).cloned(),
                    ParameterSource::AccessorValue { .. } => None,
                    ParameterSource::Metadata(info) => info.default_value.clone(),
                }
            },
        )
        .as_ref()
    }

    fn default_value_from_attributes(&self, parameter: SymbolId) -> Option<ConstantValue> {
        let early = self.early_attributes(parameter);
        early
            .default_parameter_value
            .as_ref()
            .map(|constant| constant.value.clone())
            .or_else(|| early.decimal_constant.clone())
            .or_else(|| early.date_time_constant.clone())
    }

    /// Whether the member owning `parameter` is only ever called with every
    /// argument supplied: operators and explicit interface implementations.
    pub(crate) fn ignores_optional_arguments(&self, parameter: SymbolId) -> bool {
        let arena = self.arena();
        let Some(member) = arena.containing_member(parameter) else {
            return false;
        };
        match &arena.symbol(member).data {
            SymbolData::Method(method) => {
                method.kind.is_operator() || method.is_explicit_interface_implementation()
            }
            SymbolData::Property(property) => property.is_explicit_interface_implementation(),
            _ => false,
        }
    }

    /// Whether callers may omit `parameter`.
    pub fn is_optional(&self, parameter: SymbolId) -> bool {
        let symbol = self.arena().parameter(parameter);
        if symbol.is_params || matches!(symbol.ref_kind, RefKind::Ref | RefKind::Out) {
            return false;
        }
        self.explicit_default_value(parameter).is_some() || self.early_attributes(parameter).has_optional
    }
}

#[cfg(test)]
#[path = "tests/default_values_tests.rs"]
mod tests;
