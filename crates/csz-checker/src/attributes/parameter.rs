//! Full decoding and validation of parameter attributes.

use super::{AttributeBag, decode_nullability};
use crate::compilation::Compilation;
use csz_common::{DiagnosticBag, SourceLocation, diagnostic_codes};
use csz_symbols::relations::is_value_type;
use csz_symbols::{
    AttributeData, ConstantValue, RefKind, ScopedKind, SymbolId, TypeId, WellKnownAttributeKind, display_type,
    display_type_id,
};

/// Diagnostics for one caller-info attribute, in check order.
struct CallerInfoCodes {
    unconsumed: u32,
    no_conversion: u32,
    without_default: u32,
    source: TypeId,
}

const CALLER_LINE_NUMBER: CallerInfoCodes = CallerInfoCodes {
    unconsumed: diagnostic_codes::CALLER_LINE_NUMBER_UNCONSUMED_LOCATION,
    no_conversion: diagnostic_codes::NO_CONVERSION_FOR_CALLER_LINE_NUMBER,
    without_default: diagnostic_codes::CALLER_LINE_NUMBER_WITHOUT_DEFAULT,
    source: TypeId::INT,
};

const CALLER_FILE_PATH: CallerInfoCodes = CallerInfoCodes {
    unconsumed: diagnostic_codes::CALLER_FILE_PATH_UNCONSUMED_LOCATION,
    no_conversion: diagnostic_codes::NO_CONVERSION_FOR_CALLER_FILE_PATH,
    without_default: diagnostic_codes::CALLER_FILE_PATH_WITHOUT_DEFAULT,
    source: TypeId::STRING,
};

const CALLER_MEMBER_NAME: CallerInfoCodes = CallerInfoCodes {
    unconsumed: diagnostic_codes::CALLER_MEMBER_NAME_UNCONSUMED_LOCATION,
    no_conversion: diagnostic_codes::NO_CONVERSION_FOR_CALLER_MEMBER_NAME,
    without_default: diagnostic_codes::CALLER_MEMBER_NAME_WITHOUT_DEFAULT,
    source: TypeId::STRING,
};

const CALLER_ARGUMENT_EXPRESSION: CallerInfoCodes = CallerInfoCodes {
    unconsumed: diagnostic_codes::CALLER_ARGUMENT_EXPRESSION_UNCONSUMED_LOCATION,
    no_conversion: diagnostic_codes::NO_CONVERSION_FOR_CALLER_ARGUMENT_EXPRESSION,
    without_default: diagnostic_codes::CALLER_ARGUMENT_EXPRESSION_WITHOUT_DEFAULT,
    source: TypeId::STRING,
};

impl Compilation {
    pub(super) fn decode_parameter_attributes(
        &self,
        parameter: SymbolId,
        bag: &mut AttributeBag,
        diagnostics: &mut DiagnosticBag,
    ) {
        use WellKnownAttributeKind as K;
        let arena = self.arena();
        let symbol = arena.parameter(parameter);
        let has_syntax_default = symbol
            .syntax()
            .is_some_and(|syntax| syntax.default_value.is_some());
        let mut attribute_default: Option<ConstantValue> = None;
        let mut well_known = std::mem::take(&mut bag.well_known);

        for data in &bag.attributes {
            let Some(kind) = data.kind else {
                continue;
            };
            if decode_nullability(data, &mut well_known) {
                continue;
            }
            match kind {
                K::ParamArray => {
                    diagnostics.report(diagnostic_codes::EXPLICIT_PARAM_ARRAY_ATTRIBUTE, &data.location, &[]);
                }
                K::Optional => {
                    if has_syntax_default {
                        diagnostics.report(diagnostic_codes::DEFAULT_VALUE_USED_WITH_ATTRIBUTES, &data.location, &[]);
                    }
                }
                K::DefaultParameterValue => {
                    if has_syntax_default {
                        diagnostics.report(diagnostic_codes::DEFAULT_VALUE_USED_WITH_ATTRIBUTES, &data.location, &[]);
                    } else if let Some(value) = self.check_default_parameter_value(parameter, data, diagnostics) {
                        self.record_attribute_default(value, &mut attribute_default, &data.location, diagnostics);
                    }
                }
                K::DecimalConstant | K::DateTimeConstant => {
                    let decoded = if kind == K::DecimalConstant {
                        bag.early.decimal_constant.clone()
                    } else {
                        bag.early.date_time_constant.clone()
                    };
                    let Some(value) = decoded else {
                        continue;
                    };
                    if has_syntax_default {
                        // Agreeing values are the accepted legacy pattern.
                        if let Some(syntax_value) = self.explicit_default_value(parameter) {
                            if !syntax_value.is_bad() && *syntax_value != value {
                                diagnostics.report(
                                    diagnostic_codes::PARAM_DEFAULT_VALUE_DIFFERS_FROM_ATTRIBUTE,
                                    &data.location,
                                    &[],
                                );
                            }
                        }
                    } else {
                        self.record_attribute_default(value, &mut attribute_default, &data.location, diagnostics);
                    }
                }
                K::CallerLineNumber => {
                    self.check_caller_info(parameter, data, &CALLER_LINE_NUMBER, diagnostics);
                }
                K::CallerFilePath => {
                    if self.check_caller_info(parameter, data, &CALLER_FILE_PATH, diagnostics) && bag.early.caller_line_number
                    {
                        self.report_overridden_caller_info(
                            parameter,
                            diagnostic_codes::CALLER_LINE_NUMBER_PREFERRED_OVER_FILE_PATH,
                            &data.location,
                            diagnostics,
                        );
                    }
                }
                K::CallerMemberName => {
                    if self.check_caller_info(parameter, data, &CALLER_MEMBER_NAME, diagnostics) {
                        let code = if bag.early.caller_line_number {
                            Some(diagnostic_codes::CALLER_LINE_NUMBER_PREFERRED_OVER_MEMBER_NAME)
                        } else if bag.early.caller_file_path {
                            Some(diagnostic_codes::CALLER_FILE_PATH_PREFERRED_OVER_MEMBER_NAME)
                        } else {
                            None
                        };
                        if let Some(code) = code {
                            self.report_overridden_caller_info(parameter, code, &data.location, diagnostics);
                        }
                    }
                }
                K::CallerArgumentExpression => {
                    if self.check_caller_info(parameter, data, &CALLER_ARGUMENT_EXPRESSION, diagnostics) {
                        well_known.caller_argument_expression_parameter =
                            self.resolve_caller_argument_expression(parameter, data, diagnostics);
                    }
                }
                K::UnscopedRef => {
                    let unscoped_by_default = !(symbol.ref_kind == RefKind::Out
                        && symbol.scoped == ScopedKind::None
                        && self.uses_updated_ref_safety_rules(parameter));
                    if unscoped_by_default {
                        diagnostics.report(diagnostic_codes::UNSCOPED_REF_UNSUPPORTED_TARGET, &data.location, &[]);
                    } else {
                        well_known.has_unscoped_ref = true;
                    }
                }
                K::InterpolatedStringHandlerArgument => {
                    well_known.interpolated_handler_arguments =
                        self.resolve_handler_arguments(parameter, data, diagnostics);
                }
                K::EnumeratorCancellation => well_known.has_enumerator_cancellation = true,
                K::IDispatchConstant => well_known.has_idispatch_constant = true,
                K::IUnknownConstant => well_known.has_iunknown_constant = true,
                K::MarshalAs => well_known.marshal_as = data.argument(0).and_then(ConstantValue::as_i64),
                K::In => well_known.has_in = true,
                K::Out => well_known.has_out = true,
                _ => {}
            }
        }
        bag.well_known = well_known;
    }

    /// Validate `[DefaultParameterValue(value)]` against the parameter type
    /// and return the value when it is usable.
    fn check_default_parameter_value(
        &self,
        parameter: SymbolId,
        data: &AttributeData,
        diagnostics: &mut DiagnosticBag,
    ) -> Option<ConstantValue> {
        let argument = data.constructor_arguments.first()?;
        if argument.is_bad() {
            return None;
        }
        let arena = self.arena();
        let interner = arena.interner();
        let target = self.parameter_type(parameter);
        if interner.contains_error(target.ty) {
            return None;
        }
        if !argument.value.is_null() && !argument.ty.is_intrinsic() {
            diagnostics.report(
                diagnostic_codes::DEFAULT_VALUE_BAD_VALUE_TYPE,
                &data.location,
                &[display_type_id(arena, argument.ty).as_str()],
            );
            return None;
        }
        let accepts = if target.ty == TypeId::OBJECT || target.ty == TypeId::DYNAMIC {
            true
        } else if argument.value.is_null() {
            !is_value_type(arena, target.ty) || interner.is_nullable_value_type(target.ty)
        } else {
            self.same_type(interner.strip_nullable(target.ty), argument.ty)
        };
        if !accepts {
            diagnostics.report(diagnostic_codes::DEFAULT_VALUE_TYPE_MUST_MATCH, &data.location, &[]);
            return None;
        }
        Some(argument.value.clone())
    }

    /// Keep the first attribute-supplied default; a different second one is
    /// an error.
    fn record_attribute_default(
        &self,
        value: ConstantValue,
        recorded: &mut Option<ConstantValue>,
        location: &SourceLocation,
        diagnostics: &mut DiagnosticBag,
    ) {
        match recorded {
            Some(existing) if *existing != value => {
                diagnostics.report(diagnostic_codes::PARAM_DEFAULT_VALUE_DIFFERS_FROM_ATTRIBUTE, location, &[]);
            }
            Some(_) => {}
            None => *recorded = Some(value),
        }
    }

    /// Shared caller-info checks. Returns whether the attribute is usable.
    fn check_caller_info(
        &self,
        parameter: SymbolId,
        data: &AttributeData,
        codes: &CallerInfoCodes,
        diagnostics: &mut DiagnosticBag,
    ) -> bool {
        let arena = self.arena();
        let name = arena.name(parameter);
        if self.ignores_optional_arguments(parameter) {
            diagnostics.report(codes.unconsumed, &data.location, &[&*name]);
            return false;
        }
        let target = self.parameter_type(parameter);
        if arena.interner().contains_error(target.ty) {
            return false;
        }
        if !self.has_implicit_conversion(codes.source, target.ty) {
            diagnostics.report(
                codes.no_conversion,
                &data.location,
                &[display_type_id(arena, codes.source).as_str(), display_type(arena, target).as_str()],
            );
            return false;
        }
        if self.explicit_default_value(parameter).is_none() {
            diagnostics.report(codes.without_default, &data.location, &[]);
            return false;
        }
        true
    }

    fn report_overridden_caller_info(
        &self,
        parameter: SymbolId,
        code: u32,
        location: &SourceLocation,
        diagnostics: &mut DiagnosticBag,
    ) {
        let name = self.arena().name(parameter);
        diagnostics.report(code, location, &[&*name]);
    }

    /// Sibling parameter named by `[CallerArgumentExpression("name")]`.
    fn resolve_caller_argument_expression(
        &self,
        parameter: SymbolId,
        data: &AttributeData,
        diagnostics: &mut DiagnosticBag,
    ) -> Option<SymbolId> {
        let arena = self.arena();
        let own_name = arena.name(parameter);
        let target = data.string_argument(0).unwrap_or_default();
        if target == &*own_name {
            diagnostics.report(
                diagnostic_codes::CALLER_ARGUMENT_EXPRESSION_SELF_REFERENTIAL,
                &data.location,
                &[&*own_name],
            );
            return None;
        }
        let found = self.sibling_parameter(parameter, target);
        if found.is_none() {
            diagnostics.report(
                diagnostic_codes::CALLER_ARGUMENT_EXPRESSION_INVALID_NAME,
                &data.location,
                &[&*own_name],
            );
        }
        found
    }

    /// Parameters named by `[InterpolatedStringHandlerArgument(...)]`. An
    /// empty name refers to the receiver.
    fn resolve_handler_arguments(
        &self,
        parameter: SymbolId,
        data: &AttributeData,
        diagnostics: &mut DiagnosticBag,
    ) -> Vec<Option<SymbolId>> {
        let mut resolved = Vec::new();
        for name in super::string_arguments(data) {
            if name.is_empty() {
                resolved.push(None);
                continue;
            }
            match self.sibling_parameter(parameter, &name) {
                Some(found) => resolved.push(Some(found)),
                None => {
                    let member = self
                        .arena()
                        .containing_member(parameter)
                        .map(|member| self.display_member(member))
                        .unwrap_or_default();
                    diagnostics.report(
                        diagnostic_codes::INVALID_INTERPOLATED_HANDLER_ARGUMENT_NAME,
                        &data.location,
                        &[&*name, member.as_str()],
                    );
                }
            }
        }
        resolved
    }

    fn sibling_parameter(&self, parameter: SymbolId, name: &str) -> Option<SymbolId> {
        let arena = self.arena();
        let member = arena.containing_member(parameter)?;
        arena
            .parameters_of(member)
            .iter()
            .copied()
            .find(|&sibling| sibling != parameter && &*arena.name(sibling) == name)
    }
}
