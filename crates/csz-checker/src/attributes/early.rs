//! Early attribute decoding.

use crate::compilation::Compilation;
use csz_common::DiagnosticBag;
use csz_symbols::symbol::{ParameterSource, SymbolData};
use csz_symbols::syntax::AttributeTargetSpecifier;
use csz_symbols::{
    AttributeBindingMode, AttributeData, ConstantValue, DecimalValue, ObsoleteData, SymbolId, TypedConstant,
    WellKnownAttributeKind,
};
use std::sync::Arc;
use tracing::trace;

/// Facts available before attributes are fully bound.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EarlyWellKnownAttributeData {
    pub has_optional: bool,
    pub default_parameter_value: Option<TypedConstant>,
    pub decimal_constant: Option<ConstantValue>,
    pub date_time_constant: Option<ConstantValue>,
    pub caller_line_number: bool,
    pub caller_file_path: bool,
    pub caller_member_name: bool,
    /// Parameter name given to `[CallerArgumentExpression]`.
    pub caller_argument_expression: Option<Arc<str>>,
    pub has_unscoped_ref: bool,
    pub interpolated_handler_arguments: Option<Vec<Arc<str>>>,
    pub obsolete: Option<ObsoleteData>,
    pub indexer_name: Option<Arc<str>>,
}

impl EarlyWellKnownAttributeData {
    pub fn has_caller_info(&self) -> bool {
        self.caller_line_number
            || self.caller_file_path
            || self.caller_member_name
            || self.caller_argument_expression.is_some()
    }

    fn apply(&mut self, kind: WellKnownAttributeKind, data: &AttributeData) {
        use WellKnownAttributeKind as K;
        match kind {
            K::Optional => self.has_optional = true,
            K::DefaultParameterValue => {
                self.default_parameter_value = data
                    .constructor_arguments
                    .first()
                    .filter(|argument| !argument.is_bad())
                    .cloned();
            }
            K::DecimalConstant => self.decimal_constant = decimal_constant(data),
            K::DateTimeConstant => {
                self.date_time_constant = data
                    .argument(0)
                    .and_then(ConstantValue::as_i64)
                    .map(ConstantValue::DateTime);
            }
            K::CallerLineNumber => self.caller_line_number = true,
            K::CallerFilePath => self.caller_file_path = true,
            K::CallerMemberName => self.caller_member_name = true,
            K::CallerArgumentExpression => {
                self.caller_argument_expression = Some(Arc::from(data.string_argument(0).unwrap_or_default()));
            }
            K::UnscopedRef => self.has_unscoped_ref = true,
            K::InterpolatedStringHandlerArgument => {
                self.interpolated_handler_arguments = Some(super::string_arguments(data));
            }
            K::Obsolete => {
                self.obsolete = Some(ObsoleteData {
                    message: data.string_argument(0).map(Arc::from),
                    is_error: data.argument(1).and_then(ConstantValue::as_bool).unwrap_or(false),
                });
            }
            K::IndexerName => self.indexer_name = data.string_argument(0).map(Arc::from),
            _ => {}
        }
    }
}

/// `DecimalConstantAttribute(scale, sign, hi, mid, lo)`.
fn decimal_constant(data: &AttributeData) -> Option<ConstantValue> {
    let part = |index: usize| data.argument(index).and_then(ConstantValue::as_i64);
    let scale = u8::try_from(part(0)?).ok()?;
    let negative = part(1)? != 0;
    let hi = u32::try_from(part(2)?).ok()?;
    let mid = u32::try_from(part(3)?).ok()?;
    let lo = u32::try_from(part(4)?).ok()?;
    Some(ConstantValue::Decimal(DecimalValue::from_parts(scale, negative, hi, mid, lo)))
}

impl Compilation {
    /// Early-decoded attribute facts of `symbol`.
    ///
    /// Never reports diagnostics; anything wrong with these attributes is
    /// reported by [`Compilation::attributes`].
    pub fn early_attributes(&self, symbol: SymbolId) -> &Arc<EarlyWellKnownAttributeData> {
        let state = self.state(symbol);
        self.lazy_value(&state.early_attributes, || Arc::new(self.decode_early_attributes(symbol)))
    }

    fn decode_early_attributes(&self, symbol: SymbolId) -> EarlyWellKnownAttributeData {
        let arena = self.arena();
        let entry = arena.symbol(symbol);
        let metadata_obsolete = match &entry.data {
            SymbolData::Parameter(parameter) => {
                if let ParameterSource::AccessorCopy { original } = parameter.source {
                    return (**self.early_attributes(original)).clone();
                }
                None
            }
            SymbolData::Type(ty) => ty.metadata().map(|info| info.obsolete.clone()),
            SymbolData::Method(method) => method.metadata().map(|info| info.obsolete.clone()),
            SymbolData::Property(property) => property.metadata().map(|info| info.obsolete.clone()),
            SymbolData::TypeParameter(_) => None,
        };
        if let Some(obsolete) = metadata_obsolete {
            return EarlyWellKnownAttributeData {
                obsolete,
                ..EarlyWellKnownAttributeData::default()
            };
        }

        let cx = self.binding_context(symbol);
        // Problems are reported once, by full decoding.
        let mut scratch = DiagnosticBag::new();
        let mut early = EarlyWellKnownAttributeData::default();
        for syntax in self.attribute_syntax(symbol) {
            if syntax.target == Some(AttributeTargetSpecifier::Return) {
                continue;
            }
            let Some(class) = self.binder().resolve_attribute_class(&cx, syntax, &mut scratch) else {
                continue;
            };
            let Some(kind) = arena.classify_attribute_class(class).filter(|kind| kind.is_early()) else {
                continue;
            };
            let data = self
                .binder()
                .bind_attribute(&cx, syntax, class, AttributeBindingMode::Early, &mut scratch);
            early.apply(kind, &data);
        }
        trace!(symbol = symbol.0, ?early, "decode_early_attributes");
        early
    }
}
