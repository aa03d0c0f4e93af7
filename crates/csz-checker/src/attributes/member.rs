//! Full decoding of method, property and type attributes.

use super::{AttributeBag, decode_nullability, is_valid_identifier, string_arguments};
use crate::compilation::Compilation;
use csz_common::{DiagnosticBag, diagnostic_codes};
use csz_symbols::{AttributeData, SymbolData, SymbolId, WellKnownAttributeKind};
use std::sync::Arc;

impl Compilation {
    pub(super) fn decode_member_attributes(
        &self,
        member: SymbolId,
        bag: &mut AttributeBag,
        diagnostics: &mut DiagnosticBag,
    ) {
        use WellKnownAttributeKind as K;
        let mut well_known = std::mem::take(&mut bag.well_known);
        for data in &bag.attributes {
            let Some(kind) = data.kind else {
                continue;
            };
            if decode_nullability(data, &mut well_known) {
                continue;
            }
            match kind {
                K::SpecialName => well_known.has_special_name = true,
                K::ExcludeFromCodeCoverage => well_known.has_exclude_from_code_coverage = true,
                K::DoesNotReturn => well_known.has_does_not_return = true,
                K::UnscopedRef => well_known.has_unscoped_ref = true,
                K::MemberNotNull => well_known.member_not_null.extend(string_arguments(data)),
                K::MemberNotNullWhen => {
                    let names = data.constructor_arguments.iter().skip(1).filter_map(|argument| argument.value.as_str());
                    let target = match data.argument(0).and_then(|value| value.as_bool()) {
                        Some(true) => &mut well_known.member_not_null_when_true,
                        Some(false) => &mut well_known.member_not_null_when_false,
                        None => continue,
                    };
                    target.extend(names.map(Arc::from));
                }
                K::IndexerName => {
                    well_known.indexer_name = self.check_indexer_name(member, data, diagnostics);
                }
                _ => {}
            }
        }
        bag.well_known = well_known;
    }

    /// `[IndexerName("Name")]` is only meaningful on an indexer that is not
    /// an explicit interface implementation, and must name an identifier.
    fn check_indexer_name(
        &self,
        member: SymbolId,
        data: &AttributeData,
        diagnostics: &mut DiagnosticBag,
    ) -> Option<Arc<str>> {
        let valid_target = match &self.arena().symbol(member).data {
            SymbolData::Property(property) => {
                property.is_indexer && !property.is_explicit_interface_implementation()
            }
            _ => false,
        };
        if !valid_target {
            diagnostics.report(diagnostic_codes::BAD_INDEXER_NAME_ATTRIBUTE, &data.location, &[]);
            return None;
        }
        let name = data.string_argument(0)?;
        if !is_valid_identifier(name) {
            diagnostics.report(
                diagnostic_codes::BAD_ATTRIBUTE_ARGUMENT,
                &data.location,
                &[WellKnownAttributeKind::IndexerName.short_name()],
            );
            return None;
        }
        Some(Arc::from(name))
    }

    pub(super) fn decode_type_attributes(
        &self,
        ty: SymbolId,
        bag: &mut AttributeBag,
        diagnostics: &mut DiagnosticBag,
    ) {
        use WellKnownAttributeKind as K;
        let mut well_known = std::mem::take(&mut bag.well_known);
        for data in &bag.attributes {
            match data.kind {
                Some(K::SpecialName) => well_known.has_special_name = true,
                Some(K::ExcludeFromCodeCoverage) => well_known.has_exclude_from_code_coverage = true,
                Some(K::Serializable) => well_known.has_serializable = true,
                Some(K::ComImport) => well_known.has_com_import = true,
                Some(K::DefaultMember) => {
                    if self.declares_indexer(ty) {
                        diagnostics.report(diagnostic_codes::DEFAULT_MEMBER_ON_INDEXED_TYPE, &data.location, &[]);
                    } else {
                        well_known.default_member_name = data.string_argument(0).map(Arc::from);
                    }
                }
                _ => {}
            }
        }
        bag.well_known = well_known;
    }

    /// Whether `ty` declares an indexer of its own.
    pub(crate) fn declares_indexer(&self, ty: SymbolId) -> bool {
        let arena = self.arena();
        arena.members(ty).iter().any(|&member| {
            arena
                .symbol(member)
                .as_property()
                .is_some_and(|property| property.is_indexer && !property.is_explicit_interface_implementation())
        })
    }
}
