//! Reference binder over the symbol arena.
//!
//! Resolves type names through method type parameters, the type parameters
//! of the containing type, and global types (simple or namespace-qualified).
//! Constants are limited to literals, `null`, `default`, `nameof` and
//! `typeof`; anything else binds as not constant.

use csz_common::{DiagnosticBag, SourceLocation, diagnostic_codes};
use csz_symbols::relations::is_value_type;
use csz_symbols::syntax::{AttributeSyntax, ExpressionSyntax, TypeSyntax};
use csz_symbols::{
    AttributeBindingMode, AttributeData, Binder, BindingContext, BoundConstant, ConstantValue,
    DecimalValue, IntrinsicKind, NullableAnnotation, SymbolArena, SymbolId, TypeId,
    TypeWithAnnotations, TypedConstant, display_type, display_type_id,
};
use std::sync::Arc;
use tracing::trace;

#[derive(Clone, Copy, Debug, Default)]
pub struct DeclarationBinder;

impl DeclarationBinder {
    pub fn new() -> Self {
        DeclarationBinder
    }

    fn plain(cx: &BindingContext<'_>, ty: TypeId) -> TypeWithAnnotations {
        if cx.annotations_enabled {
            TypeWithAnnotations::not_annotated(ty)
        } else {
            TypeWithAnnotations::oblivious(ty)
        }
    }

    fn bind_type_syntax(
        &self,
        cx: &BindingContext<'_>,
        syntax: &TypeSyntax,
        diagnostics: &mut DiagnosticBag,
    ) -> TypeWithAnnotations {
        let interner = cx.arena.interner();
        match syntax {
            TypeSyntax::Predefined { kind, .. } => Self::plain(cx, kind.type_id()),
            TypeSyntax::Named {
                name,
                type_args,
                location,
            } => match self.lookup_named(cx, name, type_args, location, diagnostics) {
                Some(ty) => Self::plain(cx, ty),
                None => TypeWithAnnotations::error(),
            },
            TypeSyntax::Nullable { element, location } => {
                let inner = self.bind_type_syntax(cx, element, diagnostics);
                if inner.ty.is_error() {
                    return inner;
                }
                if is_value_type(cx.arena, inner.ty) {
                    if interner.is_nullable_value_type(inner.ty) {
                        return inner;
                    }
                    return Self::plain(cx, interner.nullable_value_type(inner.ty));
                }
                if cx.annotations_enabled {
                    inner.with_annotation(NullableAnnotation::Annotated)
                } else {
                    diagnostics.report(diagnostic_codes::NULLABLE_ANNOTATION_OUTSIDE_CONTEXT, location, &[]);
                    TypeWithAnnotations::oblivious(inner.ty)
                }
            }
            TypeSyntax::Array { element, rank, .. } => {
                let element = self.bind_type_syntax(cx, element, diagnostics);
                Self::plain(cx, interner.array(element, *rank))
            }
            TypeSyntax::Tuple { elements, .. } => {
                let bound = elements
                    .iter()
                    .map(|element| self.bind_type_syntax(cx, &element.ty, diagnostics))
                    .collect();
                let names = elements
                    .iter()
                    .map(|element| element.name.as_deref().map(|name| interner.intern_string(name)))
                    .collect();
                Self::plain(cx, interner.tuple(bound, Some(names)))
            }
        }
    }

    fn lookup_named(
        &self,
        cx: &BindingContext<'_>,
        name: &Arc<str>,
        type_args: &[TypeSyntax],
        location: &SourceLocation,
        diagnostics: &mut DiagnosticBag,
    ) -> Option<TypeId> {
        let arena = cx.arena;
        let arity = type_args.len();
        let args: Vec<TypeWithAnnotations> = type_args
            .iter()
            .map(|arg| self.bind_type_syntax(cx, arg, diagnostics))
            .collect();
        if arity == 0 && !name.contains('.') {
            if let Some(parameter) = lookup_type_parameter(arena, cx.scope, name) {
                return Some(arena.interner().type_parameter(parameter));
            }
        }
        let Some(symbol) = lookup_type_symbol(arena, name, arity) else {
            diagnostics.report(diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND, location, &[&**name]);
            return None;
        };
        Some(if arity == 0 {
            arena.declared_type(symbol)
        } else {
            arena.interner().named(symbol, args)
        })
    }

    fn bind_attribute_argument(
        &self,
        cx: &BindingContext<'_>,
        expression: &ExpressionSyntax,
        mode: AttributeBindingMode,
        diagnostics: &mut DiagnosticBag,
    ) -> TypedConstant {
        let full = mode == AttributeBindingMode::Full;
        match expression {
            ExpressionSyntax::Literal { value, .. } => TypedConstant::new(natural_type(value), value.clone()),
            ExpressionSyntax::Null { .. } => TypedConstant::new(TypeId::OBJECT, ConstantValue::Null),
            ExpressionSyntax::NameOf { name, .. } => {
                TypedConstant::new(TypeId::STRING, ConstantValue::String(Arc::clone(name)))
            }
            ExpressionSyntax::Default { ty: Some(ty), .. } if full => {
                let bound = self.bind_type_syntax(cx, ty, diagnostics);
                TypedConstant::new(bound.ty, zero_value(cx.arena, bound.ty))
            }
            ExpressionSyntax::Default { ty: None, .. } => TypedConstant::new(TypeId::OBJECT, ConstantValue::Null),
            ExpressionSyntax::TypeOf { ty, .. } if full => {
                let bound = self.bind_type_syntax(cx, ty, diagnostics);
                let text = display_type_id(cx.arena, bound.ty);
                TypedConstant::new(bound.ty, ConstantValue::String(Arc::from(text)))
            }
            ExpressionSyntax::Other { location, .. } if full => {
                diagnostics.report(diagnostic_codes::ATTRIBUTE_ARGUMENT_NOT_CONSTANT, location, &[]);
                TypedConstant::bad()
            }
            _ => TypedConstant::bad(),
        }
    }
}

impl Binder for DeclarationBinder {
    fn bind_type(
        &self,
        cx: &BindingContext<'_>,
        syntax: &TypeSyntax,
        diagnostics: &mut DiagnosticBag,
    ) -> TypeWithAnnotations {
        self.bind_type_syntax(cx, syntax, diagnostics)
    }

    fn bind_constant_expression(
        &self,
        cx: &BindingContext<'_>,
        syntax: &ExpressionSyntax,
        target: &TypeWithAnnotations,
        diagnostics: &mut DiagnosticBag,
    ) -> BoundConstant {
        let arena = cx.arena;
        let interner = arena.interner();
        if interner.contains_error(target.ty) {
            return BoundConstant::Error;
        }
        let underlying = interner.strip_nullable(target.ty);
        let no_conversion = |source: &str, diagnostics: &mut DiagnosticBag| {
            diagnostics.report(
                diagnostic_codes::NO_CONVERSION_FOR_DEFAULT_PARAM,
                syntax.location(),
                &[source, &display_type(arena, target)],
            );
            BoundConstant::Error
        };
        match syntax {
            ExpressionSyntax::Literal { value, .. } => {
                match interner
                    .intrinsic_kind(underlying)
                    .and_then(|kind| convert_literal(value, kind))
                {
                    Some(converted) => BoundConstant::Constant(TypedConstant::new(target.ty, converted)),
                    None => no_conversion(&display_type_id(arena, natural_type(value)), diagnostics),
                }
            }
            ExpressionSyntax::Null { .. } => {
                if !is_value_type(arena, target.ty) || interner.is_nullable_value_type(target.ty) {
                    BoundConstant::Constant(TypedConstant::new(target.ty, ConstantValue::Null))
                } else {
                    no_conversion("<null>", diagnostics)
                }
            }
            ExpressionSyntax::Default { ty, .. } => {
                if let Some(ty) = ty {
                    let bound = self.bind_type_syntax(cx, ty, diagnostics);
                    if bound.ty.is_error() {
                        return BoundConstant::Error;
                    }
                }
                BoundConstant::Constant(TypedConstant::new(target.ty, zero_value(arena, target.ty)))
            }
            ExpressionSyntax::NameOf { name, .. } => {
                if underlying == TypeId::STRING || underlying == TypeId::OBJECT {
                    BoundConstant::Constant(TypedConstant::new(
                        target.ty,
                        ConstantValue::String(Arc::clone(name)),
                    ))
                } else {
                    no_conversion("string", diagnostics)
                }
            }
            ExpressionSyntax::TypeOf { .. } | ExpressionSyntax::Other { .. } => BoundConstant::NotConstant,
        }
    }

    fn resolve_attribute_class(
        &self,
        cx: &BindingContext<'_>,
        syntax: &AttributeSyntax,
        diagnostics: &mut DiagnosticBag,
    ) -> Option<SymbolId> {
        let arena = cx.arena;
        let name = &*syntax.name;
        let suffixed = format!("{name}Attribute");
        let found = [suffixed.as_str(), name]
            .into_iter()
            .find_map(|candidate| lookup_type_symbol(arena, candidate, 0));
        if found.is_none() {
            diagnostics.report(diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND, &syntax.location, &[name]);
        }
        trace!(attribute = name, found = ?found, "resolve_attribute_class");
        found
    }

    fn bind_attribute(
        &self,
        cx: &BindingContext<'_>,
        syntax: &AttributeSyntax,
        class: SymbolId,
        mode: AttributeBindingMode,
        diagnostics: &mut DiagnosticBag,
    ) -> AttributeData {
        let mut has_errors = false;
        let mut constructor_arguments = Vec::new();
        let mut named_arguments = Vec::new();
        for argument in &syntax.arguments {
            let value = self.bind_attribute_argument(cx, &argument.expression, mode, diagnostics);
            if mode == AttributeBindingMode::Full && value.is_bad() {
                has_errors = true;
            }
            match &argument.name {
                Some(name) => named_arguments.push((Arc::clone(name), value)),
                None => constructor_arguments.push(value),
            }
        }
        AttributeData {
            class,
            kind: cx.arena.classify_attribute_class(class),
            constructor_arguments,
            named_arguments,
            target: syntax.target,
            has_errors,
            location: syntax.location.clone(),
        }
    }
}

// =============================================================================
// Name lookup
// =============================================================================

/// Type parameter called `name` visible from `scope`, innermost first.
fn lookup_type_parameter(arena: &SymbolArena, scope: SymbolId, name: &str) -> Option<SymbolId> {
    let mut current = Some(scope);
    while let Some(owner) = current {
        if let Some(found) = arena
            .type_parameters_of(owner)
            .iter()
            .copied()
            .find(|parameter| &*arena.name(*parameter) == name)
        {
            return Some(found);
        }
        current = arena.symbol(owner).containing;
    }
    None
}

fn lookup_type_symbol(arena: &SymbolArena, name: &str, arity: usize) -> Option<SymbolId> {
    if name.contains('.') {
        return arena.lookup_type(name, arity);
    }
    let atom = arena.atom(name)?;
    arena
        .types_named(atom)
        .iter()
        .copied()
        .find(|ty| arena.type_parameters_of(*ty).len() == arity)
}

// =============================================================================
// Constants
// =============================================================================

/// Type a literal has on its own.
pub(crate) fn natural_type(value: &ConstantValue) -> TypeId {
    match value {
        ConstantValue::Null => TypeId::OBJECT,
        ConstantValue::Bool(_) => TypeId::BOOL,
        ConstantValue::Int(value) if i32::try_from(*value).is_ok() => TypeId::INT,
        ConstantValue::Int(_) => TypeId::LONG,
        ConstantValue::UInt(value) if u32::try_from(*value).is_ok() => TypeId::UINT,
        ConstantValue::UInt(_) => TypeId::ULONG,
        ConstantValue::Double(_) => TypeId::DOUBLE,
        ConstantValue::Decimal(_) => TypeId::DECIMAL,
        ConstantValue::DateTime(_) => TypeId::DATE_TIME,
        ConstantValue::String(_) => TypeId::STRING,
        ConstantValue::Char(_) => TypeId::CHAR,
        ConstantValue::Bad => TypeId::ERROR,
    }
}

/// Value of `default(T)`.
pub(crate) fn zero_value(arena: &SymbolArena, ty: TypeId) -> ConstantValue {
    let interner = arena.interner();
    if interner.is_nullable_value_type(ty) || !is_value_type(arena, ty) {
        return ConstantValue::Null;
    }
    match interner.intrinsic_kind(ty) {
        Some(IntrinsicKind::Bool) => ConstantValue::Bool(false),
        Some(IntrinsicKind::Char) => ConstantValue::Char('\0'),
        Some(IntrinsicKind::Float | IntrinsicKind::Double) => ConstantValue::Double(0.0),
        Some(IntrinsicKind::Decimal) => ConstantValue::Decimal(DecimalValue::from_integer(0)),
        Some(IntrinsicKind::DateTime) => ConstantValue::DateTime(0),
        Some(kind) if kind.is_integral() => integer_constant(kind, 0),
        _ => ConstantValue::Null,
    }
}

fn integer_constant(kind: IntrinsicKind, value: i128) -> ConstantValue {
    match kind {
        IntrinsicKind::UInt | IntrinsicKind::ULong | IntrinsicKind::NUInt => ConstantValue::UInt(value as u64),
        _ => ConstantValue::Int(value as i64),
    }
}

/// Implicit constant conversion of a literal to an intrinsic type.
pub(crate) fn convert_literal(value: &ConstantValue, target: IntrinsicKind) -> Option<ConstantValue> {
    use IntrinsicKind as K;
    match (value, target) {
        (ConstantValue::Bool(_), K::Bool)
        | (ConstantValue::String(_), K::String)
        | (ConstantValue::Char(_), K::Char)
        | (ConstantValue::Decimal(_), K::Decimal)
        | (ConstantValue::DateTime(_), K::DateTime) => Some(value.clone()),
        (ConstantValue::String(_), K::Object) => None,
        (ConstantValue::Char(c), K::UShort | K::Int | K::UInt | K::Long | K::ULong | K::NInt | K::NUInt)
        | (ConstantValue::Char(c), K::Float | K::Double | K::Decimal) => convert_integer(*c as i128, target),
        (ConstantValue::Int(v), _) => {
            let narrowing = matches!(
                target,
                K::SByte | K::Byte | K::Short | K::UShort | K::Int | K::UInt | K::NInt | K::NUInt
            );
            if narrowing && i32::try_from(*v).is_err() {
                return None;
            }
            convert_integer(*v as i128, target)
        }
        (ConstantValue::UInt(v), K::UInt | K::NUInt | K::Long | K::ULong | K::Float | K::Double | K::Decimal) => {
            convert_integer(*v as i128, target)
        }
        (ConstantValue::Double(v), K::Double | K::Float) => Some(ConstantValue::Double(*v)),
        _ => None,
    }
}

fn convert_integer(value: i128, target: IntrinsicKind) -> Option<ConstantValue> {
    use IntrinsicKind as K;
    let in_range = |min: i128, max: i128| (min..=max).contains(&value);
    let fits = match target {
        K::SByte => in_range(i8::MIN.into(), i8::MAX.into()),
        K::Byte => in_range(0, u8::MAX.into()),
        K::Short => in_range(i16::MIN.into(), i16::MAX.into()),
        K::UShort => in_range(0, u16::MAX.into()),
        K::Int | K::NInt => in_range(i32::MIN.into(), i32::MAX.into()),
        K::UInt | K::NUInt => in_range(0, u32::MAX.into()),
        K::Long => in_range(i64::MIN.into(), i64::MAX.into()),
        K::ULong => in_range(0, u64::MAX.into()),
        K::Float | K::Double => return Some(ConstantValue::Double(value as f64)),
        K::Decimal => return Some(ConstantValue::Decimal(DecimalValue::new(value, 0))),
        _ => false,
    };
    fits.then(|| integer_constant(target, value))
}

#[cfg(test)]
#[path = "tests/declaration_binder_tests.rs"]
mod tests;
