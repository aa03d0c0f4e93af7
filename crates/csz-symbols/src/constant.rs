//! Constant values and bound attribute data.

use crate::symbol::SymbolId;
use crate::syntax::AttributeTargetSpecifier;
use crate::types::TypeId;
use crate::well_known::WellKnownAttributeKind;
use csz_common::SourceLocation;
use std::fmt;
use std::sync::Arc;

/// A decimal value as `mantissa * 10^-scale`, kept normalized so equal
/// values compare equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DecimalValue {
    mantissa: i128,
    scale: u8,
}

impl DecimalValue {
    pub fn new(mut mantissa: i128, mut scale: u8) -> Self {
        while scale > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        if mantissa == 0 {
            scale = 0;
        }
        DecimalValue { mantissa, scale }
    }

    /// Build from the `DecimalConstantAttribute(scale, sign, hi, mid, lo)`
    /// argument layout.
    pub fn from_parts(scale: u8, negative: bool, hi: u32, mid: u32, lo: u32) -> Self {
        let magnitude = ((hi as i128) << 64) | ((mid as i128) << 32) | lo as i128;
        let mantissa = if negative { -magnitude } else { magnitude };
        DecimalValue::new(mantissa, scale)
    }

    pub fn from_integer(value: i64) -> Self {
        DecimalValue::new(value as i128, 0)
    }

    pub fn mantissa(self) -> i128 {
        self.mantissa
    }

    pub fn scale(self) -> u8 {
        self.scale
    }
}

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }
        let divisor = 10i128.pow(self.scale as u32);
        let whole = self.mantissa / divisor;
        let fraction = (self.mantissa % divisor).abs();
        let sign = if self.mantissa < 0 && whole == 0 { "-" } else { "" };
        write!(
            f,
            "{sign}{whole}.{fraction:0width$}",
            width = self.scale as usize
        )
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum ConstantValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Double(f64),
    Decimal(DecimalValue),
    /// Ticks since 0001-01-01.
    DateTime(i64),
    String(Arc<str>),
    Char(char),
    #[default]
    Bad,
}

impl ConstantValue {
    pub fn is_bad(&self) -> bool {
        matches!(self, ConstantValue::Bad)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConstantValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConstantValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConstantValue::Int(value) => Some(*value),
            ConstantValue::UInt(value) => i64::try_from(*value).ok(),
            ConstantValue::Char(value) => Some(*value as i64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConstantValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Null => f.write_str("null"),
            ConstantValue::Bool(value) => write!(f, "{value}"),
            ConstantValue::Int(value) => write!(f, "{value}"),
            ConstantValue::UInt(value) => write!(f, "{value}"),
            ConstantValue::Double(value) => write!(f, "{value}"),
            ConstantValue::Decimal(value) => write!(f, "{value}M"),
            ConstantValue::DateTime(ticks) => write!(f, "DateTime({ticks})"),
            ConstantValue::String(value) => write!(f, "\"{value}\""),
            ConstantValue::Char(value) => write!(f, "'{value}'"),
            ConstantValue::Bad => f.write_str("<bad>"),
        }
    }
}

/// A constant together with its type, as produced by constant binding.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedConstant {
    pub ty: TypeId,
    pub value: ConstantValue,
}

impl TypedConstant {
    pub fn new(ty: TypeId, value: ConstantValue) -> Self {
        TypedConstant { ty, value }
    }

    pub fn bad() -> Self {
        TypedConstant {
            ty: TypeId::ERROR,
            value: ConstantValue::Bad,
        }
    }

    pub fn is_bad(&self) -> bool {
        self.value.is_bad() || self.ty.is_error()
    }
}

/// One bound attribute application.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeData {
    pub class: SymbolId,
    pub kind: Option<WellKnownAttributeKind>,
    pub constructor_arguments: Vec<TypedConstant>,
    pub named_arguments: Vec<(Arc<str>, TypedConstant)>,
    pub target: Option<AttributeTargetSpecifier>,
    pub has_errors: bool,
    pub location: SourceLocation,
}

impl AttributeData {
    pub fn is(&self, kind: WellKnownAttributeKind) -> bool {
        self.kind == Some(kind)
    }

    pub fn argument(&self, index: usize) -> Option<&ConstantValue> {
        self.constructor_arguments
            .get(index)
            .map(|argument| &argument.value)
    }

    pub fn string_argument(&self, index: usize) -> Option<&str> {
        self.argument(index).and_then(ConstantValue::as_str)
    }

    pub fn named_argument(&self, name: &str) -> Option<&ConstantValue> {
        self.named_arguments
            .iter()
            .find(|(argument, _)| &**argument == name)
            .map(|(_, value)| &value.value)
    }
}
