//! Rendering types for diagnostic messages.

use crate::arena::SymbolArena;
use crate::relations::is_value_type;
use crate::types::{TypeData, TypeId, TypeWithAnnotations};
use std::fmt::Write;

/// Render a type use the way it would be written in source, with `?` for
/// annotated reference types.
pub fn display_type(arena: &SymbolArena, ty: &TypeWithAnnotations) -> String {
    let mut out = String::new();
    write_type_with_annotations(arena, ty, &mut out);
    out
}

/// Render a bare type id, ignoring the annotation of the outermost level.
pub fn display_type_id(arena: &SymbolArena, ty: TypeId) -> String {
    let mut out = String::new();
    write_type(arena, ty, &mut out);
    out
}

fn write_type_with_annotations(arena: &SymbolArena, ty: &TypeWithAnnotations, out: &mut String) {
    write_type(arena, ty.ty, out);
    if ty.annotation.is_annotated() && !is_value_type(arena, ty.ty) {
        out.push('?');
    }
}

fn write_type(arena: &SymbolArena, ty: TypeId, out: &mut String) {
    let interner = arena.interner();
    match &*interner.lookup(ty) {
        TypeData::Intrinsic(kind) => out.push_str(kind.keyword()),
        TypeData::Named { symbol, type_args } => {
            out.push_str(&arena.name(*symbol));
            if !type_args.is_empty() {
                out.push('<');
                for (i, arg) in type_args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_type_with_annotations(arena, arg, out);
                }
                out.push('>');
            }
        }
        TypeData::TypeParameter(symbol) => out.push_str(&arena.name(*symbol)),
        TypeData::Nullable(underlying) => {
            write_type(arena, *underlying, out);
            out.push('?');
        }
        TypeData::Array { element, rank } => {
            write_type_with_annotations(arena, element, out);
            out.push('[');
            for _ in 1..*rank {
                out.push(',');
            }
            out.push(']');
        }
        TypeData::Tuple { elements, names } => {
            out.push('(');
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_type_with_annotations(arena, element, out);
                let name = names.as_ref().and_then(|names| names.get(i).copied().flatten());
                if let Some(name) = name {
                    let _ = write!(out, " {}", interner.resolve_atom(name));
                }
            }
            out.push(')');
        }
    }
}

#[cfg(test)]
#[path = "tests/display_tests.rs"]
mod tests;
