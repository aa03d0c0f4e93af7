//! Symbol model for the csz compiler front end.
//!
//! This crate is organized into several modules:
//! - `types` / `intern` - Type representation and structural interning
//! - `symbol` / `arena` - Declared symbols and the immutable symbol arena
//! - `syntax` / `syntax_factory` - Declaration syntax and its builders
//! - `constant` - Constant values and bound attribute data
//! - `completion` - The per-symbol completion bitset
//! - `lazy_slot` - Write-once storage for lazily computed facets
//! - `well_known` - Well-known attribute identities
//! - `binder` - Contract with the expression and type binder
//! - `substitution` / `relations` / `display` - Type utilities
//!
//! Everything here is computed eagerly or is immutable. Lazily computed
//! facts about symbols live in `csz-checker`.

pub mod arena;
pub mod binder;
pub mod completion;
pub mod constant;
mod core_library;
pub mod display;
pub mod intern;
pub mod lazy_slot;
pub mod relations;
pub mod substitution;
pub mod symbol;
pub mod syntax;
pub mod syntax_factory;
pub mod types;
pub mod well_known;

pub use arena::{
    CoreTypes, INDEXER_NAME, MetadataMethod, MetadataParameter, MetadataProperty, SymbolArena,
    SymbolArenaBuilder,
};
pub use binder::{AttributeBindingMode, Binder, BindingContext, BoundConstant};
pub use completion::{CompletionPart, CompletionState};
pub use constant::{AttributeData, ConstantValue, DecimalValue, TypedConstant};
pub use core_library::CORE_ASSEMBLY_NAME;
pub use display::{display_type, display_type_id};
pub use intern::TypeInterner;
pub use lazy_slot::LazySlot;
pub use relations::{TypeCompareKind, nullability_convertible, type_ids_equal, types_equal};
pub use substitution::{TypeSubstitution, instantiate_type};
pub use symbol::{
    Accessibility, AssemblyId, AssemblyInfo, DeclarationModifiers, MethodKind, ObsoleteData,
    Symbol, SymbolData, SymbolId, SymbolOrigin, TypeKind,
};
pub use types::{
    CustomModifier, IntrinsicKind, NullableAnnotation, RefKind, ScopedKind, TypeData, TypeId,
    TypeWithAnnotations, VarianceKind,
};
pub use well_known::{AttributeTargets, WellKnownAttributeKind};
