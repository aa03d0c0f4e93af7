//! Lazy symbol completion and declaration checking.
//!
//! This crate is organized into several modules:
//! - `compilation` / `facet` - Per-symbol state and the install-once protocol
//! - `completion_driver` - `force_complete` and the parallel driver
//! - `declaration_binder` - Reference `Binder` over the symbol arena
//! - `type_facets` / `default_values` / `bases` - Declared types, default
//!   values, base types and interface lists
//! - `attributes` - Early and full well-known attribute decoding
//! - `signatures` / `conversions` - Signature views and type relationships
//! - `overrides` - Override resolution, hiding and override checks
//! - `interfaces` - Interface implementation lookup, explicit
//!   implementations and runtime bridging
//! - `operators` - User-defined operator signature validation
//! - `constraints` - Constraint clause binding and partial merging
//! - `modifiers` / `type_checks` - Declaration-shape and type-level checks
//!
//! Every fact derived from syntax is a facet: computed on first request by
//! whichever thread asks, published once, with its diagnostics committed by
//! the publishing thread only.

pub mod attributes;
mod bases;
pub mod compilation;
mod completion_driver;
pub mod constraints;
pub mod conversions;
pub mod declaration_binder;
mod default_values;
mod facet;
pub mod interfaces;
mod modifiers;
pub mod operators;
pub mod overrides;
pub mod signatures;
mod type_checks;
mod type_facets;

#[cfg(test)]
mod test_fixtures;

pub use attributes::{AttributeBag, EarlyWellKnownAttributeData, WellKnownAttributeData};
pub use compilation::Compilation;
pub use constraints::{TypeParameterConstraintClause, TypeParameterConstraintKind};
pub use declaration_binder::DeclarationBinder;
pub use interfaces::{
    ClrImplementationAction, ExplicitImplementation, SynthesizedExplicitImplementations,
    SynthesizedForwardingMethod,
};
pub use overrides::OverriddenOrHiddenMembersResult;
pub use signatures::{MemberSignature, SignatureParameter};
