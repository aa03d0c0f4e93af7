//! Common types and utilities for the csz compiler front end.
//!
//! This crate provides foundational types used across all csz crates:
//! - Name interning (`Atom`, `ShardedInterner`)
//! - Source locations
//! - Diagnostics, the message table and diagnostic collections
//! - Cooperative cancellation
//! - Compiler options
//! - Limits and thresholds

pub mod interner;
pub use interner::{Atom, ShardedInterner};

pub mod location;
pub use location::SourceLocation;

pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticBag, DiagnosticCategory, DiagnosticSink, diagnostic_codes,
};

pub mod cancellation;
pub use cancellation::{CancellationToken, OperationCancelled};

pub mod options;
pub use options::{CompilerOptions, LanguageVersion, NullableContextOptions, RuntimeCapabilities};

pub mod limits;
