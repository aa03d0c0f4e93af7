//! Diagnostic types, message lookup and diagnostic collections.
//!
//! Message templates and codes live in `data.rs`. Codes are stable and are
//! what users pass to `noWarn`.

use crate::location::SourceLocation;
use serde::Serialize;
use std::fmt;
use std::sync::Mutex;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes};

// =============================================================================
// Diagnostic Types
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Error = 1,
    Warning = 2,
    Message = 3,
}

impl DiagnosticCategory {
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Message => "message",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// One reported problem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub location: SourceLocation,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Build a diagnostic from the message table.
    ///
    /// Unknown codes fall back to an error whose text is the joined
    /// arguments, so a missing table entry never loses the report.
    pub fn new(code: u32, location: SourceLocation, args: &[&str]) -> Self {
        match get_diagnostic_message(code) {
            Some(message) => Diagnostic {
                location,
                message_text: format_message(message.message, args),
                category: message.category,
                code,
            },
            None => Diagnostic {
                location,
                message_text: args.join(", "),
                category: DiagnosticCategory::Error,
                code,
            },
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    pub fn is_warning(&self) -> bool {
        self.category == DiagnosticCategory::Warning
    }

    /// Format like `file[12..20]: error CS0115: message`.
    pub fn format_simple(&self) -> String {
        format!(
            "{}: {} CS{:04}: {}",
            self.location, self.category, self.code, self.message_text
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_simple())
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

#[must_use]
pub fn get_diagnostic_category(code: u32) -> Option<DiagnosticCategory> {
    get_diagnostic_message(code).map(|m| m.category)
}

// =============================================================================
// DiagnosticBag
// =============================================================================

/// Thread-local scratch buffer for diagnostics produced while computing one
/// facet. Only the thread whose value is published moves its bag into the
/// symbol's sink.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        DiagnosticBag::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        match diagnostic.category {
            DiagnosticCategory::Error => self.error_count += 1,
            DiagnosticCategory::Warning => self.warning_count += 1,
            DiagnosticCategory::Message => {}
        }
        self.diagnostics.push(diagnostic);
    }

    /// Add a table-backed diagnostic.
    pub fn report(&mut self, code: u32, location: &SourceLocation, args: &[&str]) {
        self.add(Diagnostic::new(code, location.clone(), args));
    }

    pub fn extend(&mut self, other: DiagnosticBag) {
        for diagnostic in other.diagnostics {
            self.add(diagnostic);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn contains_code(&self, code: u32) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl IntoIterator for DiagnosticBag {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

// =============================================================================
// DiagnosticSink
// =============================================================================

/// Append-only diagnostic set owned by one symbol.
///
/// Written only by winners of a facet race, read by anyone.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    items: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        DiagnosticSink::default()
    }

    pub fn commit(&self, bag: DiagnosticBag) {
        if bag.is_empty() {
            return;
        }
        let mut items = self.items.lock().expect("diagnostic sink lock poisoned");
        items.extend(bag);
    }

    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.items
            .lock()
            .expect("diagnostic sink lock poisoned")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.items.lock().expect("diagnostic sink lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
