//! Write-once slot for lazily computed symbol facets.
//!
//! Values are computed outside the slot and then offered to it. The first
//! offer wins; later offers get the winner back and must drop their own
//! value along with anything it produced (diagnostics in particular).

use once_cell::sync::OnceCell;

pub struct LazySlot<T> {
    cell: OnceCell<T>,
}

impl<T> LazySlot<T> {
    pub const fn new() -> Self {
        LazySlot {
            cell: OnceCell::new(),
        }
    }

    /// Fast path: the published value, if any.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_set(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Offer `value`. Returns the published value and whether `value` was
    /// the one published.
    pub fn install(&self, value: T) -> (&T, bool) {
        match self.cell.try_insert(value) {
            Ok(published) => (published, true),
            Err((published, _discarded)) => (published, false),
        }
    }
}

impl<T> Default for LazySlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for LazySlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.cell.get() {
            Some(value) => f.debug_tuple("LazySlot").field(value).finish(),
            None => f.write_str("LazySlot(<pending>)"),
        }
    }
}

#[cfg(test)]
#[path = "tests/lazy_slot_tests.rs"]
mod tests;
