//! Centralized limits and thresholds.
//!
//! Keeping these in one place avoids each pass growing its own copy with a
//! slightly different value.

// =============================================================================
// Spin-wait backoff
// =============================================================================

/// Number of busy-spin rounds before a waiting thread starts yielding.
///
/// Each round spins `2^round` times with `std::hint::spin_loop`.
pub const SPIN_WAIT_SPIN_ROUNDS: u32 = 6;

/// Upper bound on the exponent used once the waiter starts yielding.
///
/// A waiting thread yields `2^min(round, SPIN_WAIT_MAX_YIELD_SHIFT)` times
/// between polls of the completion state and the cancellation token.
pub const SPIN_WAIT_MAX_YIELD_SHIFT: u32 = 4;

/// Polls after which a waiter starts sleeping briefly instead of yielding.
pub const SPIN_WAIT_SLEEP_AFTER: u32 = 64;

/// Sleep used by long waits, in microseconds.
pub const SPIN_WAIT_SLEEP_MICROS: u64 = 50;

// =============================================================================
// Hierarchy walks
// =============================================================================

/// Maximum number of base types visited when walking a class hierarchy.
///
/// Circular bases are reported separately; this bound only keeps malformed
/// metadata from looping forever.
pub const MAX_BASE_CHAIN_DEPTH: usize = 512;

/// Maximum nesting depth when substituting or comparing constructed types.
pub const MAX_TYPE_NESTING_DEPTH: u32 = 100;
