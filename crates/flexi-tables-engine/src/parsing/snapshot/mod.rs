//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`outline`**: Renders parsed blocks as a stable, human-readable outline
//!   for `insta` snapshot testing
//! - **`invariants`**: Runtime checks for parser correctness (spans in bounds
//!   and in order, every table model well formed)

pub mod invariants;
pub mod outline;

pub use invariants::check as invariants;
pub use outline::outline;
