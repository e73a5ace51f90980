//! Protocol query engine.
//!
//! # Responsibility
//! - Compute the visible protocol subset from a text term and an optional
//!   department filter.
//!
//! # Invariants
//! - Output preserves input order; there is no ranking.
//! - Text and department predicates are AND-composed.

pub mod filter;
