//! Numeric utilities for grid enumeration

/// Deterministic half-open stepping along one axis
pub mod stepping;
