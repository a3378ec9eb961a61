//! Common types and utilities for the rbz Ruby static analyzer.
//!
//! This crate provides foundational types used across all rbz crates:
//! - String interning (`Atom`, `Interner`, `ShardedInterner`)
//! - Source spans (`Span`)
//! - Diagnostics (`Diagnostic`, `SuggestedFix`, message templates)

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner, ShardedInterner};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Structured diagnostics with optional suggested fixes
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, SuggestedFix};
