//! Declarative-macro desugaring passes for the rbz analyzer front end.
//!
//! Rewrite passes run between parsing and type checking. Each pass
//! recognizes one family of macro-style calls on a purely syntactic level
//! and replaces them with ordinary method definitions, so the checker never
//! has to special-case call shapes.
//!
//! This crate is organized into:
//! - `context` - `RewriteContext`, the per-invocation state handed in by the
//!   multi-pass driver
//! - `util` - syntactic helpers shared by rewrite passes (type-expression
//!   duplication, thunk unwrapping, options-hash extraction)
//! - `prop` - the property-declaration pass (`prop`, `const`, and the
//!   aliased forms)
//!
//! Passes never fail on user input: unrecognized shapes are left untouched
//! and malformed options degrade with a structured diagnostic.

pub mod context;
pub mod prop;
pub mod util;

pub use context::RewriteContext;
