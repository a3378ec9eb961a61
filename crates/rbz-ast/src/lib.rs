//! Ruby AST node types and synthesis builders for the rbz analyzer.
//!
//! This crate is organized into three submodules:
//! - `expr` - The `Expr` sum type and its closed set of node kinds
//! - `build` - Constructor helpers used by rewrite passes to synthesize trees
//! - `names` - Pre-interned well-known identifiers (`Names`)
//!
//! Nodes are uniquely owned (`Box`/`Vec` children, no sharing). A subtree
//! moved into a new parent is gone from its old owner; reusing one at a
//! second site requires an explicit deep `.clone()` at that site.

pub mod build;
pub mod expr;
pub mod names;

pub use expr::{Arg, ClassDef, Expr, LiteralValue};
pub use names::Names;
