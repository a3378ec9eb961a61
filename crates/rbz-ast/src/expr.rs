//! The `Expr` sum type for Ruby expression trees.
//!
//! The node set is closed: rewrite rules dispatch with exhaustive `match`,
//! so adding a kind surfaces every case that needs a decision at compile
//! time. `Clone` is the one deep-copy operation; there is no shallow copy.

use rbz_common::{Atom, Span};
use serde::Serialize;

/// Literal values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum LiteralValue {
    /// Interned symbol: `:foo`
    Symbol(Atom),
    /// String literal: `"foo"`
    String(Atom),
    Int(i64),
    Float(f64),
    Nil,
    True,
    False,
}

/// A method parameter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Arg {
    /// Positional parameter: `def m(arg0)`
    Local { name: Atom, span: Span },
    /// Keyword parameter: `def m(foo:)`
    Keyword { name: Atom, span: Span },
    /// Keyword parameter with a default: `def m(foo: 1)`
    OptionalKeyword { name: Atom, default: Expr, span: Span },
    /// Keyword rest parameter: `def m(**opts)`
    RestKeyword { name: Atom, span: Span },
}

impl Arg {
    #[must_use]
    pub const fn name(&self) -> Atom {
        match self {
            Self::Local { name, .. }
            | Self::Keyword { name, .. }
            | Self::OptionalKeyword { name, .. }
            | Self::RestKeyword { name, .. } => *name,
        }
    }
}

/// A class definition. Pulled out of `Expr` so passes that operate on one
/// class body can take it directly.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassDef {
    pub name: Box<Expr>,
    pub ancestors: Vec<Expr>,
    pub body: Vec<Expr>,
    pub span: Span,
}

/// A Ruby expression tree node.
///
/// Every child is uniquely owned. Statement-position and expression-position
/// nodes share this one type, as the surrounding grammar does.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Expr {
    /// Absent subtree (empty constant scope, elided receiver).
    EmptyTree,

    /// Root constant scope marker: the `::` in `::T`.
    Root { span: Span },

    /// `self`
    SelfRef { span: Span },

    Literal { value: LiteralValue, span: Span },

    /// Local variable or method parameter reference: `foo`
    Local { name: Atom, span: Span },

    /// Instance variable reference: `@foo`
    InstanceVar { name: Atom, span: Span },

    /// Constant reference, unresolved at this stage: `A`, `::A`, `A::B`
    UnresolvedConstant {
        scope: Box<Expr>,
        name: Atom,
        span: Span,
    },

    /// Method call: `recv.fun(args)`
    Send {
        recv: Box<Expr>,
        fun: Atom,
        args: Vec<Expr>,
        span: Span,
    },

    /// Hash literal: `{k => v, ...}` / trailing keyword options.
    /// Keys and values are parallel vectors.
    Hash {
        keys: Vec<Expr>,
        values: Vec<Expr>,
        span: Span,
    },

    /// Lambda literal: `-> (params) { body }`. A zero-parameter lambda is a
    /// thunk.
    Lambda {
        params: Vec<Arg>,
        body: Box<Expr>,
        span: Span,
    },

    /// Structured method type annotation: `sig {params(x: X).returns(Y)}`.
    /// `param_names` are symbol literals parallel to `param_types`;
    /// `ret` of `None` means `.void`.
    Sig {
        param_names: Vec<Expr>,
        param_types: Vec<Expr>,
        ret: Option<Box<Expr>>,
        span: Span,
    },

    /// Method definition: `def name(args) body end`
    MethodDef {
        name: Atom,
        name_span: Span,
        args: Vec<Arg>,
        body: Box<Expr>,
        /// True for rewriter-synthesized definitions.
        synthetic: bool,
        span: Span,
    },

    Class(ClassDef),

    /// Assignment: `lhs = rhs`
    Assign {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },

    /// Instruction sequence: statements followed by a final expression.
    InsSeq {
        stats: Vec<Expr>,
        expr: Box<Expr>,
        span: Span,
    },

    /// Zero-argument super delegation: bare `super`.
    ZSuper { span: Span },
}

impl Expr {
    /// Source span of this node. Synthesized and absent nodes report
    /// `Span::ZERO`.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::EmptyTree => Span::ZERO,
            Self::Root { span }
            | Self::SelfRef { span }
            | Self::Literal { span, .. }
            | Self::Local { span, .. }
            | Self::InstanceVar { span, .. }
            | Self::UnresolvedConstant { span, .. }
            | Self::Send { span, .. }
            | Self::Hash { span, .. }
            | Self::Lambda { span, .. }
            | Self::Sig { span, .. }
            | Self::MethodDef { span, .. }
            | Self::Assign { span, .. }
            | Self::InsSeq { span, .. }
            | Self::ZSuper { span } => *span,
            Self::Class(class_def) => class_def.span,
        }
    }

    /// The interned symbol behind a symbol literal, if this is one.
    #[must_use]
    pub const fn as_symbol(&self) -> Option<Atom> {
        match self {
            Self::Literal {
                value: LiteralValue::Symbol(atom),
                ..
            } => Some(*atom),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_empty_tree(&self) -> bool {
        matches!(self, Self::EmptyTree)
    }

    /// Truthiness of a literal under Ruby semantics; `None` for
    /// non-literals (unknown at rewrite time).
    #[must_use]
    pub const fn literal_truthiness(&self) -> Option<bool> {
        match self {
            Self::Literal { value, .. } => match value {
                LiteralValue::Nil | LiteralValue::False => Some(false),
                _ => Some(true),
            },
            _ => None,
        }
    }
}
