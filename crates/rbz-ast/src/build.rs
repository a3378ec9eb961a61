//! Constructor helpers for synthesized trees.
//!
//! Rewrite passes build replacement nodes through these instead of spelling
//! out variants inline; every helper takes ownership of its children, so a
//! reused subtree must be `.clone()`d by the caller at each use site.

use rbz_common::{Atom, Span};

use crate::expr::{Arg, ClassDef, Expr, LiteralValue};
use crate::names::Names;

#[must_use]
pub const fn empty() -> Expr {
    Expr::EmptyTree
}

#[must_use]
pub const fn root(span: Span) -> Expr {
    Expr::Root { span }
}

#[must_use]
pub const fn self_ref(span: Span) -> Expr {
    Expr::SelfRef { span }
}

#[must_use]
pub const fn nil(span: Span) -> Expr {
    Expr::Literal {
        value: LiteralValue::Nil,
        span,
    }
}

#[must_use]
pub const fn symbol(span: Span, name: Atom) -> Expr {
    Expr::Literal {
        value: LiteralValue::Symbol(name),
        span,
    }
}

#[must_use]
pub const fn string(span: Span, value: Atom) -> Expr {
    Expr::Literal {
        value: LiteralValue::String(value),
        span,
    }
}

#[must_use]
pub const fn int(span: Span, value: i64) -> Expr {
    Expr::Literal {
        value: LiteralValue::Int(value),
        span,
    }
}

#[must_use]
pub const fn local(span: Span, name: Atom) -> Expr {
    Expr::Local { name, span }
}

#[must_use]
pub const fn ivar(span: Span, name: Atom) -> Expr {
    Expr::InstanceVar { name, span }
}

#[must_use]
pub fn unresolved_constant(span: Span, scope: Expr, name: Atom) -> Expr {
    Expr::UnresolvedConstant {
        scope: Box::new(scope),
        name,
        span,
    }
}

/// Unscoped constant reference: `Name`.
#[must_use]
pub fn constant(span: Span, name: Atom) -> Expr {
    unresolved_constant(span, empty(), name)
}

#[must_use]
pub fn send(span: Span, recv: Expr, fun: Atom, args: Vec<Expr>) -> Expr {
    Expr::Send {
        recv: Box::new(recv),
        fun,
        args,
        span,
    }
}

#[must_use]
pub fn send0(span: Span, recv: Expr, fun: Atom) -> Expr {
    send(span, recv, fun, Vec::new())
}

#[must_use]
pub fn send1(span: Span, recv: Expr, fun: Atom, arg: Expr) -> Expr {
    send(span, recv, fun, vec![arg])
}

#[must_use]
pub fn send2(span: Span, recv: Expr, fun: Atom, arg0: Expr, arg1: Expr) -> Expr {
    send(span, recv, fun, vec![arg0, arg1])
}

#[must_use]
pub fn hash(span: Span, keys: Vec<Expr>, values: Vec<Expr>) -> Expr {
    Expr::Hash { keys, values, span }
}

#[must_use]
pub fn lambda(span: Span, params: Vec<Arg>, body: Expr) -> Expr {
    Expr::Lambda {
        params,
        body: Box::new(body),
        span,
    }
}

/// Zero-parameter lambda: `-> { body }`.
#[must_use]
pub fn thunk(span: Span, body: Expr) -> Expr {
    lambda(span, Vec::new(), body)
}

/// `sig {params(...).returns(ret)}`
#[must_use]
pub fn sig(span: Span, param_names: Vec<Expr>, param_types: Vec<Expr>, ret: Expr) -> Expr {
    Expr::Sig {
        param_names,
        param_types,
        ret: Some(Box::new(ret)),
        span,
    }
}

/// `sig {returns(ret)}`
#[must_use]
pub fn sig0(span: Span, ret: Expr) -> Expr {
    sig(span, Vec::new(), Vec::new(), ret)
}

/// `sig {params(name: ty).returns(ret)}`
#[must_use]
pub fn sig1(span: Span, name: Expr, ty: Expr, ret: Expr) -> Expr {
    sig(span, vec![name], vec![ty], ret)
}

/// `sig {params(...).void}`
#[must_use]
pub fn sig_void(span: Span, param_names: Vec<Expr>, param_types: Vec<Expr>) -> Expr {
    Expr::Sig {
        param_names,
        param_types,
        ret: None,
        span,
    }
}

/// A rewriter-synthesized method definition.
#[must_use]
pub fn synthetic_method(
    span: Span,
    name_span: Span,
    name: Atom,
    args: Vec<Arg>,
    body: Expr,
) -> Expr {
    Expr::MethodDef {
        name,
        name_span,
        args,
        body: Box::new(body),
        synthetic: true,
        span,
    }
}

#[must_use]
pub fn class_def(span: Span, name: Expr, ancestors: Vec<Expr>, body: Vec<Expr>) -> Expr {
    Expr::Class(ClassDef {
        name: Box::new(name),
        ancestors,
        body,
        span,
    })
}

#[must_use]
pub fn assign(span: Span, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Assign {
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
        span,
    }
}

#[must_use]
pub fn ins_seq(span: Span, stats: Vec<Expr>, expr: Expr) -> Expr {
    Expr::InsSeq {
        stats,
        expr: Box::new(expr),
        span,
    }
}

/// `ins_seq` with a single leading statement.
#[must_use]
pub fn ins_seq1(span: Span, stat: Expr, expr: Expr) -> Expr {
    ins_seq(span, vec![stat], expr)
}

#[must_use]
pub fn zsuper(span: Span) -> Expr {
    Expr::ZSuper { span }
}

// ----- T.* combinator shorthands -----

/// `T` (unscoped).
#[must_use]
pub fn t(names: &Names, span: Span) -> Expr {
    constant(span, names.t)
}

/// `T.untyped`
#[must_use]
pub fn t_untyped(names: &Names, span: Span) -> Expr {
    send0(span, t(names, span), names.untyped)
}

/// `T.nilable(inner)`
#[must_use]
pub fn t_nilable(names: &Names, span: Span, inner: Expr) -> Expr {
    send1(span, t(names, span), names.nilable, inner)
}

/// `T.unsafe(inner)`
#[must_use]
pub fn t_unsafe(names: &Names, span: Span, inner: Expr) -> Expr {
    send1(span, t(names, span), names.unsafe_, inner)
}

/// `T.assert_type!(expr, ty)`
#[must_use]
pub fn t_assert_type(names: &Names, span: Span, expr: Expr, ty: Expr) -> Expr {
    send2(span, t(names, span), names.assert_type, expr, ty)
}

/// `Kernel.raise NotImplementedError` - the "unimplemented at runtime"
/// placeholder body for synthesized methods.
#[must_use]
pub fn raise_unimplemented(names: &Names, span: Span) -> Expr {
    send1(
        span,
        constant(span, names.kernel),
        names.raise,
        constant(span, names.not_implemented_error),
    )
}
