//! Syntactic helpers shared by rewrite passes.
//!
//! Everything here works on a purely syntactic level. For instance,
//! `is_t` decides whether an expression is `T`, either unscoped or with the
//! root scope (`::T`). That constant might not actually be the `T` the
//! runtime defines, but rewrite passes run before any resolution and cannot
//! know better.

use rbz_common::{Atom, Span};
use rbz_ast::expr::Expr;
use rbz_ast::{Names, build};

/// Is this expression `T` or `::T`?
#[must_use]
pub fn is_t(names: &Names, expr: &Expr) -> bool {
    let Expr::UnresolvedConstant { scope, name, .. } = expr else {
        return false;
    };
    *name == names.t && matches!(**scope, Expr::EmptyTree | Expr::Root { .. })
}

/// Is this expression a `T.nilable(...)` application?
#[must_use]
pub fn is_t_nilable(names: &Names, expr: &Expr) -> bool {
    let Expr::Send {
        recv, fun, args, ..
    } = expr
    else {
        return false;
    };
    *fun == names.nilable && args.len() == 1 && is_t(names, recv)
}

/// Is this expression the struct base marker `T::Struct`?
#[must_use]
pub fn is_t_struct(names: &Names, expr: &Expr) -> bool {
    let Expr::UnresolvedConstant { scope, name, .. } = expr else {
        return false;
    };
    *name == names.struct_ && is_t(names, scope)
}

/// Duplicate a type expression, or `None` when the expression does not look
/// like a clonable type.
///
/// Valid shapes are constant-reference chains (scopes of constants, the
/// root marker, or nothing) and applications whose receiver and arguments
/// are themselves valid (`T.nilable(X)`, `T::Hash[K, V]`, ...). The result
/// is an independent deep copy; shared with other rewrite passes as the
/// "is this a type expression" predicate.
#[must_use]
pub fn dup_type(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::UnresolvedConstant { scope, name, span } => {
            let scope = dup_constant_scope(scope)?;
            Some(build::unresolved_constant(*span, scope, *name))
        }
        Expr::Send {
            recv,
            fun,
            args,
            span,
        } => {
            let recv = dup_type(recv)?;
            let args = args.iter().map(dup_type).collect::<Option<Vec<_>>>()?;
            Some(build::send(*span, recv, *fun, args))
        }
        _ => None,
    }
}

fn dup_constant_scope(scope: &Expr) -> Option<Expr> {
    match scope {
        Expr::EmptyTree => Some(build::empty()),
        Expr::Root { span } => Some(build::root(*span)),
        _ => dup_type(scope),
    }
}

/// Unwrap a thunk (zero-parameter lambda) to its body. Returns the
/// original expression unchanged in `Err` when it is not a thunk.
pub fn thunk_body(expr: Expr) -> Result<Expr, Expr> {
    match expr {
        Expr::Lambda { params, body, .. } if params.is_empty() => Ok(*body),
        other => Err(other),
    }
}

/// Does `expr` look like a reference to the well-known constant `which`
/// (e.g. `Hash`, `::Hash`, `T::Hash`), possibly applied through `[]`?
#[must_use]
pub fn is_probably_symbol(names: &Names, expr: &Expr, which: Atom) -> bool {
    match expr {
        Expr::Send { recv, fun, .. } if *fun == names.square_brackets => {
            is_probably_symbol(names, recv, which)
        }
        Expr::UnresolvedConstant { scope, name, .. } if *name == which => {
            matches!(**scope, Expr::EmptyTree | Expr::Root { .. }) || is_t(names, scope)
        }
        _ => false,
    }
}

// ----- Options-hash extraction -----
//
// The classifier hands the options parser a private deep copy of the hash
// literal, so destructive extraction below never touches the user's tree.

/// Find the index of `key` (as a symbol literal) in a hash's key list.
fn key_index(keys: &[Expr], key: Atom) -> Option<usize> {
    keys.iter().position(|k| k.as_symbol() == Some(key))
}

/// Does the hash bind `key` to a value at all?
#[must_use]
pub fn has_value(keys: &[Expr], key: Atom) -> bool {
    key_index(keys, key).is_some()
}

/// Does the hash bind `key` to a literal that is not `nil`/`false`?
/// Non-literal values count as truthy; their runtime value is unknown and
/// the conservative reading is "the option was supplied".
#[must_use]
pub fn has_truthy_value(keys: &[Expr], values: &[Expr], key: Atom) -> bool {
    let Some(index) = key_index(keys, key) else {
        return false;
    };
    values[index].literal_truthiness().unwrap_or(true)
}

/// Remove `key`'s entry from the hash, returning the moved-out value.
pub fn extract_value(keys: &mut Vec<Expr>, values: &mut Vec<Expr>, key: Atom) -> Option<Expr> {
    let index = key_index(keys, key)?;
    keys.remove(index);
    Some(values.remove(index))
}

// ----- Accessor synthesis -----

/// `def <name>; <body>; end`
#[must_use]
pub fn mk_getter(span: Span, name: Atom, name_span: Span, body: Expr) -> Expr {
    build::synthetic_method(span, name_span, name, Vec::new(), body)
}

/// `def <set_name>(arg0); <body>; end` where `set_name` is `<name>=`.
#[must_use]
pub fn mk_setter(names: &Names, span: Span, set_name: Atom, name_span: Span, body: Expr) -> Expr {
    let arg = rbz_ast::Arg::Local {
        name: names.arg0,
        span: name_span,
    };
    build::synthetic_method(span, name_span, set_name, vec![arg], body)
}

/// `Chalk::ODM::Mutator::Private::<which>` - the specialized mutator proxy
/// constant for collection-typed fields.
#[must_use]
pub fn mk_mutator(names: &Names, span: Span, which: Atom) -> Expr {
    let chalk = build::constant(span, names.chalk);
    let odm = build::unresolved_constant(span, chalk, names.odm);
    let mutator = build::unresolved_constant(span, odm, names.mutator);
    let private = build::unresolved_constant(span, mutator, names.private);
    build::unresolved_constant(span, private, which)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbz_common::ShardedInterner;

    fn setup() -> (ShardedInterner, Names) {
        let interner = ShardedInterner::new();
        let names = Names::new(&interner);
        (interner, names)
    }

    #[test]
    fn is_t_accepts_unscoped_and_root_scoped() {
        let (_interner, names) = setup();
        let unscoped = build::t(&names, Span::ZERO);
        let rooted = build::unresolved_constant(Span::ZERO, build::root(Span::ZERO), names.t);
        let scoped = build::unresolved_constant(
            Span::ZERO,
            build::constant(Span::ZERO, names.chalk),
            names.t,
        );
        assert!(is_t(&names, &unscoped));
        assert!(is_t(&names, &rooted));
        assert!(!is_t(&names, &scoped));
    }

    #[test]
    fn dup_type_handles_applied_generics() {
        let (interner, names) = setup();
        let integer = interner.intern("Integer");
        let ty = build::send2(
            Span::ZERO,
            build::constant(Span::ZERO, names.hash),
            names.square_brackets,
            build::constant(Span::ZERO, names.string),
            build::constant(Span::ZERO, integer),
        );
        let dup = dup_type(&ty).expect("generic application is a valid type");
        assert_eq!(dup, ty);
    }

    #[test]
    fn dup_type_rejects_non_type_shapes() {
        let (_interner, names) = setup();
        assert!(dup_type(&build::nil(Span::ZERO)).is_none());
        let call_on_literal = build::send0(Span::ZERO, build::nil(Span::ZERO), names.untyped);
        assert!(dup_type(&call_on_literal).is_none());
    }

    #[test]
    fn thunk_body_unwraps_only_zero_param_lambdas() {
        let (interner, names) = setup();
        let post = interner.intern("Post");
        let thunk = build::thunk(Span::ZERO, build::constant(Span::ZERO, post));
        let body = thunk_body(thunk).expect("thunk unwraps");
        assert_eq!(body, build::constant(Span::ZERO, post));

        let unary = build::lambda(
            Span::ZERO,
            vec![rbz_ast::Arg::Local {
                name: names.arg0,
                span: Span::ZERO,
            }],
            build::nil(Span::ZERO),
        );
        assert!(thunk_body(unary).is_err());
    }

    #[test]
    fn extract_value_removes_the_pair() {
        let (interner, names) = setup();
        let one = interner.intern("one");
        let mut keys = vec![
            build::symbol(Span::ZERO, names.default),
            build::symbol(Span::ZERO, one),
        ];
        let mut values = vec![build::int(Span::ZERO, 1), build::int(Span::ZERO, 2)];

        let value = extract_value(&mut keys, &mut values, names.default);
        assert_eq!(value, Some(build::int(Span::ZERO, 1)));
        assert_eq!(keys.len(), 1);
        assert_eq!(values.len(), 1);
        assert!(extract_value(&mut keys, &mut values, names.default).is_none());
    }

    #[test]
    fn truthiness_ignores_nil_and_false() {
        let (_interner, names) = setup();
        let keys = vec![build::symbol(Span::ZERO, names.immutable)];
        assert!(!has_truthy_value(&keys, &[build::nil(Span::ZERO)], names.immutable));
        assert!(has_truthy_value(&keys, &[build::int(Span::ZERO, 0)], names.immutable));
        // Non-literal values are conservatively treated as truthy.
        let send_value = build::send0(Span::ZERO, build::self_ref(Span::ZERO), names.class_);
        assert!(has_truthy_value(&keys, &[send_value], names.immutable));
    }
}
