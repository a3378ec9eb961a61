//! The property-declaration rewrite pass.
//!
//! Recognizes ORM/struct-style field declarations in a class body:
//!
//! ```ruby
//! class Invoice < T::Struct
//!   prop :amount, Float
//!   const :currency, String, default: "usd"
//!   prop :merchant_id, T.nilable(String), foreign: -> {Merchant}
//! end
//! ```
//!
//! and rewrites each into a typed getter/setter pair, optional foreign-key
//! accessors, and a nested `Mutator` class. Classes deriving from
//! `T::Struct` additionally get a synthesized keyword `initialize`.
//!
//! Recognition is purely syntactic and maximally conservative: any call
//! whose shape does not match the grammar is left byte-identical with zero
//! diagnostics (a downstream phase will complain about it in its own
//! terms). Only a recognized option holding a malformed value produces a
//! diagnostic, and then synthesis still proceeds with the field degraded.

use rbz_common::diagnostics::diagnostic_codes;
use rbz_common::{Atom, Span};
use rbz_ast::expr::{Arg, ClassDef, Expr};
use rbz_ast::{Names, build};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::context::RewriteContext;
use crate::util::{
    dup_type, extract_value, has_truthy_value, has_value, is_probably_symbol, is_t_nilable,
    is_t_struct, mk_getter, mk_mutator, mk_setter, thunk_body,
};

/// `computed_by:` option payload: a class method name and where it was
/// written.
#[derive(Clone, Copy, Debug)]
pub struct ComputedBy {
    pub method: Atom,
    pub span: Span,
}

/// One recognized property declaration, fully resolved and ready for
/// synthesis. Produced by [`parse_prop`], consumed by [`process_prop`] and
/// [`synthesize_initialize`], then discarded.
#[derive(Debug)]
pub struct PropInfo {
    pub span: Span,
    pub is_immutable: bool,
    pub name: Atom,
    pub name_span: Span,
    pub type_: Expr,
    pub default: Option<Expr>,
    pub computed_by: Option<ComputedBy>,
    pub foreign: Option<Expr>,
    pub ifunset: Option<Expr>,
}

// Length of the `_prop` suffix the alias macros append to the implied name.
const PROP_SUFFIX_LEN: u32 = 5;
// Length of the `timestamped_` prefix on the long token alias.
const TIMESTAMPED_PREFIX_LEN: u32 = 12;

/// Classify a statement as a property declaration and parse its options.
///
/// Returns `None` for anything that is not a recognized declaration; the
/// caller leaves such statements untouched.
pub fn parse_prop(ctx: &mut RewriteContext, stat: &Expr) -> Option<PropInfo> {
    let Expr::Send {
        fun, args, span, ..
    } = stat
    else {
        return None;
    };
    let names = *ctx.names;
    let fun = *fun;
    let span = *span;

    // ----- Is this a call we care about? -----
    let mut is_immutable = false;
    let mut implied_name: Option<(Atom, Span)> = None;
    let mut implied_type: Option<Expr> = None;
    if fun == names.prop {
        // Nothing special
    } else if fun == names.const_ {
        is_immutable = true;
    } else if fun == names.token_prop || fun == names.timestamped_token_prop {
        // Slice the `token` part out of the call's own source span.
        let offset = if fun == names.timestamped_token_prop {
            TIMESTAMPED_PREFIX_LEN
        } else {
            0
        };
        implied_name = Some((
            names.token,
            Span::new(span.start + offset, span.end.saturating_sub(PROP_SUFFIX_LEN)),
        ));
        implied_type = Some(build::constant(span, names.string));
    } else if fun == names.created_prop {
        implied_name = Some((
            names.created,
            Span::new(span.start, span.end.saturating_sub(PROP_SUFFIX_LEN)),
        ));
        implied_type = Some(build::constant(span, names.float));
    } else if fun == names.merchant_prop {
        is_immutable = true;
        implied_name = Some((
            names.merchant,
            Span::new(span.start, span.end.saturating_sub(PROP_SUFFIX_LEN)),
        ));
        implied_type = Some(build::constant(span, names.string));
    } else {
        return None;
    }

    if args.len() >= 4 {
        // Too many args, even if all optional args were provided.
        return None;
    }

    // ----- What's the prop's name? -----
    let (name, name_span) = match implied_name {
        Some(implied) => {
            // The alias already names the field; a call that still passes a
            // name argument is not a valid declaration.
            if args.first().is_some_and(|arg| arg.as_symbol().is_some()) {
                return None;
            }
            implied
        }
        None => {
            let first = args.first()?;
            let sym = first.as_symbol()?;
            let literal_span = first.span();
            let text = ctx.snippet(literal_span);
            debug_assert!(
                text.is_empty() || text.starts_with(':'),
                "symbol literal source must carry its sigil"
            );
            // Strip the leading `:` so the name span covers just the word.
            (sym, Span::new(literal_span.start + 1, literal_span.end))
        }
    };

    // ----- What's the prop's type? -----
    let type_ = match implied_type {
        Some(ty) => ty,
        None => {
            if args.len() == 1 {
                // Type must have been implied by the alias or given in the
                // second argument.
                return None;
            }
            dup_type(&args[1])?
        }
    };
    debug_assert!(
        dup_type(&type_).is_some(),
        "no obvious type AST for this prop"
    );

    // ----- Does the prop have any extra options? -----
    // Deep copy the options hash so the destructive extraction below never
    // steals subtrees from the user's tree.
    let rules = match args.last() {
        Some(Expr::Hash { keys, values, .. }) => Some((keys.clone(), values.clone())),
        _ => None,
    };
    if rules.is_none() && args.len() >= 3 {
        // Three positional args with no trailing options hash is not a
        // property declaration.
        return None;
    }

    let mut info = PropInfo {
        span,
        is_immutable,
        name,
        name_span,
        type_,
        default: None,
        computed_by: None,
        foreign: None,
        ifunset: None,
    };

    if let Some((mut keys, mut values)) = rules {
        parse_options(ctx, &names, &mut info, &mut keys, &mut values);
    }

    if info.default.is_none() && is_t_nilable(&names, &info.type_) {
        info.default = Some(build::nil(info.span));
    }

    Some(info)
}

/// Extract recognized keys from the (private copy of the) options hash.
/// Absent keys are not an error; malformed values degrade with a
/// recoverable diagnostic.
fn parse_options(
    ctx: &mut RewriteContext,
    names: &Names,
    info: &mut PropInfo,
    keys: &mut Vec<Expr>,
    values: &mut Vec<Expr>,
) {
    if has_truthy_value(keys, values, names.immutable) {
        info.is_immutable = true;
    }

    if has_truthy_value(keys, values, names.factory) {
        info.default = Some(build::raise_unimplemented(names, info.span));
    } else if has_value(keys, names.default) {
        info.default = extract_value(keys, values, names.default);
    }

    // e.g. `const :foo, type, computed_by: :method_name`
    if has_truthy_value(keys, values, names.computed_by)
        && let Some(value) = extract_value(keys, values, names.computed_by)
    {
        match value.as_symbol() {
            Some(method) => {
                info.computed_by = Some(ComputedBy {
                    method,
                    span: value.span(),
                });
            }
            None => {
                ctx.report(
                    value.span(),
                    diagnostic_codes::COMPUTED_BY_SYMBOL,
                    &["computed_by"],
                );
            }
        }
    }

    if let Some(value) = extract_value(keys, values, names.foreign) {
        match thunk_body(value) {
            Ok(body) => info.foreign = Some(body),
            Err(raw) => {
                let raw_span = raw.span();
                let original = ctx.snippet(raw_span).to_string();
                let diag = ctx.report(raw_span, diagnostic_codes::PROP_FOREIGN_STRICT, &["foreign:"]);
                diag.set_fix("Convert to lambda", raw_span, format!("-> {{{original}}}"));
                // Keep the raw expression as a fallback; the accessors will
                // degrade to T.untyped if it is not a type.
                info.foreign = Some(raw);
            }
        }
    }

    info.ifunset = extract_value(keys, values, names.ifunset);
}

/// Synthesize the replacement statement sequence for one declaration.
pub fn process_prop(ctx: &RewriteContext, info: &PropInfo, for_t_struct: bool) -> Vec<Expr> {
    let names = *ctx.names;
    let span = info.span;
    let name = info.name;
    let name_span = info.name_span;

    let get_type = dup_type(&info.type_).expect("no obvious type AST for this prop");

    let name_text = ctx.interner.resolve(name);
    let at_name = ctx.interner.intern(&format!("@{name_text}"));
    let set_name = ctx.interner.intern(&format!("{name_text}="));

    let mut nodes = Vec::new();

    // ----- Getter -----
    nodes.push(build::sig(span, Vec::new(), Vec::new(), get_type.clone()));

    let getter_body = if let Some(computed_by) = &info.computed_by {
        // Given `const :foo, type, computed_by: <name>`, where <name> is a
        // symbol naming a class method, assert that the method takes one
        // argument of any type and returns the prop's type, via
        // `T.assert_type!(self.class.<name>(T.unsafe(nil)), type)`. The
        // assertion only means something to the checker; at runtime the
        // getter is unimplemented.
        let cb_span = computed_by.span;
        let self_class = build::send0(cb_span, build::self_ref(span), names.class_);
        let unsafe_nil = build::t_unsafe(&names, cb_span, build::nil(cb_span));
        let call_computed = build::send1(cb_span, self_class, computed_by.method, unsafe_nil);
        let assert = build::t_assert_type(&names, cb_span, call_computed, get_type.clone());
        build::ins_seq1(span, assert, build::raise_unimplemented(&names, span))
    } else if info.ifunset.is_none() && for_t_struct {
        build::ivar(name_span, at_name)
    } else {
        build::raise_unimplemented(&names, span)
    };
    nodes.push(mk_getter(span, name, name_span, getter_body));

    // ----- Setter -----
    if !info.is_immutable {
        let set_type = info.type_.clone();
        nodes.push(build::sig(
            span,
            vec![build::symbol(name_span, names.arg0)],
            vec![set_type.clone()],
            set_type,
        ));
        nodes.push(mk_setter(
            &names,
            span,
            set_name,
            name_span,
            build::raise_unimplemented(&names, span),
        ));
    }

    // ----- Foreign-key accessors -----
    if let Some(foreign) = &info.foreign {
        let (fk_type, fk_non_nil) = match dup_type(foreign) {
            // Not a valid type expression; fall back to fully dynamic.
            None => (
                build::t_untyped(&names, span),
                build::t_untyped(&names, span),
            ),
            Some(dup) => (build::t_nilable(&names, span, dup.clone()), dup),
        };

        // sig {params(opts: T.untyped).returns(T.nilable($foreign))}
        // def $fk_method(**opts); Kernel.raise NotImplementedError; end
        nodes.push(build::sig1(
            span,
            build::symbol(name_span, names.opts),
            build::t_untyped(&names, span),
            fk_type,
        ));
        let fk_method = ctx.interner.intern(&format!("{name_text}_"));
        nodes.push(build::synthetic_method(
            span,
            name_span,
            fk_method,
            vec![Arg::RestKeyword {
                name: names.opts,
                span: name_span,
            }],
            build::raise_unimplemented(&names, span),
        ));

        // sig {params(opts: T.untyped).returns($foreign)}
        // def $fk_method_!(**opts); Kernel.raise NotImplementedError; end
        nodes.push(build::sig1(
            span,
            build::symbol(name_span, names.opts),
            build::t_untyped(&names, span),
            fk_non_nil,
        ));
        let fk_method_bang = ctx.interner.intern(&format!("{name_text}_!"));
        nodes.push(build::synthetic_method(
            span,
            name_span,
            fk_method_bang,
            vec![Arg::RestKeyword {
                name: names.opts,
                span: name_span,
            }],
            build::raise_unimplemented(&names, span),
        ));
    }

    // ----- Mutator class -----
    {
        // The setter mirrors the class-level one but is emitted regardless
        // of immutability.
        let set_type = info.type_.clone();
        let mut rhs = vec![
            build::sig(
                span,
                vec![build::symbol(name_span, names.arg0)],
                vec![set_type.clone()],
                set_type,
            ),
            mk_setter(
                &names,
                span,
                set_name,
                name_span,
                build::raise_unimplemented(&names, span),
            ),
        ];

        if let Some(mutator_type) = mutator_getter_type(&names, span, &info.type_) {
            rhs.push(build::sig0(span, mutator_type));
            rhs.push(mk_getter(
                span,
                name,
                name_span,
                build::raise_unimplemented(&names, span),
            ));
        }

        nodes.push(build::class_def(
            span,
            build::constant(span, names.mutator),
            Vec::new(),
            rhs,
        ));
    }

    nodes
}

/// Return type for the mutator-class getter: a specialized mutator proxy
/// for keyed and ordered collections, nothing for anything else.
fn mutator_getter_type(names: &Names, span: Span, type_: &Expr) -> Option<Expr> {
    if is_probably_symbol(names, type_, names.hash) {
        let base = mk_mutator(names, span, names.hash_mutator);
        Some(match type_ {
            Expr::Send { fun, args, .. } if *fun == names.square_brackets && args.len() == 2 => {
                build::send2(
                    span,
                    base,
                    names.square_brackets,
                    args[0].clone(),
                    args[1].clone(),
                )
            }
            _ => build::send2(
                span,
                base,
                names.square_brackets,
                build::t_untyped(names, span),
                build::t_untyped(names, span),
            ),
        })
    } else if is_probably_symbol(names, type_, names.array) {
        let base = mk_mutator(names, span, names.array_mutator);
        Some(match type_ {
            Expr::Send { fun, args, .. } if *fun == names.square_brackets && args.len() == 1 => {
                build::send1(span, base, names.square_brackets, args[0].clone())
            }
            _ => build::send1(
                span,
                base,
                names.square_brackets,
                build::t_untyped(names, span),
            ),
        })
    } else {
        // User-defined constant types get no mutator accessor. A sibling
        // Mutator constant may exist for them, but this pass cannot see it,
        // so the omission stays.
        None
    }
}

/// Synthesize the keyword `initialize` for a struct-derived class from the
/// full ordered list of its declarations.
///
/// Required fields (no default) come first in the signature and parameter
/// list, then defaulted ones, each partition in declaration order. The body
/// assigns backing fields strictly in declaration order and ends with a
/// zero-argument super delegation.
pub fn synthesize_initialize(
    ctx: &RewriteContext,
    class_span: Span,
    props: &[PropInfo],
) -> Vec<Expr> {
    let names = *ctx.names;
    let mut args = Vec::with_capacity(props.len());
    let mut sig_keys = Vec::with_capacity(props.len());
    let mut sig_vals = Vec::with_capacity(props.len());

    // All the required props first.
    for prop in props.iter().filter(|prop| prop.default.is_none()) {
        args.push(Arg::Keyword {
            name: prop.name,
            span: prop.span,
        });
        sig_keys.push(build::symbol(prop.span, prop.name));
        sig_vals.push(prop.type_.clone());
    }

    // Then all the optional props.
    for prop in props.iter().filter(|prop| prop.default.is_some()) {
        let default = prop
            .default
            .as_ref()
            .expect("filter guarantees a default")
            .clone();
        args.push(Arg::OptionalKeyword {
            name: prop.name,
            default,
            span: prop.span,
        });
        sig_keys.push(build::symbol(prop.span, prop.name));
        sig_vals.push(prop.type_.clone());
    }

    // Initialize every backing field in declaration order, then delegate.
    let mut stats = Vec::with_capacity(props.len());
    for prop in props {
        let name_text = ctx.interner.resolve(prop.name);
        let at_name = ctx.interner.intern(&format!("@{name_text}"));
        stats.push(build::assign(
            prop.span,
            build::ivar(prop.name_span, at_name),
            build::local(prop.name_span, prop.name),
        ));
    }
    let body = build::ins_seq(class_span, stats, build::zsuper(class_span));

    vec![
        build::sig_void(class_span, sig_keys, sig_vals),
        build::synthetic_method(class_span, class_span, names.initialize, args, body),
    ]
}

/// Run the pass over one class body, in place.
///
/// Single pass: collect replacement sequences keyed by statement position,
/// then rebuild the body in original order, substituting where a
/// replacement exists. The synthesized `initialize` is prepended so a
/// user-written one later in the body overrides it under
/// last-definition-wins semantics.
pub fn run(ctx: &mut RewriteContext, klass: &mut ClassDef) {
    if ctx.autogen {
        // Autogeneration needs the raw declarations untouched.
        return;
    }

    let for_t_struct = klass
        .ancestors
        .iter()
        .any(|ancestor| is_t_struct(ctx.names, ancestor));

    let mut replacements: FxHashMap<usize, Vec<Expr>> = FxHashMap::default();
    let mut props: Vec<PropInfo> = Vec::new();
    for (index, stat) in klass.body.iter().enumerate() {
        let Some(info) = parse_prop(ctx, stat) else {
            continue;
        };
        let nodes = process_prop(ctx, &info, for_t_struct);
        assert!(
            !nodes.is_empty(),
            "if parse_prop completed successfully, process_prop must complete too"
        );
        replacements.insert(index, nodes);
        props.push(info);
    }

    if !props.is_empty() {
        trace!(
            file = ctx.file,
            count = props.len(),
            t_struct = for_t_struct,
            "rewrote property declarations"
        );
    }

    let old_body = std::mem::take(&mut klass.body);
    let mut new_body = Vec::with_capacity(old_body.len());
    if for_t_struct {
        new_body.extend(synthesize_initialize(ctx, klass.span, &props));
    }
    for (index, stat) in old_body.into_iter().enumerate() {
        match replacements.remove(&index) {
            Some(nodes) => new_body.extend(nodes),
            None => new_body.push(stat),
        }
    }
    klass.body = new_body;
}
