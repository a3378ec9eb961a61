//! Pre-interned well-known identifiers.
//!
//! The rewriter compares call and constant names against this table instead
//! of resolving strings at every site. Built once per analysis session
//! against the shared interner and handed to every pass by reference.

use rbz_common::{Atom, ShardedInterner};

/// Well-known identifier atoms.
#[derive(Clone, Copy, Debug)]
pub struct Names {
    // Property declaration macros
    pub prop: Atom,
    pub const_: Atom,
    pub token_prop: Atom,
    pub timestamped_token_prop: Atom,
    pub created_prop: Atom,
    pub merchant_prop: Atom,

    // Names implied by the alias macros
    pub token: Atom,
    pub created: Atom,
    pub merchant: Atom,

    // Recognized options-map keys
    pub immutable: Atom,
    pub factory: Atom,
    pub default: Atom,
    pub computed_by: Atom,
    pub foreign: Atom,
    pub ifunset: Atom,

    // Marker types and type combinators
    pub t: Atom,
    pub struct_: Atom,
    pub string: Atom,
    pub float: Atom,
    pub hash: Atom,
    pub array: Atom,
    pub nilable: Atom,
    pub untyped: Atom,
    pub unsafe_: Atom,
    pub assert_type: Atom,

    // Mutator proxy constants: Chalk::ODM::Mutator::Private::{Hash,Array}Mutator
    pub chalk: Atom,
    pub odm: Atom,
    pub mutator: Atom,
    pub private: Atom,
    pub hash_mutator: Atom,
    pub array_mutator: Atom,

    // Synthesis plumbing
    pub initialize: Atom,
    pub arg0: Atom,
    pub opts: Atom,
    pub class_: Atom,
    pub square_brackets: Atom,
    pub kernel: Atom,
    pub raise: Atom,
    pub not_implemented_error: Atom,
}

impl Names {
    #[must_use]
    pub fn new(interner: &ShardedInterner) -> Self {
        Self {
            prop: interner.intern("prop"),
            const_: interner.intern("const"),
            token_prop: interner.intern("token_prop"),
            timestamped_token_prop: interner.intern("timestamped_token_prop"),
            created_prop: interner.intern("created_prop"),
            merchant_prop: interner.intern("merchant_prop"),

            token: interner.intern("token"),
            created: interner.intern("created"),
            merchant: interner.intern("merchant"),

            immutable: interner.intern("immutable"),
            factory: interner.intern("factory"),
            default: interner.intern("default"),
            computed_by: interner.intern("computed_by"),
            foreign: interner.intern("foreign"),
            ifunset: interner.intern("ifunset"),

            t: interner.intern("T"),
            struct_: interner.intern("Struct"),
            string: interner.intern("String"),
            float: interner.intern("Float"),
            hash: interner.intern("Hash"),
            array: interner.intern("Array"),
            nilable: interner.intern("nilable"),
            untyped: interner.intern("untyped"),
            unsafe_: interner.intern("unsafe"),
            assert_type: interner.intern("assert_type!"),

            chalk: interner.intern("Chalk"),
            odm: interner.intern("ODM"),
            mutator: interner.intern("Mutator"),
            private: interner.intern("Private"),
            hash_mutator: interner.intern("HashMutator"),
            array_mutator: interner.intern("ArrayMutator"),

            initialize: interner.intern("initialize"),
            arg0: interner.intern("arg0"),
            opts: interner.intern("opts"),
            class_: interner.intern("class"),
            square_brackets: interner.intern("[]"),
            kernel: interner.intern("Kernel"),
            raise: interner.intern("raise"),
            not_implemented_error: interner.intern("NotImplementedError"),
        }
    }
}
