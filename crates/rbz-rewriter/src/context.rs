//! Per-invocation rewrite context.

use rbz_common::diagnostics::{format_message, get_message_template};
use rbz_common::{Diagnostic, ShardedInterner, Span};
use rbz_ast::Names;

/// Everything a rewrite pass needs for one class body: the shared interner,
/// the well-known name table, the source text of the enclosing file, the
/// diagnostic sink, and the driver's pipeline mode.
///
/// The autogeneration flag lives here rather than in any global so that two
/// contexts in the same process can run in different modes.
pub struct RewriteContext<'a> {
    pub interner: &'a ShardedInterner,
    pub names: &'a Names,
    pub file: &'a str,
    pub source: &'a str,
    /// Signature-autogeneration mode: passes that synthesize definitions
    /// must leave the tree untouched.
    pub autogen: bool,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> RewriteContext<'a> {
    pub fn new(
        interner: &'a ShardedInterner,
        names: &'a Names,
        file: &'a str,
        source: &'a str,
        autogen: bool,
        diagnostics: &'a mut Vec<Diagnostic>,
    ) -> Self {
        Self {
            interner,
            names,
            file,
            source,
            autogen,
            diagnostics,
        }
    }

    /// Open an error diagnostic at `span`, formatting the registered
    /// template for `code` with `args`. Returns the diagnostic so the
    /// caller can attach a suggested fix.
    pub fn report(&mut self, span: Span, code: u32, args: &[&str]) -> &mut Diagnostic {
        let template = get_message_template(code).unwrap_or("unknown diagnostic {0}");
        let message = format_message(template, args);
        self.diagnostics
            .push(Diagnostic::error(self.file.to_string(), span, message, code));
        self.diagnostics
            .last_mut()
            .expect("diagnostic was just pushed")
    }

    /// Original source text under `span` (empty for fabricated spans).
    #[must_use]
    pub fn snippet(&self, span: Span) -> &'a str {
        span.slice(self.source)
    }
}
