//! Structured diagnostics emitted by analyzer passes.
//!
//! Rewrite passes report through an append-only sink of `Diagnostic` values;
//! rendering is the driver's job. A diagnostic may carry a `SuggestedFix`,
//! a byte-offset source replacement the editor front end can apply.

use serde::Serialize;

use crate::span::Span;

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

/// A machine-applicable source replacement attached to a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SuggestedFix {
    pub description: String,
    pub start: u32,
    pub length: u32,
    pub replacement: String,
}

/// A diagnostic message with an optional suggested fix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<SuggestedFix>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, span: Span, message: String, code: u32) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            file,
            start: span.start,
            length: span.len(),
            message_text: message,
            suggested_fix: None,
        }
    }

    /// Attach a suggested source replacement.
    pub fn set_fix(&mut self, description: impl Into<String>, span: Span, replacement: String) {
        self.suggested_fix = Some(SuggestedFix {
            description: description.into(),
            start: span.start,
            length: span.len(),
            replacement,
        });
    }
}

/// Diagnostic codes for the rewriter error space.
pub mod diagnostic_codes {
    pub const COMPUTED_BY_SYMBOL: u32 = 3711;
    pub const PROP_FOREIGN_STRICT: u32 = 3712;
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::COMPUTED_BY_SYMBOL,
        category: DiagnosticCategory::Error,
        message: "Value for `{0}` must be a symbol literal",
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROP_FOREIGN_STRICT,
        category: DiagnosticCategory::Error,
        message: "The argument to `{0}` must be a lambda",
    },
];

/// Get the message template for a diagnostic code.
///
/// Returns the template string with `{0}`, `{1}`, etc. placeholders.
/// Use `format_message()` to fill in the placeholders.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_message_fills_placeholders() {
        let template = get_message_template(diagnostic_codes::COMPUTED_BY_SYMBOL)
            .expect("known code has a template");
        assert_eq!(
            format_message(template, &["computed_by"]),
            "Value for `computed_by` must be a symbol literal"
        );
    }

    #[test]
    fn suggested_fix_records_span() {
        let mut diag = Diagnostic::error(
            "a.rb".to_string(),
            Span::new(10, 14),
            "The argument to `foreign:` must be a lambda".to_string(),
            diagnostic_codes::PROP_FOREIGN_STRICT,
        );
        diag.set_fix("Convert to lambda", Span::new(10, 14), "-> {Post}".to_string());
        let fix = diag.suggested_fix.expect("fix was attached");
        assert_eq!(fix.start, 10);
        assert_eq!(fix.length, 4);
    }
}
