//! Classifier reply normalization and negative-form matching.
//!
//! # Invariants
//! - Normalization is lower-case + trim + whitespace tokenization, nothing else.
//! - A reply is negative only when its token sequence equals a registered form.

use crate::model::verdict::Verdict;
use std::collections::BTreeSet;

/// Negative tokens registered by default.
pub const DEFAULT_NEGATIVE_TOKENS: &[&str] = &["нет", "no"];

/// Splits a raw classifier reply into normalized tokens.
pub fn normalize_reply(raw: &str) -> Vec<String> {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Set of token sequences treated as a "does not match" answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegativeForms {
    forms: BTreeSet<Vec<String>>,
}

impl Default for NegativeForms {
    fn default() -> Self {
        DEFAULT_NEGATIVE_TOKENS
            .iter()
            .fold(Self::empty(), |forms, token| forms.with_token(token))
    }
}

impl NegativeForms {
    /// A set with no forms; every reply is accepted.
    pub fn empty() -> Self {
        Self {
            forms: BTreeSet::new(),
        }
    }

    /// Registers `token`, `token.` and `token .` as negative forms.
    pub fn with_token(self, token: &str) -> Self {
        let token = token.trim();
        self.with_form(token)
            .with_form(&format!("{token}."))
            .with_form(&format!("{token} ."))
    }

    /// Registers one reply, normalized the same way replies are.
    ///
    /// Blank input is ignored so an empty reply never becomes negative.
    pub fn with_form(mut self, reply: &str) -> Self {
        let tokens = normalize_reply(reply);
        if !tokens.is_empty() {
            self.forms.insert(tokens);
        }
        self
    }

    pub fn is_negative(&self, raw_reply: &str) -> bool {
        self.forms.contains(&normalize_reply(raw_reply))
    }

    /// Maps a well-formed reply to `Reject` or `Accept`.
    pub fn interpret(&self, raw_reply: &str) -> Verdict {
        if self.is_negative(raw_reply) {
            Verdict::Reject
        } else {
            Verdict::Accept
        }
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_reply, NegativeForms};
    use crate::model::verdict::Verdict;

    #[test]
    fn normalize_lowercases_trims_and_splits() {
        assert_eq!(normalize_reply("  НЕТ \n"), vec!["нет"]);
        assert_eq!(normalize_reply("Нет ."), vec!["нет", "."]);
        assert!(normalize_reply(" \t ").is_empty());
    }

    #[test]
    fn default_forms_reject_russian_and_english_negatives() {
        let forms = NegativeForms::default();
        for reply in ["нет", "Нет", "НЕТ", "нет.", "Нет .", "no", "No.", "NO ."] {
            assert_eq!(forms.interpret(reply), Verdict::Reject, "reply {reply:?}");
        }
    }

    #[test]
    fn anything_else_is_accepted() {
        let forms = NegativeForms::default();
        for reply in [
            "Да, текст соответствует теме",
            "нет, не соответствует",
            "нет!",
            "не",
            "",
            "yes",
        ] {
            assert_eq!(forms.interpret(reply), Verdict::Accept, "reply {reply:?}");
        }
    }

    #[test]
    fn forms_can_be_extended_without_touching_defaults() {
        let forms = NegativeForms::default().with_form("Не соответствует");
        assert_eq!(forms.interpret("не соответствует"), Verdict::Reject);
        assert_eq!(forms.interpret("нет"), Verdict::Reject);
    }

    #[test]
    fn blank_form_is_ignored() {
        let forms = NegativeForms::empty().with_form("   ");
        assert!(forms.is_empty());
        assert_eq!(forms.interpret(""), Verdict::Accept);
    }

    #[test]
    fn with_token_registers_three_forms() {
        assert_eq!(NegativeForms::empty().with_token("nein").len(), 3);
    }
}
