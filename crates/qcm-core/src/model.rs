//! Core data model types for qcm.
//!
//! A question bank is a list of multiple-choice questions. Each question
//! carries its options keyed by single letters and the expected answer key,
//! which may name several letters for multi-select questions (`"A, C"`).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Optional stable identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The question text shown to the user.
    pub question: String,
    /// Option text keyed by letter. A `BTreeMap` keeps the keys sorted.
    pub options: BTreeMap<String, String>,
    /// The expected answer key, e.g. `"B"` or `"A, C"`.
    pub answer: String,
    /// Weight used for the weighted score.
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Free-form tags; `qcm run --tag` draws only matching questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

fn default_weight() -> f64 {
    1.0
}

impl Question {
    /// Option keys in display order (A, B, C, ...).
    pub fn option_keys(&self) -> Vec<&str> {
        self.options.keys().map(String::as_str).collect()
    }

    /// The expected answer key, trimmed and uppercased.
    pub fn expected_key(&self) -> String {
        normalize_answer(&self.answer)
    }

    /// Human-readable expected answer, e.g. `B. Firewall` or
    /// `A. Hashing; C. Salting`.
    ///
    /// Letters that do not name an option are shown as-is.
    pub fn expected_display(&self) -> String {
        let key = self.expected_key();
        key.split(',')
            .map(str::trim)
            .filter(|letter| !letter.is_empty())
            .map(|letter| match self.option_text(letter) {
                Some(text) => format!("{letter}. {text}"),
                None => letter.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Look up option text by key, ignoring case.
    pub fn option_text(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Whether `response` is a syntactically acceptable answer.
    ///
    /// A response is accepted when every comma-separated item names one of
    /// the option keys. This does not say anything about correctness: that
    /// is an exact match against [`Question::expected_key`], so a
    /// multi-select key `"A, C"` must be typed in the same order and with
    /// the same spacing.
    pub fn accepts_response(&self, response: &str) -> bool {
        let normalized = normalize_answer(response);
        if normalized.is_empty() {
            return false;
        }
        normalized.split(',').all(|item| {
            let item = item.trim();
            !item.is_empty() && self.options.keys().any(|k| k.eq_ignore_ascii_case(item))
        })
    }

    /// Exact-match check of a response against the expected key.
    pub fn is_correct(&self, response: &str) -> bool {
        normalize_answer(response) == self.expected_key()
    }
}

/// Trim surrounding whitespace and uppercase.
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// A named collection of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Human-readable name.
    pub name: String,
    /// Description of this bank.
    #[serde(default)]
    pub description: String,
    /// The questions in this bank.
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// How a single question ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnswerStatus {
    Correct,
    Wrong,
    Timeout,
}

impl fmt::Display for AnswerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerStatus::Correct => write!(f, "CORRECT"),
            AnswerStatus::Wrong => write!(f, "WRONG"),
            AnswerStatus::Timeout => write!(f, "TIMEOUT"),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_question(answer: &str) -> Question {
    let mut options = BTreeMap::new();
    options.insert("A".to_string(), "Hashing".to_string());
    options.insert("B".to_string(), "Firewall".to_string());
    options.insert("C".to_string(), "Salting".to_string());
    options.insert("D".to_string(), "Tokenization".to_string());
    Question {
        id: None,
        question: "Which control filters network traffic?".into(),
        options,
        answer: answer.into(),
        weight: 1.0,
        tags: vec![],
    }
}
