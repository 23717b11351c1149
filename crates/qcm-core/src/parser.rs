//! Question bank loader.
//!
//! Loads question banks from JSON or TOML files and directories, and
//! validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Question, QuestionBank};

/// A JSON bank is either a bare list of questions or a named object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonBankFile {
    Bare(Vec<Question>),
    Named {
        name: String,
        #[serde(default)]
        description: String,
        questions: Vec<Question>,
    },
}

/// Intermediate TOML structure for bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    name: String,
    #[serde(default)]
    description: String,
}

/// Parse a single bank file, choosing the format by extension.
pub fn parse_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => parse_toml_bank(&content, path),
        Some("json") => parse_json_bank(&content, path),
        _ => anyhow::bail!(
            "unsupported question bank format (expected .json or .toml): {}",
            path.display()
        ),
    }
}

/// Parse a JSON string into a `QuestionBank` (useful for testing).
///
/// Bare lists take their name from the file stem.
pub fn parse_json_bank(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: JsonBankFile = serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?;

    Ok(match parsed {
        JsonBankFile::Bare(questions) => QuestionBank {
            name: bank_name_from_path(source_path),
            description: String::new(),
            questions,
        },
        JsonBankFile::Named {
            name,
            description,
            questions,
        } => QuestionBank {
            name,
            description,
            questions,
        },
    })
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_toml_bank(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(QuestionBank {
        name: parsed.bank.name,
        description: parsed.bank.description,
        questions: parsed.questions,
    })
}

fn bank_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "questions".to_string())
}

/// Recursively load all `.json` and `.toml` banks from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "json" || ext == "toml")
        {
            match parse_question_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// Load a single file, or every bank in a directory.
pub fn load_banks(path: &Path) -> Result<Vec<QuestionBank>> {
    if path.is_dir() {
        load_bank_directory(path)
    } else {
        Ok(vec![parse_question_bank(path)?])
    }
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question position (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn for_question(index: usize, message: impl Into<String>) -> Self {
        Self {
            question: Some(index + 1),
            message: message.into(),
        }
    }
}

/// Validate a question bank for common issues.
pub fn validate_question_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.questions.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "bank has no questions".into(),
        });
    }

    let mut seen_prompts = HashSet::new();

    for (i, q) in bank.questions.iter().enumerate() {
        if q.question.trim().is_empty() {
            warnings.push(ValidationWarning::for_question(i, "question text is empty"));
        } else if !seen_prompts.insert(q.question.trim()) {
            warnings.push(ValidationWarning::for_question(
                i,
                format!("duplicate question: {}", q.question.trim()),
            ));
        }

        if q.options.len() < 2 {
            warnings.push(ValidationWarning::for_question(
                i,
                format!("only {} option(s), expected at least 2", q.options.len()),
            ));
        }

        for key in q.options.keys() {
            let mut chars = key.chars();
            let single_letter = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic());
            if !single_letter {
                warnings.push(ValidationWarning::for_question(
                    i,
                    format!("option key '{key}' is not a single letter"),
                ));
            }
        }

        if q.expected_key().is_empty() {
            warnings.push(ValidationWarning::for_question(i, "answer is empty"));
        } else if !q.accepts_response(&q.answer) {
            warnings.push(ValidationWarning::for_question(
                i,
                format!("answer '{}' does not name an option", q.answer.trim()),
            ));
        }

        if q.weight <= 0.0 || !q.weight.is_finite() {
            warnings.push(ValidationWarning::for_question(
                i,
                format!("weight must be positive, got {}", q.weight),
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const FLAT_JSON: &str = r#"[
  {
    "question": "Which protocol encrypts web traffic?",
    "options": {"A": "HTTP", "B": "HTTPS", "C": "FTP", "D": "Telnet"},
    "answer": "B"
  },
  {
    "question": "Which two are authentication factors?",
    "options": {"A": "Password", "B": "Firewall", "C": "Fingerprint", "D": "VLAN"},
    "answer": "A, C"
  }
]"#;

    const VALID_TOML: &str = r#"
[bank]
name = "Security Basics"
description = "Warm-up questions"

[[questions]]
question = "Which port does SSH use by default?"
answer = "c"
weight = 2.0
tags = ["networking"]

[questions.options]
A = "21"
B = "23"
C = "22"
D = "443"
"#;

    #[test]
    fn parse_bare_json_list() {
        let bank = parse_json_bank(FLAT_JSON, &PathBuf::from("qcm.json")).unwrap();
        assert_eq!(bank.name, "qcm");
        assert_eq!(bank.questions.len(), 2);
        assert_eq!(bank.questions[1].expected_key(), "A, C");
    }

    #[test]
    fn parse_named_json_object() {
        let json = format!(r#"{{"name": "Named", "questions": {FLAT_JSON}}}"#);
        let bank = parse_json_bank(&json, &PathBuf::from("x.json")).unwrap();
        assert_eq!(bank.name, "Named");
        assert_eq!(bank.questions.len(), 2);
    }

    #[test]
    fn parse_valid_toml() {
        let bank = parse_toml_bank(VALID_TOML, &PathBuf::from("bank.toml")).unwrap();
        assert_eq!(bank.name, "Security Basics");
        assert_eq!(bank.questions.len(), 1);
        assert_eq!(bank.questions[0].weight, 2.0);
        assert_eq!(bank.questions[0].expected_key(), "C");
        assert_eq!(bank.questions[0].option_keys(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn parse_malformed_json() {
        let result = parse_json_bank("{ not json", &PathBuf::from("bad.json"));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.yaml");
        std::fs::write(&path, "- question: x").unwrap();
        let err = parse_question_bank(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported"));
    }

    #[test]
    fn validate_clean_bank_has_no_warnings() {
        let bank = parse_json_bank(FLAT_JSON, &PathBuf::from("qcm.json")).unwrap();
        assert!(validate_question_bank(&bank).is_empty());
    }

    #[test]
    fn validate_flags_common_problems() {
        let json = r#"[
  {"question": "Dup?", "options": {"A": "x", "B": "y"}, "answer": "E"},
  {"question": "Dup?", "options": {"A": "x"}, "answer": "A", "weight": 0},
  {"question": " ", "options": {"AA": "x", "B": "y"}, "answer": ""}
]"#;
        let bank = parse_json_bank(json, &PathBuf::from("bad.json")).unwrap();
        let warnings = validate_question_bank(&bank);
        let has = |q: usize, needle: &str| {
            warnings
                .iter()
                .any(|w| w.question == Some(q) && w.message.contains(needle))
        };
        assert!(has(1, "does not name an option"));
        assert!(has(2, "duplicate question"));
        assert!(has(2, "at least 2"));
        assert!(has(2, "weight must be positive"));
        assert!(has(3, "question text is empty"));
        assert!(has(3, "not a single letter"));
        assert!(has(3, "answer is empty"));
    }

    #[test]
    fn validate_empty_bank() {
        let bank = QuestionBank {
            name: "empty".into(),
            description: String::new(),
            questions: vec![],
        };
        let warnings = validate_question_bank(&bank);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].question.is_none());
    }

    #[test]
    fn load_directory_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), FLAT_JSON).unwrap();
        std::fs::write(dir.path().join("b.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.json"), "[{").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let banks = load_bank_directory(dir.path()).unwrap();
        assert_eq!(banks.len(), 2);
        assert_eq!(banks[0].name, "a");
        assert_eq!(banks[1].name, "Security Basics");
    }
}
