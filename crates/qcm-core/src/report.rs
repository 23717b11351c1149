//! Quiz report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::AnswerStatus;
use crate::results::QuestionOutcome;
use crate::scoring::ScoreSummary;

/// A complete record of one quiz run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the run finished.
    pub created_at: DateTime<Utc>,
    /// Summary of the bank the questions came from.
    pub bank: BankSummary,
    /// Per-question time limit, if the run was timed.
    pub time_limit_secs: Option<u64>,
    /// One record per question asked, in order.
    pub outcomes: Vec<QuestionOutcome>,
    /// Aggregate score.
    pub score: ScoreSummary,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of a question bank (without the questions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub name: String,
    /// Questions available in the bank.
    pub question_count: usize,
}

impl QuizReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: QuizReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Outcomes that were not answered correctly, for review.
    pub fn missed(&self) -> impl Iterator<Item = &QuestionOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status != AnswerStatus::Correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_question;

    fn make_report() -> QuizReport {
        let q = sample_question("B");
        let outcomes = vec![
            QuestionOutcome::answered(1, &q, "B".into(), 1000),
            QuestionOutcome::answered(2, &q, "A".into(), 2000),
            QuestionOutcome::timed_out(3, &q, 30_000),
        ];
        let score = ScoreSummary::compute(&outcomes, 0.8);
        QuizReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            bank: BankSummary {
                name: "Test".into(),
                question_count: 3,
            },
            time_limit_secs: Some(30),
            outcomes,
            score,
            duration_ms: 33_000,
        }
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = QuizReport::load_json(&path).unwrap();

        assert_eq!(loaded.bank.name, "Test");
        assert_eq!(loaded.outcomes.len(), 3);
        assert_eq!(loaded.outcomes[2].status, AnswerStatus::Timeout);
        assert_eq!(loaded.score.correct, 1);
    }

    #[test]
    fn missed_skips_correct_answers() {
        let report = make_report();
        let missed: Vec<usize> = report.missed().map(|o| o.index).collect();
        assert_eq!(missed, vec![2, 3]);
    }

    #[test]
    fn load_missing_file_fails() {
        let err = QuizReport::load_json(Path::new("no_such_report.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read report"));
    }
}
