//! Plain-text report generator.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use qcm_core::report::QuizReport;

const RULE: &str = "----------------------------------------";

/// Render a report as human-readable text.
pub fn generate_text(report: &QuizReport) -> String {
    let mut out = String::new();
    let score = &report.score;

    // `write!` into a String cannot fail.
    let _ = writeln!(out, "qcm report: {}", report.bank.name);
    let _ = writeln!(
        out,
        "Date: {}",
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(
        out,
        "Questions: {} asked of {} in bank",
        score.total, report.bank.question_count
    );
    match report.time_limit_secs {
        Some(secs) => {
            let _ = writeln!(out, "Time limit: {secs}s per question");
        }
        None => {
            let _ = writeln!(out, "Time limit: none");
        }
    }
    let _ = writeln!(out, "Duration: {:.1}s", report.duration_ms as f64 / 1000.0);
    let _ = writeln!(out, "{RULE}");

    for o in &report.outcomes {
        let _ = writeln!(out, "Q-{}) {}", o.index, o.prompt);
        let _ = writeln!(out, "  Your answer: {}", o.submitted_display());
        let _ = writeln!(out, "  Correct answer: {}", o.expected_display);
        let _ = writeln!(out, "  Status: {}", o.status);
        let _ = writeln!(out, "{RULE}");
    }

    let missed: Vec<_> = report.missed().collect();
    if !missed.is_empty() {
        let _ = writeln!(out, "To review ({}):", missed.len());
        for o in missed {
            let _ = writeln!(out, "  Q-{}: {}", o.index, o.expected_display);
        }
        let _ = writeln!(out, "{RULE}");
    }

    let _ = writeln!(out, "Final Score: {}/{}", score.raw_score, score.max_raw_score);
    let _ = writeln!(
        out,
        "Correct: {}  Wrong: {}  Timeout: {}",
        score.correct, score.wrong, score.timed_out
    );
    let _ = writeln!(out, "Percentage: {:.1}%", score.percentage * 100.0);
    let _ = writeln!(out, "Weighted score: {:.1}/100", score.weighted_score);
    let _ = writeln!(out, "{}", score.verdict.message());

    out
}

/// Write the text report to a file, creating parent directories.
pub fn write_text_report(report: &QuizReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_text(report))
        .with_context(|| format!("failed to write text report to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use qcm_core::model::AnswerStatus;
    use qcm_core::report::BankSummary;
    use qcm_core::results::QuestionOutcome;
    use qcm_core::scoring::ScoreSummary;
    use uuid::Uuid;

    fn outcome(index: usize, submitted: Option<&str>, status: AnswerStatus) -> QuestionOutcome {
        QuestionOutcome {
            index,
            prompt: format!("Question number {index}?"),
            submitted: submitted.map(String::from),
            expected_key: "B".into(),
            expected_display: "B. Firewall".into(),
            status,
            weight: 1.0,
            elapsed_ms: 1500,
        }
    }

    fn make_report() -> QuizReport {
        let outcomes = vec![
            outcome(1, Some("B"), AnswerStatus::Correct),
            outcome(2, Some("A"), AnswerStatus::Wrong),
            outcome(3, None, AnswerStatus::Timeout),
        ];
        let score = ScoreSummary::compute(&outcomes, 0.8);
        QuizReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            bank: BankSummary {
                name: "Security+ practice".into(),
                question_count: 120,
            },
            time_limit_secs: Some(30),
            outcomes,
            score,
            duration_ms: 42_500,
        }
    }

    #[test]
    fn text_report_lists_every_question() {
        let text = generate_text(&make_report());
        assert!(text.contains("qcm report: Security+ practice"));
        assert!(text.contains("Questions: 3 asked of 120 in bank"));
        assert!(text.contains("Time limit: 30s per question"));
        assert!(text.contains("Q-1) Question number 1?"));
        assert!(text.contains("  Your answer: TIMEOUT"));
        assert!(text.contains("  Correct answer: B. Firewall"));
        assert!(text.contains("  Status: WRONG"));
    }

    #[test]
    fn text_report_has_scores_and_verdict() {
        let text = generate_text(&make_report());
        assert!(text.contains("Final Score: 1/3"));
        assert!(text.contains("Correct: 1  Wrong: 1  Timeout: 1"));
        assert!(text.contains("Weighted score: 33.3/100"));
        assert!(text.trim_end().ends_with("Keep practicing!"));
    }

    #[test]
    fn missed_questions_are_listed_for_review() {
        let text = generate_text(&make_report());
        assert!(text.contains("To review (2):"));
        assert!(text.contains("  Q-2: B. Firewall"));
        assert!(!text.contains("  Q-1: B. Firewall"));
    }

    #[test]
    fn untimed_report_says_so() {
        let mut report = make_report();
        report.time_limit_secs = None;
        assert!(generate_text(&report).contains("Time limit: none"));
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.txt");
        write_text_report(&make_report(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Final Score: 1/3"));
    }
}
