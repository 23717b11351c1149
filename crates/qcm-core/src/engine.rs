//! The quiz loop.
//!
//! Draws questions from a bank, asks each one through an [`AnswerInput`],
//! re-asks on invalid input, and classifies the answer. Timed runs compute
//! one deadline per question that stays fixed across re-asks.

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use uuid::Uuid;

use crate::config::QuizConfig;
use crate::error::QuizError;
use crate::model::{normalize_answer, Question, QuestionBank};
use crate::report::{BankSummary, QuizReport};
use crate::results::QuestionOutcome;
use crate::scoring::ScoreSummary;
use crate::traits::{AnswerInput, TimedResponse};

/// Prompt shown before every answer.
pub const ANSWER_PROMPT: &str = "enter your answer : ";

/// Settings for one run of the quiz loop.
#[derive(Debug, Clone)]
pub struct QuizSettings {
    /// Per-question time limit; `None` reads plain lines.
    pub time_limit: Option<Duration>,
    /// Fraction of correct answers needed to pass.
    pub pass_threshold: f64,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            time_limit: None,
            pass_threshold: 0.8,
        }
    }
}

impl From<&QuizConfig> for QuizSettings {
    fn from(config: &QuizConfig) -> Self {
        Self {
            time_limit: config.time_limit(),
            pass_threshold: config.pass_threshold,
        }
    }
}

/// Progress callbacks for whoever is presenting the quiz.
pub trait QuizObserver {
    fn on_start(&self, total: usize, time_limit: Option<Duration>);
    fn on_question(&self, index: usize, total: usize, question: &Question);
    fn on_invalid(&self, valid_keys: &[&str]);
    fn on_outcome(&self, outcome: &QuestionOutcome);
    fn on_finish(&self, score: &ScoreSummary, elapsed: Duration);
}

/// No-op observer.
pub struct NoopObserver;

impl QuizObserver for NoopObserver {
    fn on_start(&self, _: usize, _: Option<Duration>) {}
    fn on_question(&self, _: usize, _: usize, _: &Question) {}
    fn on_invalid(&self, _: &[&str]) {}
    fn on_outcome(&self, _: &QuestionOutcome) {}
    fn on_finish(&self, _: &ScoreSummary, _: Duration) {}
}

/// Keep only questions tagged with at least one of `tags` (case-insensitive).
/// An empty tag list keeps every question.
pub fn filter_by_tags(questions: &mut Vec<Question>, tags: &[&str]) {
    if tags.is_empty() {
        return;
    }
    questions.retain(|q| {
        q.tags
            .iter()
            .any(|t| tags.iter().any(|wanted| t.eq_ignore_ascii_case(wanted)))
    });
}

/// Pick `count` unique questions from a bank.
///
/// With `shuffle` the draw is random (reproducible when `seed` is set);
/// without it the first `count` questions are taken in bank order. Banks
/// smaller than `count` are used whole.
pub fn select_questions(
    bank: &QuestionBank,
    count: usize,
    shuffle: bool,
    seed: Option<u64>,
) -> Vec<Question> {
    if bank.questions.len() < count {
        tracing::warn!(
            "only {} questions available in '{}', adjusting quiz size",
            bank.questions.len(),
            bank.name
        );
    }

    let mut picked = bank.questions.clone();
    if shuffle {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        picked.shuffle(&mut rng);
    }
    picked.truncate(count);
    picked
}

/// Runs a quiz over a fixed list of questions.
pub struct QuizEngine {
    settings: QuizSettings,
}

impl QuizEngine {
    pub fn new(settings: QuizSettings) -> Self {
        Self { settings }
    }

    /// Ask every question in order and build the report.
    pub fn run(
        &self,
        bank: &QuestionBank,
        questions: &[Question],
        input: &mut dyn AnswerInput,
        observer: &dyn QuizObserver,
    ) -> Result<QuizReport> {
        if questions.is_empty() {
            return Err(QuizError::EmptyBank(bank.name.clone()).into());
        }

        let start = Instant::now();
        let total = questions.len();
        observer.on_start(total, self.settings.time_limit);

        let mut outcomes = Vec::with_capacity(total);
        for (i, question) in questions.iter().enumerate() {
            let index = i + 1;
            observer.on_question(index, total, question);

            let Some(outcome) = self.ask(index, question, input, observer)? else {
                return Err(QuizError::InputClosed {
                    answered: outcomes.len(),
                    total,
                }
                .into());
            };
            tracing::debug!(index, status = %outcome.status, "question finished");
            observer.on_outcome(&outcome);
            outcomes.push(outcome);
        }

        let score = ScoreSummary::compute(&outcomes, self.settings.pass_threshold);
        let elapsed = start.elapsed();
        observer.on_finish(&score, elapsed);

        Ok(QuizReport {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank: BankSummary {
                name: bank.name.clone(),
                question_count: bank.questions.len(),
            },
            time_limit_secs: self.settings.time_limit.map(|d| d.as_secs()),
            outcomes,
            score,
            duration_ms: elapsed.as_millis() as u64,
        })
    }

    /// Ask one question until a valid answer arrives or time runs out.
    ///
    /// Returns `Ok(None)` if input ran dry.
    fn ask(
        &self,
        index: usize,
        question: &Question,
        input: &mut dyn AnswerInput,
        observer: &dyn QuizObserver,
    ) -> Result<Option<QuestionOutcome>> {
        let started = Instant::now();
        let deadline = self.settings.time_limit.map(|limit| started + limit);

        loop {
            let response = match deadline {
                Some(deadline) => input.read_before(ANSWER_PROMPT, deadline)?,
                None => match input.read_line(ANSWER_PROMPT)? {
                    Some(line) => TimedResponse::Answered(line),
                    None => return Ok(None),
                },
            };
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match response {
                TimedResponse::TimedOut => {
                    return Ok(Some(QuestionOutcome::timed_out(index, question, elapsed_ms)));
                }
                TimedResponse::Closed => return Ok(None),
                TimedResponse::Answered(text) => {
                    let answer = normalize_answer(&text);
                    if question.accepts_response(&answer) {
                        return Ok(Some(QuestionOutcome::answered(
                            index, question, answer, elapsed_ms,
                        )));
                    }
                    observer.on_invalid(&question.option_keys());
                }
            }
        }
    }
}
