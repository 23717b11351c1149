//! The `qcm run` command.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use qcm_core::config::{load_config_from, QuizConfig};
use qcm_core::engine::{
    filter_by_tags, select_questions, QuizEngine, QuizObserver, QuizSettings,
};
use qcm_core::model::{AnswerStatus, Question};
use qcm_core::parser;
use qcm_core::report::QuizReport;
use qcm_core::results::QuestionOutcome;
use qcm_core::scoring::ScoreSummary;
use qcm_report::text::write_text_report;
use qcm_term::ConsoleInput;

const BANNER: &str = r"
    ###############################################################
    #                                                             #
    #                 QCM PRACTICE EXAM RUNNER                    #
    #                                                             #
    ###############################################################
";

const SEPARATOR: &str = "----------------------------------------";

/// Flags accepted by `qcm run`. Anything set here overrides the config file.
pub struct RunArgs {
    pub questions: PathBuf,
    pub count: Option<usize>,
    pub time_limit: Option<u64>,
    pub seed: Option<u64>,
    pub tag: Option<String>,
    pub no_shuffle: bool,
    pub output: Option<PathBuf>,
    pub format: Option<String>,
    pub config: Option<PathBuf>,
    pub no_banner: bool,
}

/// Prints questions and feedback to stdout.
struct ConsoleReporter;

impl QuizObserver for ConsoleReporter {
    fn on_start(&self, total: usize, time_limit: Option<Duration>) {
        println!("\n--- Starting Quiz ({total} Questions) ---");
        println!("Type the letter (A, B, C, D...) corresponding to the correct answer.");
        println!("For multiple answers type them as listed in the key, e.g. \"A, C\".");
        if let Some(limit) = time_limit {
            println!("You have {}s per question.", limit.as_secs());
        }
        println!();
    }

    fn on_question(&self, index: usize, _total: usize, question: &Question) {
        println!("Q-{index}) {}", question.question);
        for (key, text) in &question.options {
            println!("{key}. {text}");
        }
    }

    fn on_invalid(&self, valid_keys: &[&str]) {
        println!("Invalid input. Please enter one of: {}", valid_keys.join(", "));
    }

    fn on_outcome(&self, outcome: &QuestionOutcome) {
        match outcome.status {
            AnswerStatus::Correct => println!("your answer is correct"),
            AnswerStatus::Wrong => println!(
                "your answer is not correct the correct answer is : {}",
                outcome.expected_key
            ),
            AnswerStatus::Timeout => println!(
                "time is up! the correct answer is : {}",
                outcome.expected_key
            ),
        }
        println!("{SEPARATOR}");
    }

    fn on_finish(&self, _score: &ScoreSummary, elapsed: Duration) {
        println!("\n--- Quiz Finished ({:.1}s) ---", elapsed.as_secs_f64());
    }
}

pub fn execute(args: RunArgs) -> Result<()> {
    let mut config = load_config_from(args.config.as_deref())?;
    apply_overrides(&mut config, &args);
    config.validate()?;

    let mut banks = parser::load_banks(&args.questions)?;
    anyhow::ensure!(
        !banks.is_empty(),
        "no question banks found in {}",
        args.questions.display()
    );

    if let Some(tag_list) = &args.tag {
        let tags: Vec<&str> = tag_list
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        for bank in &mut banks {
            filter_by_tags(&mut bank.questions, &tags);
        }
        banks.retain(|b| !b.questions.is_empty());
        anyhow::ensure!(!banks.is_empty(), "no questions tagged {tag_list}");
    }

    let formats = parse_formats(&config.report_formats)?;
    let settings = QuizSettings::from(&config);
    let engine = QuizEngine::new(settings);
    let mut input = ConsoleInput::stdio(config.poll_interval());

    if !args.no_banner {
        println!("{BANNER}");
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    let multiple = banks.len() > 1;

    for (i, bank) in banks.iter().enumerate() {
        println!("Question bank: {} ({} questions)", bank.name, bank.questions.len());
        let picked = select_questions(bank, config.question_count, config.shuffle, args.seed);
        tracing::debug!(bank = %bank.name, picked = picked.len(), "questions selected");

        let report = engine.run(bank, &picked, &mut input, &ConsoleReporter)?;

        print_summary(&report);

        let stem = if multiple {
            format!("report-{timestamp}-{}", i + 1)
        } else {
            format!("report-{timestamp}")
        };
        save_reports(&report, &config.output_dir, &stem, &formats)?;
    }

    Ok(())
}

fn apply_overrides(config: &mut QuizConfig, args: &RunArgs) {
    if let Some(count) = args.count {
        config.question_count = count;
    }
    if let Some(secs) = args.time_limit {
        config.time_limit_secs = (secs > 0).then_some(secs);
    }
    if args.no_shuffle {
        config.shuffle = false;
    }
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(format) = &args.format {
        config.report_formats = format.split(',').map(|f| f.trim().to_string()).collect();
    }
}

/// Expand `all` and reject unknown format names.
fn parse_formats(requested: &[String]) -> Result<Vec<&'static str>> {
    let mut formats = Vec::new();
    for name in requested {
        let expanded: &[&'static str] = match name.as_str() {
            "all" => &["text", "json"],
            "text" => &["text"],
            "json" => &["json"],
            "" => &[],
            other => anyhow::bail!("unknown report format: '{other}' (expected text, json or all)"),
        };
        for fmt in expanded {
            if !formats.contains(fmt) {
                formats.push(*fmt);
            }
        }
    }
    Ok(formats)
}

fn save_reports(report: &QuizReport, output: &Path, stem: &str, formats: &[&str]) -> Result<()> {
    if formats.is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory {}", output.display()))?;

    for fmt in formats {
        match *fmt {
            "text" => {
                let path = output.join(format!("{stem}.txt"));
                write_text_report(report, &path)?;
                eprintln!("Text report: {}", path.display());
            }
            "json" => {
                let path = output.join(format!("{stem}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            _ => {}
        }
    }
    Ok(())
}

fn print_summary(report: &QuizReport) {
    use comfy_table::{Cell, Table};

    let score = &report.score;
    let mut table = Table::new();
    table.set_header(vec![
        "Bank",
        "Questions",
        "Correct",
        "Wrong",
        "Timeout",
        "Percentage",
        "Weighted",
    ]);
    table.add_row(vec![
        Cell::new(&report.bank.name),
        Cell::new(score.total),
        Cell::new(score.correct),
        Cell::new(score.wrong),
        Cell::new(score.timed_out),
        Cell::new(format!("{:.1}%", score.percentage * 100.0)),
        Cell::new(format!("{:.1}/100", score.weighted_score)),
    ]);

    println!("{table}");
    println!("Final Score: {}/{}", score.raw_score, score.max_raw_score);
    println!("{}", score.verdict.message());
}
