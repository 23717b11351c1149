//! The `qcm validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(questions_path: PathBuf) -> Result<()> {
    let banks = qcm_core::parser::load_banks(&questions_path)?;
    anyhow::ensure!(
        !banks.is_empty(),
        "no question banks found in {}",
        questions_path.display()
    );

    let mut total_warnings = 0;

    for bank in &banks {
        println!("Question bank: {} ({} questions)", bank.name, bank.questions.len());

        let warnings = qcm_core::parser::validate_question_bank(bank);
        for w in &warnings {
            let prefix = w
                .question
                .map(|n| format!("  [Q-{n}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
