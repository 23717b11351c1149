//! The `qcm init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("qcm.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("question-banks")?;
    write_if_missing(Path::new("question-banks/example.json"), EXAMPLE_BANK)?;

    println!("\nNext steps:");
    println!("  1. Add your own questions under question-banks/");
    println!("  2. Run: qcm validate --questions question-banks/example.json");
    println!("  3. Run: qcm run --questions question-banks/example.json --time-limit 30");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# qcm configuration

question_count = 100
# Seconds per question; remove or set to 0 for untimed input.
time_limit_secs = 30
pass_threshold = 0.8
shuffle = true
poll_interval_ms = 100
output_dir = "./qcm-results"
report_formats = ["text"]
"#;

const EXAMPLE_BANK: &str = r#"{
  "name": "Example",
  "description": "A few questions to get started",
  "questions": [
    {
      "question": "Which port does HTTPS use by default?",
      "options": { "A": "21", "B": "80", "C": "443", "D": "8080" },
      "answer": "C"
    },
    {
      "question": "Which of these are symmetric ciphers?",
      "options": { "A": "AES", "B": "RSA", "C": "ChaCha20", "D": "ECDSA" },
      "answer": "A, C"
    },
    {
      "question": "What does the 'A' in the CIA triad stand for?",
      "options": { "A": "Authentication", "B": "Availability", "C": "Authorization", "D": "Accounting" },
      "answer": "B"
    }
  ]
}
"#;
