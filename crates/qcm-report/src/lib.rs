//! qcm-report — Report generation.
//!
//! Renders a [`QuizReport`](qcm_core::report::QuizReport) as a plain-text
//! review sheet. JSON output lives on the report type itself.

pub mod text;
