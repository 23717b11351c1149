//! qcm-core — Question bank model, quiz loop, and scoring.
//!
//! This crate defines the data model, the input/observer traits, and the
//! scoring logic that the rest of qcm builds on. Terminal handling lives in
//! `qcm-term`; report rendering lives in `qcm-report`.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod results;
pub mod scoring;
pub mod traits;
