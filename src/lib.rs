pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod config;
pub mod demo;
pub mod diagnostics;
pub mod error;
pub mod formats;
pub mod logging;
pub mod models;
pub mod parser;
pub mod patterns;
pub mod reader;
pub mod report;
pub mod statistics;
pub mod timestamp;


pub use analyzer::LogAnalyzer;
pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, Result};
pub use formats::{FormatHint, LogFormat};
pub use models::*;
pub use parser::LineParser;
pub use reader::LogReader;
pub use report::{render_report, write_report};
pub use statistics::{FrequencyCounter, StatsAccumulator};
