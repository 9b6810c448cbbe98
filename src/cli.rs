use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::formats::{FormatHint, LogFormat};

#[derive(Parser)]
#[command(name = "logtally")]
#[command(author, version, about = "Detect log formats, normalize entries and summarize log files")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// More diagnostic output (repeatable)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Less diagnostic output (repeatable)
    #[arg(long, short, global = true, action = clap::ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,
}

impl Cli {
    /// Net verbosity: positive for `-v`, negative for `-q`
    pub fn verbosity(&self) -> i8 {
        let level = i16::from(self.verbose) - i16::from(self.quiet);
        level.clamp(i16::from(i8::MIN), i16::from(i8::MAX)) as i8
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze log files and print a summary report
    Analyze(AnalyzeArgs),

    /// Scan log files for error and performance signals
    Scan(ScanArgs),

    /// Write sample logs and run the full analysis on them
    Demo(DemoArgs),
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Log files to analyze (supports glob patterns; .gz is decompressed)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Log format (detected per line by default)
    #[arg(long, short, value_enum)]
    pub format: Option<FormatArg>,

    /// Maximum entries to read from each file
    #[arg(long, short = 'n')]
    pub max_lines: Option<usize>,

    /// Also write the printed output (report, or JSON with --json) to this file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print the statistics as JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    /// JSON settings file; command-line flags take precedence
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Log files to scan (supports glob patterns)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Log format (detected per line by default)
    #[arg(long, short, value_enum)]
    pub format: Option<FormatArg>,

    /// Maximum entries to read from each file
    #[arg(long, short = 'n')]
    pub max_lines: Option<usize>,

    /// Print each matching message, not just the counts
    #[arg(long)]
    pub show_matches: bool,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Directory the sample logs are written to
    #[arg(long, default_value = "sample_logs")]
    pub dir: PathBuf,

    /// Where the demo report is saved
    #[arg(long, short = 'o', default_value = "log_analysis_report.txt")]
    pub output: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Detect per line
    Auto,
    /// Web-server combined access log
    Apache,
    /// `timestamp [LEVEL] message`
    Application,
    /// Syslog without year
    Syslog,
    /// Container stream log
    Docker,
    /// Reverse-proxy error log
    #[value(alias = "nginx_error")]
    Nginx,
    /// Free text
    Generic,
}

impl From<FormatArg> for FormatHint {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => FormatHint::Auto,
            FormatArg::Apache => FormatHint::Only(LogFormat::Apache),
            FormatArg::Application => FormatHint::Only(LogFormat::Application),
            FormatArg::Syslog => FormatHint::Only(LogFormat::Syslog),
            FormatArg::Docker => FormatHint::Only(LogFormat::Docker),
            FormatArg::Nginx => FormatHint::Only(LogFormat::Nginx),
            FormatArg::Generic => FormatHint::Only(LogFormat::Generic),
        }
    }
}
