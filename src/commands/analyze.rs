use crate::analyzer::LogAnalyzer;
use crate::cli::AnalyzeArgs;
use crate::commands::expand_globs;
use crate::commands::output::{print_notice, stats_to_json};
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::report::save_output;

pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_file(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(format) = args.format {
        config.format = format.into();
    }
    if args.max_lines.is_some() {
        config.max_lines_per_file = args.max_lines;
    }
    if args.output.is_some() {
        config.output = args.output.clone();
    }

    let files = expand_globs(&args.files)?;
    if files.is_empty() {
        print_notice("no files matched the given patterns");
    }

    let analyzer = LogAnalyzer::new(config);
    let stats = analyzer.analyze(&files);

    // --output receives whichever rendering goes to stdout
    if args.json {
        let json = stats_to_json(&stats)?;
        if let Some(path) = &analyzer.config().output {
            save_output(&json, path)?;
        }
        println!("{}", json);
    } else {
        println!("{}", analyzer.generate_report(&stats)?);
    }

    Ok(())
}
