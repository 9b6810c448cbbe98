use clap::Parser;
use logtally::cli::{Cli, Commands};
use logtally::commands::{run_analyze, run_demo, run_scan};
use logtally::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    let result = match cli.command {
        Commands::Analyze(args) => run_analyze(args),
        Commands::Scan(args) => run_scan(args),
        Commands::Demo(args) => run_demo(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
