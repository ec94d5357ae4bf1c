use anyhow::Result;
use clap::Parser;
use linediff::cli::{AppContext, Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let ctx = AppContext { quiet: cli.quiet, no_color: cli.no_color };

    let code = match cli.command {
        Commands::Diff(args) => linediff::app::run(args, &ctx)?,
        Commands::Completions(args) => {
            linediff::completion::run(args, &ctx)?;
            0
        }
    };

    std::process::exit(code);
}
