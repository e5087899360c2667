use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use eso_processor::cli::args::Args;
use eso_processor::cli::commands;

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(args.get_log_level())
        .init();

    match commands::run(&args) {
        Ok(count) => {
            if !args.quiet {
                println!(
                    "{} {} file{} processed",
                    "Done:".bright_green().bold(),
                    count,
                    if count == 1 { "" } else { "s" }
                );
            }
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".bright_red().bold(), e);
            std::process::exit(1);
        }
    }

    Ok(())
}
