use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod dump;
mod error;
mod output;
mod utils;

#[derive(Parser)]
#[command(name = "mfcdump")]
#[command(about = "Decode Mifare Classic 1K memory dumps", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: dump::Config,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match dump::execute(cli.config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
