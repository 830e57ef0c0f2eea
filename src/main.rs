use clap::Parser;
use std::process::ExitCode;
use ura_ingest::app;
use ura_ingest::cli::Cli;
use ura_ingest::logging;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Environment first, so RUST_LOG from .env applies to logging
    let env_loaded = match &args.env_file {
        Some(path) => dotenv::from_path(path).map(|_| ()),
        None => dotenv::dotenv().map(|_| ()),
    };
    logging::init();
    if let (Some(path), Err(e)) = (&args.env_file, &env_loaded) {
        tracing::warn!(path = %path.display(), "Could not read env file: {e}");
    }

    app::execute(&args, |key| std::env::var(key).ok())
}
