use anyhow::{Context, Result};
use clap::Parser;
use go_extractor::{ExtractError, Extractor, cli, config::Config, output_schema};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("GO_EXTRACTOR_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() -> ExitCode {
    let args = match cli::Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version go to stdout and succeed; everything else is a usage error
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing();

    match run(args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("go-extractor: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: cli::Args) -> Result<String> {
    let config = Config::get();
    let compact = args.compact || config.compact;

    if args.schema {
        return render(&output_schema(), compact);
    }

    let path = args.path.ok_or(ExtractError::Usage)?;
    let result = Extractor::new().extract_path(&path, config.max_file_bytes)?;
    render(&result, compact).with_context(|| format!("encode result for {}", path.display()))
}

fn render<T: serde::Serialize>(value: &T, compact: bool) -> Result<String> {
    let output = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    Ok(output.map_err(ExtractError::from)?)
}
