use clap::{Parser, ValueEnum};
use log::debug;
use ssb_msg::{Msg, PostContent};
use ssb_threads::ContextBundle;
use std::{io, path::PathBuf, process::ExitCode};
use thiserror::Error as ThisError;
use tokio::fs::read;

mod render;
use render::{render_json, render_text};

#[derive(Debug, ThisError)]
enum Error {
    #[error("Failed to read bundle file, cause: {0}")]
    ReadFile(#[source] io::Error),
    #[error("{0}")]
    Bundle(#[from] ssb_threads::Error),
    #[error("Failed to serialize JSON to string, cause: {0}")]
    JsonToString(#[source] serde_json::Error),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Print an ssb thread around one post, from a fetched context bundle.
#[derive(Debug, Parser)]
#[command(name = "ssb-thread-view", version, long_about = None)]
struct Args {
    /// JSON file with `focused`, `ancestors` and `descendants` messages
    bundle: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

struct Config {
    bundle_path: PathBuf,
    format: OutputFormat,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            bundle_path: args.bundle,
            format: args.format,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = Config::from(Args::parse());

    match run(&config).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> Result<String, Error> {
    let Config {
        bundle_path,
        format,
    } = config;

    debug!("Reading bundle from {}", bundle_path.display());
    let bytes = read(bundle_path).await.map_err(Error::ReadFile)?;
    let thread = ContextBundle::<Msg<PostContent>>::from_json_slice(&bytes)?.into_model();

    match format {
        OutputFormat::Text => Ok(render_text(&thread)),
        OutputFormat::Json => render_json(&thread).map_err(Error::JsonToString),
    }
}
