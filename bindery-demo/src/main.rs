use std::path::PathBuf;

use bindery_binder::BinderConfig;
use bindery_demo::DemoError;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Describe and invoke bound demo interfaces.
#[derive(Parser, Debug)]
#[command(name = "bindery")]
#[command(version)]
struct Args {
    /// Binder config file (JSON). Defaults to `bindery.json` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Cap text outputs at this many characters.
    #[arg(long, global = true)]
    max_output_chars: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the demos.
    List,
    /// Print a demo's interface config.
    Describe {
        /// Demo name.
        demo: String,
    },
    /// Invoke a demo once.
    Invoke {
        /// Demo name.
        demo: String,
        /// JSON array with one value per input, or a single JSON value.
        #[arg(long, default_value = "[]")]
        inputs: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run_cli(Args::parse()).await {
        eprintln!("bindery error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli(args: Args) -> Result<(), DemoError> {
    let mut config = match args.config {
        Some(path) => BinderConfig::from_path(&path)?,
        None => {
            let default_path = PathBuf::from("bindery.json");
            if default_path.exists() {
                BinderConfig::from_path(&default_path)?
            } else {
                BinderConfig::default()
            }
        }
    };
    if let Some(max_chars) = args.max_output_chars {
        config.max_output_chars = Some(max_chars);
    }

    let output = match args.command {
        Command::List => bindery_demo::list(),
        Command::Describe { demo } => bindery_demo::describe(&demo, &config)?,
        Command::Invoke { demo, inputs } => bindery_demo::invoke(&demo, &inputs, &config).await?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
