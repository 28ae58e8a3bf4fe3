//! `policy-gap` - policy coverage analysis from the command line.
//!
//! ```text
//! policy-gap analyze security_policy.txt
//! policy-gap analyze policy.md --controls controls.json --json
//! policy-gap analyze policy.txt --draft --model gemma3:12b --concurrency 2
//! policy-gap serve --listen 0.0.0.0:8000
//! ```
//!
//! Logs go to stderr, so `--json` output on stdout stays machine-readable.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod analyze;
mod config;
mod render;
mod serve;

use config::{AnalyzerConfig, Split};

/// Assess a security policy against a control catalogue.
#[derive(Parser)]
#[command(name = "policy-gap")]
#[command(about = "Assess a security policy against a compliance control catalogue", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "POLICY_GAP_LOG", default_value = "warn", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify every control against one policy document
    Analyze(AnalyzeArgs),
    /// Serve the analysis over HTTP
    Serve(ServeArgs),
}

/// Options shared by every subcommand that classifies documents.
#[derive(clap::Args)]
struct CommonArgs {
    /// Configuration file
    #[arg(short, long, env = "POLICY_GAP_CONFIG")]
    config: Option<PathBuf>,

    /// Control catalogue (JSON); the built-in NIST CSF subset when omitted
    #[arg(long)]
    controls: Option<PathBuf>,

    /// Lexicon (TOML) replacing the stock keyword tables
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// How the document is cut into clauses
    #[arg(long, value_enum)]
    split: Option<Split>,

    /// Clauses of this many characters or fewer are ignored
    #[arg(long)]
    min_clause_len: Option<usize>,

    /// Evaluate controls in parallel
    #[arg(long)]
    parallel: bool,
}

impl CommonArgs {
    /// Load the config file, then apply flags on top of it.
    fn config(&self) -> Result<AnalyzerConfig> {
        let mut config = AnalyzerConfig::load(self.config.as_deref())?;

        if let Some(path) = &self.controls {
            config.catalogue.controls = Some(path.clone());
        }
        if let Some(path) = &self.lexicon {
            config.catalogue.lexicon = Some(path.clone());
        }
        if let Some(split) = self.split {
            config.extractor.split = split;
        }
        if let Some(len) = self.min_clause_len {
            config.extractor.min_clause_len = len;
        }
        if self.parallel {
            config.classifier.parallel = true;
        }

        Ok(config)
    }
}

#[derive(clap::Args)]
struct AnalyzeArgs {
    /// Plain-text policy document
    policy: PathBuf,

    #[command(flatten)]
    common: CommonArgs,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Draft remediation text for every gap with a local model
    #[arg(long)]
    draft: bool,

    /// Model passed to the runner
    #[arg(long)]
    model: Option<String>,

    /// Drafting requests in flight at once
    #[arg(long)]
    concurrency: Option<usize>,
}

impl AnalyzeArgs {
    fn config(&self) -> Result<AnalyzerConfig> {
        let mut config = self.common.config()?;

        if self.draft {
            config.drafting.enabled = true;
        }
        if let Some(model) = &self.model {
            config.drafting.model = model.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.drafting.concurrency = concurrency;
        }

        Ok(config)
    }
}

#[derive(clap::Args)]
struct ServeArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Listen address
    #[arg(short, long, env = "POLICY_GAP_LISTEN")]
    listen: Option<String>,
}

impl ServeArgs {
    fn config(&self) -> Result<AnalyzerConfig> {
        let mut config = self.common.config()?;
        if let Some(listen) = &self.listen {
            config.server.listen = listen.clone();
        }
        Ok(config)
    }
}

fn init_tracing(cli: &Cli) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());

    if cli.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match &cli.command {
        Command::Analyze(args) => {
            let config = args.config()?;
            let analysis = analyze::run(&config, &args.policy).await?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print!("{}", render::render(&analysis));
            }
        }
        Command::Serve(args) => {
            let config = args.config()?;
            serve::serve(&config).await?;
        }
    }

    Ok(())
}
