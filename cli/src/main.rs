//! `myvariant <output-file> <query> [fields] [size] [from] [format]`
//!
//! Runs one query against the MyVariant service and writes the result body
//! to a file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use myvariant_core::{ClientConfig, Fields, MyVariant, OutputFormat, QueryOptions, BASE_URL_ENV, DEFAULT_BASE_URL};

#[derive(Debug, Parser)]
#[command(name = "myvariant")]
#[command(about = "Query the MyVariant.info annotation service and save the result")]
#[command(version)]
struct Cli {
    /// File the result body is written to
    output: PathBuf,

    /// Free-text or fielded query, e.g. "dbnsfp.genename:CDK2 AND _exists_:cadd"
    query: String,

    /// Comma-separated field paths, or "all"
    #[arg(default_value = "all")]
    fields: String,

    /// Maximum number of hits
    #[arg(default_value_t = myvariant_core::types::DEFAULT_SIZE)]
    size: u64,

    /// Offset of the first hit
    #[arg(default_value_t = 0)]
    from: u64,

    /// json, csv, tsv, table or flat
    #[arg(default_value = "json")]
    format: String,

    /// Service root
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Tracing filter, e.g. "debug" or "myvariant_core=debug"
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn options(&self) -> Result<QueryOptions> {
        let fields: Fields = self.fields.parse().context("invalid fields argument")?;
        let format: OutputFormat = self.format.parse().context("invalid format argument")?;
        Ok(QueryOptions::default()
            .with_fields(fields)
            .with_size(self.size)
            .with_from(self.from)
            .with_format(format))
    }
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let opts = cli.options()?;
    let mv = MyVariant::new(&ClientConfig::new(&cli.base_url));

    let output = mv
        .query(&cli.query, &opts)
        .with_context(|| format!("query '{}' failed", cli.query))?;
    let body = output.to_body()?;
    std::fs::write(&cli.output, &body)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    info!(path = %cli.output.display(), bytes = body.len(), format = %opts.format, "wrote result");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;
    run(&cli)
}
