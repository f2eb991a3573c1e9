use cartolalib::{
    batch::{build_all, BatchMode},
    config::ValidationConfig,
    error::Result,
    formats::{csv::Csv, json::Json},
    model::TransactionKind,
    traits::{ReadFormat, WriteFormat},
};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Fmt {
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "cartola", version, about = "Validate raw transactions and emit canonical records")]
struct Cli {
    /// Input file (stdin by default)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Output file (stdout by default)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    #[arg(long = "in-format", value_enum, default_value = "json")]
    in_format: Fmt,

    #[arg(long = "out-format", value_enum, default_value = "json")]
    out_format: Fmt,

    /// Log and skip invalid transactions instead of aborting
    #[arg(long)]
    skip_invalid: bool,

    /// JSON validation config
    #[arg(long)]
    config: Option<String>,

    #[arg(long, env = "CARTOLA_MIN_YEAR")]
    min_year: Option<i32>,

    #[arg(long, env = "CARTOLA_MAX_YEAR")]
    max_year: Option<i32>,

    /// Kind applied when an input has no `kind`
    #[arg(long, env = "CARTOLA_DEFAULT_KIND")]
    default_kind: Option<String>,
}

impl Cli {
    fn validation_config(&self) -> Result<ValidationConfig> {
        let mut cfg = match &self.config {
            Some(path) => ValidationConfig::from_reader(BufReader::new(File::open(path)?))?,
            None => ValidationConfig::default(),
        };
        if let Some(y) = self.min_year {
            cfg.min_year = y;
        }
        if let Some(y) = self.max_year {
            cfg.max_year = y;
        }
        if let Some(k) = &self.default_kind {
            cfg.default_kind = Some(k.parse::<TransactionKind>()?);
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cartola=info,cartolalib=info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let cfg = cli.validation_config()?;
    tracing::debug!(?cfg, "validation config");

    // reader
    let reader: Box<dyn io::Read> = match &cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let br = BufReader::new(reader);

    let inputs = match cli.in_format {
        Fmt::Json => Json::read(br),
        Fmt::Csv => Csv::read(br),
    }?;

    let mode = if cli.skip_invalid { BatchMode::Collect } else { BatchMode::FailFast };
    let report = build_all(&inputs, &cfg, mode)?;

    // writer
    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    match cli.out_format {
        Fmt::Json => Json::write(&mut writer, &report.records),
        Fmt::Csv => Csv::write(&mut writer, &report.records),
    }?;

    writer.flush()?;
    Ok(())
}
