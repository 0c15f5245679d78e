//! `chainview` command-line entry point.
//!
//! # Responsibility
//! - Expose the core codec, query and block-timing helpers to shell users.
//! - Resolve configuration (file, then flags) before any command runs.

use anyhow::{anyhow, Context, Result};
use chainview_core::{
    average_block_interval, decode_with, encode, format_bytes, init_logging_from, parse_bytes,
    parse_query_string, query_part, strip_cache_buster, ByteFormat, DecodeMode, ExplorerConfig,
    QueryParams,
};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "chainview")]
#[command(about = "Blockchain explorer byte/string codec and request helpers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (default: stderr)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode text into bytes
    Encode {
        text: String,

        /// Print lowercase hex bytes
        #[arg(long, conflicts_with = "decimal")]
        hex: bool,

        /// Print a decimal list such as "[226, 130, 172]"
        #[arg(long)]
        decimal: bool,
    },

    /// Decode a byte list such as "[226, 130, 172]" or "0xe2 0x82 0xac"
    Decode {
        bytes: String,

        /// Reject malformed UTF-8
        #[arg(long, conflicts_with = "lenient")]
        strict: bool,

        /// Decode malformed input best-effort
        #[arg(long)]
        lenient: bool,
    },

    /// Parse a request URL or query string into JSON, masking secrets
    Query { input: String },

    /// Average interval between two block timestamps
    BlockInterval {
        #[arg(allow_negative_numbers = true)]
        first_timestamp: i64,
        #[arg(allow_negative_numbers = true)]
        last_timestamp: i64,
        block_count: u64,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Encode { .. } => "encode",
            Self::Decode { .. } => "decode",
            Self::Query { .. } => "query",
            Self::BlockInterval { .. } => "block_interval",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_logging_from(&config).map_err(|err| anyhow!(err))?;

    let started_at = Instant::now();
    let command = cli.command.name();
    info!("event=command module=cli status=start command={command}");

    println!("{}", run(cli.command, &config)?);

    info!(
        "event=command module=cli status=ok command={} duration_ms={}",
        command,
        started_at.elapsed().as_millis()
    );
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<ExplorerConfig> {
    let mut config = match &cli.config {
        Some(path) => ExplorerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ExplorerConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn run(command: Commands, config: &ExplorerConfig) -> Result<String> {
    match command {
        Commands::Encode { text, hex, decimal } => {
            let format = match (hex, decimal) {
                (true, _) => ByteFormat::Hex,
                (_, true) => ByteFormat::Decimal,
                _ => config.byte_format,
            };
            Ok(format_bytes(&encode(&text), format))
        }
        Commands::Decode {
            bytes,
            strict,
            lenient,
        } => {
            let mode = match (strict, lenient) {
                (true, _) => DecodeMode::Strict,
                (_, true) => DecodeMode::Lenient,
                _ => config.decode_mode,
            };
            let bytes = parse_bytes(&bytes).context("parsing byte list")?;
            decode_with(&bytes, mode)
                .with_context(|| format!("decoding {} bytes ({} mode)", bytes.len(), mode.as_str()))
        }
        Commands::Query { input } => {
            let cleaned = strip_cache_buster(&input);
            let params = parse_query_string(query_part(&cleaned), &config.redacted_keys)
                .context("parsing query string")?;
            info!("{}", query_log_line(&params));
            Ok(serde_json::to_string_pretty(&params)?)
        }
        Commands::BlockInterval {
            first_timestamp,
            last_timestamp,
            block_count,
        } => average_block_interval(last_timestamp, first_timestamp, block_count)
            .map(|interval| interval.to_string())
            .ok_or_else(|| anyhow!("no average interval for {block_count} blocks")),
    }
}

// Why: values may carry secrets that are only masked for configured keys;
// the log line records key names alone.
fn query_log_line(params: &QueryParams) -> String {
    let keys = params.keys().map(String::as_str).collect::<Vec<_>>();
    format!(
        "event=query_parse module=cli status=ok param_count={} keys={}",
        params.len(),
        keys.join(",")
    )
}
