use anyhow::{Context, Result};
use bar_exporter::{
    cli::commands::{Cli, Commands, ExportArgs},
    config::{ConfigFile, ConfigOverrides, ConnectionConfig, ExportConfig},
    discovery::discover_us_stock_tickers,
    io::csv_sink::CsvSink,
    pipeline::{resolve_symbols, run_export},
    providers::polygon_rest::PolygonProvider,
};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    // 1) Optional TOML layer
    let file = cli
        .config
        .as_ref()
        .map(ConfigFile::load)
        .transpose()
        .context("loading config file")?;

    match cli.command {
        Commands::Export(args) => export(args, file).await,
        Commands::Tickers => tickers(file).await,
    }
}

async fn export(args: ExportArgs, file: Option<ConfigFile>) -> Result<()> {
    let overrides = ConfigOverrides::from(&args);
    let cfg = ExportConfig::from_env(args.preset.unwrap_or_default(), file, overrides)?;
    let provider = PolygonProvider::new(cfg.credential, &cfg.base_url, cfg.request_timeout)?;

    // 2) Symbols; a discovery failure ends the run
    let symbols = resolve_symbols(&cfg.symbols, &provider)
        .await
        .context("ticker discovery failed")?;
    info!(symbols = symbols.len(), range = %cfg.range, "starting export");

    // 3) Fetch → transform → persist
    let sink = CsvSink::for_target(&cfg.output, cfg.range);
    let summary = run_export(&provider, &sink, &symbols, cfg.range, &cfg.layout).await;

    if !summary.skipped.is_empty() {
        info!(skipped = ?summary.skipped, "symbols without data");
    }
    if !summary.write_failed.is_empty() {
        warn!(failed = ?summary.write_failed, "symbols not written");
    }
    for path in &summary.files {
        println!("{}", path.display());
    }
    Ok(())
}

async fn tickers(file: Option<ConfigFile>) -> Result<()> {
    let conn = ConnectionConfig::from_env(file.as_ref())?;
    let provider = PolygonProvider::new(conn.credential, &conn.base_url, conn.request_timeout)?;

    let tickers = discover_us_stock_tickers(&provider)
        .await
        .context("ticker discovery failed")?;
    for t in &tickers {
        println!("{t}");
    }
    Ok(())
}
