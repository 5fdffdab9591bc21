//! equity-ingest - fetch daily equity series and keep them in DuckDB.

mod cli;

use alphavantage_api::{AlphaVantageClient, Config as ApiClientConfig};
use anyhow::{anyhow, Context, Result};
use equity_config::Config;
use equity_core::TimeSeriesTable;
use equity_store::{ingest, load_recent, SqlRepository};
use std::env;

use cli::{parse_args, Args, Command, USAGE};

fn run(args: Args) -> Result<()> {
    let config = match &args.config_path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_default(),
    };

    let db_path = args
        .db_path
        .clone()
        .unwrap_or_else(|| config.storage.get_db_path());

    match args.command {
        Command::Fetch {
            ticker,
            output_size,
            if_exists,
        } => {
            let api_key = config
                .api
                .api_key_from(|name| env::var(name).ok())
                .ok_or_else(|| {
                    anyhow!(
                        "Alpha Vantage API key not found (set {} or add it to .env)",
                        config.api.api_key_env
                    )
                })?;
            let client_config = ApiClientConfig::default().with_base_url(&config.api.base_url);
            let client = AlphaVantageClient::with_config(api_key, client_config)?;

            let mut repo = SqlRepository::open(&db_path)
                .with_context(|| format!("Failed to open database {}", db_path.display()))?;

            let report = ingest(
                &client,
                &mut repo,
                &ticker,
                output_size.unwrap_or(config.api.default_output_size),
                if_exists.unwrap_or(config.storage.default_if_exists),
            )?;

            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Read { table, limit } => {
            let repo = SqlRepository::open_existing(&db_path)
                .with_context(|| format!("Failed to open database {}", db_path.display()))?;
            let series = load_recent(&repo, &table, limit)?;

            println!(
                "{},{}",
                TimeSeriesTable::INDEX,
                TimeSeriesTable::COLUMNS.join(",")
            );
            for bar in &series {
                let values: Vec<String> = TimeSeriesTable::COLUMNS
                    .iter()
                    .filter_map(|c| bar.field(c))
                    .map(|v| v.to_string())
                    .collect();
                println!("{},{}", bar.date, values.join(","));
            }
            log::info!("{} rows read from {}", series.len(), table);
        }
    }

    Ok(())
}

fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let argv: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
