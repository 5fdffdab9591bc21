//! Command-line parsing.

use equity_core::{IfExists, OutputSize};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage:
  equity-ingest fetch <TICKER> [--output-size compact|full] [--if-exists fail|replace|append] [--db PATH]
  equity-ingest read <TABLE> [--limit N] [--db PATH]

Options:
  --output-size   compact = latest 100 observations, full = entire history
  --if-exists     what to do when the table already exists
  --limit         return only the N most recent rows
  --db            DuckDB file (defaults to the configured path)
  --config        TOML config file (defaults to ./equity.toml)

Environment:
  The API key is read from the variable named by api.api_key_env
  (default: alpha_vantage). A .env file in the working directory is honored.";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fetch {
        ticker: String,
        output_size: Option<OutputSize>,
        if_exists: Option<IfExists>,
    },
    Read {
        table: String,
        limit: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub command: Command,
    pub db_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

/// Parse arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<Args, String> {
    let (command, rest) = args.split_first().ok_or("missing command")?;
    let (target, options) = rest
        .split_first()
        .ok_or_else(|| format!("'{command}' needs a ticker or table name"))?;

    let mut output_size = None;
    let mut if_exists = None;
    let mut limit = None;
    let mut db_path = None;
    let mut config_path = None;

    let mut i = 0;
    while i < options.len() {
        let flag = options[i].as_str();
        let value = options
            .get(i + 1)
            .ok_or_else(|| format!("{flag} needs a value"))?;
        match flag {
            "--output-size" => output_size = Some(value.parse::<OutputSize>()?),
            "--if-exists" => if_exists = Some(value.parse::<IfExists>()?),
            "--limit" => {
                let n = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid limit '{value}'"))?;
                if n == 0 {
                    return Err("--limit must be a positive integer".into());
                }
                limit = Some(n);
            }
            "--db" => db_path = Some(PathBuf::from(value)),
            "--config" => config_path = Some(PathBuf::from(value)),
            other => return Err(format!("unknown option '{other}'")),
        }
        i += 2;
    }

    let command = match command.as_str() {
        "fetch" => {
            if limit.is_some() {
                return Err("--limit only applies to 'read'".into());
            }
            Command::Fetch {
                ticker: target.clone(),
                output_size,
                if_exists,
            }
        }
        "read" => {
            if output_size.is_some() || if_exists.is_some() {
                return Err("--output-size and --if-exists only apply to 'fetch'".into());
            }
            Command::Read {
                table: target.clone(),
                limit,
            }
        }
        other => return Err(format!("unknown command '{other}'")),
    };

    Ok(Args {
        command,
        db_path,
        config_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_fetch_defaults() {
        let parsed = parse_args(&args("fetch IBM")).unwrap();
        assert_eq!(
            parsed.command,
            Command::Fetch {
                ticker: "IBM".into(),
                output_size: None,
                if_exists: None
            }
        );
        assert!(parsed.db_path.is_none());
    }

    #[test]
    fn test_fetch_with_options() {
        let parsed =
            parse_args(&args("fetch IBM --output-size compact --if-exists replace --db x.duckdb"))
                .unwrap();
        assert_eq!(
            parsed.command,
            Command::Fetch {
                ticker: "IBM".into(),
                output_size: Some(OutputSize::Compact),
                if_exists: Some(IfExists::Replace)
            }
        );
        assert_eq!(parsed.db_path, Some(PathBuf::from("x.duckdb")));
    }

    #[test]
    fn test_read_with_limit() {
        let parsed = parse_args(&args("read IBM --limit 30 --config a.toml")).unwrap();
        assert_eq!(
            parsed.command,
            Command::Read {
                table: "IBM".into(),
                limit: Some(30)
            }
        );
        assert_eq!(parsed.config_path, Some(PathBuf::from("a.toml")));
    }

    #[test]
    fn test_errors() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&args("fetch")).is_err());
        assert!(parse_args(&args("delete IBM")).is_err());
        assert!(parse_args(&args("read IBM --limit 0")).is_err());
        assert!(parse_args(&args("read IBM --limit")).is_err());
        assert!(parse_args(&args("fetch IBM --limit 3")).is_err());
        assert!(parse_args(&args("read IBM --if-exists append")).is_err());
        assert!(parse_args(&args("fetch IBM --output-size weekly")).is_err());
    }
}
