//! `waitlist` — admin command line for the waitlist server.
//!
//! # Usage
//!
//! ```
//! waitlist --url http://localhost:3000 list
//! waitlist export --out entries.csv
//! waitlist join --name "Ada Lovelace" --country UK --email ada@example.com
//! ```

mod client;
mod table;

use std::{
  io::Write as _,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use client::ApiClient;
use serde::Deserialize;
use waitlist_core::export;

const DEFAULT_URL: &str = "http://localhost:3000";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "waitlist", about = "Inspect and export waitlist signups")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the waitlist server (default: http://localhost:3000).
  #[arg(long, env = "WAITLIST_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print all entries as a table, newest first.
  List,
  /// Write all entries as CSV.
  Export {
    /// Output file; `-` for stdout. Defaults to `waitlist_entries_<date>.csv`.
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,
  },
  /// Submit a new entry.
  Join {
    #[arg(long)]
    name:    String,
    #[arg(long)]
    country: String,
    #[arg(long)]
    email:   String,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string());

  let client = ApiClient::new(base_url)?;

  match args.command {
    Command::List => {
      let entries = client.list().await?;
      print!("{}", table::render(&entries));
    }
    Command::Export { out } => {
      let entries = client.list().await?;
      let csv = export::to_csv(&entries);
      let out = out.unwrap_or_else(|| PathBuf::from(export::csv_filename(Utc::now().date_naive())));
      write_export(&out, &csv)?;
      if out != Path::new("-") {
        eprintln!("wrote {} entries to {}", entries.len(), out.display());
      }
    }
    Command::Join { name, country, email } => {
      let id = client.join(&name, &country, &email).await?;
      println!("added to waitlist with id {id}");
    }
  }

  Ok(())
}

fn write_export(out: &Path, csv: &str) -> Result<()> {
  if out == Path::new("-") {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{csv}").context("writing CSV to stdout")?;
    return Ok(());
  }
  std::fs::write(out, csv).with_context(|| format!("writing {}", out.display()))
}
