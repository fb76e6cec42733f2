use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use apply_tracker::config::load_config;
use apply_tracker::logging;
use apply_tracker::sheets::{EnvToken, GoogleSheetsClient, SheetAppender};
use apply_tracker::{scrape, HtmlDocument, SiteMap};

/// Scrape a saved job page and optionally append it to a spreadsheet
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct CliOptions {
    /// URL the page was saved from
    #[arg(short, long)]
    url: String,

    /// Saved HTML of the page
    #[arg(long)]
    html: PathBuf,

    /// Optional path to config file (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append the record to this spreadsheet as well as printing it
    #[arg(long)]
    sheet_id: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init_logging();
    let opts = CliOptions::parse();

    let config = match load_config(opts.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let html = match std::fs::read_to_string(&opts.html) {
        Ok(html) => html,
        Err(e) => {
            error!("failed to read {}: {e}", opts.html.display());
            return ExitCode::FAILURE;
        }
    };

    let sites = SiteMap::new(config.match_mode);
    let record = scrape(&opts.url, &HtmlDocument::parse(&html), &sites);

    match serde_json::to_string_pretty(&record) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!("failed to serialize record: {e}");
            return ExitCode::FAILURE;
        }
    }

    if let Some(sheet_id) = opts.sheet_id {
        let tokens = EnvToken {
            var: config.sheets.token_env.clone(),
        };
        let client = GoogleSheetsClient::new(config.sheets, tokens);
        if let Err(e) = client.append(&sheet_id, &record).await {
            error!("append failed: {e}");
            return ExitCode::FAILURE;
        }
        info!(sheet_id = sheet_id.as_str(), "record appended");
    }

    ExitCode::SUCCESS
}
