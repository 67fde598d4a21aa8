use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args as ClapArgs, Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tokio::io::{AsyncBufReadExt, BufReader};

use vertical_search::config::{self, Config};
use vertical_search::{
    DebouncedFetchCache, SITE_VERTICALS_REQUEST_ID, SearchInputController, Suggestion,
    VerticalsClient, validate_site_vertical,
};

/// Site vertical suggestion search
#[derive(Debug, Parser)]
#[command(name = "vertical-search", version, about)]
struct Cli {
    /// Config file (defaults to ~/.config/vertical-search/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read the search box text from stdin, one line per change, and print each selection
    Search(SearchArgs),
    /// Validate a persisted site vertical record
    Validate {
        /// The record as JSON, e.g. '{"name":"Travel","slug":"travel","isUserInput":false}'
        json: String,
    },
}

#[derive(Debug, Default, ClapArgs)]
struct SearchArgs {
    /// Base URL of the verticals API
    #[arg(long)]
    base_url: Option<String>,

    /// Characters needed before a lookup is made
    #[arg(long)]
    min_chars: Option<usize>,

    /// Quiet window before a lookup fires, in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Maximum number of verticals per lookup
    #[arg(long)]
    limit: Option<u32>,
}

impl SearchArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(min_chars) = self.min_chars {
            config.search.min_chars_to_search = min_chars;
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.search.debounce_ms = debounce_ms;
        }
        if let Some(limit) = self.limit {
            config.api.limit = limit;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;
    init_logging();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };
    if let Some(warning) = &loaded.warning {
        log::warn!("{}", warning);
    }

    match cli.command {
        Some(Command::Validate { json }) => validate(&json),
        Some(Command::Search(args)) => run_search(loaded.config, &args).await,
        None => run_search(loaded.config, &SearchArgs::default()).await,
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn validate(json: &str) -> Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(json).wrap_err("Site vertical is not valid JSON")?;
    let vertical = validate_site_vertical(&value)?;
    println!("{}", serde_json::to_string(&vertical)?);
    Ok(())
}

async fn run_search(mut config: Config, args: &SearchArgs) -> Result<()> {
    args.apply(&mut config);

    let client = VerticalsClient::from_config(&config.api)?;
    let cache = Arc::new(DebouncedFetchCache::new(client, config.search.quiet_window())?);
    let mut controller = SearchInputController::from_config(Arc::clone(&cache), &config.search)
        .with_on_change(print_selection);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        controller.on_text_changed(&line);
    }

    cache.settled(SITE_VERTICALS_REQUEST_ID).await;
    let entry = cache.read(SITE_VERTICALS_REQUEST_ID);
    if let Some(error) = &entry.error {
        log::warn!("Last lookup failed: {}", error);
    }

    let summary = serde_json::json!({
        "state": entry.state.as_str(),
        "suggestions": entry.data.unwrap_or_default(),
    });
    println!("{}", summary);
    Ok(())
}

fn print_selection(selection: &Suggestion) {
    match serde_json::to_string(selection) {
        Ok(json) => println!("{}", json),
        Err(e) => log::warn!("Failed to serialize selection: {}", e),
    }
}
