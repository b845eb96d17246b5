use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use mediasearch_suggest::config::{self, CompletionScope, Config};
use mediasearch_suggest::{LookupCoordinator, LookupOutcome, LookupSettings, WbSearchClient};

/// Autocomplete suggestions from a Wikibase entity search
///
/// Each input is treated as the next state of a search box: it cancels the
/// lookup still running for the previous one. Every committed suggestion
/// list is printed one suggestion per line, followed by a blank line.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Inputs in typing order; lines are read from stdin when none are given
    inputs: Vec<String>,

    /// Config file (defaults to ~/.config/mediasearch-suggest/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// UI language sent to the search backend
    #[arg(long)]
    language: Option<String>,

    /// Maximum number of suggestions
    #[arg(long)]
    limit: Option<usize>,

    /// Entity search API endpoint
    #[arg(long)]
    api_url: Option<String>,

    /// Suggest the typed phrase with its last word completed
    #[arg(long)]
    phrase: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

type LookupCoordinatorHandle = Arc<LookupCoordinator<WbSearchClient>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;
    env_logger::init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let coordinator = Arc::new(LookupCoordinator::new(
        WbSearchClient::from_config(&config)?,
        LookupSettings::from_config(&config),
    ));
    log::debug!(
        "Searching {} in language {:?}",
        coordinator.backend().api_url(),
        coordinator.settings().language
    );
    let printer = tokio::spawn(print_results(coordinator.subscribe()));

    let mut lookups = Vec::new();
    if cli.inputs.is_empty() {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            lookups.push(spawn_lookup(&coordinator, line));
        }
    } else {
        for input in cli.inputs {
            lookups.push(spawn_lookup(&coordinator, input));
        }
    }

    for lookup in lookups {
        lookup.await?;
    }

    // Closing the results channel stops the printer
    drop(coordinator);
    printer.await?;

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    }
    .wrap_err("Failed to load configuration")?;

    if let Some(language) = &cli.language {
        config.backend.language = language.clone();
    }
    if let Some(limit) = cli.limit {
        if limit == 0 {
            bail!("--limit must be at least 1");
        }
        config.lookup.results_limit = limit;
    }
    if let Some(api_url) = &cli.api_url {
        config.backend.external_search_base_uri = Some(api_url.clone());
    }
    if cli.phrase {
        config.lookup.completion = CompletionScope::Phrase;
    }

    Ok(config)
}

fn spawn_lookup(coordinator: &LookupCoordinatorHandle, input: String) -> JoinHandle<()> {
    let coordinator = coordinator.clone();
    tokio::spawn(async move {
        match coordinator.get_lookup_results(&input).await {
            Ok(LookupOutcome::Updated(_)) => {}
            Ok(LookupOutcome::Superseded) => log::debug!("Lookup for {:?} superseded", input),
            Err(e) => eprintln!("Lookup for {:?} failed: {}", input, e),
        }
    })
}

async fn print_results(mut results: watch::Receiver<Vec<String>>) {
    while results.changed().await.is_ok() {
        let suggestions = results.borrow_and_update().clone();
        for suggestion in &suggestions {
            println!("{}", suggestion);
        }
        println!();
    }
}
