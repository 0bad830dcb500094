use anyhow::Context;
use arpa_core::{Domain, PageState};
use arpa_engine::config::{ArpaConfig, ConfigLoader};
use arpa_engine::store::{FileStore, Store};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

#[derive(Parser)]
#[command(name = "arpa", version, about = "Inspect and probe an ArPa action store")]
struct Args {
    /// Path to the store file (defaults to ~/.arpa/store.json)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Path to a config file (defaults to ./arpa.yaml, then ~/.arpa/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List hostnames present in the store
    Domains,
    /// Show recorded contexts and their action rankings for a hostname
    Show {
        hostname: String,
        /// Mark the context this URL maps to under the configured sensors
        #[arg(long)]
        url: Option<String>,
    },
    /// Print the context key a URL derives under the configured sensors
    Key { url: String },
    /// Reset a hostname to an empty domain
    Clear { hostname: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to stderr so stdout stays clean for command output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConfigLoader::load_from(path)
            .await
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ConfigLoader::load_default().await?,
    };
    let store = FileStore::new(args.store.unwrap_or_else(FileStore::default_path));

    match args.command {
        Command::Domains => {
            let mut keys = store.keys().await?;
            keys.sort();
            for key in keys {
                println!("{key}");
            }
        }
        Command::Show { hostname, url } => show(&store, &config, &hostname, url.as_deref()).await?,
        Command::Key { url } => {
            let page = parse_page(&url)?;
            println!("{}", Domain::context_key(&page, &config.sensors));
        }
        Command::Clear { hostname } => {
            let blob = serde_json::to_value(Domain::new(&hostname))?;
            store.set(&hostname, blob).await?;
            println!("Cleared {hostname}");
        }
    }

    Ok(())
}

async fn show(
    store: &FileStore,
    config: &ArpaConfig,
    hostname: &str,
    url: Option<&str>,
) -> anyhow::Result<()> {
    let Some(domain) = load_domain(store, hostname).await? else {
        println!("No data recorded for {hostname}");
        return Ok(());
    };

    let current_key = match url {
        Some(u) => Some(Domain::context_key(&parse_page(u)?, &config.sensors)),
        None => None,
    };

    let mut keys: Vec<&String> = domain.contexts.keys().collect();
    keys.sort();

    for key in keys {
        let marker = if current_key.as_deref() == Some(key) {
            " <- current URL"
        } else {
            ""
        };
        println!("context {key}{marker}");

        let context = &domain.contexts[key];
        for ranked in context.actions() {
            let steps: Vec<String> = ranked
                .action
                .path
                .iter()
                .map(|n| format!("{}[{}]", n.tag, n.index))
                .collect();
            println!(
                "  {:>5}x  {}  {}",
                ranked.count,
                ranked.action.hash,
                steps.join(" > ")
            );
        }
    }

    Ok(())
}

async fn load_domain(store: &FileStore, hostname: &str) -> anyhow::Result<Option<Domain>> {
    let Some(blob) = store.get(hostname).await? else {
        return Ok(None);
    };
    // Unreadable blobs are reported as absent, same as the engine does.
    Ok(serde_json::from_value(blob).ok())
}

fn parse_page(url: &str) -> anyhow::Result<PageState> {
    let parsed = Url::parse(url).with_context(|| format!("invalid URL: {url}"))?;
    Ok(PageState::from_url(&parsed))
}
