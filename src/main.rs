mod cli;

use lexicon::{config, server};
use lexicon_playback::Catalog;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting Lexicon server");
    tracing::info!("Indexing media under {:?}", config.media.root);

    let catalog = build_catalog(&config).await?;
    server::start_server(config, catalog).await
}

async fn build_catalog(config: &config::Config) -> Result<Catalog> {
    let root = config.media.root.clone();
    let extensions = config.media.extensions.clone();
    let catalog = tokio::task::spawn_blocking(move || Catalog::scan(&root, &extensions)).await?;
    Ok(catalog)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "lexicon=trace,lexicon_playback=trace,tower_http=debug".to_string()
        } else {
            "lexicon=debug,lexicon_playback=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Scan => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(scan(cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("lexicon {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn scan(config_path: Option<&std::path::Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let catalog = build_catalog(&config).await?;

    println!("Media root: {:?}", config.media.root);
    println!("Files: {}\n", catalog.len());

    for record in catalog.records() {
        let size = match tokio::fs::metadata(&record.path).await {
            Ok(m) => m.len().to_string(),
            Err(_) => "?".to_string(),
        };
        println!(
            "{}  {}  {}  {}",
            record.name,
            size,
            record.content_type,
            record.path.display()
        );
    }

    Ok(())
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Media root: {:?}", config.media.root);
            println!("  Extensions: {}", config.media.extensions.join(", "));
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Media root: {:?}", config.media.root);
        }
    }

    Ok(())
}
