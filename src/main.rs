use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;
use std::path::{Path, PathBuf};

use cluster_dash::app::App;
use cluster_dash::cli::{get_version, Cli, Commands, ConfigCommands, DashboardArgs, EndpointArgs};
use cluster_dash::core::{HttpSampleSource, NodeClient, SampleSource};
use cluster_dash::utils::{format_age, format_clock, format_price, logging, AppConfig, LOG_FILE_NAME};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config;

    match cli.command {
        None => {
            // No command - run interactive TUI
            let config = load_config(config_path.as_deref())?;
            handle_dashboard(config, DashboardArgs::default()).await?;
        }
        Some(Commands::Dashboard(args)) => {
            let config = load_config(config_path.as_deref())?;
            handle_dashboard(config, args).await?;
        }
        #[cfg(feature = "server")]
        Some(Commands::Serve { port, host, cors }) => {
            logging::init_stderr();
            let mut config = load_config(config_path.as_deref())?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            cluster_dash::server::run(&config.bind_address(), cors).await?;
        }
        Some(Commands::Nodes { endpoint }) => {
            logging::init_stderr();
            let mut config = load_config(config_path.as_deref())?;
            handle_nodes(&mut config, &endpoint).await?;
        }
        Some(Commands::Sample { endpoint }) => {
            logging::init_stderr();
            let mut config = load_config(config_path.as_deref())?;
            handle_sample(&mut config, &endpoint).await?;
        }
        Some(Commands::Config { command }) => {
            handle_config(config_path, command)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

async fn handle_dashboard(mut config: AppConfig, args: DashboardArgs) -> Result<()> {
    args.apply(&mut config);

    let log_path = match args.log_file {
        Some(ref path) => path.clone(),
        None => AppConfig::config_dir()?.join(LOG_FILE_NAME),
    };
    logging::init_file(&log_path)?;

    #[cfg(feature = "server")]
    let _mock = if args.with_mock {
        let (endpoint, handle) = cluster_dash::server::spawn_local().await?;
        config.endpoint = endpoint;
        Some(MockGuard(handle))
    } else {
        None
    };

    tracing::info!(endpoint = %config.endpoint, version = get_version(), "starting dashboard");
    let mut app = App::new(config)?;
    app.run().await
}

/// Stops the in-process mock API when the dashboard exits
#[cfg(feature = "server")]
struct MockGuard(tokio::task::JoinHandle<()>);

#[cfg(feature = "server")]
impl Drop for MockGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn handle_nodes(config: &mut AppConfig, endpoint: &EndpointArgs) -> Result<()> {
    endpoint.apply(config);
    config.validate()?;

    let client = NodeClient::new(&config.endpoint, config.request_timeout)?;
    let nodes = client.fetch_nodes().await?;

    println!("Cluster nodes ({})\n", config.endpoint);
    println!("{:<8} {:<18} {:<10} {:<10}", "ID", "IP address", "Cluster", "Stage");
    println!("{}", "-".repeat(48));

    for node in &nodes {
        println!(
            "{:<8} {:<18} {:<10} {:<10}",
            node.id, node.ip_address, node.cluster_id, node.stage
        );
    }

    println!("\n{} nodes", nodes.len());
    Ok(())
}

async fn handle_sample(config: &mut AppConfig, endpoint: &EndpointArgs) -> Result<()> {
    endpoint.apply(config);
    config.validate()?;

    let source = HttpSampleSource::new(&config.endpoint, config.request_timeout)?;
    let sample = source.fetch().await?;

    let value = match sample.value {
        Some(v) => format_price(v),
        None => "-".to_string(),
    };
    println!(
        "{}  {}  ({})",
        format_clock(sample.timestamp),
        value,
        format_age(sample.timestamp, Utc::now())
    );
    Ok(())
}

fn handle_config(path: Option<PathBuf>, command: ConfigCommands) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => AppConfig::config_path()?,
    };

    match command {
        ConfigCommands::Show => {
            let config = AppConfig::load_from(&path)?;
            println!("# {}", path.display());
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            AppConfig::default().save_to(&path)?;
            println!("✓ Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}
