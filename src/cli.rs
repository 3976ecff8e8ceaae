/// CLI argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::{parse_duration, AppConfig};

// Build timestamp injected at compile time
pub const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP");
pub const VERSION_WITH_BUILD: &str = concat!(env!("CARGO_PKG_VERSION"), " (built: ", env!("BUILD_TIMESTAMP"), ")");

pub fn get_version() -> &'static str {
    VERSION_WITH_BUILD
}

#[derive(Debug, Parser)]
#[command(name = "cluster-dash")]
#[command(author, version = VERSION_WITH_BUILD, about, long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/cluster-dash/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive dashboard (default)
    Dashboard(DashboardArgs),

    /// Run the mock metrics API server
    #[cfg(feature = "server")]
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Enable CORS for cross-origin requests
        #[arg(long)]
        cors: bool,
    },

    /// Print the cluster node table
    Nodes {
        #[command(flatten)]
        endpoint: EndpointArgs,
    },

    /// Fetch and print a single sample
    Sample {
        #[command(flatten)]
        endpoint: EndpointArgs,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Args, Default)]
pub struct EndpointArgs {
    /// Base URL of the metrics API
    #[arg(short, long)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Args, Default)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub endpoint: EndpointArgs,

    /// Number of samples kept in the chart
    #[arg(short, long)]
    pub capacity: Option<usize>,

    /// Time between sample fetches (e.g. 1s, 500ms)
    #[arg(short, long, value_parser = parse_duration)]
    pub interval: Option<Duration>,

    /// Show a tooltip for zero-valued samples
    #[arg(long)]
    pub show_zero: bool,

    /// Start the mock API in-process and poll it
    #[cfg(feature = "server")]
    #[arg(long)]
    pub with_mock: bool,

    /// Log file (default: <config dir>/cluster-dash/cluster-dash.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

impl EndpointArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(ref endpoint) = self.endpoint {
            config.endpoint = endpoint.clone();
        }
    }
}

impl DashboardArgs {
    /// Fold command-line overrides into the loaded config
    pub fn apply(&self, config: &mut AppConfig) {
        self.endpoint.apply(config);
        if let Some(capacity) = self.capacity {
            config.capacity = capacity;
        }
        if let Some(interval) = self.interval {
            config.poll_interval = interval;
        }
        if self.show_zero {
            config.show_zero_values = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_dashboard() {
        let cli = Cli::try_parse_from(["cluster-dash"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_dashboard_overrides() {
        let cli = Cli::try_parse_from([
            "cluster-dash",
            "dashboard",
            "--endpoint",
            "http://10.0.0.5:3000",
            "--capacity",
            "50",
            "--interval",
            "250ms",
            "--show-zero",
        ])
        .unwrap();

        let Some(Commands::Dashboard(args)) = cli.command else {
            panic!("expected dashboard command");
        };

        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.endpoint, "http://10.0.0.5:3000");
        assert_eq!(config.capacity, 50);
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert!(config.show_zero_values);
    }

    #[test]
    fn test_bad_interval_rejected() {
        let result = Cli::try_parse_from(["cluster-dash", "dashboard", "--interval", "0s"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_version_carries_build_time() {
        assert!(get_version().starts_with(env!("CARGO_PKG_VERSION")));
        assert!(get_version().contains(BUILD_TIMESTAMP));
    }
}
