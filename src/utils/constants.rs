/// Defaults shared by the CLI, the dashboard and the mock server

use std::time::Duration;

pub const APP_NAME: &str = "cluster-dash";

/// Samples kept in the live chart
pub const DEFAULT_CAPACITY: usize = 20;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000";

/// Range of the mock `close` value, `[MIN, MAX)`
pub const MOCK_CLOSE_MIN: f64 = 100.0;
pub const MOCK_CLOSE_MAX: f64 = 500.0;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOG_FILE_NAME: &str = "cluster-dash.log";

/// Format used for chart axis labels and the time tooltip
pub const CLOCK_FORMAT: &str = "%H:%M:%S";
