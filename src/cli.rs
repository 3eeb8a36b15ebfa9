// Command-line arguments. The default endpoint lives here, at the edge;
// the library itself only ever sees an explicit `ClientConfig`.

use crate::config::ClientConfig;
use crate::error::ConfigError;
use clap::Parser;
use std::time::Duration;

/// Interactive client for the department / payroll service.
#[derive(Parser, Debug)]
#[command(name = "sgrh-cli", version, about = "Manage employees and payroll of a remote department service")]
pub struct Cli {
    /// Base URL of the backend
    #[arg(long, env = "SGRH_API_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, env = "SGRH_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let timeout = (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs));
        Ok(ClientConfig::new(&self.base_url)?.with_timeout(timeout))
    }
}
