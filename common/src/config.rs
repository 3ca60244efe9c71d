use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::endpoint::{Endpoint, EndpointError};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const PAPER_PORT: u16 = 7497;
pub const LIVE_PORT: u16 = 7496;
pub const DEFAULT_CLIENT_ID: i32 = 999;
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_PORT_TIMEOUT: Duration = Duration::from_secs(2);

/// Which gateway flavour a port belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GatewayMode {
    #[default]
    Paper,
    Live,
}

impl fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayMode::Paper => write!(f, "paper"),
            GatewayMode::Live => write!(f, "live"),
        }
    }
}

impl FromStr for GatewayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "paper" => Ok(GatewayMode::Paper),
            "live" => Ok(GatewayMode::Live),
            other => Err(format!("unknown gateway mode: {other}")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Host the gateway listens on.
    pub host: String,
    pub paper_port: u16,
    pub live_port: u16,
    /// Session identifier sent in the API handshake.
    ///
    /// The gateway rejects a second session with the same id, so pick one
    /// that no trading client uses.
    pub client_id: i32,
    /// Deadline for the API acknowledgment.
    pub api_timeout: Duration,
    /// Deadline for each plain port connect.
    pub port_timeout: Duration,
    /// Which port the API probe targets.
    pub mode: GatewayMode,
    /// 0 = full output, 1 = no headers, 2 = results only.
    pub quiet: u8,
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            paper_port: PAPER_PORT,
            live_port: LIVE_PORT,
            client_id: DEFAULT_CLIENT_ID,
            api_timeout: DEFAULT_API_TIMEOUT,
            port_timeout: DEFAULT_PORT_TIMEOUT,
            mode: GatewayMode::Paper,
            quiet: 0,
            no_banner: false,
        }
    }
}

impl Config {
    pub fn port_for(&self, mode: GatewayMode) -> u16 {
        match mode {
            GatewayMode::Paper => self.paper_port,
            GatewayMode::Live => self.live_port,
        }
    }

    pub fn endpoint(&self, mode: GatewayMode) -> Result<Endpoint, EndpointError> {
        Endpoint::new(self.host.clone(), self.port_for(mode))
    }

    /// Endpoint the API probe connects to.
    pub fn api_endpoint(&self) -> Result<Endpoint, EndpointError> {
        self.endpoint(self.mode)
    }

    /// Rejects settings the prober cannot honour.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_timeout.is_zero() {
            anyhow::bail!("API timeout must be positive");
        }
        if self.port_timeout.is_zero() {
            anyhow::bail!("port timeout must be positive");
        }
        self.endpoint(GatewayMode::Paper)?;
        self.endpoint(GatewayMode::Live)?;
        Ok(())
    }
}
