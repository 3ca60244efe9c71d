//! # Probe Endpoint
//!
//! A `host:port` pair the prober connects to. Ports are validated up front so
//! the network layer never sees port `0`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EndpointError {
    #[error("host must not be empty")]
    EmptyHost,

    #[error("unbalanced brackets in host '{0}'")]
    UnbalancedBrackets(String),

    #[error("port must be in 1-65535, got {0}")]
    PortOutOfRange(String),

    #[error("expected HOST:PORT, got '{0}'")]
    MissingPort(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, EndpointError> {
        let host: String = host.into();
        let host: &str = host.trim();
        let host: &str = host
            .strip_prefix('[')
            .and_then(|inner| inner.strip_suffix(']'))
            .unwrap_or(host);
        if host.is_empty() {
            return Err(EndpointError::EmptyHost);
        }
        if host.contains(['[', ']']) {
            return Err(EndpointError::UnbalancedBrackets(host.to_string()));
        }
        if port == 0 {
            return Err(EndpointError::PortOutOfRange(port.to_string()));
        }
        Ok(Self { host: host.to_string(), port })
    }

    /// Loopback endpoint, the usual home of a locally running gateway.
    pub fn loopback(port: u16) -> Result<Self, EndpointError> {
        Self::new("127.0.0.1", port)
    }

    /// Address string accepted by `TcpStream::connect`.
    pub fn address(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    /// Parses `host:port`, `[v6]:port`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| EndpointError::MissingPort(s.to_string()))?;

        let port: u16 = port
            .parse()
            .map_err(|_| EndpointError::PortOutOfRange(port.to_string()))?;

        Endpoint::new(host, port)
    }
}
