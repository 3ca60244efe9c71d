pub mod all;
pub mod api;
pub mod ports;

use std::time::Duration;

use clap::{Parser, Subcommand};
use gatecheck_common::config::{self, Config, GatewayMode};

#[derive(Parser)]
#[command(name = "gatecheck")]
#[command(version)]
#[command(about = "Smoke checks for a locally running trading gateway.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Host the gateway listens on
    #[arg(long, global = true, default_value = config::DEFAULT_HOST)]
    pub host: String,

    /// Paper trading API port
    #[arg(long, global = true, default_value_t = config::PAPER_PORT,
          value_parser = clap::value_parser!(u16).range(1..))]
    pub paper_port: u16,

    /// Live trading API port
    #[arg(long, global = true, default_value_t = config::LIVE_PORT,
          value_parser = clap::value_parser!(u16).range(1..))]
    pub live_port: u16,

    /// Client id used for the API session
    #[arg(long, global = true, default_value_t = config::DEFAULT_CLIENT_ID)]
    pub client_id: i32,

    /// Seconds to wait for the API acknowledgment
    #[arg(long, global = true, default_value = "5", value_parser = parse_seconds)]
    pub timeout: Duration,

    /// Seconds to wait for each port connect
    #[arg(long, global = true, default_value = "2", value_parser = parse_seconds)]
    pub port_timeout: Duration,

    /// Which gateway port the API check connects to (paper, live)
    #[arg(long, global = true, default_value = "paper")]
    pub mode: GatewayMode,

    /// Less output. Repeat for results only
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand, Clone, Copy)]
pub enum Commands {
    /// Run every check (default)
    #[command(alias = "a")]
    All,
    /// Check whether the paper or live port accepts connections
    #[command(alias = "p")]
    Ports,
    /// Open an API session and wait for the gateway to acknowledge it
    #[command(alias = "c")]
    Api,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            host: self.host.clone(),
            paper_port: self.paper_port,
            live_port: self.live_port,
            client_id: self.client_id,
            api_timeout: self.timeout,
            port_timeout: self.port_timeout,
            mode: self.mode,
            quiet: self.quiet,
            no_banner: self.no_banner,
        }
    }
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|_| format!("'{s}' is not a number of seconds"))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("timeout must be positive, got {s}"));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_paper_gateway() {
        let cli = CommandLine::try_parse_from(["gatecheck"]).unwrap();
        let cfg = cli.to_config();
        assert!(cli.command.is_none());
        assert_eq!(cfg.paper_port, 7497);
        assert_eq!(cfg.live_port, 7496);
        assert_eq!(cfg.client_id, 999);
        assert_eq!(cfg.api_timeout, Duration::from_secs(5));
        assert_eq!(cfg.port_timeout, Duration::from_secs(2));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = CommandLine::try_parse_from(["gatecheck", "api", "--mode", "live", "--timeout", "0.5", "-qq"])
            .unwrap();
        assert!(matches!(cli.command, Some(Commands::Api)));
        assert_eq!(cli.mode, GatewayMode::Live);
        assert_eq!(cli.timeout, Duration::from_millis(500));
        assert_eq!(cli.quiet, 2);
    }

    #[test]
    fn rejects_zero_timeout_and_port() {
        assert!(CommandLine::try_parse_from(["gatecheck", "--timeout", "0"]).is_err());
        assert!(CommandLine::try_parse_from(["gatecheck", "--paper-port", "0"]).is_err());
    }

    #[test]
    fn rejects_timeout_too_large_for_duration() {
        assert!(CommandLine::try_parse_from(["gatecheck", "--timeout", "1e20"]).is_err());
        assert!(CommandLine::try_parse_from(["gatecheck", "--port-timeout", "1e300"]).is_err());
        assert!(parse_seconds("1e20").is_err());
    }
}
