use colored::*;
use gatecheck_common::config::Config;
use gatecheck_common::outcome::CheckReport;
use gatecheck_core::{checks, session};

use crate::terminal::{print, spinner};

pub async fn api(cfg: &Config) -> anyhow::Result<CheckReport> {
    print::header("api connection", cfg.quiet);

    let endpoint = cfg.api_endpoint()?;
    print::print_status(format!("Connecting to {} as client {}", endpoint, cfg.client_id));

    let _spinner = spinner::start(
        format!(
            "Waiting up to {} for an acknowledgment...",
            format!("{:.1}s", cfg.api_timeout.as_secs_f64()).yellow().bold()
        ),
        cfg.quiet,
    );
    checks::run_api_check(cfg, session::connector()).await
}
