use gatecheck_common::config::Config;
use gatecheck_common::outcome::CheckReport;
use gatecheck_core::{checks, session};

use crate::terminal::{print, spinner};

pub async fn all(cfg: &Config) -> anyhow::Result<Vec<CheckReport>> {
    print::header("gateway checks", cfg.quiet);

    let _spinner = spinner::start("Running gateway checks...".to_string(), cfg.quiet);
    checks::run_checks(cfg, session::connector()).await
}
