use gatecheck_common::config::Config;
use gatecheck_common::outcome::CheckReport;
use gatecheck_core::checks;

use crate::terminal::print;

pub async fn ports(cfg: &Config) -> anyhow::Result<CheckReport> {
    print::header("gateway ports", cfg.quiet);
    print::print_status(format!(
        "Checking {} (paper {}, live {})",
        cfg.host, cfg.paper_port, cfg.live_port
    ));

    checks::run_port_check(cfg).await
}
