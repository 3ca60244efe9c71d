mod commands;
mod terminal;

use std::process::ExitCode;
use std::time::Instant;

use commands::{CommandLine, Commands, all, api, ports};
use gatecheck_common::config::Config;
use gatecheck_common::outcome::{self, CheckReport};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg: Config = commands.to_config();
    cfg.validate()?;

    print::banner(cfg.no_banner, cfg.quiet);

    let start_time: Instant = Instant::now();
    let reports: Vec<CheckReport> = match commands.command.unwrap_or(Commands::All) {
        Commands::All => all::all(&cfg).await?,
        Commands::Ports => vec![ports::ports(&cfg).await?],
        Commands::Api => vec![api::api(&cfg).await?],
    };

    print::results(&reports, start_time.elapsed(), cfg.quiet);

    if outcome::all_passed(&reports) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
