use anyhow::Context;
use clap::Parser;
use hearth::Hearth;
use hearth::domain::config::AppConfig;
use hearth::kernel::config::load_config;
use hearth_cli::{Cli, init_logger, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg: AppConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;

    let _log = init_logger(&cfg.logging, cli.log_level.as_deref())?;

    let hearth = Hearth::open(cfg).context("Failed to open the data directory")?;

    let mut stdout = std::io::stdout().lock();
    run(&hearth, cli.command, &mut stdout).await
}
