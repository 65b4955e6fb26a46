//! WDD CLI - Command line tool for the water dashboard dataset.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "wdd-cli",
    version,
    about = "Reservoir, rainfall and groundwater dashboard pages"
)]
struct Cli {
    #[command(flatten)]
    options: wdd_cmd::Options,

    #[command(subcommand)]
    command: wdd_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Using data file {}", cli.options.data.display());
    wdd_cmd::run(&cli.options, cli.command)
}
