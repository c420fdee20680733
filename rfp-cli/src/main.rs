//! RFP CLI - builds the data files behind the wealth timeline site.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "rfp-cli",
    version,
    about = "Billionaire wealth timeline data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: rfp_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    rfp_cmd::run(cli.command)
}
