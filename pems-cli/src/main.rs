//! QPeMS CLI - query PeMS station flow profiles from the command line.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "pems-cli",
    version,
    about = "Quick PeMS traffic flow toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: pems_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    pems_cmd::run(cli.command)
}
