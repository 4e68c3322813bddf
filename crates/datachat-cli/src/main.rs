// DataChat CLI entry point

use clap::Parser;
use datachat_cli::{logging, router::Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);
    cli.run()
}
