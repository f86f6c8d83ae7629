use clap::Parser;

use stockledger_cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = stockledger_cli::resolve_config(&cli)?;
    stockledger_observability::init(&config.logging);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    stockledger_cli::run(&cli, &config, &mut out)
}
