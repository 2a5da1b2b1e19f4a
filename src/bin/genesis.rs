use genesis_lpp::cli::{parse_cli, Cli};
use genesis_lpp::mode::{run, Outcome};
use genesis_lpp::request::{Dispatcher, HttpTransport};
use genesis_lpp::Result;

fn genesis(cli: Cli) -> Result<()> {
    // options are parsed before the client exists, a malformed one never reaches the network
    let mode = cli.invocation.mode()?;
    let dispatcher = Dispatcher::new(&cli.config, HttpTransport::new()?);
    if let Outcome::Table(saved) = run(mode, &cli.config, &dispatcher)? {
        println!(
            "saved {} rows to {}",
            saved.table.n_rows(),
            saved.xlsx.display()
        );
    }
    Ok(())
}

fn main() {
    let result = parse_cli().and_then(|cli| {
        genesis_lpp::log::init(cli.verbose);
        genesis(cli)
    });
    if let Err(e) = result {
        genesis_lpp::log::init(false);
        tracing::error!("{}", e);
        std::process::exit(e.exit_code());
    }
}
