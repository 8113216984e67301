use std::fs::File;
use std::io;
use std::process::ExitCode;

use simplelog::{Config, LevelFilter, WriteLogger};
use storefront_admin::cli;
use storefront_admin::{AdminConfig, Error, paths};

fn init_logging() {
    if let Err(e) = paths::rotate_logs() {
        eprintln!("warning: could not rotate logs: {e}");
    }
    let Some(path) = paths::log_file() else {
        return;
    };
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
        }
        Err(e) => eprintln!("warning: could not create {}: {}", path.display(), e),
    }
}

async fn run() -> Result<(), Error> {
    let invocation = cli::parse_from(std::env::args_os())?;
    let config = AdminConfig::load()?;
    log::info!("Running {:?}", invocation);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    cli::dispatch(&invocation, &config, &mut input, &mut output).await
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let _ = dotenvy::dotenv();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Cli(e)) => e.exit(),
        // Already printed as a notification.
        Err(Error::Action(message)) => {
            log::error!("{message}");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
