use std::process::ExitCode;

use clap::Parser;
use hookscope::cli::{Arguments, ExitStatus, run_cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Arguments::parse();

    if args.verbose() {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("hookscope=debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    match run_cli(args).await {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitStatus::Error.into()
        }
    }
}
