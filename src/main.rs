// Pacicli - PACI cloud server command line client
use clap::Parser;
use pacicli::cli::{execute_command, Args};
use pacicli::infrastructure::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    if let Err(e) = execute_command(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
