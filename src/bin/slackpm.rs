//! slackpm CLI Binary
//!
//! The command-line interface over slackpkg and the Slackware pkgtools.

use clap::Parser;

use slackpm_lib::cli::commands;
use slackpm_lib::cli::{Cli, CliContext};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let ctx = CliContext::from(&cli);

    // Initialize tracing; RUST_LOG wins over -q / -v
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(ctx.log_level().as_str())
            }),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(err) = commands::run(cli).await {
        commands::report_error(&ctx, &err);
        std::process::exit(1);
    }
}
