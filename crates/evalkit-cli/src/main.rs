//! CLI entry point.
//!
//! Parses arguments, installs logging and dispatches to the handlers. Errors
//! are printed to stderr and mapped to the process exit code.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use evalkit_cli::handlers::fetch::FetchArgs;
use evalkit_cli::{Cli, Commands, exit_code, handlers, logging};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    logging::init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(exit_code(&err))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Fetch {
            repo_id,
            repo_type,
            patterns,
            ignore,
            local_dir,
            revision,
            token,
            endpoint,
            force,
            dry_run,
        } => {
            let args = FetchArgs {
                repo_id,
                repo_type,
                patterns,
                ignore,
                local_dir,
                revision,
                token,
                endpoint,
                force,
                dry_run,
            };
            handlers::fetch::execute(args).await?;
        }
        Commands::Plot { input, output, dpi } => {
            // Rendering is CPU bound
            tokio::task::spawn_blocking(move || handlers::plot::execute(&input, &output, dpi))
                .await??;
        }
    }

    Ok(())
}
