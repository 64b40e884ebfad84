use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use fidc_pipeline::cli::Cli;
use fidc_pipeline::{PipelineError, commands, ui};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::failure(&format!("{e:#}"));
            if matches!(
                e.downcast_ref::<PipelineError>(),
                Some(PipelineError::Api(api)) if api.is_transient()
            ) {
                ui::failure_hint("backend indisponível; nada foi alterado, tente novamente");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("fidc_pipeline=debug")
        } else {
            EnvFilter::new("fidc_pipeline=warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
