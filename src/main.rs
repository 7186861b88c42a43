mod cli;

use clap::Parser;
use ipranges::{ClientBuilder, Error};
use std::process::ExitCode;

/*-------------------------------------------------------------------------------------------------
  Main CLI Function
-------------------------------------------------------------------------------------------------*/

fn main() -> ExitCode {
    let args = cli::Args::parse();

    let _ = stderrlog::new()
        .module(module_path!())
        .quiet(args.verbose.is_silent())
        .verbosity(args.verbose.log_level_filter())
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err((phase, error)) => {
            cli::output::error(phase, &error);
            ExitCode::FAILURE
        }
    }
}

/*--------------------------------------------------------------------------------------
  Run Phases
--------------------------------------------------------------------------------------*/

/// Run the query, returning the name of the phase that failed with its error.
fn run(args: &cli::Args) -> Result<(), (&'static str, Error)> {
    let query = cli::build_query(args).map_err(|error| ("build query", error))?;

    let ip_ranges = ClientBuilder::new()
        .refresh(args.refresh)
        .build()
        .get_ranges()
        .map_err(|error| ("load ip ranges", error))?;
    cli::log::ip_ranges(&ip_ranges);

    let result = ipranges::execute(&ip_ranges, &query).map_err(|error| ("run query", error))?;
    cli::log::query_result(&query, &result);

    cli::output::query_result(&result, args.compact).map_err(|error| ("render result", error))
}
