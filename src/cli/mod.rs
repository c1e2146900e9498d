//! Command-line entry point.

mod args;
mod prompts;
mod quiet;

use anyhow::Context as _;
use clap::Parser;

use args::CliArgs;

use crate::error::Error;
use crate::exits;
use crate::pipeline::{self, QuietSink, StatusSink};
use crate::settings::RunConfig;
use crate::terminal::ConsoleSink;

/// Parse arguments, run the pipeline and return the process exit code.
///
/// Usage errors exit through clap with code 2.
pub fn run() -> u8 {
    let args = CliArgs::parse();
    match execute(args) {
        Ok(()) => 0,
        Err(err) => {
            prompts::error(&format!("{err:#}"));
            if let Some(Error::Config { .. }) = err.downcast_ref::<Error>() {
                prompts::hint("Run with --help for usage.");
            }
            err.downcast_ref::<Error>().map_or(1, Error::exit_code)
        }
    }
}

fn execute(args: CliArgs) -> anyhow::Result<()> {
    let config = RunConfig::try_from(args)?;
    quiet::set(config.quiet);

    let mut sink: Box<dyn StatusSink> = if quiet::enabled() {
        Box::new(QuietSink)
    } else {
        Box::new(ConsoleSink::stdout())
    };

    pipeline::run(&config, sink.as_mut(), exits::cancel_flag())
        .with_context(|| format!("Generation into {} failed", config.output.display()))?;
    Ok(())
}
