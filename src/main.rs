use std::process::ExitCode;

mod cli;
mod combo;
mod error;
mod exits;
mod pipeline;
mod settings;
mod telemetry;
mod terminal;

fn main() -> ExitCode {
    exits::install_handlers();
    telemetry::init_logging();

    ExitCode::from(cli::run())
}
