use std::process::ExitCode;

use log::LevelFilter;
use mcvideo::{cli, logging::init_logger};

fn main() -> ExitCode {
    let arguments = match cli::parse_args(std::env::args()) {
        Ok(arguments) => arguments,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("run `mcvideo --help` for usage");
            return ExitCode::FAILURE;
        }
    };

    let level = if arguments.is_verbose() {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = init_logger(level) {
        eprintln!("could not install logger: {e}");
    }

    match cli::run(arguments) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
