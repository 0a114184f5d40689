//! Kapoview - list-view selection and table option state

use std::io;
use std::process::ExitCode;

use env_logger::{Builder, Env};

use kapoview::app::{exit_code, print_help, Command, Config};
use kapoview::error::KapoviewError;
use kapoview::handler::execute;

const ENV_LOG: &str = "RUST_LOG";
const ENV_LOG_STYLE: &str = "RUST_LOG_STYLE";

fn main() -> ExitCode {
    // Parse config first to return INVALID exit code for argument errors
    let config = match Config::from_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(exit_code::INVALID as u8);
        }
    };

    Builder::from_env(
        Env::new()
            .filter_or(ENV_LOG, &config.log_level)
            .write_style(ENV_LOG_STYLE),
    )
    .init();

    match config.command {
        Command::Help => {
            print_help();
            return ExitCode::from(exit_code::SUCCESS as u8);
        }
        Command::Version => {
            println!("kv {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::from(exit_code::SUCCESS as u8);
        }
        _ => {}
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    match execute(&config, &mut stdin.lock(), &mut stdout.lock()) {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            let code = match e {
                KapoviewError::UnknownTable(_) | KapoviewError::UnknownColumn { .. } => {
                    exit_code::INVALID
                }
                _ => exit_code::ERROR,
            };
            ExitCode::from(code as u8)
        }
    }
}
