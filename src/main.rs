//! Binary entrypoint for the `ajapopaja` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env file is the normal case.
    let _ = dotenvy::dotenv();
    env_logger::init();

    // Recording and replay are handled in commands::dispatch via
    // AJAPOPAJA_RECORD=<dir> and AJAPOPAJA_REPLAY=<cassette>.
    match ajapopaja::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
