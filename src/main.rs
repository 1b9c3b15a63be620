#![forbid(unsafe_code)]

use std::process::ExitCode;

fn main() -> ExitCode {
    match kino::run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("kino: {e}");
            ExitCode::from(2)
        }
    }
}
