//! FILENAME: app/src/main.rs
// PURPOSE: Binary entry point; see `app_lib::run`.

use std::process::ExitCode;

fn main() -> ExitCode {
    app_lib::run()
}
