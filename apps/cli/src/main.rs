//! # qrwari
//!
//! Entry point for the `qrwari` binary. Setup and dispatch live in the
//! library crate so they can be tested.

use std::process::ExitCode;

fn main() -> ExitCode {
    qrwari_cli::run()
}
