//! # Kashify Storefront Entry Point
//!
//! Reads JSON requests from stdin, writes responses to stdout and logs to
//! stderr. All logic lives in `lib.rs`.

use std::process::ExitCode;

fn main() -> ExitCode {
    kashify_storefront::run()
}
