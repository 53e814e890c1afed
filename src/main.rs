//! msc - command-line tool for inspecting and patching metascreen catalogs

use std::process::ExitCode;

use metascreens::cli;

fn main() -> ExitCode {
    cli::run()
}
