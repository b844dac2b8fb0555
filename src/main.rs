use clap::Parser;
use stockwatch::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
