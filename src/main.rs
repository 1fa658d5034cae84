use clap::Parser;
use edgeflip::cli::{Cli, run_cli};
use edgeflip::output::OutputFormatter;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_cli(cli) {
        OutputFormatter::error(&e);
        process::exit(1);
    }
}
