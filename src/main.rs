//! Command-line entry point for course registration.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    let exit = cli::Cli::parse().run()?;
    if exit != cli::Exit::Success {
        std::process::exit(exit.code());
    }
    Ok(())
}
