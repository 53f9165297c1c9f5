use anyhow::Context;
use clap::Parser;
use std::process;
use vessel_integrity::cli::{args::Args, commands};

fn main() {
    let args = Args::parse();
    let command = args.command.name();

    let result = commands::run(args).with_context(|| format!("{} command failed", command));

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}
