use std::{
    io::{stdin, stdout, Write},
    path::PathBuf,
};

use anyhow::anyhow;
use clap::Parser;

/// Runs a lox script, or starts a REPL if no script is given.
#[derive(clap::Parser)]
#[command(version)]
struct Args {
    file: Option<PathBuf>,
}

fn run_file(path: PathBuf) -> anyhow::Result<()> {
    log::debug!("Running {}", path.display());
    run(&std::fs::read_to_string(path)?)
}

fn run_prompt() -> anyhow::Result<()> {
    loop {
        print!("> ");
        stdout().flush()?;
        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Ok(());
        }
        if let Err(e) = run(&line) {
            println!("{}", e);
        }
    }
}

fn run(source: &str) -> anyhow::Result<()> {
    // The error borrows `source`, so it is flattened into a message here.
    interpreter::run_source(source, &mut stdout()).map_err(|e| anyhow!("{e}"))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.file {
        Some(file) => run_file(file),
        None => run_prompt(),
    }
}
