mod cli;
mod logger;

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use minify::{ConfigError, Minifier, MinifyConfig, MinifyError};

use crate::cli::Cli;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("cannot write stdout: {0}")]
    Stdout(#[source] io::Error),
    #[error("input is not a well-formed document: {0}")]
    Minify(#[from] MinifyError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.log_level());
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("html5small: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => MinifyConfig::load(path)?,
        None => MinifyConfig::default(),
    };
    if cli.no_elide {
        config.elide_optional_tags = false;
    }

    let input = read_input(cli)?;
    let output = Minifier::new(config).minify(&input)?;
    write_output(cli, &output)
}

fn read_input(cli: &Cli) -> Result<String, CliError> {
    match &cli.input {
        Some(path) if !cli.reads_stdin() => fs::read_to_string(path).map_err(|source| {
            CliError::Read {
                path: path.clone(),
                source,
            }
        }),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(CliError::Stdin)?;
            Ok(input)
        }
    }
}

fn write_output(cli: &Cli, output: &str) -> Result<(), CliError> {
    match &cli.output {
        Some(path) => fs::write(path, output).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .and_then(|()| stdout.write_all(b"\n"))
                .and_then(|()| stdout.flush())
                .map_err(CliError::Stdout)
        }
    }
}
