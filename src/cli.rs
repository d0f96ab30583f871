use std::path::PathBuf;

use clap::Parser;

/// Minify an HTML5 document.
#[derive(Parser, Debug)]
#[command(name = "html5small", version, about)]
pub struct Cli {
    /// Input file; reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Output file; writes stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML file with minifier settings.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Keep every optional tag.
    #[arg(long)]
    pub no_elide: bool,

    /// Log more (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    pub fn reads_stdin(&self) -> bool {
        self.input
            .as_deref()
            .is_none_or(|path| path.as_os_str() == "-")
    }
}
