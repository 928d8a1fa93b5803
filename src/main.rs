//! CLI entry point for wave function collapse tile generation

use clap::Parser;
use tilecollapse::io::cli::{Cli, RunProcessor, init_logging};

fn main() -> tilecollapse::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log);
    let mut processor = RunProcessor::new(cli);
    processor.process().map(|_| ())
}
