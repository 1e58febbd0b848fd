use clap::Parser;
use miette::Result;

use codeweave::cli::{self, Cli};
use codeweave::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new(cli.quiet);

    cli::render::run(cli, &printer)?;

    Ok(())
}
