use anyhow::Result;
use clap::Parser;
use contribdash::cli::Cli;

fn main() -> Result<()> {
    let dotenv = contribdash::config::load_dotenv();
    let cli = Cli::parse();
    cli.execute(dotenv.as_deref())
}
