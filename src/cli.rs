use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::DEFAULT_ENDPOINT;

#[derive(Parser)]
#[command(name = "contribdash")]
#[command(about = "GitHub pull-request contributions by repository, with card, text, JSON and PNG export")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true, help = "GitHub token used for the GraphQL API")]
    pub token: Option<String>,

    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = DEFAULT_ENDPOINT, global = true, help = "GraphQL endpoint")]
    pub endpoint: String,

    #[arg(long, value_parser = humantime::parse_duration, default_value = "5m", global = true, help = "How long query results are reused (0s disables)")]
    pub cache_ttl: Duration,

    #[arg(long, global = true, help = "Read a previously exported data.json instead of querying GitHub")]
    pub input: Option<PathBuf>,

    #[arg(long, default_value = ".", global = true, help = "Directory for exported files")]
    pub out_dir: PathBuf,

    #[arg(long, global = true, help = "Year to show (one of the last four years)")]
    pub year: Option<i32>,

    #[arg(short, long, action = ArgAction::Count, global = true, help = "Increase log verbosity")]
    pub verbose: u8,

    #[arg(long, global = true, help = "Write logs to this file")]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportTarget {
    Json,
    Text,
    Png,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the selectable years and their query lower bound
    Years {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Print contributions in one format
    Show {
        #[arg(help = "GitHub login to query")]
        login: String,

        #[arg(long, default_value = "cards", help = "cards, text or json")]
        format: String,
    },
    /// Write data.json, data.txt or a PNG of the cards
    Export {
        #[arg(help = "GitHub login to query")]
        login: String,

        #[arg(long, value_enum)]
        format: ExportTarget,

        #[arg(long, help = "Copy the PNG to the clipboard instead of writing a file")]
        clipboard: bool,

        #[arg(long, default_value = crate::export::DEFAULT_IMAGE_BASE, help = "File name (without extension) for PNG downloads")]
        name: String,
    },
    /// Interactive dashboard
    #[command(alias = "tui", alias = "interactive")]
    Ui {
        #[arg(help = "GitHub login to query")]
        login: String,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self, dotenv: Option<&Path>) -> Result<()> {
        let interactive = matches!(self.command, Commands::Ui { .. });
        crate::logging::init(self.common.verbose, self.common.log_file.as_deref(), interactive)?;
        if let Some(path) = dotenv {
            tracing::debug!(path = %path.display(), "loaded .env");
        }

        match self.command {
            Commands::Years { json } => crate::year::exec(self.common, json),
            Commands::Show { login, format } => crate::show::exec(self.common, login, format),
            Commands::Export { login, format, clipboard, name } => {
                crate::export::exec(self.common, login, format, clipboard, name)
            }
            Commands::Ui { login } => crate::tui::run(&self.common, login),
        }
    }
}
