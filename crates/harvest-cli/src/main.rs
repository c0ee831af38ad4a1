mod collect;
mod logging;
mod output;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use collect::BookArgs;

#[derive(Debug, Parser)]
#[command(name = "harvest-cli")]
#[command(about = "Store directory and book catalog harvester")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Harvest store locations for every region code
    Stores {
        /// CSV file to write (defaults to `<output dir>/stores.csv`)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Harvest book listings from one catalog category
    Books(BookArgs),
    /// Print descriptive statistics for a harvested book CSV
    Report {
        /// CSV file to read (defaults to `<output dir>/books.csv`)
        #[arg(long)]
        input: Option<PathBuf>,

        /// How many entries to list for each frequency table
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

impl Commands {
    fn label(&self) -> &'static str {
        match self {
            Commands::Stores { .. } => "stores",
            Commands::Books(_) => "books",
            Commands::Report { .. } => "report",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("harvest-cli: choose a command (stores, books, report); see --help");
        return Ok(());
    };

    let config = harvest_core::load_app_config()?;
    logging::init_tracing(&config, command.label())?;

    match command {
        Commands::Stores { output } => collect::run_collect_stores(&config, output).await,
        Commands::Books(args) => collect::run_collect_books(&config, args).await,
        Commands::Report { input, top } => report::run_report(&config, input, top),
    }
}
