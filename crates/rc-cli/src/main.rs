//! CLI frontend for the Rollcall roster picker.

mod commands;
mod logging;
mod tui;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use rc_fetch::DEFAULT_ENDPOINT;

#[derive(Parser)]
#[command(
    name = "rollcall",
    about = "Rollcall — pick students at random from a roster",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Roster endpoint answering GET with a JSON array of students
    #[arg(long, global = true, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Load the roster from a JSON file instead of the endpoint
    #[arg(long, global = true)]
    pub roster_file: Option<PathBuf>,

    /// File holding the persisted selection and last pick
    #[arg(long, global = true, default_value = "rollcall.json")]
    pub state: PathBuf,

    /// RNG seed for reproducible picks
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Contact link shown when the roster cannot be fetched
    #[arg(long, global = true)]
    pub feedback_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the roster with selection markers
    List {
        /// Only show selected students
        #[arg(short, long)]
        selected: bool,
    },

    /// Flip the selection of one or more students
    Toggle {
        /// Student ids
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Pick one selected student, avoiding the previous pick
    Pick,

    /// Pick several distinct selected students
    PickMany {
        /// How many to pick (2-10)
        #[arg(value_parser = clap::value_parser!(u8).range(2..=10))]
        count: u8,
    },

    /// Pick one student from the whole roster
    PickAll,

    /// Pick several distinct students from the whole roster
    PickAllMany {
        /// How many to pick (2-10)
        #[arg(value_parser = clap::value_parser!(u8).range(2..=10))]
        count: u8,
    },

    /// Launch the interactive picker grid
    Tui,
}

fn main() {
    let cli = Cli::parse();

    // The TUI owns the terminal, so its logs go next to the state file.
    let log_file = matches!(cli.command, Commands::Tui)
        .then(|| cli.opts.state.with_file_name("rollcall.log"));
    if let Err(e) = logging::init(cli.opts.verbose, log_file.as_deref()) {
        eprintln!("warning: {e}");
    }

    let opts = &cli.opts;
    let result = match cli.command {
        Commands::List { selected } => commands::list::run(opts, selected),
        Commands::Toggle { ids } => commands::toggle::run(opts, &ids),
        Commands::Pick => commands::pick::run_one(opts),
        Commands::PickMany { count } => commands::pick::run_many(opts, usize::from(count)),
        Commands::PickAll => commands::pick::run_one_from_all(opts),
        Commands::PickAllMany { count } => {
            commands::pick::run_many_from_all(opts, usize::from(count))
        }
        Commands::Tui => commands::open_tui_session(opts).and_then(tui::run),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
