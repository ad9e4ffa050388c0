use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "manda",
    about = concat!("manda v", env!("CARGO_PKG_VERSION"), " - one markdown note per day"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Notes directory (overrides $MANDA_DIR)
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check in on today's note and open it in your editor (the default)
    Edit(EditArgs),
    /// Preview a note, browsing back and forth between days
    See(SeeArgs),
    /// Work through a note's tasks interactively
    Do(DayArgs),
    /// List a note's tasks
    Tasks(DayArgs),
    /// Toggle a task by the id shown in `manda tasks`
    Toggle(ToggleArgs),
    /// Print where a day's note lives
    Path(DayArgs),
    /// Print the date the oldest/prev/next search lands on
    Nav(NavArgs),
}

// ---------------------------------------------------------------------------
// Args
// ---------------------------------------------------------------------------

#[derive(Args, Default)]
pub struct EditArgs {
    /// Only check in; don't launch the editor
    #[arg(long)]
    pub no_editor: bool,
}

/// Which day a command works on (default: today)
#[derive(Args, Clone, Default)]
pub struct DayArgs {
    /// Use yesterday's note
    #[arg(long, conflicts_with = "date")]
    pub yester: bool,
    /// Use the note for a specific day (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct SeeArgs {
    #[command(flatten)]
    pub day: DayArgs,
    /// Print the raw note instead of opening the preview
    #[arg(long)]
    pub print: bool,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Task id
    pub id: usize,
    #[command(flatten)]
    pub day: DayArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum NavDirection {
    Oldest,
    Prev,
    Next,
}

#[derive(Args)]
pub struct NavArgs {
    #[arg(value_enum)]
    pub direction: NavDirection,
    /// Day to search from (default: today)
    #[arg(long)]
    pub date: Option<String>,
    /// Let `next` land on today even when today's note doesn't exist yet
    #[arg(long)]
    pub allow_today: bool,
}
