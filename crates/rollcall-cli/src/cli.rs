//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rollcall_core::{AthleteDraft, FilterCriteria, SortKey};

#[derive(Debug, Parser)]
#[command(name = "rollcall", version, about = "Attendance tracker for sports-team rosters")]
pub struct Cli {
    /// Keep the roster on a remote server instead of a local file
    #[arg(long, global = true, env = "ROLLCALL_REMOTE_URL")]
    pub remote: Option<String>,

    /// Bearer token for the remote server
    #[arg(long, global = true, env = "ROLLCALL_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Directory holding athletes.json
    #[arg(long, global = true, env = "ROLLCALL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the roster
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Sort by name, grade, team or group
        #[arg(long, default_value_t = SortKey::Name)]
        sort: SortKey,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Show the grades, teams and groups there are to filter by
        #[arg(long, conflicts_with = "json")]
        options: bool,
    },

    /// Add an athlete
    Add(AthleteArgs),

    /// Change an athlete's details (attendance is kept)
    Edit {
        /// Athlete id or a unique prefix of it
        id: String,

        #[command(flatten)]
        fields: AthleteArgs,
    },

    /// Remove an athlete
    Remove {
        id: String,
    },

    /// Flip an athlete's attendance for today
    Toggle {
        id: String,
    },

    /// Mark everyone present, or everyone absent if all are already present
    ToggleAll,

    /// Remove every athlete
    Clear {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },

    /// Replace the roster with the athletes in a CSV file
    Import {
        file: PathBuf,
    },

    /// Write the roster as CSV ("-" for stdout)
    Export {
        file: Option<PathBuf>,
    },

    /// Attendance statistics for the roster or a filtered part of it
    Stats {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long)]
        json: bool,
    },

    /// Where the roster is stored and how fresh it is
    Status,

    /// Show the effective settings, optionally changing and saving them
    Config {
        /// Comma-separated workout groups to list first in stats
        #[arg(long)]
        group_order: Option<String>,

        /// Write the settings (including --remote and --data-dir) to the config file
        #[arg(long)]
        save: bool,
    },
}

impl Command {
    /// Whether a successful run changes the roster and must be persisted.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Add(_)
                | Command::Edit { .. }
                | Command::Remove { .. }
                | Command::Toggle { .. }
                | Command::ToggleAll
                | Command::Clear { .. }
                | Command::Import { .. }
        )
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    #[arg(long)]
    pub grade: Option<String>,

    #[arg(long)]
    pub team: Option<String>,

    /// Workout group
    #[arg(long)]
    pub group: Option<String>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        FilterCriteria {
            grade: args.grade,
            team: args.team,
            workout_group: args.group,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct AthleteArgs {
    #[arg(long)]
    pub first: Option<String>,

    #[arg(long)]
    pub last: Option<String>,

    /// 7 through 12
    #[arg(long)]
    pub grade: Option<String>,

    /// Varsity, JV, A or Dev Squad (aliases like "v" or "dev" work)
    #[arg(long)]
    pub team: Option<String>,

    /// Workout group
    #[arg(long)]
    pub group: Option<String>,
}

impl AthleteArgs {
    /// Fill a draft, keeping `base` values for anything not given.
    pub fn apply_to(self, base: AthleteDraft) -> AthleteDraft {
        AthleteDraft {
            first_name: self.first.unwrap_or(base.first_name),
            last_name: self.last.unwrap_or(base.last_name),
            grade: self.grade.unwrap_or(base.grade),
            team: self.team.unwrap_or(base.team),
            workout_group: self.group.unwrap_or(base.workout_group),
        }
    }
}
