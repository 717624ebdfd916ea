use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for rTimeclock
/// CLI application to record and query daily time-clock punches with SQLite
#[derive(Parser)]
#[command(
    name = "rtimeclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record employee time-clock entries (in, lunch out, lunch in, out) and query them by date",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the database schema
    Init,

    /// Show the effective configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration as YAML")]
        print_config: bool,
    },

    /// Record a day's punches
    Add {
        /// Date tag used for grouping (stored verbatim)
        #[arg(long = "date")]
        date: String,

        /// Clock-in time (RFC 3339 or "YYYY-MM-DD HH:MM")
        #[arg(long = "entry")]
        entry: String,

        /// Lunch-out time
        #[arg(long = "lunch-out")]
        lunch_out: String,

        /// Lunch-in time
        #[arg(long = "lunch-in")]
        lunch_in: String,

        /// Clock-out time
        #[arg(long = "exit")]
        exit: String,

        /// Explicit id (UUID); generated by the store when omitted
        #[arg(long = "id")]
        id: Option<String>,
    },

    /// List time entries, optionally filtered
    #[command(group(ArgGroup::new("filter").multiple(false)))]
    List {
        /// Exact match on the date tag
        #[arg(long = "date", group = "filter")]
        date: Option<String>,

        /// Year of the clock-in time
        #[arg(long = "year", group = "filter")]
        year: Option<i32>,

        /// Month (1-12) of the clock-in time
        #[arg(long = "month", group = "filter")]
        month: Option<i32>,

        /// Day of month of the clock-in time
        #[arg(long = "day", group = "filter")]
        day: Option<i32>,

        #[arg(long = "json", help = "Print entries as a JSON array")]
        json: bool,
    },
}
