use anyhow::Result;
use cadence_core::today_in;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod parse_cmd;
mod state;
mod streak_cmd;

#[derive(Parser, Debug)]
#[command(
    name = "cadence",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CADENCE_BUILD_SHA"), ")"),
    about = "Task intake and streak tools for Cadence"
)]
struct Cli {
    /// Log pipeline decisions at debug level (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse free text into a task draft
    Parse {
        /// The text to parse, e.g. "gym every monday at 7am"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Reference day (YYYY-MM-DD); defaults to today in the profile timezone
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print the draft as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Compute streaks from a JSON completion log
    Streak {
        /// Path to `[{"date": "YYYY-MM-DD", "completed": true}, ...]`
        log: PathBuf,

        /// Count duplicate same-day completions once
        #[arg(long, default_value_t = false)]
        dedupe: bool,

        /// Reference day (YYYY-MM-DD); defaults to today in the profile timezone
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print the summary as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Manage ~/.cadence/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config file location
    Path,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Parse { text, today, json } => {
            let cfg = config::load_config()?;
            let today = resolve_today(today, &cfg)?;
            parse_cmd::run(&cfg, &text.join(" "), today, json)?;
        }

        Command::Streak {
            log,
            dedupe,
            today,
            json,
        } => {
            let cfg = config::load_config()?;
            let today = resolve_today(today, &cfg)?;
            let mut policy = cfg.streak;
            policy.dedupe_same_day |= dedupe;
            streak_cmd::run(&log, policy, today, json)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },
    }

    Ok(())
}

fn resolve_today(explicit: Option<NaiveDate>, cfg: &config::Config) -> Result<NaiveDate> {
    match explicit {
        Some(d) => Ok(d),
        None => today_in(&cfg.profile.timezone, Utc::now()),
    }
}
