//! `slopy` CLI — record weekly busy/play schedules and ask when everyone is free.
//!
//! ## Usage
//!
//! ```sh
//! # Declare busy time for a range of days
//! slopy --user alice busy work mon-fri 9-17
//!
//! # Declare a preferred play window
//! slopy --user alice playtime wed 18-23
//!
//! # Add a game to your list
//! slopy --user alice play rocket league
//!
//! # Mutual free time today (or on a given day)
//! slopy free alice bob
//! slopy free alice bob --day wed
//! slopy free alice bob --overlap
//!
//! # Pick a random game from everyone's lists
//! slopy suggest-game
//!
//! # Print a stored profile
//! slopy show alice
//! ```
//!
//! The store file defaults to `data.json` and can be set with `--data` or
//! `SLOPY_DATA`. Log verbosity follows `RUST_LOG` (default `warn`).

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use rand::seq::SliceRandom;
use slopy_engine::{resolve_mutual, Day, SlotMatching};
use slopy_store::ScheduleStore;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slopy",
    version,
    about = "Track weekly play schedules and find mutual free time"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Schedule store file
    #[arg(long, env = "SLOPY_DATA", default_value = "data.json", global = true)]
    data: String,

    /// User id to record entries for
    #[arg(long, env = "SLOPY_USER", global = true)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a game to your list
    Play {
        /// Game name (several words are joined with spaces)
        #[arg(required = true)]
        game: Vec<String>,
    },
    /// Declare busy time, e.g. `busy work mon-fri 9-17`
    Busy {
        /// Label for the commitment (work, school, ...)
        kind: String,
        /// A day or a forward day range such as mon-wed
        days: String,
        /// Hour range such as 9-17
        range: String,
    },
    /// Declare a preferred play window, e.g. `playtime wed 18-23`
    Playtime {
        /// Day such as wed
        day: String,
        /// Hour range such as 18-23
        range: String,
    },
    /// Show mutual free time for the given users
    Free {
        /// Users to check
        #[arg(required = true)]
        users: Vec<String>,
        /// Day to check instead of today
        #[arg(long)]
        day: Option<String>,
        /// Keep every minute all users have free instead of only identical slots
        #[arg(long)]
        overlap: bool,
    },
    /// Suggest a random game from everyone's lists
    SuggestGame,
    /// Print a user's stored profile as JSON
    Show {
        /// User to show
        user: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let store = ScheduleStore::open(&cli.data)
        .with_context(|| format!("Failed to open schedule store: {}", cli.data))?;
    debug!(path = %cli.data, "store opened");

    match cli.command {
        Commands::Play { game } => {
            let user = require_user(cli.user.as_deref())?;
            let game = game.join(" ").to_lowercase();
            store.add_game(user, &game).context("Failed to add game")?;
            println!("Game '{}' added for {}!", game, user);
        }
        Commands::Busy { kind, days, range } => {
            let user = require_user(cli.user.as_deref())?;
            store
                .add_busy(user, &kind, &days, &range)
                .context("Failed to add busy time")?;
            println!(
                "{} schedule {} {} added for {}!",
                capitalize(kind.trim()),
                days.trim().to_lowercase(),
                range.trim(),
                user
            );
        }
        Commands::Playtime { day, range } => {
            let user = require_user(cli.user.as_deref())?;
            let (day, time) = store
                .add_playtime(user, &day, &range)
                .context("Failed to add playtime")?;
            println!("Playtime {} {} added for {}!", day, time, user);
        }
        Commands::Free { users, day, overlap } => {
            for id in &users {
                if !store.contains(id)? {
                    bail!("No schedule found for {}.", id);
                }
            }

            let (day, when) = match day {
                Some(token) => {
                    let day: Day = token.parse()?;
                    (day, format!("on {}", day))
                }
                None => (Day::from(Local::now().weekday()), "today".to_string()),
            };
            let matching = if overlap {
                SlotMatching::Overlap
            } else {
                SlotMatching::Exact
            };

            let slots = resolve_mutual(&store, &users, day, matching)
                .context("Failed to resolve mutual free time")?;

            if slots.is_empty() {
                println!("No mutual free time available {}.", when);
            } else {
                let rendered: Vec<String> = slots.iter().map(ToString::to_string).collect();
                let mut response = format!("Mutual free time {}: {}.", when, rendered.join(", "));
                let games = store.games_for(&users)?;
                if let Some(game) = games.choose(&mut rand::thread_rng()) {
                    response.push_str(&format!(" Suggested game: {}", game));
                }
                println!("{}", response);
            }
        }
        Commands::SuggestGame => {
            let games = store.all_games()?;
            match games.choose(&mut rand::thread_rng()) {
                Some(game) => println!("How about playing: {}?", game),
                None => println!("No games have been suggested yet!"),
            }
        }
        Commands::Show { user } => match store.profile(&user)? {
            Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
            None => bail!("No schedule found for {}.", user),
        },
    }

    Ok(())
}

fn require_user(user: Option<&str>) -> Result<&str> {
    match user.map(str::trim) {
        Some(user) if !user.is_empty() => Ok(user),
        _ => bail!("This command needs a user: pass --user or set SLOPY_USER"),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
