use anyhow::{bail, Context, Result};
use clap::Parser;
use song_ranker::command::{Command, HELP};
use song_ranker::session::{RankingSession, DEFAULT_LIST_SIZE};
use song_ranker::sync::{HttpSongStore, MemorySongStore, SongStore, MINIMUM_LIST_SIZE};
use song_ranker::{SyncAdapter, SyncConfig, SyncError};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "song-ranker")]
#[command(about = "Search songs and build a ranked top list", long_about = None)]
struct Args {
    /// Base URL of the song service
    #[arg(short = 's', long, default_value = "http://localhost:8080")]
    server: String,

    /// Work offline with an in-memory store instead of the service
    #[arg(long)]
    offline: bool,

    /// JSON song catalog to search when offline (implies --offline)
    #[arg(short = 'c', long)]
    catalog: Option<PathBuf>,

    /// Number of ranks in the list
    #[arg(long, default_value_t = DEFAULT_LIST_SIZE)]
    capacity: usize,

    /// Minimum number of songs required to save
    #[arg(long, default_value_t = MINIMUM_LIST_SIZE)]
    min_size: usize,

    /// Request timeout in seconds (no timeout if omitted)
    #[arg(long)]
    timeout: Option<u64>,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    check_limits(&args)?;

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = SyncConfig::new(args.server.clone()).with_minimum_list_size(args.min_size);
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    if args.offline || args.catalog.is_some() {
        let store = match args.catalog {
            Some(ref catalog) => {
                log::info!("Offline mode, catalog: {:?}", catalog);
                MemorySongStore::from_catalog_file(catalog)?
            }
            None => {
                log::info!("Offline mode with an empty catalog");
                MemorySongStore::default()
            }
        };
        run(SyncAdapter::new(store, config), args.capacity).await
    } else {
        log::info!("Song service: {}", config.base_url);
        let store = HttpSongStore::new(config.clone()).context("Failed to set up HTTP client")?;
        run(SyncAdapter::new(store, config), args.capacity).await
    }
}

/// A list that can never reach the save minimum is a configuration error
fn check_limits(args: &Args) -> Result<()> {
    if args.capacity == 0 {
        bail!("--capacity must be at least 1");
    }
    if args.capacity < args.min_size {
        bail!(
            "--capacity {} is below --min-size {}, the list could never be saved",
            args.capacity,
            args.min_size
        );
    }
    Ok(())
}

async fn run<S: SongStore>(adapter: SyncAdapter<S>, capacity: usize) -> Result<()> {
    let mut session = RankingSession::start(&adapter, Some(capacity)).await;
    print_rankings(&session);
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Search { rank, query } => {
                let ticket = match session.begin_search(&query, rank) {
                    Ok(ticket) => ticket,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                match adapter.search(&ticket.query, ticket.target_rank).await {
                    Ok(results) => {
                        if session.accept_results(&ticket, results) {
                            print_results(&session);
                        }
                    }
                    Err(e) => {
                        session.fail_search(&ticket);
                        println!("Error searching: {}", e);
                    }
                }
            }
            Command::Pick { index } => match session.select(index) {
                Ok(selection) => {
                    if let Some(old) = selection.evicted {
                        println!("Replaced {} - {}", old.song.artist, old.song.name);
                    }
                    print_rankings(&session);
                }
                Err(e) => println!("{}", e),
            },
            Command::Remove { rank } => {
                if session.remove(rank).is_none() {
                    println!("Nothing at rank {}", rank);
                }
                print_rankings(&session);
            }
            Command::Move(instruction) => match session.move_entry(instruction) {
                Ok(()) => print_rankings(&session),
                Err(e) => println!("{}", e),
            },
            Command::List => print_rankings(&session),
            Command::Save => match session.save(&adapter).await {
                Ok(()) => println!("Songs saved successfully!"),
                Err(e @ SyncError::BelowMinimumSize { .. }) => println!("{}", e),
                Err(e) => println!("Error saving songs, please try again: {}", e),
            },
            Command::Reload => {
                session.rehydrate(adapter.load(Some(capacity)).await);
                print_rankings(&session);
            }
            Command::Clear => {
                session.clear();
                print_rankings(&session);
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush().context("Failed to flush stdout")
}

fn print_results(session: &RankingSession) {
    let Some(results) = session.pending_results() else {
        return;
    };

    if results.is_empty() {
        println!("No songs found");
        return;
    }

    println!("Results for rank {}:", results.target_rank);
    for (i, song) in results.songs.iter().enumerate() {
        let marker = if session.collection().contains_song(song) {
            " (already ranked)"
        } else {
            ""
        };
        println!("  {:>2}. {} - {}{}", i + 1, song.artist, song.name, marker);
    }
}

fn print_rankings(session: &RankingSession) {
    let collection = session.collection();
    if collection.is_empty() {
        println!("Your list is empty. Search for songs to add to your list.");
        return;
    }

    for entry in collection.sorted_entries() {
        println!("  #{:<3} {} - {}", entry.rank, entry.song.artist, entry.song.name);
    }
    if let Some(max) = collection.max_size() {
        println!("  ({}/{} ranked)", collection.len(), max);
    }
}
