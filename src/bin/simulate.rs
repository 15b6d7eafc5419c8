use std::error::Error;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use unobot::{
    Bot, Game, GameError, create_bot_from_spec, describe_action, describe_entry, is_human_spec,
    render_state,
};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = (0x0DEC_AF00_u64 << 32) | 0x5EED_u64;

#[derive(Parser, Debug)]
#[command(
    name = "simulate",
    about = "Seat bots (or humans) around a table and play games to completion."
)]
struct Args {
    /// Number of games to play
    #[arg(short = 'g', long = "games", default_value_t = 1)]
    games: usize,

    /// Base RNG seed; game N uses seed + N
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Safety cap on turns per game; once the deck is gone a table can stall
    #[arg(long = "max-turns", default_value_t = 1000)]
    max_turns: usize,

    /// Print the state and every turn as it happens
    #[arg(long = "visualize", action = ArgAction::SetTrue)]
    visualize: bool,

    /// Append finished-game records as JSON lines to this file
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,

    /// Player bot specs: heuristic, conserve, random[:seed], human[:name] (2-10 total)
    bots: Vec<String>,
}

fn main() {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut bot_specs = args.bots.clone();
    if bot_specs.is_empty() {
        bot_specs = vec![String::from("heuristic"); 4];
    }
    let num_players = bot_specs.len();

    let mut writer = match &args.out {
        Some(path) => Some(BufWriter::new(
            OpenOptions::new().create(true).append(true).open(path)?,
        )),
        None => None,
    };

    let mut wins = vec![0usize; num_players];
    let mut totals = vec![0u64; num_players];
    let mut aborted = 0usize;

    for game_index in 0..args.games {
        let seed = args.seed.wrapping_add(game_index as u64);
        let mut builder = Game::builder(num_players)?.with_seed(seed);
        for (index, spec) in bot_specs.iter().enumerate() {
            if is_human_spec(spec) {
                builder = builder.with_human(index);
            }
        }
        let mut game = builder.build()?;

        let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(num_players);
        for (index, spec) in bot_specs.iter().enumerate() {
            bots.push(create_bot_from_spec(spec, index, seed)?);
        }

        info!(game = game_index + 1, id = %game.game_id(), seed, "starting game");
        if !play_game(&mut game, &mut bots, &args)? {
            warn!(game = game_index + 1, "turn limit {} reached, game aborted", args.max_turns);
            println!("Game {}: aborted after {} turns.", game_index + 1, args.max_turns);
            aborted += 1;
            continue;
        }

        let Some(record) = game.record() else {
            continue;
        };
        wins[record.winner] += 1;
        for (total, score) in totals.iter_mut().zip(&record.final_scores) {
            *total += u64::from(*score);
        }
        println!(
            "Game {}: Player {} wins after {} turns. Scores: {:?}",
            game_index + 1,
            record.winner,
            record.turn_log.len(),
            record.final_scores
        );
        if let Some(writer) = writer.as_mut() {
            writeln!(writer, "{}", record.to_json_line()?)?;
        }
    }

    if let Some(writer) = writer.as_mut() {
        writer.flush()?;
    }
    if args.games > 1 {
        println!("\nSummary over {} games ({aborted} aborted):", args.games);
        for (index, spec) in bot_specs.iter().enumerate() {
            println!(
                "  Player {index} [{spec}]: {} wins, {} points conceded",
                wins[index], totals[index]
            );
        }
    }
    Ok(())
}

/// Plays until someone wins. Returns false when the turn cap was hit first.
fn play_game(
    game: &mut Game,
    bots: &mut [Box<dyn Bot>],
    args: &Args,
) -> Result<bool, GameError> {
    let mut turns = 0usize;
    while !game.is_finished() {
        if turns >= args.max_turns {
            return Ok(false);
        }
        let current = game.current_player();
        let state = game.state_view(current)?;
        let legal_actions = game.legal_actions(current)?;
        if args.visualize {
            println!("{}", render_state(&state));
        }
        let action = bots[current].select_action(&state, &legal_actions);
        if args.visualize {
            println!("Chosen action: {}", describe_action(&action));
        }
        let entry = game.apply_action(current, action)?;
        if args.visualize {
            println!("{}\n", describe_entry(&entry));
        }
        turns += 1;
    }
    Ok(true)
}
