//! `duel_chess` command-line front end.
//!
//! `duel_chess perft --depth 4`
//! `duel_chess best-move --fen "<fen>" --depth 5 --deadline-ms 2000`
//! `duel_chess play --white alpha-beta --black random --seed 7`

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use duel_chess::config::EngineConfig;
use duel_chess::engines::engine_alpha_beta::AlphaBetaEngine;
use duel_chess::engines::engine_random::RandomEngine;
use duel_chess::engines::engine_trait::Engine;
use duel_chess::errors::ChessResult;
use duel_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use duel_chess::game_state::classifier::classify_record;
use duel_chess::game_state::game_record::GameRecord;
use duel_chess::game_state::position::Position;
use duel_chess::move_generation::legal_move_generator::LegalMoveGenerator;
use duel_chess::move_generation::perft::{perft_divide, perft_multi_threaded};
use duel_chess::utils::render_position::render_position;

#[derive(Debug, Parser)]
#[command(name = "duel_chess", version, about = "Chess rules engine and opponent AI")]
struct Cli {
    /// JSON engine configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count leaf nodes of the legal move tree.
    Perft {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
        #[arg(long, default_value_t = 4)]
        depth: u8,
        /// Print the node count under each root move.
        #[arg(long)]
        divide: bool,
        #[arg(long, default_value_t = 1)]
        threads: usize,
    },
    /// Search a position and print the chosen move.
    BestMove {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
        #[arg(long)]
        depth: Option<u8>,
        #[arg(long)]
        deadline_ms: Option<u64>,
        #[arg(long)]
        parallel: bool,
    },
    /// Engine game from the standard start, printed as PGN.
    Play {
        #[arg(long, value_enum, default_value_t = Player::AlphaBeta)]
        white: Player,
        #[arg(long, value_enum, default_value_t = Player::Random)]
        black: Player,
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        depth: Option<u8>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Player {
    AlphaBeta,
    Random,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ChessResult<()> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Perft {
            fen,
            depth,
            divide,
            threads,
        } => {
            let position = Position::from_fen(&fen)?;
            let started = Instant::now();
            if divide {
                let mut total = 0u64;
                for (mv, nodes) in perft_divide(&LegalMoveGenerator, &position, depth) {
                    println!("{mv}: {nodes}");
                    total += nodes;
                }
                println!("\nnodes {total}");
            } else {
                let counts = perft_multi_threaded(&LegalMoveGenerator, &position, depth, threads.max(1));
                println!(
                    "nodes {} captures {} en_passant {} castles {} promotions {} checks {} checkmates {}",
                    counts.nodes,
                    counts.captures,
                    counts.en_passant,
                    counts.castles,
                    counts.promotions,
                    counts.checks,
                    counts.checkmates
                );
            }
            info!(depth, elapsed_ms = started.elapsed().as_millis() as u64, "perft finished");
        }
        Command::BestMove {
            fen,
            depth,
            deadline_ms,
            parallel,
        } => {
            let position = Position::from_fen(&fen)?;
            if let Some(depth) = depth {
                config.search.max_depth = depth;
            }
            if deadline_ms.is_some() {
                config.search.deadline_ms = deadline_ms;
            }
            config.search.parallel_root |= parallel;

            let result = AlphaBetaEngine::new(config).analyze(&position)?;
            println!(
                "bestmove {} score {} depth {} nodes {} time_ms {}",
                result.best_move,
                result.best_score,
                result.reached_depth,
                result.nodes,
                result.elapsed.as_millis()
            );
        }
        Command::Play {
            white,
            black,
            max_plies,
            seed,
            depth,
        } => {
            if let Some(depth) = depth {
                config.search.max_depth = depth;
            }
            let mut engines = [
                build_engine(white, config, seed),
                build_engine(black, config, seed.wrapping_add(1)),
            ];
            let names = [engines[0].name().to_owned(), engines[1].name().to_owned()];

            let mut record = GameRecord::new();
            while record.len() < max_plies && !classify_record(&record).outcome().is_over() {
                let side = record.current().side_to_move().index();
                let output = engines[side].choose_move(record.current())?;
                record.push_move(&output.best_move)?;
            }

            let status = classify_record(&record);
            info!(plies = record.len(), outcome = ?status.outcome(), "game finished");
            println!("{}", render_position(record.current()));
            println!("{status}\n");
            println!("{}", record.to_pgn(&names[0], &names[1]));
        }
    }

    Ok(())
}

fn build_engine(player: Player, config: EngineConfig, seed: u64) -> Box<dyn Engine> {
    match player {
        Player::AlphaBeta => Box::new(AlphaBetaEngine::new(config)),
        Player::Random => Box::new(RandomEngine::new(seed)),
    }
}
