//! Crate root module declarations for the duel_chess rules engine.
//!
//! Exposes the position model, move generation, game classification, search
//! and engines, notation helpers, and the narrow `game_api` facade used by
//! request handlers and the CLI.

pub mod config;
pub mod errors;
pub mod game_api;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod classifier;
    pub mod game_record;
    pub mod mailbox;
    pub mod position;
}

pub mod moves {
    pub mod leaper_attacks;
    pub mod move_description;
    pub mod slider_attacks;
}

pub mod move_generation {
    pub mod attacks;
    pub mod legal_move_apply;
    pub mod legal_move_generator;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod legal_moves_piece;
    pub mod move_generator;
    pub mod perft;
    pub mod pins;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod move_ordering;
}

pub mod engines {
    pub mod engine_alpha_beta;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_position;
    pub mod san;
}
