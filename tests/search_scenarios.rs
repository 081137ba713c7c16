use duel_chess::config::{EngineConfig, EvaluationKind};
use duel_chess::engines::engine_alpha_beta::AlphaBetaEngine;
use duel_chess::engines::engine_random::RandomEngine;
use duel_chess::engines::engine_trait::Engine;
use duel_chess::game_api;
use duel_chess::game_state::classifier::{classify_record, DrawReason, GameOutcome};
use duel_chess::game_state::game_record::GameRecord;
use duel_chess::game_state::position::Position;
use duel_chess::move_generation::legal_move_generator::{legal_moves, LegalMoveGenerator};
use duel_chess::search::board_scoring::{MaterialScorer, PieceSquareScorer, MATE_SCORE};
use duel_chess::search::iterative_deepening::{search, SearchConfig};
use duel_chess::utils::algebraic::algebraic_to_square;
use duel_chess::utils::pgn::read_pgn;

fn position(fen: &str) -> Position {
    Position::from_fen(fen).expect("FEN should parse")
}

#[test]
fn mate_in_one_for_either_side() {
    for (fen, expected) in [
        ("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", "a1a8"),
        ("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1", "a8a1"),
    ] {
        let game = position(fen);
        let mv = game_api::select_move(&game, 3).expect("move");
        assert_eq!(mv.to_string(), expected, "{fen}");

        let result = search(&game, &LegalMoveGenerator, &MaterialScorer, &SearchConfig::with_depth(2))
            .expect("search");
        assert_eq!(result.best_score, MATE_SCORE - 1);
    }
}

#[test]
fn single_legal_move_is_returned_at_every_depth() {
    let game = position("k7/8/8/8/8/8/6r1/7K w - - 0 1");
    assert_eq!(legal_moves(&game).len(), 1);
    for depth in 0..=4 {
        let mv = game_api::select_move(&game, depth).expect("move");
        assert_eq!(mv.to_string(), "h1g2", "depth {depth}");
    }
}

#[test]
fn winning_capture_is_taken() {
    // Only the f1 queen reaches the undefended queen on b5.
    let game = position("4k3/8/8/1q6/8/8/8/4KQ2 w - - 0 1");
    for depth in 1..=3 {
        let mv = game_api::select_move(&game, depth).expect("move");
        assert_eq!(mv.to_string(), "f1b5", "depth {depth}");
    }

    let result = search(&game, &LegalMoveGenerator, &MaterialScorer, &SearchConfig::with_depth(1))
        .expect("search");
    assert!(result.best_score >= 900);
}

#[test]
fn search_is_deterministic_and_parallel_agrees() {
    let game = Position::new_game();
    let sequential = SearchConfig::with_depth(3);
    let parallel = SearchConfig {
        parallel_root: true,
        ..sequential
    };

    let first = search(&game, &LegalMoveGenerator, &PieceSquareScorer, &sequential).expect("search");
    let second = search(&game, &LegalMoveGenerator, &PieceSquareScorer, &sequential).expect("search");
    let split = search(&game, &LegalMoveGenerator, &PieceSquareScorer, &parallel).expect("search");

    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.best_score, second.best_score);
    assert_eq!(first.best_move, split.best_move);
    assert_eq!(first.best_score, split.best_score);
    assert!(legal_moves(&game).contains(&first.best_move));
}

#[test]
fn engine_against_random_plays_only_legal_moves() {
    let mut engines: [Box<dyn Engine>; 2] = [
        Box::new(AlphaBetaEngine::new(EngineConfig {
            search: SearchConfig::with_depth(2),
            evaluation: EvaluationKind::PieceSquare,
        })),
        Box::new(RandomEngine::new(42)),
    ];

    let mut record = GameRecord::new();
    while record.len() < 40 && !classify_record(&record).outcome().is_over() {
        let side = record.current().side_to_move().index();
        let output = engines[side].choose_move(record.current()).expect("engine move");
        record
            .push_move(&output.best_move)
            .expect("engine moves are legal");
    }
    assert!(!record.is_empty());

    let pgn = record.to_pgn("AlphaBeta", "Random");
    let parsed = read_pgn(&pgn).expect("PGN should parse");
    assert_eq!(parsed.record.moves(), record.moves());
    assert_eq!(parsed.headers.get("White").map(String::as_str), Some("AlphaBeta"));
    let date = parsed.headers.get("Date").expect("date header");
    assert_eq!(date, &record.started_at().format("%Y.%m.%d").to_string());
}

#[test]
fn knight_shuffle_is_a_threefold_draw() {
    let mut record = GameRecord::new();
    let sq = |name: &str| algebraic_to_square(name).expect("square");
    for _ in 0..2 {
        for (from, to) in [("b1", "c3"), ("b8", "c6"), ("c3", "b1"), ("c6", "b8")] {
            record.play(sq(from), sq(to), None).expect("legal move");
        }
    }
    let status = classify_record(&record);
    assert!(status.is_threefold_repetition);
    assert!(status.is_draw);
    assert_eq!(status.outcome(), GameOutcome::Draw(DrawReason::ThreefoldRepetition));
    assert!(record.to_pgn("W", "B").contains("[Result \"1/2-1/2\"]"));
}
