//! PGN read/write utilities for game history interchange.
//!
//! Serializes a game record to PGN text with SAN movetext and parses PGN
//! back into a record suitable for replay and review.

use std::collections::BTreeMap;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::game_state::classifier::classify_record;
use crate::game_state::game_record::GameRecord;
use crate::game_state::position::Position;
use crate::utils::long_algebraic::long_algebraic_to_move;
use crate::utils::san::{move_to_san, san_to_move};

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub record: GameRecord,
    pub result: String,
}

/// Seven-tag roster plus `SetUp`/`FEN` when the game did not start from the
/// standard position. The result comes from classifying the record.
pub fn write_pgn(record: &GameRecord, white: &str, black: &str) -> String {
    let result = classify_record(record).outcome().result_token();

    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Duel Chess Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert(
        "Date".to_owned(),
        record.started_at().format("%Y.%m.%d").to_string(),
    );
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), white.to_owned());
    headers.insert("Black".to_owned(), black.to_owned());
    headers.insert("Result".to_owned(), result.to_owned());

    let initial_fen = record.initial().to_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    write_pgn_with_headers(record, &headers)
}

/// Tags of the seven-tag roster, in export order.
const SEVEN_TAG_ROSTER: [&str; 7] = ["Event", "Site", "Date", "Round", "White", "Black", "Result"];

/// Roster tags come first in their standard order, the remaining tags follow
/// alphabetically.
pub fn write_pgn_with_headers(record: &GameRecord, headers: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    let roster = SEVEN_TAG_ROSTER
        .iter()
        .filter_map(|&key| headers.get_key_value(key));
    let others = headers
        .iter()
        .filter(|(key, _)| !SEVEN_TAG_ROSTER.contains(&key.as_str()));
    for (key, value) in roster.chain(others) {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut parts = Vec::<String>::with_capacity(record.moves().len() + 1);
    for (index, mv) in record.moves().iter().enumerate() {
        let before = &record.positions()[index];
        let san = move_to_san(before, mv);
        match before.side_to_move() {
            Color::White => parts.push(format!("{}. {}", before.fullmove_number(), san)),
            Color::Black if index == 0 => {
                parts.push(format!("{}... {}", before.fullmove_number(), san))
            }
            Color::Black => parts.push(san),
        }
    }

    let result = headers
        .get("Result")
        .map(|value| normalize_result(value))
        .unwrap_or("*");
    parts.push(result.to_owned());
    out.push_str(&parts.join(" "));
    out.push('\n');
    out
}

/// Movetext tokens may be SAN or long algebraic. Comments and variations are
/// skipped.
pub fn read_pgn(pgn: &str) -> ChessResult<PgnGame> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<&str>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (key, value) = parse_header_line(trimmed)?;
            headers.insert(key, value);
        } else {
            movetext_lines.push(trimmed);
        }
    }

    let initial = if headers.get("SetUp").map(String::as_str) == Some("1") {
        let fen = headers
            .get("FEN")
            .ok_or_else(|| ChessError::InvalidMoveText("SetUp without FEN header".to_owned()))?;
        Position::from_fen(fen)?
    } else {
        Position::new_game()
    };

    let mut record = GameRecord::from_position(initial);
    let mut result = "*".to_owned();

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        let token = strip_move_number(token);
        if token.is_empty() {
            continue;
        }
        if is_result_token(token) {
            result = token.to_owned();
            break;
        }

        let mv = san_to_move(record.current(), token)
            .or_else(|_| long_algebraic_to_move(trim_annotation_suffix(token), record.current()))
            .map_err(|_| ChessError::InvalidMoveText(token.to_owned()))?;
        record.push_move(&mv)?;
    }

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    Ok(PgnGame {
        headers,
        record,
        result,
    })
}

fn parse_header_line(line: &str) -> ChessResult<(String, String)> {
    let invalid = || ChessError::InvalidMoveText(format!("bad PGN header: {line}"));
    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (key, value_raw) = inner.split_once(' ').ok_or_else(invalid)?;
    let value = value_raw
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(invalid)?;
    Ok((key.trim().to_owned(), value.replace("\\\"", "\"")))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// `12.`, `12...` and `12.e4` all lose their number prefix.
fn strip_move_number(token: &str) -> &str {
    let digits = token.len() - token.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 || !token[digits..].starts_with('.') {
        return token;
    }
    token[digits..].trim_start_matches('.')
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played(fen: Option<&str>, moves: &[&str]) -> GameRecord {
        let start = fen
            .map(|fen| Position::from_fen(fen).expect("FEN should parse"))
            .unwrap_or_else(Position::new_game);
        let mut record = GameRecord::from_position(start);
        for lan in moves {
            let mv = long_algebraic_to_move(lan, record.current()).expect("legal move");
            record.push_move(&mv).expect("move should apply");
        }
        record
    }

    #[test]
    fn writes_san_movetext_and_result() {
        let record = played(None, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        let pgn = write_pgn(&record, "Alice", "Bob");
        assert!(pgn.contains("[White \"Alice\"]"));
        assert!(pgn.contains("[Result \"0-1\"]"));
        assert!(!pgn.contains("[FEN"));
        assert!(pgn.trim_end().ends_with("1. f3 e5 2. g4 Qh4# 0-1"));
    }

    #[test]
    fn headers_follow_roster_order() {
        let record = played(Some("4k3/4p3/8/8/8/8/4P3/4K3 w - - 0 1"), &["e2e4"]);
        let pgn = write_pgn(&record, "W", "B");
        let tags: Vec<&str> = pgn
            .lines()
            .take_while(|line| line.starts_with('['))
            .filter_map(|line| line[1..].split(' ').next())
            .collect();
        assert_eq!(
            tags,
            ["Event", "Site", "Date", "Round", "White", "Black", "Result", "FEN", "SetUp"]
        );

        let mut custom = BTreeMap::new();
        custom.insert("Annotator".to_owned(), "me".to_owned());
        custom.insert("White".to_owned(), "W".to_owned());
        let text = write_pgn_with_headers(&record, &custom);
        assert!(text.starts_with("[White \"W\"]\n[Annotator \"me\"]\n"));
    }

    #[test]
    fn round_trip_start_position_history() {
        let record = played(None, &["e2e4", "e7e5", "g1f3", "b8c6"]);
        let parsed = read_pgn(&write_pgn(&record, "W", "B")).expect("PGN should parse");
        assert_eq!(parsed.record.moves(), record.moves());
        assert_eq!(parsed.record.current().to_fen(), record.current().to_fen());
        assert_eq!(parsed.result, "*");
    }

    #[test]
    fn round_trip_custom_setup_with_black_to_move() {
        let record = played(Some("4k3/4p3/8/8/8/8/4P3/4K3 b - - 0 7"), &["e7e5", "e2e4"]);
        let pgn = write_pgn(&record, "W", "B");
        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains("7... e5 8. e4"));

        let parsed = read_pgn(&pgn).expect("PGN should parse");
        assert_eq!(parsed.record.initial().to_fen(), record.initial().to_fen());
        assert_eq!(parsed.record.moves(), record.moves());
    }

    #[test]
    fn reads_comments_variations_and_long_algebraic() {
        let text = "[Event \"x\"]\n\n1.e4 {best by test} e5 (1... c5) 2. g1f3 Nc6 1-0\n";
        let parsed = read_pgn(text).expect("PGN should parse");
        assert_eq!(parsed.record.len(), 4);
        assert_eq!(parsed.result, "1-0");
        assert!(matches!(
            read_pgn("1. e4 e4 *"),
            Err(ChessError::InvalidMoveText(_))
        ));
    }
}
