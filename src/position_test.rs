use super::*;
use crate::piece::{Color, PieceKind};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn pc(s: &str) -> PieceCode {
    s.parse().unwrap()
}

// =============================================================
// Construction
// =============================================================

#[test]
fn start_has_32_pieces() {
    let start = Position::start();
    assert_eq!(start.len(), 32);
    assert_eq!(start.get(sq("e1")), Some(PieceCode::new(Color::White, PieceKind::King)));
    assert_eq!(start.get(sq("d8")), Some(PieceCode::new(Color::Black, PieceKind::Queen)));
    assert_eq!(start.get(sq("e4")), None);
}

#[test]
fn from_pairs_accepts_valid_entries() {
    let pos = Position::from_pairs([("e4", "wP"), ("d5", "bP")]).unwrap();
    assert_eq!(pos.len(), 2);
    assert_eq!(pos.get(sq("d5")), Some(pc("bP")));
}

#[test]
fn from_pairs_rejects_bad_square() {
    let err = Position::from_pairs([("e9", "wP")]).unwrap_err();
    assert!(matches!(err, BoardError::InvalidPosition(_)));
}

#[test]
fn from_pairs_rejects_bad_piece() {
    let err = Position::from_pairs([("e4", "wX")]).unwrap_err();
    assert!(matches!(err, BoardError::InvalidPosition(_)));
}

#[test]
fn equality_is_structural() {
    let a = Position::from_pairs([("a1", "wR"), ("h8", "bR")]).unwrap();
    let b = Position::from_pairs([("h8", "bR"), ("a1", "wR")]).unwrap();
    assert_eq!(a, b);
}

// =============================================================
// Moves
// =============================================================

#[test]
fn move_parses_dash_form() {
    let mv: Move = "e2-e4".parse().unwrap();
    assert_eq!(mv, Move::new(sq("e2"), sq("e4")));
    assert_eq!(mv.to_string(), "e2-e4");
}

#[test]
fn move_rejects_malformed() {
    for bad in ["e2e4", "e2-", "-e4", "e2-e9", "e2-e4-e5"] {
        assert!(matches!(bad.parse::<Move>(), Err(BoardError::InvalidMove(_))), "{bad:?}");
    }
}

#[test]
fn with_moves_relocates_and_captures() {
    let pos = Position::from_pairs([("e4", "wP"), ("d5", "bP")]).unwrap();
    let next = pos.with_moves(&[Move::new(sq("e4"), sq("d5"))]).unwrap();
    assert_eq!(next.len(), 1);
    assert_eq!(next.get(sq("d5")), Some(pc("wP")));
    assert_eq!(pos.len(), 2, "source position is untouched");
}

#[test]
fn with_moves_applies_in_order() {
    let pos = Position::from_pairs([("a1", "wR")]).unwrap();
    let moves = [Move::new(sq("a1"), sq("a4")), Move::new(sq("a4"), sq("h4"))];
    let next = pos.with_moves(&moves).unwrap();
    assert_eq!(next.get(sq("h4")), Some(pc("wR")));
    assert_eq!(next.len(), 1);
}

#[test]
fn with_moves_rejects_empty_source() {
    let pos = Position::start();
    let err = pos.with_moves(&[Move::new(sq("e4"), sq("e5"))]).unwrap_err();
    assert_eq!(err, BoardError::IllegalEmptySource(sq("e4")));
}

// =============================================================
// Display and serde
// =============================================================

#[test]
fn display_draws_rank_eight_first() {
    let text = Position::start().to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "8 rnbqkbnr");
    assert_eq!(lines[4], "4 ........");
    assert_eq!(lines[7], "1 RNBQKBNR");
    assert_eq!(lines[8], "  abcdefgh");
}

#[test]
fn serde_is_a_flat_map() {
    let pos = Position::from_pairs([("e4", "wP")]).unwrap();
    let json = serde_json::to_value(&pos).unwrap();
    assert_eq!(json, serde_json::json!({ "e4": "wP" }));
    let back: Position = serde_json::from_value(json).unwrap();
    assert_eq!(back, pos);
}
