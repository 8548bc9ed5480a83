use super::*;

#[test]
fn codes_are_distinct() {
    let errors = [
        BoardError::InvalidFormat(String::new()),
        BoardError::InvalidPosition(String::new()),
        BoardError::InvalidSquare(String::new()),
        BoardError::InvalidPieceCode(String::new()),
        BoardError::InvalidConfiguration { field: "draggable", reason: String::new() },
        BoardError::IllegalEmptySource(Square::new(0, 0).unwrap_or_default()),
        BoardError::InvalidMove(String::new()),
        BoardError::Destroyed,
    ];
    for (i, a) in errors.iter().enumerate() {
        for (j, b) in errors.iter().enumerate() {
            if i != j {
                assert_ne!(a.code(), b.code(), "{a:?} and {b:?} share a code");
            }
        }
    }
}

#[test]
fn report_text_includes_code_and_message() {
    let err = BoardError::InvalidMove("e2e4".into());
    let text = err.report_text();
    assert!(text.starts_with("Chessboard Error 2826: "));
    assert!(text.contains("e2e4"));
}

#[test]
fn configuration_error_names_field() {
    let err = BoardError::InvalidConfiguration { field: "moveSpeed", reason: "negative".into() };
    assert_eq!(err.to_string(), "invalid configuration for `moveSpeed`: negative");
}

#[test]
fn empty_source_names_square() {
    let sq: Square = "e2".parse().unwrap();
    assert_eq!(BoardError::IllegalEmptySource(sq).to_string(), "no piece on source square e2");
}
