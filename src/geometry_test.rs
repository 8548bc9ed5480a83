#![allow(clippy::float_cmp)]

use super::*;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn white_board() -> GeometryCache {
    GeometryCache::build(pt(100.0, 50.0), 40.0, Orientation::White, false)
}

// =============================================================
// Rect
// =============================================================

#[test]
fn rect_contains_is_half_open() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(pt(0.0, 0.0)));
    assert!(r.contains(pt(9.99, 9.99)));
    assert!(!r.contains(pt(10.0, 5.0)));
    assert!(!r.contains(pt(5.0, 10.0)));
    assert!(!r.contains(pt(-0.1, 5.0)));
}

#[test]
fn rect_centered() {
    let r = Rect::centered(pt(50.0, 50.0), 20.0);
    assert_eq!(r, Rect::new(40.0, 40.0, 20.0, 20.0));
}

// =============================================================
// Square size
// =============================================================

#[test]
fn square_size_rounds_down_below_width() {
    assert_eq!(square_size_for_width(400.0), 49.0);
    assert_eq!(square_size_for_width(401.0), 50.0);
    assert_eq!(square_size_for_width(329.5), 41.0);
}

#[test]
fn square_size_zero_for_tiny_or_bad_widths() {
    assert_eq!(square_size_for_width(0.0), 0.0);
    assert_eq!(square_size_for_width(5.0), 0.0);
    assert_eq!(square_size_for_width(f64::NAN), 0.0);
    assert_eq!(square_size_for_width(-10.0), 0.0);
}

// =============================================================
// Layout
// =============================================================

#[test]
fn white_orientation_puts_a8_top_left() {
    let g = white_board();
    assert_eq!(g.square_rect(sq("a8")), Some(Rect::new(100.0, 50.0, 40.0, 40.0)));
    assert_eq!(g.square_rect(sq("h1")), Some(Rect::new(380.0, 330.0, 40.0, 40.0)));
}

#[test]
fn black_orientation_puts_h1_top_left() {
    let g = GeometryCache::build(pt(0.0, 0.0), 10.0, Orientation::Black, false);
    assert_eq!(g.square_rect(sq("h1")), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    assert_eq!(g.square_rect(sq("a8")), Some(Rect::new(70.0, 70.0, 10.0, 10.0)));
}

#[test]
fn board_rect_covers_grid() {
    assert_eq!(white_board().board_rect(), Rect::new(100.0, 50.0, 320.0, 320.0));
}

#[test]
fn no_spares_unless_enabled() {
    assert!(white_board().spares().is_empty());
}

#[test]
fn spares_sit_above_and_below() {
    let g = GeometryCache::build(pt(0.0, 100.0), 10.0, Orientation::White, true);
    assert_eq!(g.spares().len(), 12);
    let bk: PieceCode = "bK".parse().unwrap();
    let wp: PieceCode = "wP".parse().unwrap();
    assert_eq!(g.spare_rect(bk), Some(Rect::new(10.0, 90.0, 10.0, 10.0)));
    assert_eq!(g.spare_rect(wp), Some(Rect::new(60.0, 180.0, 10.0, 10.0)));
}

#[test]
fn spares_swap_with_orientation() {
    let g = GeometryCache::build(pt(0.0, 100.0), 10.0, Orientation::Black, true);
    let wk: PieceCode = "wK".parse().unwrap();
    assert_eq!(g.spare_rect(wk), Some(Rect::new(10.0, 90.0, 10.0, 10.0)));
}

// =============================================================
// Hit testing
// =============================================================

#[test]
fn locate_finds_square_under_point() {
    let g = white_board();
    assert_eq!(g.locate(pt(101.0, 51.0)), Location::Square(sq("a8")));
    assert_eq!(g.locate(pt(419.0, 369.0)), Location::Square(sq("h1")));
    assert_eq!(g.locate(pt(100.0 + 4.5 * 40.0, 50.0 + 4.5 * 40.0)), Location::Square(sq("e4")));
}

#[test]
fn locate_reports_offboard_outside_grid() {
    let g = white_board();
    assert_eq!(g.locate(pt(99.0, 60.0)), Location::Offboard);
    assert_eq!(g.locate(pt(420.0, 60.0)), Location::Offboard);
    assert_eq!(g.locate(pt(200.0, 370.0)), Location::Offboard);
}

#[test]
fn locate_on_collapsed_board_is_offboard() {
    let g = GeometryCache::build(pt(0.0, 0.0), 0.0, Orientation::White, false);
    assert_eq!(g.locate(pt(0.0, 0.0)), Location::Offboard);
}

#[test]
fn spare_at_finds_pile_piece() {
    let g = GeometryCache::build(pt(0.0, 100.0), 10.0, Orientation::White, true);
    assert_eq!(g.spare_at(pt(15.0, 95.0)), Some("bK".parse().unwrap()));
    assert_eq!(g.spare_at(pt(5.0, 95.0)), None);
}

// =============================================================
// Orientation and Location
// =============================================================

#[test]
fn orientation_parse_and_flip() {
    assert_eq!("black".parse::<Orientation>().unwrap(), Orientation::Black);
    assert!("flip".parse::<Orientation>().is_err());
    assert_eq!(Orientation::White.flipped(), Orientation::Black);
    assert_eq!(Orientation::Black.to_string(), "black");
}

#[test]
fn location_display() {
    assert_eq!(Location::Square(sq("e4")).to_string(), "e4");
    assert_eq!(Location::Offboard.to_string(), "offboard");
    assert_eq!(Location::Offboard.square(), None);
}
