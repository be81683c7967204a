use super::*;

#[test]
fn test_position_orders_by_line_then_col() {
    assert!(Position::new(9, 0) < Position::new(0, 1));
    assert!(Position::new(1, 2) < Position::new(2, 2));
    assert_eq!(Position::new(3, 4).max(Position::new(5, 3)), Position::new(3, 4));
}

#[test]
fn test_scope_start_end_ignore_direction() {
    let forward = Scope::new((1, 0), (2, 3));
    let backward = Scope::new((2, 3), (1, 0));

    assert_eq!(forward.start(), Position::new(1, 0));
    assert_eq!(forward.end(), Position::new(2, 3));
    assert_eq!(backward.start(), forward.start());
    assert_eq!(backward.end(), forward.end());
    // stored direction is preserved
    assert_eq!(backward.src, Position::new(2, 3));
}

#[test]
fn test_scope_contains() {
    let scope = Scope::new((4, 1), (2, 0));
    assert!(scope.contains(Position::new(2, 0)));
    assert!(scope.contains(Position::new(80, 0)));
    assert!(scope.contains(Position::new(4, 1)));
    assert!(!scope.contains(Position::new(5, 1)));
    assert!(!scope.is_single_line());
}

#[test]
fn test_point_advance() {
    let start = Point::new(2, 3);
    assert_eq!(start.advance(""), start);
    assert_eq!(start.advance("ab"), Point::new(2, 5));
    assert_eq!(start.advance("ab\n"), Point::new(3, 0));
    assert_eq!(start.advance("a\nb\ncd"), Point::new(4, 2));
    // columns are bytes
    assert_eq!(Point::new(0, 0).advance("é"), Point::new(0, 2));
}
