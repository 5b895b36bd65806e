use rookery::{ChessError, Position};

#[test]
fn accepts_every_square_on_the_board() {
    for x in 0..8 {
        for y in 0..8 {
            let p = Position::new(x, y).unwrap();
            assert_eq!((p.x() as i32, p.y() as i32), (x, y));
        }
    }
    assert_eq!(Position::all().count(), 64);
}

#[test]
fn rejects_coordinates_off_the_board() {
    for (x, y) in [(-1, 0), (0, -1), (8, 0), (0, 8), (100, -100)] {
        assert_eq!(Position::new(x, y), Err(ChessError::InvalidCoordinate { x, y }));
    }
}

#[test]
fn parses_algebraic_squares() {
    let e4: Position = "e4".parse().unwrap();
    assert_eq!((e4.x(), e4.y()), (4, 3));
    assert_eq!(e4.to_string(), "e4");
    assert!("i1".parse::<Position>().is_err());
    assert!("a9".parse::<Position>().is_err());
    assert!("e".parse::<Position>().is_err());
}
