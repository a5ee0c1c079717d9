use broadside::{BitBoard, BitBoardError, Coord};

#[test]
fn test_try_new_sizes() {
    // Success for board that fits
    let ok = BitBoard::<u128, 10>::try_new();
    assert!(ok.is_ok());

    // Failure when board is too large
    let err = BitBoard::<u8, 3>::try_new();
    assert!(matches!(err, Err(BitBoardError::SizeTooLarge { .. })));
}

#[test]
fn test_set_contains_bounds() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert!(bb.is_empty());

    bb.set(Coord::new(1, 2)).unwrap();
    assert!(bb.contains(Coord::new(1, 2)));
    assert!(!bb.contains(Coord::new(2, 1)));
    assert_eq!(bb.count_ones(), 1);

    assert_eq!(
        bb.set(Coord::new(4, 0)),
        Err(BitBoardError::OutOfBounds(Coord::new(4, 0)))
    );
    assert!(!bb.contains(Coord::new(4, 0)));
}

#[test]
fn test_from_coords_and_iter_row_major() {
    let bb = BitBoard::<u16, 4>::from_coords([Coord::new(3, 3), Coord::new(1, 0)]).unwrap();
    let cells: Vec<_> = bb.iter().collect();
    assert_eq!(cells, vec![Coord::new(1, 0), Coord::new(3, 3)]);
}

#[test]
fn test_complement_stays_on_board() {
    let bb = BitBoard::<u128, 10>::from_coords([Coord::new(0, 0)]).unwrap();
    let open = !bb;
    assert_eq!(open.count_ones(), 99);
    assert!(!open.contains(Coord::new(0, 0)));
    assert!((open & bb).is_empty());
    assert_eq!((open | bb).count_ones(), 100);
}

#[test]
fn test_superset() {
    let small = BitBoard::<u16, 4>::from_coords([Coord::new(0, 0), Coord::new(1, 0)]).unwrap();
    let big = small | BitBoard::<u16, 4>::from_coords([Coord::new(2, 2)]).unwrap();
    assert!(big.is_superset(&small));
    assert!(!small.is_superset(&big));
    assert!(small.is_superset(&BitBoard::new()));
}

#[test]
fn test_collect_drops_off_board_cells() {
    let bb: BitBoard<u16, 4> = [Coord::new(0, 0), Coord::new(4, 1), Coord::new(3, 3)]
        .into_iter()
        .collect();
    assert_eq!(bb.count_ones(), 2);
    assert!(bb.contains(Coord::new(3, 3)));
    assert!(!bb.contains(Coord::new(4, 1)));
}
