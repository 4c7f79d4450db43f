extern crate chequer;

use std::collections::HashSet;

use chequer::board::*;

#[test]
fn initial_pieces() {
    let board = Board::initial();
    assert_eq!(board.count(Cell::Light), 12);
    assert_eq!(board.count(Cell::Dark), 12);
    assert_eq!(board.count(Cell::Empty), 40);
}

#[test]
fn counter_rule() {
    let board = Board::initial();

    let mut k = 0;
    for row in 0..SIZE {
        for col in 0..3 {
            let expected = if k % 2 == 0 { Cell::Light } else { Cell::Empty };
            assert_eq!(board.get(col, row), Some(expected), "({}, {})", col, row);
            k += 1;
        }
    }

    let mut k = 0;
    for row in 0..SIZE {
        for col in 5..8 {
            let expected = if (k + 1) % 2 == 0 { Cell::Dark } else { Cell::Empty };
            assert_eq!(board.get(col, row), Some(expected), "({}, {})", col, row);
            k += 1;
        }
    }

    for row in 0..SIZE {
        for col in 3..5 {
            assert_eq!(board.get(col, row), Some(Cell::Empty));
        }
    }

    assert_eq!(board.get(SIZE, 0), None);
}

#[test]
fn pieces_stand_on_dark_tiles() {
    let board = Board::initial();
    for (col, row, _) in board.pieces() {
        assert!(Board::is_dark_tile(col, row), "({}, {})", col, row);
    }
}

#[test]
fn tiles_do_not_overlap() {
    let mut seen = HashSet::new();
    for (col, row, _) in Board::initial().cells() {
        let p = Board::tile_position(col, row);
        assert_eq!(p.y, 0.0);
        assert!(p.x.abs() <= 3.5 && p.z.abs() <= 3.5);
        assert!(seen.insert(((p.x * 2.0) as i32, (p.z * 2.0) as i32)));
    }

    assert_eq!(seen.len(), SIZE * SIZE);
}
