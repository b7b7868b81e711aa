//! Property tests for the rules core and the engine.
//!
//! Boards, shapes and command streams are generated; the assertions are the rules
//! that must hold for any of them.

use happy_tetris::core::{
    drop_interval_ms, level_for_lines, line_clear_score, Board, Matrix, Piece,
};
use happy_tetris::engine::GameEngine;
use happy_tetris::types::{
    Cell, Command, PieceKind, SessionState, BOARD_HEIGHT, BOARD_WIDTH, DROP_INTERVAL_FLOOR_MS,
    EMPTY, LINE_SCORES,
};
use proptest::prelude::*;

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

fn arb_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

/// Random board; `density` in percent.
fn arb_board(density: u32) -> impl Strategy<Value = Board> {
    prop::collection::vec(prop::bool::weighted(density as f64 / 100.0), W * H).prop_map(|filled| {
        let mut board = Board::default();
        for (i, on) in filled.into_iter().enumerate() {
            if on {
                board.set((i % W) as i16, (i / W) as i16, PieceKind::ALL[i % 7].id());
            }
        }
        board
    })
}

/// Empty top half; each bottom-half row is full or has one hole.
fn arb_stacked_board() -> impl Strategy<Value = Board> {
    prop::collection::vec(prop::option::weighted(0.4, 0..W), H).prop_map(|rows| {
        let mut board = Board::default();
        for (y, hole) in rows.into_iter().enumerate().skip(H / 2) {
            for x in 0..W {
                if Some(x) != hole {
                    board.set(x as i16, y as i16, PieceKind::S.id());
                }
            }
        }
        board
    })
}

/// Arbitrary shape up to 4x4 with at least one filled cell.
fn arb_matrix() -> impl Strategy<Value = Matrix> {
    (1usize..=4, 1usize..=4)
        .prop_flat_map(|(rows, cols)| {
            (Just(cols), prop::collection::vec(prop::bool::ANY, rows * cols))
        })
        .prop_filter("needs a filled cell", |(_, cells)| cells.iter().any(|&c| c))
        .prop_map(|(cols, cells)| {
            let values: Vec<Cell> = cells.iter().map(|&c| if c { 7 } else { EMPTY }).collect();
            let rows: Vec<&[Cell]> = values.chunks(cols).collect();
            Matrix::from_rows(&rows).unwrap()
        })
}

fn arb_command() -> impl Strategy<Value = Command> {
    prop::sample::select(vec![
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::HardDrop,
        Command::Rotate,
        Command::Rotate,
        Command::MoveLeft,
        Command::MoveRight,
        Command::TogglePause,
    ])
}

/// Reference collision: walls and floor always, locked cells only inside the grid.
fn collides_by_hand(board: &Board, m: &Matrix, x: i16, y: i16) -> bool {
    m.occupied().any(|(mx, my, _)| {
        let (bx, by) = (x + mx, y + my);
        if bx < 0 || bx >= W as i16 || by >= H as i16 {
            return true;
        }
        by >= 0 && board.get(bx, by) != Some(EMPTY)
    })
}

fn full_rows(board: &Board) -> usize {
    (0..H).filter(|&y| board.is_row_full(y)).count()
}

fn occupied(board: &Board) -> usize {
    board.cells().iter().filter(|&&c| c != EMPTY).count()
}

proptest! {
    #[test]
    fn collides_matches_cell_by_cell_check(
        board in arb_board(30),
        kind in arb_kind(),
        x in -4i16..16,
        y in -6i16..28,
    ) {
        let piece = Piece::new(kind);
        prop_assert_eq!(
            board.collides(piece.matrix(), x, y),
            collides_by_hand(&board, piece.matrix(), x, y)
        );
    }

    #[test]
    fn merge_then_collides_at_same_spot(kind in arb_kind(), x in 0i16..8, y in 0i16..20) {
        let mut board = Board::default();
        let piece = Piece::new(kind);
        prop_assume!(!board.collides(piece.matrix(), x, y));
        board.merge_piece(piece.matrix(), x, y);
        prop_assert!(board.collides(piece.matrix(), x, y));
        prop_assert_eq!(occupied(&board), 4);
    }

    #[test]
    fn clear_full_lines_removes_exactly_full_rows(mut board in arb_stacked_board()) {
        let full = full_rows(&board);
        let before = occupied(&board);
        let survivors: Vec<Vec<Cell>> = (0..H)
            .filter(|&y| !board.is_row_full(y))
            .map(|y| board.cells()[y * W..(y + 1) * W].to_vec())
            .collect();

        let cleared = board.clear_full_lines();

        prop_assert_eq!(cleared, full);
        prop_assert_eq!(full_rows(&board), 0);
        prop_assert_eq!(occupied(&board), before - cleared * W);
        // Surviving rows keep their order and sit at the bottom under empty rows.
        for (i, row) in survivors.iter().enumerate() {
            let y = cleared + i;
            prop_assert_eq!(&board.cells()[y * W..(y + 1) * W], row.as_slice());
        }
        prop_assert_eq!(board.clear_full_lines(), 0);
    }

    #[test]
    fn four_rotations_restore_any_shape(m in arb_matrix()) {
        let mut r = m.clone();
        for _ in 0..4 {
            r = r.rotated_cw();
        }
        prop_assert_eq!(r, m);
    }

    #[test]
    fn rotation_keeps_cell_count_and_swaps_sides(m in arb_matrix()) {
        let r = m.rotated_cw();
        prop_assert_eq!(r.occupied().count(), m.occupied().count());
        prop_assert_eq!((r.cols(), r.rows()), (m.rows(), m.cols()));
    }

    #[test]
    fn scoring_laws(lines in 0usize..10, level in 1u32..50, total in 0u32..10_000) {
        prop_assert_eq!(line_clear_score(lines, level), LINE_SCORES[lines.min(4)] * level);
        prop_assert_eq!(level_for_lines(total), total / 10 + 1);
        prop_assert!(drop_interval_ms(level) >= DROP_INTERVAL_FLOOR_MS);
        prop_assert!(drop_interval_ms(level + 1) <= drop_interval_ms(level));
    }

    #[test]
    fn engine_never_leaves_piece_in_collision(
        seed in any::<u32>(),
        commands in prop::collection::vec(arb_command(), 1..300),
    ) {
        let mut engine = GameEngine::new(seed);
        engine.start();
        let mut score = 0;
        let mut level = 1;
        let mut lines = 0;

        for (i, command) in commands.into_iter().enumerate() {
            engine.apply(command);
            engine.update(i as u64 * 500);

            prop_assert!(engine.score() >= score);
            prop_assert!(engine.level() >= level);
            prop_assert!(engine.lines() >= lines);
            prop_assert_eq!(engine.level(), engine.lines() / 10 + 1);
            score = engine.score();
            level = engine.level();
            lines = engine.lines();

            if engine.state() == SessionState::GameOver {
                break;
            }
            let piece = engine.player().current().unwrap();
            let (x, y) = engine.player().position();
            prop_assert!(!engine.board().collides(piece.matrix(), x, y));
            prop_assert_eq!(full_rows(engine.board()), 0);
        }
    }
}
