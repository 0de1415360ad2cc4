use crate::{column_to_engine_letter, BoardSnapshot, MoveCoordinate};

/// Draws the board the way the engine does in ASCII mode, with the engine's
/// column letters and the last move in parentheses.
pub fn visualize_board(board: &BoardSnapshot, last_move: MoveCoordinate) -> String {
    let size = board.size();
    let header: String = (0..size)
        .filter_map(column_to_engine_letter)
        .map(|letter| format!(" {}", letter))
        .collect();
    let highlighted = match last_move {
        MoveCoordinate::Point { row, col } => Some((row, col)),
        _ => None,
    };

    let mut result = format!("   {}\n", header);
    for (row, cells) in board.rows().enumerate() {
        let rank = size - row;
        result += &format!("{:>3}", rank);
        for (col, cell) in cells.iter().enumerate() {
            if highlighted == Some((row, col)) {
                result += &format!("({})", cell.render_char());
            } else if col > 0 && highlighted == Some((row, col - 1)) {
                result.push(cell.render_char());
            } else {
                result += &format!(" {}", cell.render_char());
            }
        }
        if highlighted.is_some_and(|(r, c)| r == row && c + 1 == size) {
            result += &format!("{}\n", rank);
        } else {
            result += &format!(" {}\n", rank);
        }
    }
    result += &format!("   {}", header);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board_blocks, Cell};

    #[test]
    fn rendering_reads_back() {
        let board = BoardSnapshot::empty(9)
            .with_cell(0, 8, Cell::White)
            .with_cell(4, 4, Cell::Black)
            .with_cell(8, 0, Cell::White);
        for last_move in [
            MoveCoordinate::Point { row: 4, col: 4 },
            MoveCoordinate::Point { row: 0, col: 8 },
            MoveCoordinate::Point { row: 8, col: 0 },
            MoveCoordinate::Pass,
        ] {
            let text = visualize_board(&board, last_move);
            let lines: Vec<&str> = text.lines().collect();
            assert_eq!(board_blocks(&lines), vec![board.clone()]);
        }
    }

    #[test]
    fn engine_letters_in_header() {
        let text = visualize_board(&BoardSnapshot::empty(9), MoveCoordinate::NoPosition);
        let first_line = text.lines().next().unwrap();
        assert_eq!(first_line, "    A B C D E F G H J");
        assert!(text.contains("  5 . . . . . . . . . 5"));
    }
}
