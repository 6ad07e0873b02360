use hexmines_core::*;

// Even rows are drawn half a cell to the right of odd rows, matching the
// neighbor layout of the board.
const EVEN_MARGIN: usize = 4;
const ODD_MARGIN: usize = 2;

/// Draws the stats line, the column header and the hex grid.
pub fn render(session: &GameSession) -> String {
    let stats = session.stats();
    let mut text = format!(
        "MINES LEFT: {} | MARKED: {} | TIME: {}s\n",
        stats.mines_remaining, stats.marked, stats.elapsed_secs
    );
    text.push_str(&render_board(session.board()));
    text
}

pub fn render_board(board: &Board) -> String {
    let (rows, cols) = board.size();
    let cols = usize::from(cols);
    let mut text = String::new();

    text.push_str(&" ".repeat(EVEN_MARGIN + 2));
    let header: Vec<String> = (0..cols)
        .map(|col| column_symbol(col as Coord).unwrap_or(' ').to_string())
        .collect();
    text.push_str(&header.join("   "));
    text.push('\n');

    text.push_str(&" ".repeat(EVEN_MARGIN));
    text.push_str(&border('┌', '┬', '┐', cols));

    for row in 0..rows {
        let even = row % 2 == 0;
        let label = row_symbol(row).unwrap_or(' ');
        let margin = if even { EVEN_MARGIN } else { ODD_MARGIN };
        text.push_str(&format!("{:<width$}│", label, width = margin));
        for col in 0..cols {
            let symbol = board.render_cell((row, col as Coord)).symbol();
            text.push_str(&format!(" {} │", symbol));
        }
        text.push('\n');

        if row + 1 == rows {
            text.push_str(&" ".repeat(margin));
            text.push_str(&border('└', '┴', '┘', cols));
        } else {
            text.push_str(&" ".repeat(ODD_MARGIN));
            if even {
                text.push_str(&seam("┌─┴─┬", "─┴─┬", "─┘", cols));
            } else {
                text.push_str(&seam("└─┬─┴", "─┬─┴", "─┐", cols));
            }
        }
    }

    text
}

fn border(left: char, joint: char, right: char, cols: usize) -> String {
    let mut line = String::from(left);
    for col in 0..cols {
        line.push_str("───");
        line.push(if col + 1 == cols { right } else { joint });
    }
    line.push('\n');
    line
}

/// Border between two rows with different offsets.
fn seam(first: &str, repeated: &str, last: &str, cols: usize) -> String {
    let mut line = String::from(first);
    line.push_str(&repeated.repeat(cols.saturating_sub(1)));
    line.push_str(last);
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_cell_board() {
        let board = Board::new((1, 1)).unwrap();

        let expected = concat!(
            "      a\n",
            "    ┌───┐\n",
            "A   │ ▓ │\n",
            "    └───┘\n",
        );
        assert_eq!(render_board(&board), expected);
    }

    #[test]
    fn odd_rows_are_shifted_left() {
        let mut board = Board::load_from_definition((2, 2), &[(0, 0)]).unwrap();
        board.open((1, 1), false).unwrap();
        board.toggle_mark((0, 1)).unwrap();

        let expected = concat!(
            "      a   b\n",
            "    ┌───┬───┐\n",
            "A   │ ▓ │ X │\n",
            "  ┌─┴─┬─┴─┬─┘\n",
            "B │ ▓ │   │\n",
            "  └───┴───┘\n",
        );
        assert_eq!(render_board(&board), expected);
    }

    #[test]
    fn three_rows_alternate_seams() {
        let board = Board::new((3, 1)).unwrap();

        let lines: Vec<_> = render_board(&board).lines().map(str::to_owned).collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[3], "  ┌─┴─┬─┘");
        assert_eq!(lines[5], "  └─┬─┴─┐");
        assert_eq!(lines[7], "    └───┘");
    }

    #[test]
    fn stats_line_comes_first() {
        let definition: BoardDefinition = "1 2\n*.\n".parse().unwrap();
        let session = GameSession::from_generator(definition).unwrap();

        let text = render(&session);

        assert!(text.starts_with("MINES LEFT: 1 | MARKED: 0 | TIME: "));
    }
}
