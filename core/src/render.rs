use serde::{Deserialize, Serialize};

use crate::*;

/// What the presentation layer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderCell {
    /// Closed and unmarked
    Shaded,
    /// Marked, closed or revealed on top of a mine
    Marked,
    /// Open with nothing left to discover around it
    Blank,
    /// Open with more marks than mines around it
    Overflow,
    /// Open with this many mines still to discover around it
    Count(u8),
    /// Revealed mark on a cell without a mine
    WrongMark,
    /// Revealed mine that was never marked
    MissedMine,
}

impl RenderCell {
    pub fn from_state(cell: Cell, mines_to_discover: i8) -> Self {
        use RenderCell::*;

        match (cell.is_open(), cell.is_marked(), cell.has_mine()) {
            (false, false, _) => Shaded,
            (false, true, _) => Marked,
            (true, true, true) => Marked,
            (true, true, false) => WrongMark,
            (true, false, true) => MissedMine,
            (true, false, false) => match mines_to_discover {
                0 => Blank,
                n if n < 0 => Overflow,
                n => Count(n.unsigned_abs()),
            },
        }
    }

    pub fn symbol(self) -> char {
        use RenderCell::*;

        match self {
            Shaded => '\u{2593}',
            Marked => 'X',
            Blank => ' ',
            Overflow => '?',
            Count(n) => char::from_digit(n.into(), 10).unwrap_or('?'),
            WrongMark => '#',
            MissedMine => '*',
        }
    }
}

/// Global figures shown next to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub mines_remaining: isize,
    pub marked: CellCount,
    pub elapsed_secs: u64,
}

impl Board {
    pub fn render_cell(&self, coords: Coord2) -> RenderCell {
        RenderCell::from_state(self.cell_at(coords), self.mines_to_discover(coords))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_cells_hide_their_content() {
        let mut board = Board::load_from_definition((1, 3), &[(0, 0)]).unwrap();
        board.toggle_mark((0, 2)).unwrap();

        assert_eq!(board.render_cell((0, 0)), RenderCell::Shaded);
        assert_eq!(board.render_cell((0, 2)), RenderCell::Marked);
    }

    #[test]
    fn open_cells_show_their_count() {
        let mut board = Board::load_from_definition((1, 4), &[(0, 0)]).unwrap();

        board.open((0, 1), false).unwrap();
        assert_eq!(board.render_cell((0, 1)), RenderCell::Count(1));
        assert_eq!(board.render_cell((0, 1)).symbol(), '1');

        board.toggle_mark((0, 0)).unwrap();
        assert_eq!(board.render_cell((0, 1)), RenderCell::Blank);

        board.toggle_mark((0, 2)).unwrap();
        assert_eq!(board.render_cell((0, 1)), RenderCell::Overflow);
        assert_eq!(board.render_cell((0, 1)).symbol(), '?');
    }

    #[test]
    fn revealed_board_shows_mistakes() {
        let mut board = Board::load_from_definition((1, 4), &[(0, 0), (0, 3)]).unwrap();
        board.toggle_mark((0, 0)).unwrap();
        board.toggle_mark((0, 1)).unwrap();

        board.reveal_all();

        assert_eq!(board.render_cell((0, 0)), RenderCell::Marked);
        assert_eq!(board.render_cell((0, 1)).symbol(), '#');
        assert_eq!(board.render_cell((0, 3)).symbol(), '*');
    }
}
