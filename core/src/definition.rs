use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

pub const MINE_SYMBOL: char = '*';
pub const EMPTY_SYMBOL: char = '.';

/// Board layout read from text.
///
/// The first line holds `<rows> <cols>`, each in `1..=30`, followed by one
/// line per row with one character per column: `*` for a mine, `.` for an
/// empty cell.
///
/// ```text
/// 2 4
/// *.*.
/// ...*
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDefinition {
    pub size: Coord2,
    /// Mine coordinates in row-major order.
    pub mines: Vec<Coord2>,
}

impl BoardDefinition {
    pub fn mine_count(&self) -> CellCount {
        // bounded by rows * cols, at most 900
        self.mines.len() as CellCount
    }
}

fn parse_side(token: Option<&str>) -> Result<Coord> {
    token
        .and_then(|token| token.parse::<Coord>().ok())
        .filter(|side| (1..=MAX_SIDE).contains(side))
        .ok_or(GameError::MalformedDefinition)
}

impl FromStr for BoardDefinition {
    type Err = GameError;

    fn from_str(text: &str) -> Result<Self> {
        let mut lines = text.lines().skip_while(|line| line.trim().is_empty());

        let header = lines.next().ok_or(GameError::MalformedDefinition)?;
        let mut sides = header.split_whitespace();
        let rows = parse_side(sides.next())?;
        let cols = parse_side(sides.next())?;
        if sides.next().is_some() {
            return Err(GameError::MalformedDefinition);
        }

        let mut mines = Vec::new();
        for row in 0..rows {
            let line = lines.next().ok_or(GameError::MalformedDefinition)?;
            let line = line.trim_end();
            let width = line.chars().count();
            if width != usize::from(cols) {
                log::debug!("Row {} has length {}, expected {}", row, width, cols);
                return Err(GameError::MalformedDefinition);
            }
            for (col, symbol) in (0..cols).zip(line.chars()) {
                match symbol {
                    MINE_SYMBOL => mines.push((row, col)),
                    EMPTY_SYMBOL => {}
                    _ => return Err(GameError::MalformedDefinition),
                }
            }
        }

        if lines.any(|line| !line.trim().is_empty()) {
            return Err(GameError::MalformedDefinition);
        }

        Ok(Self {
            size: (rows, cols),
            mines,
        })
    }
}

impl fmt::Display for BoardDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.size;
        writeln!(f, "{} {}", rows, cols)?;
        for row in 0..rows {
            for col in 0..cols {
                let symbol = if self.mines.contains(&(row, col)) {
                    MINE_SYMBOL
                } else {
                    EMPTY_SYMBOL
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
