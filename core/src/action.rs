use serde::{Deserialize, Serialize};

use crate::*;

/// Symbols naming the rows, in order.
pub const ROW_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ@#$%&";
/// Symbols naming the columns, in order.
pub const COLUMN_SYMBOLS: &str = "abcdefghijklmnopqrstuvwxyz=+-:/";

pub const MARK_SYMBOL: char = '!';
pub const OPEN_SYMBOL: char = '*';

/// Characters in one action token: row, column, action.
pub const TOKEN_LEN: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Toggle the mark on a closed cell
    Mark,
    /// Open a closed cell, or the neighbors of an open one
    Open,
}

impl ActionKind {
    pub const fn symbol(self) -> char {
        match self {
            Self::Mark => MARK_SYMBOL,
            Self::Open => OPEN_SYMBOL,
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            MARK_SYMBOL => Some(Self::Mark),
            OPEN_SYMBOL => Some(Self::Open),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub coords: Coord2,
    pub kind: ActionKind,
}

impl Action {
    pub const fn new(coords: Coord2, kind: ActionKind) -> Self {
        Self { coords, kind }
    }

    pub const fn mark(coords: Coord2) -> Self {
        Self::new(coords, ActionKind::Mark)
    }

    pub const fn open(coords: Coord2) -> Self {
        Self::new(coords, ActionKind::Open)
    }

    /// Parses one `<row><column><action>` token for a board of `size`.
    pub fn parse(token: &str, size: Coord2) -> Result<Self> {
        let mut symbols = token.chars();
        let (Some(row), Some(col), Some(kind), None) = (
            symbols.next(),
            symbols.next(),
            symbols.next(),
            symbols.next(),
        ) else {
            return Err(GameError::InvalidToken);
        };

        let row = symbol_index(ROW_SYMBOLS, row, size.0).ok_or(GameError::InvalidToken)?;
        let col = symbol_index(COLUMN_SYMBOLS, col, size.1).ok_or(GameError::InvalidToken)?;
        let kind = ActionKind::from_symbol(kind).ok_or(GameError::InvalidToken)?;

        Ok(Self::new((row, col), kind))
    }
}

fn symbol_index(alphabet: &str, symbol: char, limit: Coord) -> Option<Coord> {
    alphabet
        .chars()
        .take(usize::from(limit))
        .position(|candidate| candidate == symbol)
        // position is below `limit`
        .map(|index| index as Coord)
}

pub fn row_symbol(row: Coord) -> Option<char> {
    ROW_SYMBOLS.chars().nth(usize::from(row))
}

pub fn column_symbol(col: Coord) -> Option<char> {
    COLUMN_SYMBOLS.chars().nth(usize::from(col))
}

/// Splits a submission into consecutive three-character tokens.
///
/// A trailing chunk shorter than a full token is yielded as-is so that it is
/// reported as invalid.
pub fn split_tokens(input: &str) -> impl Iterator<Item = &str> {
    let mut rest = input;
    core::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest
            .char_indices()
            .nth(TOKEN_LEN)
            .map_or(rest.len(), |(index, _)| index);
        let (token, tail) = rest.split_at(end);
        rest = tail;
        Some(token)
    })
}
