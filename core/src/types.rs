use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts, mark counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

/// Largest accepted number of rows or columns.
pub const MAX_SIDE: Coord = 30;

/// A hex cell never has more than six neighbors.
pub type Neighbors = SmallVec<[Coord2; 6]>;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row-major iteration over every coordinate of a board of `size`.
pub fn iter_coords(size: Coord2) -> impl Iterator<Item = Coord2> {
    let (rows, cols) = size;
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
}

// Even rows sit half a cell to the left of odd rows, so the cells above and
// below an even-row cell are at columns `j` and `j + 1`, and for an odd-row
// cell at `j - 1` and `j`.
const EVEN_ROW_DISPLACEMENTS: [(isize, isize); 6] =
    [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)];

const ODD_ROW_DISPLACEMENTS: [(isize, isize); 6] =
    [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the in-bounds hex neighbors of a cell, in a fixed order.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }

    fn displacements(&self) -> &'static [(isize, isize); 6] {
        if self.center.0 % 2 == 0 {
            &EVEN_ROW_DISPLACEMENTS
        } else {
            &ODD_ROW_DISPLACEMENTS
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let displacements = self.displacements();
        loop {
            let delta = displacements.get(usize::from(self.index))?;
            self.index += 1;

            let next_item = apply_delta(self.center, *delta, self.bounds);
            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

/// Neighbor lists for every cell of a fixed-size board, computed once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexTopology {
    neighbors: Array2<Neighbors>,
}

impl HexTopology {
    pub fn new(size: Coord2) -> Self {
        let neighbors = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            // both axes fit in `Coord` because the shape came from `size`
            NeighborIter::new((row as Coord, col as Coord), size).collect()
        });
        Self { neighbors }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.neighbors.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn neighbors(&self, coords: Coord2) -> &[Coord2] {
        &self.neighbors[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(neighbors: &[Coord2]) -> Vec<Coord2> {
        let mut neighbors = neighbors.to_vec();
        neighbors.sort();
        neighbors
    }

    #[test]
    fn interior_even_row_leans_right() {
        let topology = HexTopology::new((5, 5));

        assert_eq!(
            sorted(topology.neighbors((2, 2))),
            vec![(1, 2), (1, 3), (2, 1), (2, 3), (3, 2), (3, 3)]
        );
    }

    #[test]
    fn interior_odd_row_leans_left() {
        let topology = HexTopology::new((5, 5));

        assert_eq!(
            sorted(topology.neighbors((1, 2))),
            vec![(0, 1), (0, 2), (1, 1), (1, 3), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn corners_and_edges_are_clipped() {
        let topology = HexTopology::new((4, 4));

        assert_eq!(sorted(topology.neighbors((0, 0))), vec![(0, 1), (1, 0), (1, 1)]);
        assert_eq!(sorted(topology.neighbors((0, 3))), vec![(0, 2), (1, 3)]);
        assert_eq!(sorted(topology.neighbors((3, 0))), vec![(2, 0), (3, 1)]);
        assert_eq!(sorted(topology.neighbors((3, 3))), vec![(2, 2), (2, 3), (3, 2)]);
        assert_eq!(sorted(topology.neighbors((1, 0))), vec![(0, 0), (1, 1), (2, 0)]);
        assert_eq!(
            sorted(topology.neighbors((1, 3))),
            vec![(0, 2), (0, 3), (1, 2), (2, 2), (2, 3)]
        );
    }

    #[test]
    fn neighbor_relation_is_symmetric() {
        let size = (7, 9);
        let topology = HexTopology::new(size);

        for coords in iter_coords(size) {
            let neighbors = topology.neighbors(coords);
            assert!((2..=6).contains(&neighbors.len()));
            for &other in neighbors {
                assert!(topology.neighbors(other).contains(&coords));
            }
        }
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        let topology = HexTopology::new((1, 1));

        assert!(topology.neighbors((0, 0)).is_empty());
    }
}
