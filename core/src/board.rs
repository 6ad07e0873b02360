use hashbrown::HashSet;
use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::*;

/// Grid of cells together with the derived per-cell `mines_to_discover` counts.
///
/// Counts are recomputed over the whole board after every mutation, since
/// toggling one mark changes the count shown by every open neighbor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mines_to_discover: Array2<i8>,
    topology: HexTopology,
    mine_count: CellCount,
    marked_count: CellCount,
}

impl Board {
    /// Empty board: every cell closed, unmarked and without a mine.
    pub fn new(size: Coord2) -> Result<Self> {
        let size = validate_size(size)?;
        Ok(Self {
            cells: Array2::default(size.to_nd_index()),
            mines_to_discover: Array2::default(size.to_nd_index()),
            topology: HexTopology::new(size),
            mine_count: 0,
            marked_count: 0,
        })
    }

    /// Deterministic construction from an already parsed mine layout.
    pub fn load_from_definition(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size)?;
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            if board.cells[coords.to_nd_index()].place_mine() {
                board.mine_count += 1;
            }
        }
        board.recompute_counts();
        Ok(board)
    }

    /// Places `count` additional mines on distinct cells chosen uniformly among the free ones.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, count: CellCount, rng: &mut R) -> Result<()> {
        let mut free_cells = self.total_cells() - self.mine_count;
        if count > free_cells {
            return Err(GameError::TooManyMines);
        }

        for _ in 0..count {
            let place = usize::from(rng.random_range(0..free_cells));
            let Some(coords) = self.free_cells().nth(place) else {
                log::warn!("Free cell count out of sync, {} mines placed", self.mine_count);
                break;
            };
            self.cells[coords.to_nd_index()].place_mine();
            self.mine_count += 1;
            free_cells -= 1;
        }

        log::debug!("Placed {} mines on a {:?} board", count, self.size());
        self.recompute_counts();
        Ok(())
    }

    /// Recomputes `mines_to_discover` for every cell: neighbors with a mine minus marked neighbors.
    pub fn recompute_counts(&mut self) {
        let cells = &self.cells;
        let topology = &self.topology;
        for ((row, col), count) in self.mines_to_discover.indexed_iter_mut() {
            *count = topology
                .neighbors((row as Coord, col as Coord))
                .iter()
                .map(|&pos| {
                    let cell = cells[pos.to_nd_index()];
                    i8::from(cell.has_mine()) - i8::from(cell.is_marked())
                })
                .sum();
        }
    }

    pub fn toggle_mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        let outcome = self.cells[coords.to_nd_index()].toggle_mark()?;
        match outcome {
            MarkOutcome::Marked => self.marked_count += 1,
            MarkOutcome::Unmarked => self.marked_count -= 1,
        }
        self.recompute_counts();
        Ok(outcome)
    }

    /// Opens a cell, or cascades from an already open one.
    ///
    /// With `is_first_open` set, a mine under the cell is first moved to the
    /// first mine-free cell in row-major order.
    pub fn open(&mut self, coords: Coord2, is_first_open: bool) -> Result<OpenOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self.cell_at(coords);

        if cell.is_marked() {
            return Err(GameError::AlreadyMarked);
        }

        let outcome = if cell.is_open() {
            if self.mines_to_discover(coords) > 0 {
                return Err(GameError::InsufficientMarks);
            }
            self.cascade_from(coords)
        } else {
            if cell.has_mine() && is_first_open {
                self.relocate_mine(coords);
            }
            match self.open_single(coords) {
                OpenOutcome::Opened => OpenOutcome::Opened | self.cascade_from(coords),
                other => other,
            }
        };

        self.recompute_counts();
        Ok(outcome)
    }

    /// Forces every cell open to show the solution.
    pub fn reveal_all(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.force_open();
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        self.topology.size()
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn marked_count(&self) -> CellCount {
        self.marked_count
    }

    /// How many mines have not been marked yet, negative when over-marked
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.marked_count as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn is_open(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_open()
    }

    pub fn is_marked(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_marked()
    }

    pub fn has_mine(&self, coords: Coord2) -> bool {
        self.cell_at(coords).has_mine()
    }

    pub fn mines_to_discover(&self, coords: Coord2) -> i8 {
        self.mines_to_discover[coords.to_nd_index()]
    }

    pub fn neighbors(&self, coords: Coord2) -> &[Coord2] {
        self.topology.neighbors(coords)
    }

    /// Some open cell holds a mine.
    pub fn has_exploded(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_open() && cell.has_mine())
    }

    /// As many marks as mines and no shaded cell left.
    pub fn is_cleared(&self) -> bool {
        self.marked_count == self.mine_count && !self.cells.iter().any(|cell| cell.is_shaded())
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        iter_coords(self.size())
    }

    fn free_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| !cell.has_mine())
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    fn shaded_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.topology
            .neighbors(coords)
            .iter()
            .copied()
            .filter(|&pos| self.cells[pos.to_nd_index()].is_shaded())
    }

    fn relocate_mine(&mut self, from: Coord2) {
        let Some(target) = self.free_cells().next() else {
            log::warn!("No mine-free cell to move the mine at {:?} to", from);
            return;
        };

        self.cells[from.to_nd_index()].remove_mine();
        self.cells[target.to_nd_index()].place_mine();
        log::debug!("Moved mine from {:?} to {:?} on first open", from, target);
        self.recompute_counts();
    }

    fn open_single(&mut self, coords: Coord2) -> OpenOutcome {
        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.is_shaded() {
            return OpenOutcome::NoChange;
        }

        cell.force_open();
        if cell.has_mine() {
            log::debug!("Opened mine at {:?}", coords);
            OpenOutcome::Exploded
        } else {
            OpenOutcome::Opened
        }
    }

    /// Opens the shaded neighbors of an open cell with nothing left to discover,
    /// repeating from every opened cell in the same situation.
    fn cascade_from(&mut self, seed: Coord2) -> OpenOutcome {
        if self.mines_to_discover(seed) > 0 {
            return OpenOutcome::NoChange;
        }

        let mut outcome = OpenOutcome::NoChange;
        let mut visited: HashSet<Coord2> = [seed].into_iter().collect();
        let mut to_visit: VecDeque<_> = self.shaded_neighbors(seed).collect();
        log::trace!("Starting cascade from {:?}, initial neighbors: {:?}", seed, to_visit);

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            match self.open_single(visit_coords) {
                OpenOutcome::NoChange => continue,
                OpenOutcome::Exploded => return OpenOutcome::Exploded,
                OpenOutcome::Opened => {
                    outcome = OpenOutcome::Opened;
                    log::trace!("Cascade opened cell at {:?}", visit_coords);
                }
            }

            if self.mines_to_discover(visit_coords) <= 0 {
                to_visit.extend(
                    self.shaded_neighbors(visit_coords)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        outcome
    }
}
