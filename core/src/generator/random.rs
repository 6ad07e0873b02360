use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Purely random placement, reproducible from its seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    config: BoardConfig,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, config: BoardConfig) -> Self {
        Self { seed, config }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self) -> Result<Board> {
        let config = BoardConfig::new(self.config.size, self.config.mines)?;
        let mut board = Board::new(config.size)?;
        let mut rng = SmallRng::seed_from_u64(self.seed);

        if config.mines == config.total_cells() {
            log::warn!("Minefield full, requested {} mines for as many cells", config.mines);
        }
        board.place_mines(config.mines, &mut rng)?;

        // double check mine count
        let count = board.iter_coords().filter(|&pos| board.has_mine(pos)).count();
        if count != usize::from(config.mines) {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                count,
                config.mines
            );
        }
        Ok(board)
    }
}
