use crate::*;
pub use random::*;

mod random;

/// Something that can lay out mines on a fresh board.
pub trait MinefieldGenerator {
    fn generate(self) -> Result<Board>;
}

impl MinefieldGenerator for BoardDefinition {
    fn generate(self) -> Result<Board> {
        Board::load_from_definition(self.size, &self.mines)
    }
}
