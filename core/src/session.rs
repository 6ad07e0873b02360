use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - AwaitingInput -> AwaitingInput
/// - AwaitingInput -> Won
/// - AwaitingInput -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    AwaitingInput,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::AwaitingInput
    }
}

/// A token that was not applied, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedToken {
    /// Position of the token within its submission
    pub index: usize,
    pub token: String,
    pub error: GameError,
}

/// Result of processing one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionReport {
    /// Tokens applied successfully, in order
    pub applied: usize,
    pub rejected: Option<RejectedToken>,
    /// Tokens left unprocessed after a rejection or the end of the round
    pub abandoned: usize,
    pub state: SessionState,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub state: SessionState,
    pub size: Coord2,
    pub mines: CellCount,
    pub marked: CellCount,
    pub elapsed_secs: u64,
}

/// One round, from the first submission to a win or a loss.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    state: SessionState,
    first_open_done: bool,
    started_at: Instant,
    ended_at: Option<Instant>,
}

impl GameSession {
    pub fn new(board: Board) -> Self {
        log::debug!(
            "Round started on a {:?} board with {} mines",
            board.size(),
            board.mine_count()
        );
        Self {
            board,
            state: Default::default(),
            first_open_done: false,
            started_at: Instant::now(),
            ended_at: None,
        }
    }

    pub fn from_generator<G: MinefieldGenerator>(generator: G) -> Result<Self> {
        Ok(Self::new(generator.generate()?))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn marked_count(&self) -> CellCount {
        self.board.marked_count()
    }

    pub fn first_open_done(&self) -> bool {
        self.first_open_done
    }

    pub fn render_cell(&self, coords: Coord2) -> RenderCell {
        self.board.render_cell(coords)
    }

    /// Time since the round started, frozen once it ends
    pub fn elapsed(&self) -> Duration {
        self.ended_at.unwrap_or_else(Instant::now) - self.started_at
    }

    pub fn stats(&self) -> Stats {
        Stats {
            mines_remaining: self.board.mines_left(),
            marked: self.board.marked_count(),
            elapsed_secs: self.elapsed().as_secs(),
        }
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            state: self.state,
            size: self.board.size(),
            mines: self.board.mine_count(),
            marked: self.board.marked_count(),
            elapsed_secs: self.elapsed().as_secs(),
        }
    }

    /// Applies a single action and re-evaluates the end of the round.
    pub fn apply(&mut self, action: Action) -> Result<SessionState> {
        self.check_not_finished()?;
        let coords = self.board.validate_coords(action.coords)?;

        let changed = match action.kind {
            ActionKind::Mark => {
                let cell = self.board.cell_at(coords);
                if cell.is_shaded() && self.board.marked_count() >= self.board.mine_count() {
                    return Err(GameError::TooManyMarks);
                }
                self.board.toggle_mark(coords)?;
                true
            }
            ActionKind::Open => {
                let outcome = self.board.open(coords, !self.first_open_done)?;
                self.first_open_done = true;
                log::trace!("Open at {:?}: {:?}", coords, outcome);
                outcome.has_update()
            }
        };

        if changed {
            self.evaluate();
        } else {
            log::debug!("Open at {:?} left the board unchanged", coords);
        }
        Ok(self.state)
    }

    /// Applies every token of a raw submission in order.
    ///
    /// Processing stops at the first invalid token or when the round ends;
    /// actions applied before that point stand.
    pub fn submit(&mut self, input: &str) -> SubmissionReport {
        let size = self.board.size();
        let mut applied = 0;
        let mut rejected = None;

        let mut tokens = split_tokens(input).enumerate();
        for (index, token) in tokens.by_ref() {
            match Action::parse(token, size).and_then(|action| self.apply(action)) {
                Ok(state) => {
                    applied += 1;
                    if state.is_finished() {
                        break;
                    }
                }
                Err(error) => {
                    log::debug!("Rejected token {:?} at {}: {}", token, index, error);
                    rejected = Some(RejectedToken {
                        index,
                        token: token.to_owned(),
                        error,
                    });
                    break;
                }
            }
        }

        SubmissionReport {
            applied,
            rejected,
            abandoned: tokens.count(),
            state: self.state,
        }
    }

    fn evaluate(&mut self) {
        if self.board.has_exploded() {
            self.end_game(false);
        } else if self.board.is_cleared() {
            self.end_game(true);
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            SessionState::Won
        } else {
            SessionState::Lost
        };
        self.ended_at = Some(Instant::now());
        self.board.reveal_all();
        log::debug!("Round ended: {:?} after {:?}", self.state, self.elapsed());
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
