use crate::{
    Board,
    Error,
    GameOutcome,
    Team,
};
use tracing::debug;

/// The tile played on an empty board.
///
/// Every opening draws under perfect play, so searching the empty board is wasted work.
const OPENING_MOVE: u8 = 0;

/// The score of a win found at depth 0.
const WIN_SCORE: i8 = 10;

/// The result of a minimax search.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Evaluation {
    /// The score, relative to the team that was to move when the search started.
    ///
    /// Positive is a forced win, negative is a forced loss, and 0 is a draw.
    /// Faster wins and slower losses score further from 0.
    pub score: i8,

    /// The best move, or `None` if the game was already over.
    pub index: Option<u8>,
}

/// A perfect Tic Tac Toe player.
///
/// This searches the entire game tree on every call and holds no state.
#[derive(Debug, Default, Copy, Clone)]
pub struct Solver;

impl Solver {
    /// Make a new [`Solver`].
    pub fn new() -> Self {
        Self
    }

    /// Get the best move for the team whose turn it is.
    ///
    /// Among equally good moves, the lowest tile index wins.
    ///
    /// # Errors
    /// Returns [`Error::InvalidState`] if the game is already over.
    pub fn next_move(&self, board: &Board) -> Result<u8, Error> {
        if board.is_over() {
            return Err(Error::InvalidState("cannot pick a move on a finished board"));
        }

        if board.is_empty() {
            return Ok(OPENING_MOVE);
        }

        let evaluation = self.evaluate(board);
        debug!(
            team = %board.turn(),
            index = ?evaluation.index,
            score = evaluation.score,
            "solved board"
        );

        evaluation
            .index
            .ok_or(Error::InvalidState("search found no move"))
    }

    /// Run minimax on a board, for the team whose turn it is.
    pub fn evaluate(&self, board: &Board) -> Evaluation {
        minimax(board, board.turn(), 0)
    }
}

/// Run minimax on a board.
///
/// `cpu` is the team being maximized for and `depth` is the number of plies from the root.
fn minimax(board: &Board, cpu: Team, depth: i8) -> Evaluation {
    let score = match board.outcome() {
        GameOutcome::Won(winner) if winner == cpu => Some(WIN_SCORE - depth),
        GameOutcome::Won(_) => Some(depth - WIN_SCORE),
        GameOutcome::Draw => Some(0),
        GameOutcome::Ongoing => None,
    };
    if let Some(score) = score {
        return Evaluation { score, index: None };
    }

    let maximize = board.turn() == cpu;
    let mut best: Option<Evaluation> = None;
    for (index, child) in board.iter_children() {
        let score = minimax(&child, cpu, depth + 1).score;

        // Strict comparisons keep the first move found on ties.
        let better = match best {
            None => true,
            Some(best) if maximize => score > best.score,
            Some(best) => score < best.score,
        };
        if better {
            best = Some(Evaluation {
                score,
                index: Some(index),
            });
        }
    }

    best.unwrap_or(Evaluation {
        score: 0,
        index: None,
    })
}
