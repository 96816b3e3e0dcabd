mod board;
mod command;
pub mod messages;
mod simulation;
mod solver;
mod team;

pub use self::{
    board::{
        Board,
        GameOutcome,
    },
    command::{
        Command,
        Topic,
    },
    simulation::{
        Simulation,
        SimulationState,
    },
    solver::{
        Evaluation,
        Solver,
    },
    team::Team,
};

/// The # of tic-tac-toe tiles
pub const NUM_TILES: u8 = 9;

/// Library Error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The tile index is not on the board.
    #[error("tile index {0} is out of range")]
    OutOfRange(isize),

    /// The tile is already taken.
    #[error("tile {0} is already occupied")]
    CellOccupied(u8),

    /// The player has no moves to undo.
    #[error("there are no moves to undo")]
    UndoUnavailable,

    /// An operation was called in a state where it makes no sense.
    ///
    /// This is a bug in the caller.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// A token could not be parsed as a [`Command`].
    #[error("'{0}' is not a valid command")]
    InvalidToken(String),
}
