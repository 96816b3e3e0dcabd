use crate::{
    Error,
    Team,
    NUM_TILES,
};
use std::sync::Arc;

// Allow unusual_byte_groupings as we group by 3 to visualize the board.
// Bit `n` is tile `n`, so the top row is the lowest group.

// Horizontal Wins
#[allow(clippy::unusual_byte_groupings)]
const HORIZONTAL_WIN_1: u16 = 0b000_000_111;
#[allow(clippy::unusual_byte_groupings)]
const HORIZONTAL_WIN_2: u16 = 0b000_111_000;
#[allow(clippy::unusual_byte_groupings)]
const HORIZONTAL_WIN_3: u16 = 0b111_000_000;

// Vertical Wins
#[allow(clippy::unusual_byte_groupings)]
const VERTICAL_WIN_1: u16 = 0b001_001_001;
#[allow(clippy::unusual_byte_groupings)]
const VERTICAL_WIN_2: u16 = 0b010_010_010;
#[allow(clippy::unusual_byte_groupings)]
const VERTICAL_WIN_3: u16 = 0b100_100_100;

// Diagonal win
#[allow(clippy::unusual_byte_groupings)]
const DIAGONAL_WIN: u16 = 0b100_010_001;

// Anti-Diagonal win
#[allow(clippy::unusual_byte_groupings)]
const ANTI_DIAGONAL_WIN: u16 = 0b001_010_100;

/// Win masks, in the order they are checked.
const WIN_MASKS: [u16; 8] = [
    HORIZONTAL_WIN_1,
    HORIZONTAL_WIN_2,
    HORIZONTAL_WIN_3,
    VERTICAL_WIN_1,
    VERTICAL_WIN_2,
    VERTICAL_WIN_3,
    DIAGONAL_WIN,
    ANTI_DIAGONAL_WIN,
];

/// The state of a game, derived from a [`Board`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    /// There are still moves to play.
    Ongoing,

    /// A team completed a line.
    Won(Team),

    /// The board is full and nobody won.
    Draw,
}

impl GameOutcome {
    /// Returns true if the game is over.
    pub fn is_over(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// A Tic Tac Toe board.
///
/// Boards are never mutated.
/// Playing a move makes a new board that remembers the board it was played on,
/// so the whole game can be walked back with [`Board::undo`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    // the bitboards
    // 9 tiles, so they cannot fit in a u8 but can fit in a u16
    first_state: u16,
    second_state: u16,

    turn: Team,
    last_move: Option<u8>,

    // `None` only for the empty board, which is its own predecessor.
    predecessor: Option<Arc<Board>>,
}

impl Board {
    /// Make a new, empty [`Board`].
    ///
    /// [`Team::First`] moves first.
    pub fn empty() -> Self {
        Self {
            first_state: 0,
            second_state: 0,
            turn: Team::First,
            last_move: None,
            predecessor: None,
        }
    }

    /// Replay a list of moves, starting from the empty board.
    pub fn from_moves(moves: &[isize]) -> Result<Self, Error> {
        moves
            .iter()
            .try_fold(Self::empty(), |board, &index| board.play(index))
    }

    /// Get the team whose turn it is.
    pub fn turn(&self) -> Team {
        self.turn
    }

    /// Get the index of the last move, if any.
    pub fn last_move(&self) -> Option<u8> {
        self.last_move
    }

    /// Returns true if no tiles are taken.
    pub fn is_empty(&self) -> bool {
        (self.first_state | self.second_state) == 0
    }

    /// Play a move for the team whose turn it is.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if the index is not in `0..9`,
    /// and [`Error::CellOccupied`] if the tile is already taken.
    pub fn play(&self, index: isize) -> Result<Self, Error> {
        let tile = u8::try_from(index)
            .ok()
            .filter(|tile| *tile < NUM_TILES)
            .ok_or(Error::OutOfRange(index))?;

        if (self.first_state | self.second_state) & (1 << tile) != 0 {
            return Err(Error::CellOccupied(tile));
        }

        Ok(self.place(tile))
    }

    /// Place a tile for the team whose turn it is.
    ///
    /// The tile must be empty and less than 9.
    fn place(&self, tile: u8) -> Self {
        let mask = 1 << tile;
        let mut board = Self {
            first_state: self.first_state,
            second_state: self.second_state,
            turn: self.turn.other(),
            last_move: Some(tile),
            predecessor: Some(Arc::new(self.clone())),
        };

        // The empty board starts with `First` and turns only alternate.
        if self.turn == Team::First {
            board.first_state |= mask;
        } else {
            board.second_state |= mask;
        }

        board
    }

    /// Get an iterator over the boards one move from this one.
    ///
    /// # Returns
    /// Returns a tuple pair, where the first element is the index played and the second is the resulting board.
    pub fn iter_children(&self) -> impl Iterator<Item = (u8, Self)> + '_ {
        self.cells_of(Team::Neither)
            .map(move |tile| (tile, self.place(tile)))
    }

    /// Get the board from before the last move.
    ///
    /// The empty board is returned unchanged.
    #[must_use]
    pub fn undo(&self) -> Self {
        match self.predecessor.as_deref() {
            Some(predecessor) => predecessor.clone(),
            None => self.clone(),
        }
    }

    /// Get the tile at the index.
    ///
    /// Returns `None` if the index >= 9.
    pub fn get(&self, index: u8) -> Option<Team> {
        if index < NUM_TILES {
            Some(self.tile(index))
        } else {
            None
        }
    }

    fn tile(&self, index: u8) -> Team {
        let index_mask = 1 << index;
        if self.first_state & index_mask != 0 {
            Team::First
        } else if self.second_state & index_mask != 0 {
            Team::Second
        } else {
            Team::Neither
        }
    }

    /// Get an iterator over the tiles.
    ///
    /// The iterator starts at 0 at the top left and ends at 8 at the bottom right.
    ///
    /// # Returns
    /// Returns a tuple pair, where the first element is the index and the second is the tile value.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Team)> + '_ {
        (0..NUM_TILES).map(move |index| (index, self.tile(index)))
    }

    /// Get the indexes of the tiles held by a team, from least to greatest.
    ///
    /// Pass [`Team::Neither`] to get the empty tiles.
    pub fn cells_of(&self, team: Team) -> impl Iterator<Item = u8> + '_ {
        self.iter()
            .filter_map(move |(index, tile)| (tile == team).then_some(index))
    }

    /// Count the tiles held by a team.
    pub fn count(&self, team: Team) -> u32 {
        match team {
            Team::First => self.first_state.count_ones(),
            Team::Second => self.second_state.count_ones(),
            Team::Neither => {
                u32::from(NUM_TILES) - (self.first_state | self.second_state).count_ones()
            }
        }
    }

    /// Get the winner.
    ///
    /// Returns [`Team::Neither`] if nobody has completed a line.
    pub fn winner(&self) -> Team {
        for mask in WIN_MASKS {
            if (self.first_state & mask) == mask {
                return Team::First;
            }

            if (self.second_state & mask) == mask {
                return Team::Second;
            }
        }

        Team::Neither
    }

    /// Get the outcome of the game so far.
    pub fn outcome(&self) -> GameOutcome {
        let winner = self.winner();
        if !winner.is_neither() {
            GameOutcome::Won(winner)
        } else if self.count(Team::Neither) == 0 {
            GameOutcome::Draw
        } else {
            GameOutcome::Ongoing
        }
    }

    /// Returns true if there is a winner or the board is full.
    pub fn is_over(&self) -> bool {
        self.outcome().is_over()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "     0   1   2")?;
        for row in 0..3 {
            if row != 0 {
                writeln!(f, "    -----------")?;
            }

            let start = row * 3;
            writeln!(
                f,
                "  {}  {} | {} | {} ",
                row,
                self.tile(start),
                self.tile(start + 1),
                self.tile(start + 2)
            )?;
        }

        Ok(())
    }
}
