//! Text shown to the player.

/// Rules, shown when a game starts and for the `man` topic.
pub const MAN: &str = "Tic Tac Toe
\tPlay a piece by typing the number of the target space:
\t  0 | 1 | 2
\t -----------
\t  3 | 4 | 5
\t -----------
\t  6 | 7 | 8
\tor its x,y coordinate (i.e. 1,2).
\tType \"help\" to list additional commands.";

/// The command list, for the `help` topic.
pub const HELP: &str = "\t\"man\": review rules
\t\"undo\": undo your last move
\t\"print\": display board
\t\"reset\": start match over
\t\"docs\": view credits and documentation
\t\"quit\": quit match
\t\"exit\": quit application";

/// Credits, for the `docs` topic.
pub const DOCS: &str = "Visit http://github.com/hkgumbs/tictactoe for more information.";

pub const INPUT_ERROR: &str = "Invalid input!";
pub const INDEX_ERROR: &str = "Index value out of bounds!";
pub const LOOKUP_ERROR: &str = "This space is already occupied!";
pub const UNDO_ERROR: &str = "There are not enough moves to undo!";

pub const RESET_CONFIRM: &str = "Are you sure you want to start over? (y/n) ";
pub const EXIT_CONFIRM: &str = "Are you sure you want to quit the application? (y/n) ";

pub const TEAM_PROMPT: &str = "Do you want to go first? (y/n) ";
pub const RETRY_PROMPT: &str = "Do you want to play again? (y/n) ";

pub const TIE_GAME: &str = "Tie game!";
pub const LOSE_GAME: &str = "You lost!";
pub const WIN_GAME: &str = "You won!";
