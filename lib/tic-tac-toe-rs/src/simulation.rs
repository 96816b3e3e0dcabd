use crate::{
    command::{
        NO,
        YES,
    },
    messages,
    Board,
    Command,
    Error,
    GameOutcome,
    Solver,
    Team,
    Topic,
};
use tracing::{
    debug,
    info,
};

/// The states of a [`Simulation`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SimulationState {
    /// Nothing has been shown yet.
    Init,

    /// Waiting for the player to choose whether to go first.
    PromptTeam,

    /// Waiting for the player's command.
    PlayerMove,

    /// The computer is about to move.
    CpuMove,

    /// Waiting for the player to choose whether to play again.
    PromptRestart,

    /// The player is done. Nothing else will happen.
    Finished,
}

/// A game session between a player and the [`Solver`].
///
/// Each call to [`Simulation::step`] makes exactly one state transition and returns the text it produced.
/// The caller is responsible for showing [`Simulation::prompt`] and reading a token
/// from [`Simulation::allowed_tokens`] whenever [`Simulation::needs_input`] is true.
#[derive(Debug, Clone)]
pub struct Simulation {
    board: Board,
    solver: Solver,
    state: SimulationState,
    human: Team,
}

impl Simulation {
    /// Make a new [`Simulation`] in the [`SimulationState::Init`] state.
    pub fn new() -> Self {
        Self {
            board: Board::empty(),
            solver: Solver::new(),
            state: SimulationState::Init,
            human: Team::Neither,
        }
    }

    /// Get the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the current state.
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Get the player's team.
    ///
    /// This is [`Team::Neither`] until the player picks a side.
    pub fn human(&self) -> Team {
        self.human
    }

    /// Get the computer's team.
    pub fn cpu(&self) -> Team {
        self.human.other()
    }

    /// Returns true if the simulation is over.
    pub fn is_finished(&self) -> bool {
        self.state == SimulationState::Finished
    }

    /// Returns true if the next step needs a token.
    pub fn needs_input(&self) -> bool {
        matches!(
            self.state,
            SimulationState::PromptTeam
                | SimulationState::PlayerMove
                | SimulationState::PromptRestart
        )
    }

    /// Get the prompt to show before reading the next token.
    pub fn prompt(&self) -> Option<String> {
        match self.state {
            SimulationState::PromptTeam => Some(messages::TEAM_PROMPT.to_string()),
            SimulationState::PlayerMove => Some(format!("{} >>> ", self.board.turn())),
            SimulationState::PromptRestart => Some(messages::RETRY_PROMPT.to_string()),
            SimulationState::Init | SimulationState::CpuMove | SimulationState::Finished => None,
        }
    }

    /// Get the tokens accepted by the next step.
    pub fn allowed_tokens(&self) -> Vec<String> {
        match self.state {
            SimulationState::PromptTeam | SimulationState::PromptRestart => YES
                .iter()
                .chain(NO.iter())
                .copied()
                .map(String::from)
                .collect(),
            SimulationState::PlayerMove => self
                .board
                .cells_of(Team::Neither)
                .map(|index| index.to_string())
                .chain(Command::ACTIONS.into_iter().map(String::from))
                .chain(Topic::ALL.iter().map(|topic| topic.key().to_string()))
                .collect(),
            SimulationState::Init | SimulationState::CpuMove | SimulationState::Finished => {
                Vec::new()
            }
        }
    }

    /// Advance by one state transition.
    ///
    /// `token` is ignored in states that do not need input.
    /// Illegal moves and undos are reported in the returned text and do not change the state.
    ///
    /// # Errors
    /// Returns [`Error::InvalidState`] if the simulation is finished or a needed token is missing,
    /// and [`Error::InvalidToken`] if the token makes no sense in the current state.
    pub fn step(&mut self, token: Option<&str>) -> Result<String, Error> {
        let old_state = self.state;
        let output = match self.state {
            SimulationState::Init => self.step_init(),
            SimulationState::PromptTeam => {
                let token = require_token(token)?;
                self.step_prompt_team(token)?
            }
            SimulationState::CpuMove => self.step_cpu_move()?,
            SimulationState::PlayerMove => {
                let token = require_token(token)?;
                self.step_player_move(token)?
            }
            SimulationState::PromptRestart => {
                let token = require_token(token)?;
                self.step_prompt_restart(token)?
            }
            SimulationState::Finished => {
                return Err(Error::InvalidState("the simulation is finished"));
            }
        };

        if old_state != self.state {
            debug!(from = ?old_state, to = ?self.state, "state transition");
        }

        Ok(output)
    }

    fn step_init(&mut self) -> String {
        self.state = SimulationState::PromptTeam;
        format!("\n{}\n", messages::MAN)
    }

    fn step_prompt_team(&mut self, token: &str) -> Result<String, Error> {
        match token.parse::<Command>()? {
            Command::Yes => {
                self.human = Team::First;
                self.state = SimulationState::PlayerMove;
            }
            Command::No => {
                self.human = Team::Second;
                self.state = SimulationState::CpuMove;
            }
            _ => return Err(Error::InvalidToken(token.to_string())),
        }

        info!(human = %self.human, "starting game");
        Ok(self.board.to_string())
    }

    fn step_cpu_move(&mut self) -> Result<String, Error> {
        let cpu = self.board.turn();
        let index = self.solver.next_move(&self.board)?;
        self.board = self.board.play(isize::from(index))?;

        let mut output = format!("{} >>> {},{}\n{}", cpu, index % 3, index / 3, self.board);
        if self.board.is_over() {
            output.push_str(self.finish_game());
        } else {
            self.state = SimulationState::PlayerMove;
        }

        Ok(output)
    }

    fn step_player_move(&mut self, token: &str) -> Result<String, Error> {
        match token.parse::<Command>()? {
            Command::Topic(topic) => Ok(topic.text().to_string()),
            Command::Undo => match self.undo_player_move() {
                Ok(board) => {
                    self.board = board;
                    Ok(self.board.to_string())
                }
                Err(error) => recover(error),
            },
            Command::Print => Ok(self.board.to_string()),
            Command::Quit => {
                info!("player quit the game");
                self.state = SimulationState::PromptRestart;
                Ok(String::new())
            }
            Command::Reset => {
                info!("player reset the game");
                self.reset();
                Ok(String::new())
            }
            Command::Play(index) => match self.board.play(index) {
                Ok(board) => {
                    self.board = board;

                    let mut output = self.board.to_string();
                    if self.board.is_over() {
                        output.push_str(self.finish_game());
                    } else {
                        self.state = SimulationState::CpuMove;
                    }

                    Ok(output)
                }
                Err(error) => recover(error),
            },
            Command::Yes | Command::No => Err(Error::InvalidToken(token.to_string())),
        }
    }

    fn step_prompt_restart(&mut self, token: &str) -> Result<String, Error> {
        match token.parse::<Command>()? {
            Command::Yes => self.reset(),
            Command::No => {
                info!("player is done playing");
                self.state = SimulationState::Finished;
            }
            _ => return Err(Error::InvalidToken(token.to_string())),
        }

        Ok(String::new())
    }

    /// Get the board from before the player's last move.
    ///
    /// The computer always replied to that move, so this undoes two moves.
    fn undo_player_move(&self) -> Result<Board, Error> {
        if self.board.cells_of(self.human).next().is_none() {
            return Err(Error::UndoUnavailable);
        }

        Ok(self.board.undo().undo())
    }

    /// Move to the restart prompt, returning the end of game message.
    fn finish_game(&mut self) -> &'static str {
        self.state = SimulationState::PromptRestart;

        let outcome = self.board.outcome();
        info!(?outcome, human = %self.human, "game over");
        match outcome {
            GameOutcome::Won(team) if team == self.human => messages::WIN_GAME,
            GameOutcome::Won(_) => messages::LOSE_GAME,
            GameOutcome::Draw | GameOutcome::Ongoing => messages::TIE_GAME,
        }
    }

    fn reset(&mut self) {
        self.board = Board::empty();
        self.human = Team::Neither;
        self.state = SimulationState::PromptTeam;
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

fn require_token(token: Option<&str>) -> Result<&str, Error> {
    token.ok_or(Error::InvalidState("this state needs an input token"))
}

/// Turn an illegal move into a message for the player.
///
/// Errors that are not the player's fault are passed through.
fn recover(error: Error) -> Result<String, Error> {
    let message = match error {
        Error::OutOfRange(_) => messages::INDEX_ERROR,
        Error::CellOccupied(_) => messages::LOOKUP_ERROR,
        Error::UndoUnavailable => messages::UNDO_ERROR,
        error => return Err(error),
    };
    debug!("rejected move: {message}");

    Ok(message.to_string())
}
