use crate::config::Config;
use anyhow::Context;
use crossbeam::channel::{
    Receiver,
    Sender,
};
use std::{
    io::{
        BufRead,
        Write,
    },
    thread::JoinHandle,
};
use tic_tac_toe::{
    messages,
    Command,
    Simulation,
    SimulationState,
};
use tracing::{
    debug,
    info,
};

/// The command that closes the application from a move prompt.
const EXIT_COMMAND: &str = "exit";

/// Parse an `x,y` coordinate.
///
/// The coordinate may be off the grid.
fn parse_coordinate(token: &str) -> Option<(u8, u8)> {
    let (x, y) = token.split_once(',')?;
    Some((x.parse().ok()?, y.parse().ok()?))
}

/// Returns true if the token is a coordinate that is off the grid.
fn is_off_grid(token: &str) -> bool {
    parse_coordinate(token).is_some_and(|(x, y)| x >= 3 || y >= 3)
}

/// Turn a line of input into a token.
///
/// Whitespace is dropped and `x,y` coordinates become a tile index.
pub fn normalize(line: &str) -> String {
    let token: String = line.chars().filter(|c| !c.is_whitespace()).collect();

    match parse_coordinate(&token) {
        Some((x, y)) if x < 3 && y < 3 => (y * 3 + x).to_string(),
        _ => token,
    }
}

/// An event from the terminal.
#[derive(Debug)]
pub enum Input {
    /// A line of input, including the line ending.
    Line(String),

    /// The input ended.
    Closed,

    /// The player pressed ctrl-c.
    Interrupted,

    /// Reading the input failed.
    Failed(std::io::Error),
}

/// Read lines on a new thread, sending them as [`Input`]s.
///
/// The thread stops after the input ends or fails, or after the receiver is dropped.
pub fn spawn_reader<R>(mut input: R, sender: Sender<Input>) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    std::thread::spawn(move || loop {
        let mut line = String::new();
        let (event, done) = match input.read_line(&mut line) {
            Ok(0) => (Input::Closed, true),
            Ok(_) => (Input::Line(line), false),
            Err(error) => (Input::Failed(error), true),
        };

        if sender.send(event).is_err() || done {
            break;
        }
    })
}

/// The terminal side of a [`Simulation`].
///
/// This prints output, reads lines, and only ever hands the simulation tokens it allows.
#[derive(Debug)]
pub struct Console<W> {
    input: Receiver<Input>,
    output: W,

    /// Set once the input has ended or the player interrupted.
    closed: bool,

    confirm_reset: bool,
    confirm_exit: bool,
}

impl<W> Console<W>
where
    W: Write,
{
    /// Make a new [`Console`].
    pub fn new(input: Receiver<Input>, output: W, config: &Config) -> Self {
        Self {
            input,
            output,
            closed: false,
            confirm_reset: config.confirm_reset,
            confirm_exit: config.confirm_exit,
        }
    }

    /// Run a simulation until it finishes, the input ends, or the player exits or interrupts.
    pub fn run(&mut self, simulation: &mut Simulation) -> anyhow::Result<()> {
        while !simulation.is_finished() {
            let token = if simulation.needs_input() {
                match self.read_token(simulation)? {
                    Some(token) => Some(token),
                    None => {
                        // Leave the terminal on a fresh line
                        writeln!(self.output)?;
                        return Ok(());
                    }
                }
            } else {
                None
            };

            let output = simulation
                .step(token.as_deref())
                .context("failed to step simulation")?;
            writeln!(self.output, "{output}")?;
        }

        Ok(())
    }

    /// Read a token that the simulation allows.
    ///
    /// Returns `None` if the player exits or the input ends.
    fn read_token(&mut self, simulation: &Simulation) -> anyhow::Result<Option<String>> {
        let prompt = simulation.prompt().unwrap_or_default();
        let allowed_tokens = simulation.allowed_tokens();

        loop {
            let line = match self.read_line(&prompt)? {
                Some(line) => line,
                None => return Ok(None),
            };
            let token = normalize(&line);

            if simulation.state() == SimulationState::PlayerMove && token == EXIT_COMMAND {
                if !self.confirm_exit || self.confirm(messages::EXIT_CONFIRM)? {
                    info!("player exited");
                    return Ok(None);
                }

                continue;
            }

            if simulation.state() == SimulationState::PlayerMove && is_off_grid(&token) {
                debug!("rejected coordinate {token:?}");
                writeln!(self.output, "{}", messages::INDEX_ERROR)?;
                continue;
            }

            if !allowed_tokens.contains(&token) {
                debug!("rejected input {token:?}");
                writeln!(self.output, "{}", messages::INPUT_ERROR)?;
                continue;
            }

            if token == "reset" && self.confirm_reset && !self.confirm(messages::RESET_CONFIRM)? {
                continue;
            }

            return Ok(Some(token));
        }
    }

    /// Ask a yes or no question.
    ///
    /// Anything but a yes is a no.
    fn confirm(&mut self, prompt: &str) -> anyhow::Result<bool> {
        let confirmed = self
            .read_line(prompt)?
            .is_some_and(|line| {
                matches!(normalize(&line).parse::<Command>(), Ok(Command::Yes))
            });

        Ok(confirmed)
    }

    /// Show a prompt and read a line.
    ///
    /// Returns `None` once the input has ended or the player interrupted.
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        if self.closed {
            return Ok(None);
        }

        write!(self.output, "{prompt}")?;
        self.output.flush().context("failed to flush output")?;

        match self.input.recv() {
            Ok(Input::Line(line)) => Ok(Some(line)),
            Ok(Input::Closed) | Err(_) => {
                info!("input closed");
                self.closed = true;
                Ok(None)
            }
            Ok(Input::Interrupted) => {
                info!("interrupted");
                self.closed = true;
                Ok(None)
            }
            Ok(Input::Failed(error)) => {
                self.closed = true;
                Err(error).context("failed to read input")
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;
    use tic_tac_toe::Team;

    /// Run a fresh simulation on some events, returning it and the output.
    fn run_events(events: Vec<Input>, config: &Config) -> (Simulation, String) {
        let (sender, receiver) = crossbeam::channel::unbounded();
        for event in events {
            sender.send(event).expect("failed to send input");
        }

        let mut output = Vec::new();
        let mut simulation = Simulation::new();
        Console::new(receiver, &mut output, config)
            .run(&mut simulation)
            .expect("failed to run");

        let output = String::from_utf8(output).expect("output is not utf8");
        (simulation, output)
    }

    /// Run a fresh simulation on some input lines, returning it and the output.
    fn run(input: &str, config: &Config) -> (Simulation, String) {
        let mut events: Vec<_> = input
            .split_inclusive('\n')
            .map(|line| Input::Line(line.to_string()))
            .collect();
        events.push(Input::Closed);

        run_events(events, config)
    }

    #[test]
    fn normalize_tokens() {
        assert_eq!(normalize(" 4 \n"), "4");
        assert_eq!(normalize("undo\n"), "undo");
        assert_eq!(normalize("1,2"), "7");
        assert_eq!(normalize("2 , 0\r\n"), "2");
        assert_eq!(normalize("3,0"), "3,0");
        assert_eq!(normalize("a,b"), "a,b");
    }

    #[test]
    fn full_game() {
        let (simulation, output) = run("y\n0\n1\n3\nn\n", &Config::default());
        assert!(simulation.is_finished());
        assert!(output.contains(messages::MAN));
        assert!(output.contains(messages::TEAM_PROMPT));
        assert!(output.contains("O >>> 1,1"));
        assert!(output.contains(messages::LOSE_GAME));
        assert!(output.contains(messages::RETRY_PROMPT));
    }

    #[test]
    fn coordinates() {
        let (simulation, _output) = run("y\n1,1\nquit\nn\n", &Config::default());
        assert!(simulation.is_finished());
        assert_eq!(simulation.board().get(4), Some(Team::First));
    }

    #[test]
    fn invalid_input_reprompts() {
        let (simulation, output) = run("y\nfoo\n9\n", &Config::default());
        assert_eq!(output.matches(messages::INPUT_ERROR).count(), 2);
        assert_eq!(simulation.state(), SimulationState::PlayerMove);
        assert!(simulation.board().is_empty());
    }

    #[test]
    fn end_of_input_stops() {
        let (simulation, output) = run("", &Config::default());
        assert_eq!(simulation.state(), SimulationState::PromptTeam);
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn exit_asks_first() {
        let (simulation, output) = run("y\nexit\nn\nexit\ny\n", &Config::default());
        assert_eq!(output.matches(messages::EXIT_CONFIRM).count(), 2);
        assert!(!simulation.is_finished());
        assert_eq!(simulation.state(), SimulationState::PlayerMove);

        let config = Config {
            confirm_exit: false,
            ..Config::default()
        };
        let (_simulation, output) = run("y\nexit\n", &config);
        assert!(!output.contains(messages::EXIT_CONFIRM));
    }

    #[test]
    fn reset_asks_first() {
        let (simulation, output) = run("y\n0\nreset\nn\nreset\nyes\n", &Config::default());
        assert_eq!(output.matches(messages::RESET_CONFIRM).count(), 2);
        assert_eq!(simulation.state(), SimulationState::PromptTeam);
        assert!(simulation.board().is_empty());

        let config = Config {
            confirm_reset: false,
            ..Config::default()
        };
        let (simulation, output) = run("y\n0\nreset\n", &config);
        assert!(!output.contains(messages::RESET_CONFIRM));
        assert_eq!(simulation.state(), SimulationState::PromptTeam);
    }

    #[test]
    fn off_grid_coordinates() {
        let (simulation, output) = run("y\n3,0\n0, 5\n", &Config::default());
        assert_eq!(output.matches(messages::INDEX_ERROR).count(), 2);
        assert!(!output.contains(messages::INPUT_ERROR));
        assert!(simulation.board().is_empty());
    }

    #[test]
    fn interrupt_stops() {
        let events = vec![
            Input::Line("y\n".to_string()),
            Input::Line("0\n".to_string()),
            Input::Interrupted,
            Input::Line("1\n".to_string()),
        ];
        let (simulation, output) = run_events(events, &Config::default());
        assert_eq!(simulation.state(), SimulationState::PlayerMove);
        assert_eq!(simulation.board().count(Team::Neither), 7);
        assert!(output.ends_with(">>> \n"));
    }

    #[test]
    fn interrupt_while_confirming_stops() {
        let events = vec![
            Input::Line("y\n".to_string()),
            Input::Line("exit\n".to_string()),
            Input::Interrupted,
        ];
        let (simulation, output) = run_events(events, &Config::default());
        assert_eq!(output.matches(messages::EXIT_CONFIRM).count(), 1);
        assert!(!simulation.is_finished());
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn read_failure_is_an_error() {
        let (sender, receiver) = crossbeam::channel::unbounded();
        sender
            .send(Input::Failed(std::io::Error::other("broken pipe")))
            .expect("failed to send input");

        let mut output = Vec::new();
        let mut simulation = Simulation::new();
        let result = Console::new(receiver, &mut output, &Config::default()).run(&mut simulation);
        assert!(result.is_err());
    }

    #[test]
    fn reader_sends_lines_then_closes() {
        let (sender, receiver) = crossbeam::channel::unbounded();
        spawn_reader(Cursor::new("y\n1,1\n"), sender)
            .join()
            .expect("reader panicked");

        let events: Vec<_> = receiver.try_iter().collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], Input::Line(line) if line == "y\n"));
        assert!(matches!(&events[1], Input::Line(line) if line == "1,1\n"));
        assert!(matches!(events[2], Input::Closed));
    }
}
