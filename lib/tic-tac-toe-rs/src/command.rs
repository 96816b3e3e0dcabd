use crate::{
    messages,
    Error,
};

/// Accepted spellings of "yes".
pub(crate) const YES: &[&str] = &["y", "Y", "yes", "YES"];

/// Accepted spellings of "no".
pub(crate) const NO: &[&str] = &["n", "N", "no", "NO"];

/// A help topic with static text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// The command list
    Help,

    /// The rules
    Man,

    /// Credits
    Docs,
}

impl Topic {
    /// All topics
    pub const ALL: [Self; 3] = [Self::Help, Self::Man, Self::Docs];

    /// The token that selects this topic.
    pub fn key(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Man => "man",
            Self::Docs => "docs",
        }
    }

    /// The text of this topic.
    pub fn text(self) -> &'static str {
        match self {
            Self::Help => messages::HELP,
            Self::Man => messages::MAN,
            Self::Docs => messages::DOCS,
        }
    }
}

/// A parsed input token.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Confirm a prompt
    Yes,

    /// Decline a prompt
    No,

    /// Take back the last move of the player and the computer's reply
    Undo,

    /// Show the board again
    Print,

    /// Give up on the current match
    Quit,

    /// Start the match over
    Reset,

    /// Show a help topic
    Topic(Topic),

    /// Play on a tile.
    ///
    /// This is not range checked.
    Play(isize),
}

impl Command {
    /// The tokens of the player actions.
    pub const ACTIONS: [&'static str; 4] = ["undo", "print", "quit", "reset"];
}

impl std::str::FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if YES.contains(&s) {
            return Ok(Self::Yes);
        }

        if NO.contains(&s) {
            return Ok(Self::No);
        }

        if let Some(topic) = Topic::ALL.into_iter().find(|topic| topic.key() == s) {
            return Ok(Self::Topic(topic));
        }

        match s {
            "undo" => Ok(Self::Undo),
            "print" => Ok(Self::Print),
            "quit" => Ok(Self::Quit),
            "reset" => Ok(Self::Reset),
            s => s
                .parse::<isize>()
                .map(Self::Play)
                .map_err(|_| Error::InvalidToken(s.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_confirmations() {
        for token in YES {
            assert_eq!(token.parse::<Command>(), Ok(Command::Yes));
        }

        for token in NO {
            assert_eq!(token.parse::<Command>(), Ok(Command::No));
        }

        assert!("Yes".parse::<Command>().is_err());
    }

    #[test]
    fn parse_actions_and_topics() {
        assert_eq!("undo".parse::<Command>(), Ok(Command::Undo));
        assert_eq!("print".parse::<Command>(), Ok(Command::Print));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("reset".parse::<Command>(), Ok(Command::Reset));

        for topic in Topic::ALL {
            assert_eq!(topic.key().parse::<Command>(), Ok(Command::Topic(topic)));
        }
    }

    #[test]
    fn topic_text() {
        assert_eq!(Topic::Man.text(), messages::MAN);
        assert_eq!(Topic::Help.text(), messages::HELP);
        assert_eq!(
            Topic::Docs.text(),
            "Visit http://github.com/hkgumbs/tictactoe for more information."
        );
    }

    #[test]
    fn parse_moves() {
        assert_eq!("4".parse::<Command>(), Ok(Command::Play(4)));
        assert_eq!("-1".parse::<Command>(), Ok(Command::Play(-1)));
        assert_eq!("9".parse::<Command>(), Ok(Command::Play(9)));
        assert_eq!(
            "1,2".parse::<Command>(),
            Err(Error::InvalidToken("1,2".to_string()))
        );
    }
}
