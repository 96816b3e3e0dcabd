/// A Tic Tac Toe Team.
///
/// This is also used as the value of a tile, where [`Team::Neither`] marks an empty tile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Team {
    /// The team that moves first, X.
    First,

    /// The team that moves second, O.
    Second,

    /// No team. An empty tile.
    #[default]
    Neither,
}

impl Team {
    /// Get the opposing team.
    ///
    /// [`Team::Neither`] has no opponent and maps to itself.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
            Self::Neither => Self::Neither,
        }
    }

    /// Returns true if this is [`Team::Neither`].
    pub fn is_neither(self) -> bool {
        matches!(self, Self::Neither)
    }

    /// Get the marker used to draw this team.
    pub fn marker(self) -> char {
        match self {
            Self::First => 'X',
            Self::Second => 'O',
            Self::Neither => ' ',
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.marker())
    }
}
