use crate::prelude::*;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// The players in a game of connected lines.
///
/// The discriminants are the raw identifiers used on the grid; `0` is reserved for an empty cell.
pub enum Player
{
    Human = 1,
    Cpu = 2,
}

impl Player
{
    /// The player the evaluator scores in favour of.
    pub const MAXIMIZER: Player = Player::Cpu;

    /// Gets the next player.
    pub fn flip(&self) -> Self
    {
        match self
        {
            | Self::Human => Self::Cpu,
            | Self::Cpu => Self::Human,
        }
    }

    /// Whether this is the maximizing player.
    pub fn maximizes(&self) -> bool
    {
        *self == Self::MAXIMIZER
    }

    /// Returns the glyph for this player, for use in board renderings.
    pub fn glyph(&self) -> char
    {
        match self
        {
            | Self::Human => 'X',
            | Self::Cpu => 'O',
        }
    }

    // Returns the short name for this player, for use in move notation.
    pub fn short(&self) -> &'static str
    {
        match self
        {
            | Self::Human => "h",
            | Self::Cpu => "c",
        }
    }
}

impl TryFrom<u8> for Player
{
    type Error = Error;
    fn try_from(value: u8) -> std::result::Result<Self, Self::Error>
    {
        match value
        {
            | 1 => Ok(Self::Human),
            | 2 => Ok(Self::Cpu),
            | _ => Err(Error::new(
                Kind::InvalidPlayer,
                format!("The given player ({}) is not supported.", value),
            )),
        }
    }
}

impl From<Player> for u8
{
    fn from(value: Player) -> Self
    {
        value as u8
    }
}

impl std::fmt::Display for Player
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        let name = match self
        {
            | Self::Human => "Human",
            | Self::Cpu => "Cpu",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Player
{
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err>
    {
        match s
        {
            | "Human" | "h" => Ok(Self::Human),
            | "Cpu" | "c" => Ok(Self::Cpu),
            | _ => match s.parse::<u8>()
            {
                | Ok(raw) => Player::try_from(raw),
                | Err(_) => Err(Error::for_parse::<Self>(s.into())),
            },
        }
    }
}
