use crate::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// The geometry of a game: the grid dimensions and the run length needed to win.
///
/// Every participant builds its boards from the same rules, so that a move list replays identically everywhere.
pub struct Rules
{
    pub width:           usize,
    pub height:          usize,
    pub sequence_length: usize,
}

impl Default for Rules
{
    fn default() -> Self
    {
        Rules {
            width:           7,
            height:          6,
            sequence_length: 4,
        }
    }
}

impl std::fmt::Display for Rules
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{}x{} (connect {})", self.width, self.height, self.sequence_length)
    }
}

impl Rules
{
    /// Creates a validated set of rules.
    pub fn new(width: usize, height: usize, sequence_length: usize) -> Result<Rules>
    {
        let rules = Rules {
            width,
            height,
            sequence_length,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// The number of cells on the grid.
    pub fn cells(&self) -> usize
    {
        self.width * self.height
    }

    /// Ensures the run length fits on the grid in both directions.
    pub fn validate(&self) -> Result<()>
    {
        let base = Error::new(Kind::InvalidConfiguration, format!("Cannot build a {} board.", self));

        if self.sequence_length == 0
        {
            let err = Error::new(Kind::InvalidConfiguration, "Sequence length has to be at least 1.".into());
            return Err(err.chain(base));
        }

        if self.width < self.sequence_length || self.height < self.sequence_length
        {
            let err = Error::new(
                Kind::InvalidConfiguration,
                "Sequence length has to be at most the width and height of the board.".into(),
            );
            return Err(err.chain(base));
        }

        Ok(())
    }
}
