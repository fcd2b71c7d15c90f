use crate::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
/// A single applied move: who played, and which cell it filled.
pub struct Move
{
    pub player: Player,
    pub row:    usize,
    pub col:    usize,
}

impl std::fmt::Debug for Move
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{}", self)
    }
}

impl std::fmt::Display for Move
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{}{}@{}", self.player.short(), self.col, self.row)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
/// A linear move history.
///
/// The history can only be unwound from the present, one move at a time.
pub struct History
{
    past: Vec<Move>,
}

impl History
{
    /// The moves played so far, oldest first.
    pub fn as_slice(&self) -> &[Move]
    {
        &self.past
    }

    /// Determines whether or not the history is empty.
    pub fn is_empty(&self) -> bool
    {
        self.past.is_empty()
    }

    /// A read-only iter to past moves.
    pub fn iter(&self) -> std::slice::Iter<'_, Move>
    {
        self.past.iter()
    }

    /// Gets the length of the history, which is useful for controlling undos.
    pub fn len(&self) -> usize
    {
        self.past.len()
    }

    /// Records a move.
    pub fn play(&mut self, mv: Move)
    {
        self.past.push(mv);
    }

    /// Gets the last move played in this line, if one exists.
    pub fn prev(&self) -> Option<Move>
    {
        self.past.last().copied()
    }

    /// Steps backward in the history if possible.
    pub fn undo(&mut self) -> Option<Move>
    {
        self.past.pop()
    }
}
