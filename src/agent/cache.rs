use std::collections::HashMap;

use crate::prelude::*;

#[derive(Clone, Debug, Default)]
/// Scores computed by workers, keyed by the exact move list that leads to the scored position.
///
/// Two move lists that transpose into the same position are deliberately kept apart.
pub struct ResultCache
{
    map: HashMap<Vec<Move>, f64>,
}

impl ResultCache
{
    /// Looks up the score for an exact move list.
    pub fn get(&self, moves: &[Move]) -> Option<f64>
    {
        self.map.get(moves).copied()
    }

    /// Records a score, replacing any previous one for the same move list.
    pub fn insert(&mut self, moves: Vec<Move>, score: f64)
    {
        self.map.insert(moves, score);
    }

    pub fn is_empty(&self) -> bool
    {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize
    {
        self.map.len()
    }
}

#[derive(Clone, Copy, Debug)]
/// The hook that splices cached scores into a search in place of recursion.
pub struct LeafLookup<'a>
{
    cache:        &'a ResultCache,
    splice_depth: i32,
}

impl<'a> LeafLookup<'a>
{
    /// Creates a lookup that answers from the cache once the remaining depth reaches `splice_depth`.
    pub fn new(cache: &'a ResultCache, splice_depth: i32) -> Self
    {
        LeafLookup { cache, splice_depth }
    }

    /// Gets the cached score for a node, if the node sits on the splice boundary and was scored.
    pub fn splice(&self, depth: i32, moves: &[Move]) -> Option<f64>
    {
        if depth != self.splice_depth
        {
            return None;
        }

        let score = self.cache.get(moves);
        if score.is_none()
        {
            log::trace!("no cached score for {:?}, searching locally", moves);
        }
        score
    }
}
