use itertools::Itertools;

use crate::prelude::*;

#[derive(Clone, Debug, PartialEq)]
/// An independent unit of search work.
///
/// A task is identified by the exact move list leading from the empty board to its position. The position itself is
/// never shipped; the receiver replays the move list onto a board built from its own copy of the rules.
pub struct Task
{
    pub moves:  Vec<Move>,
    pub player: Player,
    pub result: Option<f64>,
}

impl std::fmt::Display for Task
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        let moves = self.moves.iter().map(|mv| mv.to_string()).join(";");
        match self.result
        {
            | Some(score) => write!(f, "[{}] {} to move, scored {}", moves, self.player, score),
            | None => write!(f, "[{}] {} to move", moves, self.player),
        }
    }
}

impl Task
{
    /// Reconstructs the task's position.
    pub fn board(&self, rules: Rules) -> Result<Board>
    {
        let base = Error::new(Kind::MismatchError, format!("Task {} does not replay.", self));
        Board::replay(rules, &self.moves).map_err(|err| err.chain(base))
    }

    /// Consumes the task into its completed form.
    pub fn with_result(self, score: f64) -> Task
    {
        Task {
            result: Some(score),
            ..self
        }
    }
}

/// Expands every sequence of `cutoff_depth` column choices from the given position into a task.
///
/// All `width^cutoff_depth` sequences are enumerated. Each is played out on a copy of the board with players
/// alternating from `first_player`; a column that is not legal at its turn is skipped, and the same player moves
/// next. Such sequences therefore produce shorter move lists, and may produce the same move list as another sequence.
pub fn create_tasks(board: &Board, cutoff_depth: usize, first_player: Player) -> Vec<Task>
{
    if cutoff_depth == 0
    {
        return vec![Task {
            moves:  board.moves().to_vec(),
            player: first_player,
            result: None,
        }];
    }

    itertools::repeat_n(0..board.rules().width, cutoff_depth)
        .multi_cartesian_product()
        .map(|path| materialize(board, &path, first_player))
        .collect()
}

/// Plays the legal columns of a path onto a copy of the board.
fn materialize(board: &Board, path: &[usize], first_player: Player) -> Task
{
    let mut current = board.clone();
    let mut player = first_player;

    for col in path.iter().copied()
    {
        if current.play(col, player).is_ok()
        {
            player = player.flip();
        }
    }

    Task {
        moves: current.moves().to_vec(),
        player,
        result: None,
    }
}

#[derive(Clone, Debug)]
struct Slot
{
    task:    Task,
    claimed: bool,
}

#[derive(Clone, Debug, Default)]
/// The coordinator's work queue for one turn.
///
/// Claims and results are local state changes driven by inbound messages; nothing else touches the queue.
pub struct TaskQueue
{
    slots: Vec<Slot>,

    /// Every slot before the cursor is claimed.
    cursor: usize,
}

impl TaskQueue
{
    /// Creates a queue, keeping only the first task for each distinct move list.
    pub fn new(tasks: Vec<Task>) -> Self
    {
        let total = tasks.len();
        let slots = tasks
            .into_iter()
            .unique_by(|task| task.moves.clone())
            .map(|task| Slot { task, claimed: false })
            .collect::<Vec<Slot>>();

        if slots.len() < total
        {
            log::debug!("dropped {} tasks with duplicate move lists", total - slots.len());
        }

        TaskQueue { slots, cursor: 0 }
    }

    /// Hands out the next unclaimed task, marking it claimed.
    pub fn claim(&mut self) -> Option<Task>
    {
        let slot = self.slots.get_mut(self.cursor)?;
        slot.claimed = true;
        self.cursor += 1;
        Some(slot.task.clone())
    }

    /// Records the result of a completed task, matching it by exact move list.
    pub fn complete(&mut self, task: &Task) -> Result<f64>
    {
        let Some(score) = task.result
        else
        {
            return Err(Error::new(
                Kind::ProtocolViolation,
                format!("Task {} was returned without a result.", task),
            ));
        };

        let Some(slot) = self.slots.iter_mut().find(|slot| slot.task.moves == task.moves)
        else
        {
            return Err(Error::new(
                Kind::ProtocolViolation,
                format!("Task {} does not match any task handed out this turn.", task),
            ));
        };

        if !slot.claimed
        {
            return Err(Error::new(
                Kind::ProtocolViolation,
                format!("Task {} was returned before it was handed out.", task),
            ));
        }

        slot.task.result = Some(score);
        Ok(score)
    }

    /// The number of tasks with a recorded result.
    pub fn completed(&self) -> usize
    {
        self.slots.iter().filter(|slot| slot.task.result.is_some()).count()
    }

    /// Whether the task with this move list has been handed out.
    pub fn is_claimed(&self, moves: &[Move]) -> bool
    {
        self.slots.iter().any(|slot| slot.claimed && slot.task.moves == moves)
    }

    /// Whether every task has been handed out.
    pub fn is_exhausted(&self) -> bool
    {
        self.cursor >= self.slots.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize
    {
        self.slots.len()
    }

    /// Iterates the tasks in the order they are handed out.
    pub fn tasks(&self) -> impl Iterator<Item = &Task>
    {
        self.slots.iter().map(|slot| &slot.task)
    }
}
