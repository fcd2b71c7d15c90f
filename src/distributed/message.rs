use crate::prelude::*;

/// The index of a participant in a game.
pub type Rank = usize;

/// The rank of the coordinator; every other rank is a worker.
pub const COORDINATOR: Rank = 0;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// The logical tag of a message.
pub enum Tag
{
    Stop = 0,
    Start = 1,
    Request = 3,
    Task = 4,
    Wait = 5,
    Result = 6,
}

impl std::fmt::Display for Tag
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        let repr = match self
        {
            | Self::Stop => "STOP",
            | Self::Start => "START",
            | Self::Request => "REQUEST",
            | Self::Task => "TASK",
            | Self::Wait => "WAIT",
            | Self::Result => "RESULT",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, PartialEq)]
/// A message exchanged between the coordinator and its workers.
pub enum Message
{
    /// Coordinator to worker: the game is over, exit.
    Stop,
    /// Coordinator to worker: a new turn begins, start requesting tasks.
    Start,
    /// Worker to coordinator: give me a task.
    Request,
    /// Coordinator to worker: an assigned unit of work.
    Task(Task),
    /// Coordinator to worker: no task is left this turn, idle until the next START or STOP.
    Wait,
    /// Worker to coordinator: a task with its result filled in.
    Result(Task),
}

impl Message
{
    /// Gets the tag of this message.
    pub fn tag(&self) -> Tag
    {
        match self
        {
            | Self::Stop => Tag::Stop,
            | Self::Start => Tag::Start,
            | Self::Request => Tag::Request,
            | Self::Task(_) => Tag::Task,
            | Self::Wait => Tag::Wait,
            | Self::Result(_) => Tag::Result,
        }
    }
}

impl std::fmt::Display for Message
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            | Self::Task(task) | Self::Result(task) => write!(f, "{} {}", self.tag(), task),
            | _ => write!(f, "{}", self.tag()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// A received message together with the rank that sent it.
pub struct Envelope
{
    pub source:  Rank,
    pub message: Message,
}
