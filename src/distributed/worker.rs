use crate::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a worker's turn ended.
enum Turn
{
    /// Told to wait for the next turn.
    Idle,
    /// Told to stop mid-turn, because the coordinator is shutting down.
    Stopped,
}

/// The worker loop: pulls tasks from the coordinator each turn and returns their scores.
pub struct Worker<T: Transport>
{
    config:    Config,
    transport: T,
    searcher:  Searcher,
    solved:    u64,
}

impl<T: Transport> Worker<T>
{
    /// Creates a worker on the given endpoint.
    pub fn new(config: Config, transport: T) -> Self
    {
        // Offset the seed so that workers do not break ties in lockstep.
        let seed = config.seed.map(|seed| seed.wrapping_add(transport.rank() as u64));

        Worker {
            config,
            transport,
            searcher: Searcher::seeded(seed),
            solved: 0,
        }
    }

    /// Serves turns until the coordinator says stop. Returns the number of tasks solved.
    pub fn run(&mut self) -> Result<u64>
    {
        let rank = self.transport.rank();

        loop
        {
            let message = self.recv_from_coordinator("idle")?;

            match message
            {
                | Message::Stop =>
                {
                    log::debug!("rank {} has stopped after {} tasks", rank, self.solved);
                    return Ok(self.solved);
                }
                | Message::Start => log::debug!("rank {} has started", rank),
                | other => return Err(Error::protocol(rank, "idle", other.tag())),
            };

            if self.turn()? == Turn::Stopped
            {
                log::debug!("rank {} was stopped mid-turn after {} tasks", rank, self.solved);
                return Ok(self.solved);
            }
        }
    }

    /// Scores a task by searching its position to the worker depth.
    pub fn solve(&mut self, task: Task) -> Result<Task>
    {
        let mut board = task.board(self.config.rules)?;
        let choice = self.searcher.search(&mut board, self.config.worker_depth(), task.player, None);

        self.solved += 1;
        Ok(task.with_result(choice.score))
    }
}

/// Private implementation for the worker.
impl<T: Transport> Worker<T>
{
    /// Receives the next message, which has to come from the coordinator.
    fn recv_from_coordinator(&mut self, state: &str) -> Result<Message>
    {
        let Envelope { source, message } = self.transport.recv()?;

        if source != COORDINATOR
        {
            let err = Error::new(
                Kind::ProtocolViolation,
                format!("Rank {} received {} from worker rank {}.", self.transport.rank(), message.tag(), source),
            );
            return Err(err.chain(Error::protocol(self.transport.rank(), state, message.tag())));
        }

        Ok(message)
    }

    /// Requests and solves tasks until there are none left this turn.
    fn turn(&mut self) -> Result<Turn>
    {
        let rank = self.transport.rank();

        loop
        {
            self.transport.send(COORDINATOR, Message::Request)?;
            log::trace!("rank {} has requested a task", rank);

            match self.recv_from_coordinator("requesting")?
            {
                | Message::Wait =>
                {
                    log::trace!("rank {} is waiting", rank);
                    return Ok(Turn::Idle);
                }
                | Message::Stop => return Ok(Turn::Stopped),
                | Message::Task(task) =>
                {
                    let result = self.solve(task)?;
                    log::trace!("rank {} is returning {}", rank, result);
                    self.transport.send(COORDINATOR, Message::Result(result))?;
                }
                | other => return Err(Error::protocol(rank, "requesting", other.tag())),
            }
        }
    }
}
