use std::{
    collections::VecDeque,
    sync::mpsc::{channel, Receiver, Sender, TryRecvError},
};

use crate::prelude::*;

/// A reliable point-to-point message channel between the participants of a game.
///
/// Messages between any two ranks arrive in the order they were sent. Nothing is promised about the interleaving of
/// messages from different senders.
pub trait Transport
{
    /// The rank of this endpoint.
    fn rank(&self) -> Rank;

    /// The number of participants, including this one.
    fn size(&self) -> usize;

    /// Sends a message to the given rank.
    fn send(&self, dest: Rank, message: Message) -> Result<()>;

    /// Blocks until a message from any rank arrives.
    fn recv(&mut self) -> Result<Envelope>;

    /// Whether a message has arrived and is ready to be received without blocking.
    fn probe(&mut self) -> bool;

    /// Sends a message to every other rank.
    ///
    /// Every rank is attempted even if an earlier send fails; the first failure is returned.
    fn broadcast(&self, message: Message) -> Result<()>
    {
        let mut first = None;

        for dest in (0..self.size()).filter(|dest| *dest != self.rank())
        {
            if let Err(err) = self.send(dest, message.clone())
            {
                log::warn!("rank {} could not reach rank {}:\n{}", self.rank(), dest, err);
                first.get_or_insert(err);
            }
        }

        first.map_or(Ok(()), Err)
    }

    /// The number of workers in the game.
    fn workers(&self) -> usize
    {
        self.size().saturating_sub(1)
    }
}

#[derive(Debug)]
/// An in-process endpoint. Each participant owns one and runs on its own thread.
pub struct LocalTransport
{
    rank:  Rank,
    inbox: Receiver<Envelope>,

    /// Senders to the ranks this endpoint may address, indexed by rank.
    ///
    /// The coordinator holds one for every worker, and a worker holds only the one to the coordinator. A worker's
    /// inbox therefore disconnects as soon as the coordinator hangs up.
    peers: Vec<Option<Sender<Envelope>>>,

    /// Messages pulled off the inbox by a probe, but not yet received.
    stash: VecDeque<Envelope>,
}

/// Builds a star of endpoints, one per rank, with the coordinator at the centre.
pub fn mesh(size: usize) -> Vec<LocalTransport>
{
    let (senders, receivers): (Vec<Sender<Envelope>>, Vec<Receiver<Envelope>>) = (0..size).map(|_| channel()).unzip();

    receivers
        .into_iter()
        .enumerate()
        .map(|(rank, inbox)| LocalTransport {
            rank,
            inbox,
            peers: senders
                .iter()
                .enumerate()
                .map(|(peer, sender)| linked(rank, peer).then(|| sender.clone()))
                .collect(),
            stash: VecDeque::new(),
        })
        .collect()
}

/// Whether `rank` may send to `peer`: only the coordinator and a worker are ever linked.
fn linked(rank: Rank, peer: Rank) -> bool
{
    rank != peer && (rank == COORDINATOR || peer == COORDINATOR)
}

impl Transport for LocalTransport
{
    fn rank(&self) -> Rank
    {
        self.rank
    }

    fn size(&self) -> usize
    {
        self.peers.len()
    }

    fn send(&self, dest: Rank, message: Message) -> Result<()>
    {
        let Some(Some(peer)) = self.peers.get(dest)
        else
        {
            return Err(Error::new(
                Kind::InternalError,
                format!("Rank {} cannot send to rank {} (size {}).", self.rank, dest, self.peers.len()),
            ));
        };

        log::trace!("rank {} -> rank {}: {}", self.rank, dest, message);

        let envelope = Envelope {
            source: self.rank,
            message,
        };
        peer.send(envelope).map_err(|_| {
            Error::new(
                Kind::ChannelClosed,
                format!("Rank {} hung up before rank {} could send to it.", dest, self.rank),
            )
        })
    }

    fn recv(&mut self) -> Result<Envelope>
    {
        if let Some(envelope) = self.stash.pop_front()
        {
            return Ok(envelope);
        }

        self.inbox.recv().map_err(|_| {
            Error::new(
                Kind::ChannelClosed,
                format!("Every peer of rank {} hung up while it was waiting.", self.rank),
            )
        })
    }

    fn probe(&mut self) -> bool
    {
        if !self.stash.is_empty()
        {
            return true;
        }

        match self.inbox.try_recv()
        {
            | Ok(envelope) =>
            {
                self.stash.push_back(envelope);
                true
            }
            | Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => false,
        }
    }
}
