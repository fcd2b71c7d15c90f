mod common;
use common::*;

#[cfg(test)]
mod protocol
{
    use std::{collections::HashSet, thread::JoinHandle};

    use fourmind::prelude::*;

    use super::*;

    fn config(width: usize, height: usize, sequence_length: usize, depth: i32, master_depth: i32) -> Config
    {
        Config {
            rules: Rules::new(width, height, sequence_length).unwrap(),
            depth,
            master_depth,
            workers: 0,
            seed: Some(0x5eed),
        }
    }

    /// A worker that scores every task as a draw and reports the move lists it was handed.
    fn fake_worker(mut endpoint: LocalTransport) -> JoinHandle<Vec<Vec<Move>>>
    {
        std::thread::spawn(move || {
            let mut seen = Vec::new();
            assert_eq!(endpoint.recv().unwrap().message, Message::Start);

            loop
            {
                endpoint.send(COORDINATOR, Message::Request).unwrap();
                match endpoint.recv().unwrap().message
                {
                    | Message::Task(task) =>
                    {
                        seen.push(task.moves.clone());
                        endpoint.send(COORDINATOR, Message::Result(task.with_result(0.0))).unwrap();
                    }
                    | Message::Wait => return seen,
                    | other => panic!("unexpected {}", other),
                }
            }
        })
    }

    #[test]
    fn messages_arrive_in_order()
    {
        let _setup = setup::setup();
        let mut endpoints = mesh(2);

        endpoints[1].send(0, Message::Start).unwrap();
        endpoints[1].send(0, Message::Request).unwrap();
        endpoints[1].send(0, Message::Wait).unwrap();

        let received = (0..3).map(|_| endpoints[0].recv().unwrap()).collect::<Vec<Envelope>>();
        assert!(received.iter().all(|envelope| envelope.source == 1));
        assert_eq!(
            received.into_iter().map(|envelope| envelope.message.tag()).collect::<Vec<Tag>>(),
            vec![Tag::Start, Tag::Request, Tag::Wait]
        );
    }

    #[test]
    fn probing_does_not_lose_messages()
    {
        let _setup = setup::setup();
        let mut endpoints = mesh(2);

        assert!(!endpoints[0].probe());

        endpoints[1].send(0, Message::Request).unwrap();
        assert!(endpoints[0].probe());
        assert!(endpoints[0].probe());

        let envelope = endpoints[0].recv().unwrap();
        assert_eq!(envelope.message, Message::Request);
        assert!(!endpoints[0].probe());
    }

    #[test]
    fn broadcast_skips_the_sender()
    {
        let _setup = setup::setup();
        let mut endpoints = mesh(3);

        assert_eq!(endpoints[0].workers(), 2);
        endpoints[0].broadcast(Message::Stop).unwrap();

        assert!(!endpoints[0].probe());
        for rank in 1..3
        {
            let envelope = endpoints[rank].recv().unwrap();
            assert_eq!(envelope.source, COORDINATOR);
            assert_eq!(envelope.message, Message::Stop);
        }
    }

    #[test]
    fn bad_destinations_are_rejected()
    {
        let _setup = setup::setup();
        let endpoints = mesh(2);

        assert_eq!(endpoints[0].send(0, Message::Stop).unwrap_err().kind, Kind::InternalError);
        assert_eq!(endpoints[0].send(2, Message::Stop).unwrap_err().kind, Kind::InternalError);
    }

    #[test]
    fn hung_up_peers_close_the_channel()
    {
        let _setup = setup::setup();
        let mut endpoints = mesh(2);
        let mut lonely = endpoints.remove(0);
        drop(endpoints);

        assert_eq!(lonely.send(1, Message::Start).unwrap_err().kind, Kind::ChannelClosed);
        assert_eq!(lonely.recv().unwrap_err().kind, Kind::ChannelClosed);
        assert!(!lonely.probe());
    }

    #[test]
    fn distribution_hands_out_every_task_once()
    {
        let _setup = setup::setup();
        let mut endpoints = mesh(3).into_iter();
        let coordinator_endpoint = endpoints.next().unwrap();
        let handles = endpoints.map(fake_worker).collect::<Vec<_>>();

        let mut coordinator =
            Coordinator::new(config(7, 6, 4, 6, 2), coordinator_endpoint, templates::Scripted::new(&[])).unwrap();
        let cache = coordinator.distribute().unwrap();
        assert_eq!(coordinator.phase(), Phase::Aggregating);

        let seen = handles.into_iter().flat_map(|handle| handle.join().unwrap()).collect::<Vec<Vec<Move>>>();
        let distinct = seen.iter().cloned().collect::<HashSet<Vec<Move>>>();

        assert_eq!(seen.len(), 49);
        assert_eq!(distinct.len(), 49);
        assert_eq!(cache.len(), 49);
        assert!(seen.iter().all(|moves| cache.get(moves) == Some(0.0)));
    }

    #[test]
    fn coordinator_rejects_unexpected_tags()
    {
        let _setup = setup::setup();
        let mut endpoints = mesh(2);
        let mut worker_endpoint = endpoints.pop().unwrap();
        let coordinator_endpoint = endpoints.pop().unwrap();

        let handle = std::thread::spawn(move || {
            assert_eq!(worker_endpoint.recv().unwrap().message, Message::Start);
            worker_endpoint.send(COORDINATOR, Message::Start).unwrap();
            worker_endpoint
        });

        let mut coordinator =
            Coordinator::new(config(4, 4, 3, 4, 2), coordinator_endpoint, templates::Scripted::new(&[])).unwrap();
        let err = coordinator.distribute().unwrap_err();
        assert_eq!(err.kind, Kind::ProtocolViolation);
        assert!(err.fatal());

        handle.join().unwrap();
    }

    #[test]
    fn coordinator_rejects_results_it_never_handed_out()
    {
        let _setup = setup::setup();
        let mut endpoints = mesh(2);
        let mut worker_endpoint = endpoints.pop().unwrap();
        let coordinator_endpoint = endpoints.pop().unwrap();

        let handle = std::thread::spawn(move || {
            assert_eq!(worker_endpoint.recv().unwrap().message, Message::Start);
            let board = templates::board(4, 4, 3);
            let forged = create_tasks(&board, 2, Player::Cpu).remove(0).with_result(1.0);
            worker_endpoint.send(COORDINATOR, Message::Result(forged)).unwrap();
            worker_endpoint
        });

        let mut coordinator =
            Coordinator::new(config(4, 4, 3, 4, 2), coordinator_endpoint, templates::Scripted::new(&[])).unwrap();
        assert_eq!(coordinator.distribute().unwrap_err().kind, Kind::ProtocolViolation);

        handle.join().unwrap();
    }

    #[test]
    fn worker_rejects_wait_while_idle()
    {
        let _setup = setup::setup();
        let mut endpoints = mesh(2);
        let worker_endpoint = endpoints.pop().unwrap();

        endpoints[0].send(1, Message::Wait).unwrap();

        let mut worker = Worker::new(config(4, 4, 3, 4, 2), worker_endpoint);
        assert_eq!(worker.run().unwrap_err().kind, Kind::ProtocolViolation);
    }

    #[test]
    fn workers_cannot_address_each_other()
    {
        let _setup = setup::setup();
        let endpoints = mesh(3);

        assert_eq!(endpoints[2].send(1, Message::Start).unwrap_err().kind, Kind::InternalError);
        assert_eq!(endpoints[1].send(2, Message::Request).unwrap_err().kind, Kind::InternalError);
        assert!(endpoints[1].send(COORDINATOR, Message::Request).is_ok());
    }

    #[test]
    fn coordinator_hang_up_releases_idle_workers()
    {
        let _setup = setup::setup();
        let config = config(4, 4, 3, 4, 2);
        let mut endpoints = mesh(3).into_iter();
        let coordinator_endpoint = endpoints.next().unwrap();
        let handles = endpoints
            .map(|endpoint| std::thread::spawn(move || Worker::new(config, endpoint).run()))
            .collect::<Vec<_>>();

        drop(coordinator_endpoint);

        for handle in handles
        {
            assert_eq!(handle.join().unwrap().unwrap_err().kind, Kind::ChannelClosed);
        }
    }

    #[test]
    fn broadcast_reaches_every_live_rank()
    {
        let _setup = setup::setup();
        let mut endpoints = mesh(3);
        let mut last = endpoints.pop().unwrap();
        drop(endpoints.pop());

        let err = endpoints[0].broadcast(Message::Stop).unwrap_err();
        assert_eq!(err.kind, Kind::ChannelClosed);
        assert_eq!(last.recv().unwrap().message, Message::Stop);
    }

    #[test]
    fn worker_stops_between_turns()
    {
        let _setup = setup::setup();
        let mut endpoints = mesh(2);
        let worker_endpoint = endpoints.pop().unwrap();

        endpoints[0].send(1, Message::Stop).unwrap();

        let mut worker = Worker::new(config(4, 4, 3, 4, 2), worker_endpoint);
        assert_eq!(worker.run().unwrap(), 0);
    }

    #[test]
    fn worker_scores_tasks_and_stops_mid_turn()
    {
        let _setup = setup::setup();
        let config = config(4, 4, 3, 4, 2);
        let mut endpoints = mesh(2);
        let worker_endpoint = endpoints.pop().unwrap();
        let mut coordinator_endpoint = endpoints.pop().unwrap();

        let handle = std::thread::spawn(move || Worker::new(config, worker_endpoint).run());

        let board = templates::board(4, 4, 3);
        let task = create_tasks(&board, 2, Player::Cpu).remove(5);

        coordinator_endpoint.send(1, Message::Start).unwrap();
        assert_eq!(coordinator_endpoint.recv().unwrap().message, Message::Request);
        coordinator_endpoint.send(1, Message::Task(task.clone())).unwrap();

        let Message::Result(result) = coordinator_endpoint.recv().unwrap().message
        else
        {
            panic!("expected a result");
        };

        let mut replayed = task.board(config.rules).unwrap();
        let expected = Searcher::seeded(Some(1)).search(&mut replayed, config.worker_depth(), task.player, None);
        assert_eq!(result.moves, task.moves);
        assert_eq!(result.result, Some(expected.score));

        assert_eq!(coordinator_endpoint.recv().unwrap().message, Message::Request);
        coordinator_endpoint.send(1, Message::Stop).unwrap();

        assert_eq!(handle.join().unwrap().unwrap(), 1);
    }

    #[test]
    fn cpu_turn_reads_worker_scores_at_the_cutoff()
    {
        let _setup = setup::setup();
        let config = config(5, 5, 4, 4, 2);
        let mut endpoints = mesh(3).into_iter();
        let coordinator_endpoint = endpoints.next().unwrap();
        let handles = endpoints
            .map(|endpoint| std::thread::spawn(move || Worker::new(config, endpoint).run()))
            .collect::<Vec<_>>();

        let mut coordinator = Coordinator::new(config, coordinator_endpoint, templates::Scripted::new(&[])).unwrap();
        coordinator.cpu_turn().unwrap();

        // Every node two plies below the root is answered by a worker, and nothing is searched past it.
        let stats = coordinator.stats();
        assert_eq!(stats.stems, 5);
        assert_eq!(stats.spliced, 25);
        assert_eq!(stats.leaves, 0);

        coordinator.stop();
        let solved = handles.into_iter().map(|handle| handle.join().unwrap().unwrap()).sum::<u64>();
        assert_eq!(solved, 25);
    }

    #[test]
    fn worker_scores_line_up_with_the_splice_depth()
    {
        let _setup = setup::setup();
        let config = config(5, 5, 4, 4, 2);
        let mut endpoints = mesh(3).into_iter();
        let coordinator_endpoint = endpoints.next().unwrap();
        let handles = endpoints
            .map(|endpoint| std::thread::spawn(move || Worker::new(config, endpoint).run()))
            .collect::<Vec<_>>();

        let mut coordinator = Coordinator::new(config, coordinator_endpoint, templates::Scripted::new(&[])).unwrap();
        let cache = coordinator.distribute().unwrap();
        assert_eq!(cache.len(), 25);

        let mut board = coordinator.board().clone();
        let mut searcher = Searcher::seeded(Some(3));
        let lookup = LeafLookup::new(&cache, config.worker_depth());
        searcher.search(&mut board, config.depth, Player::Cpu, Some(&lookup));
        assert_eq!(searcher.take_stats().spliced, cache.len() as u64);

        // One ply off, no move list matches a task, so every node is searched locally.
        let lookup = LeafLookup::new(&cache, config.worker_depth() + 1);
        searcher.search(&mut board, config.depth, Player::Cpu, Some(&lookup));
        let stats = searcher.take_stats();
        assert_eq!(stats.spliced, 0);
        assert!(stats.leaves > 0);

        coordinator.stop();
        for handle in handles
        {
            handle.join().unwrap().unwrap();
        }
    }

    #[test]
    fn human_turn_asks_again_after_an_illegal_column()
    {
        let _setup = setup::setup();
        let endpoint = mesh(1).pop().unwrap();
        let mut coordinator =
            Coordinator::new(config(7, 6, 4, 6, 2), endpoint, templates::Scripted::new(&[9, 2])).unwrap();

        let mv = coordinator.human_turn().unwrap();
        assert_eq!(mv, Move { player: Player::Human, row: 5, col: 2 });
        assert_eq!(coordinator.frontend().prompted, 2);
        assert_eq!(coordinator.board().moves(), &[mv]);
    }

    #[test]
    fn cpu_turn_takes_an_immediate_win()
    {
        let _setup = setup::setup();
        let mut board = templates::board(4, 4, 3);
        templates::play_all(
            &mut board,
            &[(0, Player::Cpu), (0, Player::Human), (1, Player::Cpu), (1, Player::Human)],
        );

        let endpoint = mesh(1).pop().unwrap();
        let mut coordinator =
            Coordinator::with_board(config(4, 4, 3, 2, 1), board, endpoint, templates::Scripted::new(&[])).unwrap();

        let mv = coordinator.cpu_turn().unwrap();
        assert_eq!(mv, Move { player: Player::Cpu, row: 3, col: 2 });
        assert_eq!(coordinator.board().winner(), Some(Player::Cpu));
        assert_eq!(coordinator.phase(), Phase::ApplyCpuMove);
    }

    #[test]
    fn coordinator_refuses_bad_settings()
    {
        let _setup = setup::setup();

        let endpoint = mesh(1).pop().unwrap();
        let err = Coordinator::new(config(4, 4, 3, 2, 2), endpoint, templates::Scripted::new(&[])).err().unwrap();
        assert_eq!(err.kind, Kind::InvalidConfiguration);

        let endpoint = mesh(1).pop().unwrap();
        let board = templates::board(5, 4, 3);
        let err = Coordinator::with_board(config(4, 4, 3, 4, 2), board, endpoint, templates::Scripted::new(&[]))
            .err()
            .unwrap();
        assert_eq!(err.kind, Kind::MismatchError);
    }

    #[test]
    fn a_full_game_with_workers()
    {
        let _setup = setup::setup();
        let config = config(4, 4, 3, 4, 2);
        let mut endpoints = mesh(3).into_iter();
        let coordinator_endpoint = endpoints.next().unwrap();
        let handles = endpoints
            .map(|endpoint| std::thread::spawn(move || Worker::new(config, endpoint).run()))
            .collect::<Vec<_>>();

        let mut coordinator = Coordinator::new(config, coordinator_endpoint, templates::Scripted::new(&[])).unwrap();
        let outcome = coordinator.run().unwrap();

        assert_eq!(coordinator.phase(), Phase::GameOver);
        assert_eq!(coordinator.frontend().outcome, Some(outcome));
        match outcome
        {
            | Outcome::Winner(player) => assert_eq!(coordinator.board().winner(), Some(player)),
            | Outcome::Draw => assert!(coordinator.board().is_full()),
        }

        drop(coordinator);
        let solved = handles.into_iter().map(|handle| handle.join().unwrap().unwrap()).sum::<u64>();
        assert!(solved > 0);
    }

    #[test]
    fn a_full_game_without_workers()
    {
        let _setup = setup::setup();
        let endpoint = mesh(1).pop().unwrap();
        let mut coordinator = Coordinator::new(config(4, 4, 3, 4, 2), endpoint, templates::Scripted::new(&[])).unwrap();

        let outcome = coordinator.run().unwrap();
        assert_eq!(coordinator.frontend().outcome, Some(outcome));
        assert!(coordinator.frontend().renders >= 3);
    }
}
