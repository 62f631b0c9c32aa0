//! Synchronizer Scenario Tests
//!
//! Drives `ListSynchronizer` against a scripted remote and a memory surface.
//! Gated replies let two requests complete in a chosen order on one thread.

#[cfg(test)]
mod tests {
    use crate::{
        DeleteAck, DeleteOutcome, DuplicateDeletePolicy, EntryState, Item, ItemId,
        ListSynchronizer, LocalBoxFuture, MemorySurface, RemoteSource, SyncConfig, SyncError,
        SyncResult, Timer,
    };
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::future;
    use std::cell::{Cell, RefCell};
    use std::collections::{HashMap, VecDeque};
    use std::rc::Rc;
    use std::time::Duration;

    enum Reply<T> {
        Ready(SyncResult<T>),
        Gated(oneshot::Receiver<SyncResult<T>>),
        Never,
    }

    impl<T> Reply<T> {
        async fn resolve(self) -> SyncResult<T> {
            match self {
                Reply::Ready(result) => result,
                Reply::Gated(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(SyncError::Transport("gate dropped".into()))),
                Reply::Never => future::pending().await,
            }
        }
    }

    #[derive(Default)]
    struct ScriptedRemote {
        lists: RefCell<VecDeque<Reply<Vec<Item>>>>,
        deletes: RefCell<HashMap<ItemId, VecDeque<Reply<DeleteAck>>>>,
        list_calls: Cell<usize>,
        delete_calls: RefCell<Vec<ItemId>>,
    }

    impl ScriptedRemote {
        fn on_list(&self, reply: Reply<Vec<Item>>) {
            self.lists.borrow_mut().push_back(reply);
        }

        fn on_delete(&self, id: u32, reply: Reply<DeleteAck>) {
            self.deletes
                .borrow_mut()
                .entry(ItemId::from(id))
                .or_default()
                .push_back(reply);
        }

        fn gate_delete(&self, id: u32) -> oneshot::Sender<SyncResult<DeleteAck>> {
            let (tx, rx) = oneshot::channel();
            self.on_delete(id, Reply::Gated(rx));
            tx
        }

        fn delete_calls(&self) -> Vec<ItemId> {
            self.delete_calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl RemoteSource for Rc<ScriptedRemote> {
        async fn list_items(&self) -> SyncResult<Vec<Item>> {
            self.list_calls.set(self.list_calls.get() + 1);
            let reply = self.lists.borrow_mut().pop_front();
            match reply {
                Some(reply) => reply.resolve().await,
                None => Err(SyncError::Transport("unscripted list".into())),
            }
        }

        async fn delete_item(&self, id: &ItemId) -> SyncResult<DeleteAck> {
            self.delete_calls.borrow_mut().push(id.clone());
            let reply = self
                .deletes
                .borrow_mut()
                .get_mut(id)
                .and_then(|replies| replies.pop_front());
            match reply {
                Some(reply) => reply.resolve().await,
                None => Err(SyncError::Transport("unscripted delete".into())),
            }
        }
    }

    /// Timer whose deadline never arrives
    struct NeverTimer;

    impl Timer for NeverTimer {
        fn sleep(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
            Box::pin(future::pending())
        }
    }

    /// Timer whose deadline has always passed
    struct ElapsedTimer;

    impl Timer for ElapsedTimer {
        fn sleep(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
            Box::pin(future::ready(()))
        }
    }

    type TestSync<T> = ListSynchronizer<Rc<ScriptedRemote>, MemorySurface, T>;

    fn ok(message: &str) -> Reply<DeleteAck> {
        Reply::Ready(Ok(DeleteAck { message: message.to_string() }))
    }

    fn rejected(status: u16) -> SyncError {
        SyncError::Rejected { status, reason: "server error".into() }
    }

    fn id(n: u32) -> ItemId {
        ItemId::from(n)
    }

    fn items(ids: &[u32]) -> Vec<Item> {
        ids.iter().map(|n| Item::new(*n, format!("Item {}", n))).collect()
    }

    async fn loaded_with<T: Timer>(
        ids: &[u32],
        timer: T,
        config: SyncConfig,
    ) -> (Rc<ScriptedRemote>, TestSync<T>) {
        let remote = Rc::new(ScriptedRemote::default());
        remote.on_list(Reply::Ready(Ok(items(ids))));
        let sync = ListSynchronizer::new(remote.clone(), MemorySurface::new(), timer, config);
        assert_eq!(sync.initialize().await.unwrap(), ids.len());
        (remote, sync)
    }

    async fn loaded(ids: &[u32]) -> (Rc<ScriptedRemote>, TestSync<NeverTimer>) {
        loaded_with(ids, NeverTimer, SyncConfig::default()).await
    }

    fn forwarding() -> SyncConfig {
        SyncConfig {
            duplicate_deletes: DuplicateDeletePolicy::Forward,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_initialize_renders_every_item_in_order() {
        let (_, sync) = loaded(&[7, 3, 9, 1]).await;

        assert!(sync.is_loaded());
        assert_eq!(sync.ids(), vec![id(7), id(3), id(9), id(1)]);
        assert_eq!(sync.surface().ids(), sync.ids());
        assert_eq!(sync.surface().content(&id(9)), Some("Item 9"));
        assert!(sync.entries().iter().all(|e| e.state == EntryState::Present));
    }

    #[tokio::test]
    async fn test_scenario_delete_success_then_rejection() {
        let remote = Rc::new(ScriptedRemote::default());
        remote.on_list(Reply::Ready(Ok(vec![Item::new(1, "x"), Item::new(2, "y")])));
        let sync = ListSynchronizer::new(remote.clone(), MemorySurface::new(), NeverTimer, SyncConfig::default());

        sync.initialize().await.unwrap();
        assert_eq!(sync.ids(), vec![id(1), id(2)]);

        remote.on_delete(1, ok("ok"));
        let outcome = sync.delete_item(&id(1)).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Removed { message: "ok".into() });
        assert_eq!(sync.ids(), vec![id(2)]);

        remote.on_delete(2, Reply::Ready(Err(rejected(500))));
        let err = sync.delete_item(&id(2)).await.unwrap_err();
        assert_eq!(err, rejected(500));
        assert_eq!(sync.ids(), vec![id(2)]);
        assert_eq!(sync.surface().ids(), vec![id(2)]);
    }

    #[tokio::test]
    async fn test_delete_removes_only_its_entry() {
        let (remote, sync) = loaded(&[1, 2, 3, 4]).await;
        remote.on_delete(3, ok("deleted"));

        sync.delete_item(&id(3)).await.unwrap();

        assert_eq!(sync.ids(), vec![id(1), id(2), id(4)]);
        assert_eq!(sync.surface().ids(), vec![id(1), id(2), id(4)]);
        assert_eq!(sync.surface().removals(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_view_identical() {
        let (remote, sync) = loaded(&[1, 2, 3]).await;
        let before = sync.entries();
        let rows_before = sync.surface().rows().to_vec();

        remote.on_delete(2, Reply::Ready(Err(SyncError::Transport("offline".into()))));
        assert!(sync.delete_item(&id(2)).await.is_err());
        remote.on_delete(3, Reply::Ready(Err(SyncError::Malformed("missing message".into()))));
        assert!(sync.delete_item(&id(3)).await.is_err());

        assert_eq!(sync.entries(), before);
        assert_eq!(sync.surface().rows(), rows_before.as_slice());
    }

    #[tokio::test]
    async fn test_pending_flag_tracks_in_flight_request() {
        let (remote, sync) = loaded(&[1]).await;
        let gate = remote.gate_delete(1);
        let one = id(1);
        let observer = sync.clone();

        let (result, ()) = futures::join!(sync.delete_item(&one), async move {
            assert!(observer.surface().is_pending(&id(1)));
            assert_eq!(observer.entries()[0].state, EntryState::Deleting { in_flight: 1 });
            gate.send(Err(rejected(503))).unwrap();
        });

        assert!(result.is_err());
        assert!(!sync.surface().is_pending(&id(1)));
        assert_eq!(sync.entries()[0].state, EntryState::Present);
    }

    #[tokio::test]
    async fn test_duplicate_delete_is_coalesced_by_default() {
        let (remote, sync) = loaded(&[1, 2]).await;
        let gate = remote.gate_delete(1);
        let one = id(1);

        let (first, second, ()) = futures::join!(
            sync.delete_item(&one),
            sync.delete_item(&one),
            async move {
                gate.send(Ok(DeleteAck { message: "ok".into() })).unwrap();
            }
        );

        assert_eq!(first.unwrap(), DeleteOutcome::Removed { message: "ok".into() });
        assert_eq!(second.unwrap(), DeleteOutcome::Coalesced);
        assert_eq!(remote.delete_calls(), vec![id(1)]);
        assert_eq!(sync.ids(), vec![id(2)]);
    }

    #[tokio::test]
    async fn test_forwarded_duplicates_remove_entry_once() {
        let (remote, sync) = loaded_with(&[1, 2], NeverTimer, forwarding()).await;
        let first_gate = remote.gate_delete(1);
        let second_gate = remote.gate_delete(1);
        let one = id(1);

        let (first, second, ()) = futures::join!(
            sync.delete_item(&one),
            sync.delete_item(&one),
            async move {
                second_gate.send(Ok(DeleteAck { message: "second".into() })).unwrap();
                first_gate.send(Ok(DeleteAck { message: "first".into() })).unwrap();
            }
        );

        let outcomes = [first.unwrap(), second.unwrap()];
        assert!(outcomes.contains(&DeleteOutcome::AlreadyRemoved));
        assert_eq!(
            outcomes.iter().filter(|o| matches!(o, DeleteOutcome::Removed { .. })).count(),
            1
        );
        assert_eq!(remote.delete_calls(), vec![id(1), id(1)]);
        assert_eq!(sync.surface().removals(), 1);
        assert_eq!(sync.ids(), vec![id(2)]);
    }

    #[tokio::test]
    async fn test_forwarded_failure_after_success_is_harmless() {
        let (remote, sync) = loaded_with(&[1], NeverTimer, forwarding()).await;
        let first_gate = remote.gate_delete(1);
        let second_gate = remote.gate_delete(1);
        let one = id(1);

        let (first, second, ()) = futures::join!(
            sync.delete_item(&one),
            sync.delete_item(&one),
            async move {
                first_gate.send(Ok(DeleteAck { message: "ok".into() })).unwrap();
                second_gate.send(Err(rejected(404))).unwrap();
            }
        );

        assert_eq!(first.unwrap(), DeleteOutcome::Removed { message: "ok".into() });
        assert_eq!(second.unwrap(), DeleteOutcome::AlreadyRemoved);
        assert!(sync.is_empty());
        assert!(sync.surface().rows().is_empty());
    }

    #[tokio::test]
    async fn test_forwarded_success_after_failure_still_removes() {
        let (remote, sync) = loaded_with(&[1], NeverTimer, forwarding()).await;
        let first_gate = remote.gate_delete(1);
        let second_gate = remote.gate_delete(1);
        let one = id(1);

        let (first, second, ()) = futures::join!(
            sync.delete_item(&one),
            sync.delete_item(&one),
            async move {
                first_gate.send(Err(SyncError::Transport("reset".into()))).unwrap();
                second_gate.send(Ok(DeleteAck { message: "ok".into() })).unwrap();
            }
        );

        assert!(first.is_err());
        assert_eq!(second.unwrap(), DeleteOutcome::Removed { message: "ok".into() });
        assert!(sync.is_empty());
    }

    #[tokio::test]
    async fn test_deletes_of_different_ids_resolve_independently() {
        let (remote, sync) = loaded(&[1, 2, 3]).await;
        let gate_a = remote.gate_delete(1);
        let gate_b = remote.gate_delete(3);
        let (one, three) = (id(1), id(3));

        let (a, b, ()) = futures::join!(sync.delete_item(&one), sync.delete_item(&three), async move {
            gate_b.send(Ok(DeleteAck { message: "b".into() })).unwrap();
            gate_a.send(Err(rejected(500))).unwrap();
        });

        assert!(a.is_err());
        assert!(b.is_ok());
        assert_eq!(sync.ids(), vec![id(1), id(2)]);
        assert!(!sync.surface().is_pending(&id(1)));
    }

    #[tokio::test]
    async fn test_delete_after_removal_sends_nothing() {
        let (remote, sync) = loaded(&[1]).await;
        remote.on_delete(1, ok("ok"));
        sync.delete_item(&id(1)).await.unwrap();

        assert_eq!(sync.delete_item(&id(1)).await.unwrap(), DeleteOutcome::AlreadyRemoved);
        assert_eq!(remote.delete_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id_is_rejected_without_request() {
        let (remote, sync) = loaded(&[1]).await;

        let err = sync.delete_item(&id(42)).await.unwrap_err();

        assert_eq!(err, SyncError::UnknownItem(id(42)));
        assert!(remote.delete_calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_leaves_view_empty_and_is_not_retried() {
        let remote = Rc::new(ScriptedRemote::default());
        remote.on_list(Reply::Ready(Err(rejected(502))));
        let sync = ListSynchronizer::new(remote.clone(), MemorySurface::new(), NeverTimer, SyncConfig::default());

        assert_eq!(sync.initialize().await.unwrap_err(), rejected(502));
        assert!(!sync.is_loaded());
        assert!(sync.is_empty());
        assert!(sync.surface().rows().is_empty());

        assert_eq!(sync.initialize().await.unwrap_err(), SyncError::AlreadyInitialized);
        assert_eq!(remote.list_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_initialize_twice_issues_one_request() {
        let (remote, sync) = loaded(&[1, 2]).await;
        assert_eq!(sync.initialize().await.unwrap_err(), SyncError::AlreadyInitialized);
        assert_eq!(remote.list_calls.get(), 1);
        assert_eq!(sync.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_ids_in_list_render_once() {
        let remote = Rc::new(ScriptedRemote::default());
        remote.on_list(Reply::Ready(Ok(vec![
            Item::new(1, "first"),
            Item::new(2, "y"),
            Item::new(1, "second"),
        ])));
        let sync = ListSynchronizer::new(remote, MemorySurface::new(), NeverTimer, SyncConfig::default());

        assert_eq!(sync.initialize().await.unwrap(), 2);
        assert_eq!(sync.ids(), vec![id(1), id(2)]);
        assert_eq!(sync.surface().content(&id(1)), Some("first"));
    }

    #[tokio::test]
    async fn test_hung_delete_times_out_and_keeps_entry() {
        let (remote, sync) = loaded_with(&[1], ElapsedTimer, SyncConfig::default()).await;
        remote.on_delete(1, Reply::Never);

        let err = sync.delete_item(&id(1)).await.unwrap_err();

        assert_eq!(err, SyncError::Timeout(Duration::from_secs(10)));
        assert_eq!(sync.ids(), vec![id(1)]);
        assert_eq!(sync.entries()[0].state, EntryState::Present);
    }

    #[tokio::test]
    async fn test_hung_load_times_out_and_renders_nothing() {
        let remote = Rc::new(ScriptedRemote::default());
        remote.on_list(Reply::Never);
        let sync = ListSynchronizer::new(remote.clone(), MemorySurface::new(), ElapsedTimer, SyncConfig::default());

        let err = sync.initialize().await.unwrap_err();

        assert_eq!(err, SyncError::Timeout(Duration::from_secs(10)));
        assert!(!sync.is_loaded());
        assert!(sync.is_empty());
        assert!(sync.surface().rows().is_empty());
        assert_eq!(remote.list_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_timeouts_are_retried_within_budget() {
        let config = SyncConfig {
            transport_retries: 1,
            ..Default::default()
        };
        let remote = Rc::new(ScriptedRemote::default());
        remote.on_list(Reply::Never);
        remote.on_list(Reply::Ready(Ok(items(&[1]))));
        let sync = ListSynchronizer::new(remote.clone(), MemorySurface::new(), ElapsedTimer, config);

        assert_eq!(sync.initialize().await.unwrap(), 1);
        assert_eq!(remote.list_calls.get(), 2);

        remote.on_delete(1, Reply::Never);
        remote.on_delete(1, ok("second try"));
        let outcome = sync.delete_item(&id(1)).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Removed { message: "second try".into() });
        assert_eq!(remote.delete_calls(), vec![id(1), id(1)]);
        assert!(sync.is_empty());
    }

    #[tokio::test]
    async fn test_disabled_timeout_waits_for_reply() {
        let config = SyncConfig {
            request_timeout_ms: None,
            ..Default::default()
        };
        let (remote, sync) = loaded_with(&[1], ElapsedTimer, config).await;
        remote.on_delete(1, ok("late"));

        assert!(sync.delete_item(&id(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried_within_budget() {
        let config = SyncConfig {
            transport_retries: 1,
            ..Default::default()
        };
        let remote = Rc::new(ScriptedRemote::default());
        remote.on_list(Reply::Ready(Err(SyncError::Transport("reset".into()))));
        remote.on_list(Reply::Ready(Ok(items(&[1, 2]))));
        let sync = ListSynchronizer::new(remote.clone(), MemorySurface::new(), NeverTimer, config);

        assert_eq!(sync.initialize().await.unwrap(), 2);
        assert_eq!(remote.list_calls.get(), 2);

        remote.on_delete(1, Reply::Ready(Err(SyncError::Transport("reset".into()))));
        remote.on_delete(1, Reply::Ready(Err(SyncError::Transport("reset".into()))));
        assert!(matches!(sync.delete_item(&id(1)).await, Err(SyncError::Transport(_))));
        assert_eq!(remote.delete_calls().len(), 2);

        remote.on_delete(2, Reply::Ready(Err(rejected(500))));
        assert!(sync.delete_item(&id(2)).await.is_err());
        assert_eq!(remote.delete_calls().len(), 3);
    }
}
