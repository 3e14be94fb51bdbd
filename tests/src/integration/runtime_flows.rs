//! # Runtime Flows
//!
//! Block import, reorg handling and termination through [`NodeRuntime`].
//!
//! [`NodeRuntime`]: node_runtime::NodeRuntime

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use node_runtime::{ExitReason, NodeRuntime, RuntimeConfig};
    use shared_types::ShutdownSignal;
    use tx_lookup::{ChainReader, FaultInjectingStore, InMemoryKVStore, TransactionLookupApi};

    use crate::support::{block_body, block_hash, transaction};

    fn runtime() -> NodeRuntime {
        let config = RuntimeConfig::from_lookup(|var| {
            (var == "LEDGER_INTEGRITY_CHECK_SECS").then(|| "1".to_string())
        })
        .unwrap();
        NodeRuntime::with_store(config, Arc::new(InMemoryKVStore::new()))
    }

    #[tokio::test]
    async fn test_import_chain_and_resolve_every_transaction() {
        let runtime = runtime();
        let importer = runtime.importer();

        for number in 0..20u64 {
            importer
                .import(number, &block_hash(number, 0), &block_body(number * 10, 3))
                .unwrap();
        }

        for number in 0..20u64 {
            for (position, seed) in (number * 10..number * 10 + 3).enumerate() {
                let resolved = importer
                    .lookup()
                    .resolve_transaction(&transaction(seed).hash())
                    .unwrap();
                assert_eq!(resolved.block_number, number);
                assert_eq!(resolved.block_hash, block_hash(number, 0));
                assert_eq!(resolved.tx_index, position as u64);
            }
        }
    }

    #[tokio::test]
    async fn test_reorg_moves_transactions_to_new_branch() {
        let runtime = runtime();
        let importer = runtime.importer();

        // Shared prefix 0..5, old branch 5..8 (fork 0)
        for number in 0..8u64 {
            importer
                .import(number, &block_hash(number, 0), &block_body(number * 10, 2))
                .unwrap();
        }

        // Roll back the old branch tip-first, then import fork 1 which
        // re-includes one transaction of block 6 at height 5.
        for number in (5..8u64).rev() {
            importer.rollback(number, &block_hash(number, 0)).unwrap();
        }
        importer
            .import(5, &block_hash(5, 1), &block_body(60, 1))
            .unwrap();

        let lookup = importer.lookup();
        let moved = lookup.resolve_transaction(&transaction(60).hash()).unwrap();
        assert_eq!(moved.block_number, 5);
        assert_eq!(moved.block_hash, block_hash(5, 1));

        // Dropped transactions are gone, prefix is intact
        assert!(lookup.lookup_block_number(&transaction(70).hash()).is_none());
        assert!(lookup.lookup_block_number(&transaction(50).hash()).is_none());
        assert_eq!(lookup.lookup_block_number(&transaction(40).hash()), Some(4));
        assert_eq!(importer.chain().canonical_hash(7), None);
        assert_eq!(lookup.stats(), Default::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_failure_aborts_runtime() {
        let store = Arc::new(FaultInjectingStore::new(InMemoryKVStore::new()));
        let mut runtime = NodeRuntime::with_store(RuntimeConfig::default(), store.clone());
        runtime.start();

        runtime
            .importer()
            .import(0, &block_hash(0, 0), &block_body(0, 1))
            .unwrap();

        store.set_fail_deletes(true);
        let err = runtime
            .importer()
            .rollback(0, &block_hash(0, 0))
            .unwrap_err();
        runtime.abort_on(&err);

        let reason = runtime.wait().await;
        match &reason {
            ExitReason::Abort(cause) => {
                assert!(cause.starts_with("Failed to delete transaction lookup entry"))
            }
            other => panic!("expected abort, got {other:?}"),
        }
        assert_eq!(runtime.shutdown().await, reason);
    }

    #[tokio::test(start_paused = true)]
    async fn test_monitor_keeps_running_until_shutdown() {
        let mut runtime = runtime();
        runtime.start();

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(*runtime.signal().borrow(), ShutdownSignal::Running);

        runtime.request_shutdown();
        assert_eq!(runtime.shutdown().await, ExitReason::Shutdown);
    }
}
