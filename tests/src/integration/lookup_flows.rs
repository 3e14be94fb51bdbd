//! # Lookup Index Flows
//!
//! A database written by three generations of the software must read back
//! uniformly, and every failure path must be visible only through logs.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tx_lookup::{
        bloom_bits_key, tx_lookup_key, ChainStore, FaultInjectingStore, InMemoryKVStore,
        KeyValueStore, LegacyTxLookupEntry, StoreOperation, TransactionLookupApi,
        TxLookupService,
    };

    use crate::support::{block_body, block_hash, capture_errors, transaction};

    type Service<S> = TxLookupService<S, ChainStore<S>>;

    fn setup() -> (
        Arc<InMemoryKVStore>,
        Arc<ChainStore<InMemoryKVStore>>,
        Service<InMemoryKVStore>,
    ) {
        let store = Arc::new(InMemoryKVStore::new());
        let chain = Arc::new(ChainStore::new(store.clone()));
        let service = TxLookupService::new(store.clone(), chain.clone());
        (store, chain, service)
    }

    fn import(chain: &ChainStore<InMemoryKVStore>, number: u64, fork: u8, seed: u64, count: u64) {
        let hash = block_hash(number, fork);
        chain.write_block_body(number, &hash, &block_body(seed, count)).unwrap();
        chain.write_header_number(&hash, number).unwrap();
        chain.write_canonical_hash(number, &hash).unwrap();
    }

    // =========================================================================
    // Mixed-format database
    // =========================================================================

    #[test]
    fn test_three_generations_resolve_uniformly() {
        let (store, chain, service) = setup();
        import(&chain, 100, 0, 0, 1);
        import(&chain, 200, 0, 10, 1);
        import(&chain, 300, 0, 20, 1);

        let v6 = transaction(0).hash();
        let v4 = transaction(10).hash();
        let v3 = transaction(20).hash();

        // Current format: minimal big-endian number
        service.index_hashes(100, &[v6]).unwrap();
        // Hash format: the block hash itself
        store.put(&tx_lookup_key(&v4), &block_hash(200, 0)).unwrap();
        // Protobuf format padded past hash length with an unknown field
        let mut blob = LegacyTxLookupEntry { block_index: 300 }.encode_blob();
        blob.extend_from_slice(&[0x1A, 0x20]);
        blob.extend_from_slice(&[0x55; 32]);
        store.put(&tx_lookup_key(&v3), &blob).unwrap();

        let ((), errors) = capture_errors(|| {
            assert_eq!(service.lookup_block_number(&v6), Some(100));
            assert_eq!(service.lookup_block_number(&v4), Some(200));
            assert_eq!(service.lookup_block_number(&v3), Some(300));

            assert_eq!(service.resolve_transaction(&v6).unwrap().block_number, 100);
            assert_eq!(service.resolve_transaction(&v4).unwrap().block_number, 200);
            assert_eq!(service.resolve_transaction(&v3).unwrap().block_number, 300);
        });
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_reindexing_upgrades_to_current_format() {
        let (store, _chain, service) = setup();
        let hash = transaction(1).hash();
        store.put(&tx_lookup_key(&hash), &block_hash(42, 0)).unwrap();

        service.index_hashes(42, &[hash]).unwrap();
        assert_eq!(store.get(&tx_lookup_key(&hash)).unwrap(), Some(vec![42]));
    }

    #[test]
    fn test_malformed_legacy_entry_logs_once() {
        let (store, _chain, service) = setup();
        let hash = transaction(3).hash();
        store.put(&tx_lookup_key(&hash), &[0xFF; 48]).unwrap();

        let (result, errors) = capture_errors(|| service.lookup_block_number(&hash));
        assert_eq!(result, None);
        assert_eq!(errors, vec!["Invalid transaction lookup entry protobuf"]);
        assert_eq!(service.stats().malformed_entries, 1);
    }

    #[test]
    fn test_absent_entry_is_silent() {
        let (_store, _chain, service) = setup();
        let (result, errors) = capture_errors(|| service.resolve_transaction(&[0x77; 32]));
        assert!(result.is_none());
        assert!(errors.is_empty());
    }

    // =========================================================================
    // Resolver logging asymmetry
    // =========================================================================

    #[test]
    fn test_missing_canonical_hash_is_silent() {
        let (_store, _chain, service) = setup();
        service.index_hashes(5, &[transaction(1).hash()]).unwrap();

        let (result, errors) =
            capture_errors(|| service.resolve_transaction(&transaction(1).hash()));
        assert!(result.is_none());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_body_logs_error() {
        let (_store, chain, service) = setup();
        import(&chain, 5, 0, 1, 1);
        service.index_block(5, &block_body(1, 1)).unwrap();
        chain.delete_block_body(5, &block_hash(5, 0)).unwrap();

        let (result, errors) =
            capture_errors(|| service.resolve_transaction(&transaction(1).hash()));
        assert!(result.is_none());
        assert_eq!(errors, vec!["Transaction referenced missing block"]);
    }

    #[test]
    fn test_stale_entry_logs_error() {
        let (_store, chain, service) = setup();
        import(&chain, 6, 0, 1, 2);
        service.index_block(6, &block_body(1, 2)).unwrap();
        // Reorg replaces block 6 with a body that lacks both transactions
        import(&chain, 6, 1, 50, 1);

        let (result, errors) =
            capture_errors(|| service.resolve_transaction(&transaction(2).hash()));
        assert!(result.is_none());
        assert_eq!(errors, vec!["Transaction not found"]);
        assert_eq!(service.stats().stale_entries, 1);
    }

    // =========================================================================
    // Bloom sections
    // =========================================================================

    #[test]
    fn test_prune_bloom_sections_across_bits() {
        let (store, _chain, service) = setup();
        for bit in 0..3u16 {
            for section in 0..10u64 {
                service
                    .store_bloom_bits(bit, section, &block_hash(section, 0), &[bit as u8])
                    .unwrap();
            }
        }
        let mut foreign = bloom_bits_key(1, 4, &block_hash(4, 0));
        foreign.extend_from_slice(b"extra");
        store.put(&foreign, b"keep").unwrap();

        assert_eq!(service.prune_bloom_bits(1, 3, 7).unwrap(), 4);

        for section in 0..10u64 {
            let expected = !(3..7).contains(&section);
            assert_eq!(
                service.bloom_bits(1, section, &block_hash(section, 0)).is_some(),
                expected,
                "section {section}"
            );
            assert!(service.bloom_bits(0, section, &block_hash(section, 0)).is_some());
            assert!(service.bloom_bits(2, section, &block_hash(section, 0)).is_some());
        }
        assert_eq!(store.get(&foreign).unwrap(), Some(b"keep".to_vec()));
    }

    // =========================================================================
    // Unrecoverable store failures
    // =========================================================================

    #[test]
    fn test_store_failures_log_and_surface_unrecoverable() {
        let store = Arc::new(FaultInjectingStore::new(InMemoryKVStore::new()));
        let chain = Arc::new(ChainStore::new(store.clone()));
        let service = TxLookupService::new(store.clone(), chain);
        service.store_bloom_bits(0, 1, &[1; 32], &[1]).unwrap();

        store.set_fail_writes(true);
        store.set_fail_deletes(true);

        let (result, errors) = capture_errors(|| service.index_hashes(1, &[[1; 32]]));
        assert_eq!(result.unwrap_err().operation, StoreOperation::WriteTxLookup);
        assert_eq!(errors, vec!["Failed to store transaction lookup entry"]);

        let (result, errors) = capture_errors(|| service.prune_bloom_bits(0, 0, 5));
        assert_eq!(result.unwrap_err().operation, StoreOperation::DeleteBloomBits);
        assert_eq!(errors, vec!["Failed to delete bloom bits"]);

        store.set_fail_deletes(false);
        store.set_fail_iteration(true);
        let (result, errors) = capture_errors(|| service.prune_bloom_bits(0, 0, 5));
        assert_eq!(result.unwrap_err().operation, StoreOperation::DeleteBloomBits);
        assert_eq!(errors.len(), 1);
    }
}
