//! # Big-Bits Flows
//!
//! Chain weight comparisons in the log domain, and the integrity monitor
//! running against a shared constant set.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use big_bits::{
        big_bits_array_to_bits_array, big_bits_to_bits, bits_to_big_bits, common,
        entropy_big_bits_to_difficulty_bits, log_big, Constant, ConstantSet, IntegrityMonitor,
        MonitorConfig,
    };
    use num_bigint::BigUint;
    use num_traits::One;
    use parking_lot::RwLock;
    use proptest::prelude::*;
    use shared_types::ShutdownSignal;
    use tokio::sync::watch;

    fn pow2(k: u32) -> BigUint {
        BigUint::one() << k
    }

    /// Log-domain weight of a chain: the sum of each block's big-bits value.
    fn chain_weight(difficulties: &[BigUint]) -> BigUint {
        difficulties
            .iter()
            .map(|d| bits_to_big_bits(d).unwrap())
            .sum()
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    #[test]
    fn test_entropy_roundtrip_for_powers_of_two() {
        for k in [0u32, 1, 8, 64, 200, 256] {
            let big_bits = bits_to_big_bits(&pow2(k)).unwrap();
            assert_eq!(big_bits_to_bits(&big_bits), BigUint::from(k));
            assert_eq!(entropy_big_bits_to_difficulty_bits(&big_bits), pow2(256 - k));
        }
    }

    #[test]
    fn test_entropy_beyond_256_bits_is_zero() {
        let big_bits = bits_to_big_bits(&pow2(300)).unwrap();
        assert_eq!(entropy_big_bits_to_difficulty_bits(&big_bits), BigUint::from(0u32));
    }

    #[test]
    fn test_heavier_chain_wins_in_log_domain() {
        // 2^10 * 2^10 vs 2^19 * 2^0: products 2^20 and 2^19
        let a = chain_weight(&[pow2(10), pow2(10)]);
        let b = chain_weight(&[pow2(19), pow2(0)]);
        assert!(a > b);
        assert_eq!(
            big_bits_array_to_bits_array(&[a, b]),
            vec![BigUint::from(20u32), BigUint::from(19u32)]
        );
    }

    #[test]
    fn test_log_big_matches_bits_to_big_bits() {
        let diff = BigUint::from(123_456_789_u64);
        let before = diff.clone();
        assert_eq!(log_big(&diff).unwrap(), bits_to_big_bits(&diff).unwrap());
        assert_eq!(diff, before);
    }

    proptest! {
        #[test]
        fn prop_weight_is_monotonic(a in 1u64.., b in 1u64..) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let lo = bits_to_big_bits(&BigUint::from(lo)).unwrap();
            let hi = bits_to_big_bits(&BigUint::from(hi)).unwrap();
            prop_assert!(lo <= hi);
        }

        #[test]
        fn prop_characteristic_is_floor_log2(x in 1u128..) {
            let big_bits = bits_to_big_bits(&BigUint::from(x)).unwrap();
            prop_assert_eq!(big_bits_to_bits(&big_bits), BigUint::from(127 - x.leading_zeros()));
        }
    }

    // =========================================================================
    // Integrity monitor
    // =========================================================================

    fn monitored(
        shared: Arc<RwLock<ConstantSet>>,
    ) -> (Arc<watch::Sender<ShutdownSignal>>, tokio::task::JoinHandle<()>) {
        let (tx, _rx) = watch::channel(ShutdownSignal::Running);
        let tx = Arc::new(tx);
        let monitor =
            IntegrityMonitor::new(shared, MonitorConfig::with_interval(Duration::from_secs(60)));
        let handle = monitor.spawn(Arc::clone(&tx));
        (tx, handle)
    }

    #[tokio::test(start_paused = true)]
    async fn test_monitor_detects_corruption_within_one_interval() {
        let shared = Arc::new(RwLock::new(common().clone()));
        let (tx, handle) = monitored(Arc::clone(&shared));

        tokio::time::sleep(Duration::from_secs(150)).await;
        assert!(tx.borrow().is_running());

        *shared.write().value_mut(Constant::TwoFiftySix) += 1u32;
        tokio::time::sleep(Duration::from_secs(61)).await;

        assert!(tx.borrow().is_abort());
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_monitor_stops_on_shutdown() {
        let shared = Arc::new(RwLock::new(common().clone()));
        let (tx, handle) = monitored(shared);

        tokio::time::sleep(Duration::from_secs(600)).await;
        tx.send_replace(ShutdownSignal::Shutdown);
        handle.await.unwrap();
        assert_eq!(*tx.borrow(), ShutdownSignal::Shutdown);
    }
}
