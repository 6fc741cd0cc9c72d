//! Property tests for bounded collection.

mod common;

use std::sync::LazyLock;

use common::ProbeStream;
use proptest::prelude::*;
use sync_bridge::Bridge;

static BRIDGE: LazyLock<Bridge> =
    LazyLock::new(|| Bridge::builder().worker_threads(2).build().expect("bridge runtime"));

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_length_is_min_of_limit_and_stream(limit in 0usize..64, len in 0u32..64) {
        let (stream, _probe) = ProbeStream::finite(len);
        let items = BRIDGE.collect_bounded(stream, limit).unwrap();
        prop_assert_eq!(items.len(), limit.min(len as usize));
    }

    #[test]
    fn prop_result_is_ordered_prefix(limit in 1usize..64, len in 0u32..64) {
        let (stream, probe) = ProbeStream::finite(len);
        let items = BRIDGE.collect_bounded(stream, limit).unwrap();

        let expected: Vec<u32> = (0..len).take(limit).collect();
        prop_assert_eq!(items, expected);
        prop_assert!(probe.released());
        prop_assert!(probe.fetched() <= limit);
    }

    #[test]
    fn prop_arbitrary_values_keep_emission_order(
        values in proptest::collection::vec(any::<i64>(), 0..48),
        limit in 0usize..64,
    ) {
        let stream = futures::stream::iter(values.clone().into_iter().map(Ok::<_, std::io::Error>));
        let items = BRIDGE.collect_bounded(stream, limit).unwrap();
        prop_assert_eq!(&items[..], &values[..limit.min(values.len())]);
    }
}
