use super::*;

use proptest::prelude::*;

fn validate_table(keys: &[u64], bits: u32, start: &[usize]) {
    let buckets = bits::bucket_count(bits);
    assert_eq!(start.len(), buckets + 1, "table length");
    assert_eq!(start[buckets], keys.len(), "closing sentinel must be n");
    assert_eq!(start[0], 0, "first bucket must start at 0");

    let mut covered = 0usize;
    for p in 0..buckets {
        let (lo, hi) = (start[p], start[p + 1]);
        assert!(lo <= hi, "bucket starts must not decrease (p={p})");
        assert_eq!(lo, covered, "buckets must tile [0, n) without gaps (p={p})");
        covered = hi;

        let width = bits::width_of(keys);
        for &k in &keys[lo..hi] {
            assert_eq!(
                prefix(k, width, bits),
                p as u64,
                "key {k} stored outside its bucket"
            );
        }
    }
    assert_eq!(covered, keys.len());
}

fn sorted_keys() -> impl Strategy<Value = Vec<u64>> {
    let key = prop_oneof![
        3 => any::<u64>(),
        3 => 0u64..1_000,
        2 => 0u64..(1 << 40),
        1 => Just(0u64),
        1 => Just(u64::MAX),
    ];
    prop::collection::vec(key, 0..=512).prop_map(|mut v| {
        v.sort_unstable();
        v
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_table_shape(keys in sorted_keys(), bits in 1u32..=12) {
        let mut start = vec![0usize; bits::bucket_count(bits) + 1];
        build_into(&keys, bits, &mut start).unwrap();
        validate_table(&keys, bits, &start);

        let index = BucketIndex::new(&keys, bits).unwrap();
        prop_assert_eq!(index.starts(), &start[..]);
        prop_assert_eq!(index.check(&keys), Ok(()));
    }

    #[test]
    fn prop_stored_keys_found(keys in sorted_keys(), bits in 1u32..=12) {
        let index = BucketIndex::new(&keys, bits).unwrap();
        for &k in &keys {
            let i = index.find(&keys, k);
            prop_assert!(i.is_some(), "key {} not found", k);
            prop_assert_eq!(keys[i.unwrap()], k);
        }
    }

    #[test]
    fn prop_matches_binary_search(
        keys in sorted_keys(),
        queries in prop::collection::vec(any::<u64>(), 0..=256),
        bits in 1u32..=12,
    ) {
        let index = BucketIndex::new(&keys, bits).unwrap();
        let mut start = vec![0usize; bits::bucket_count(bits) + 1];
        build_into(&keys, bits, &mut start).unwrap();

        let neighbours = keys.iter().map(|k| k.wrapping_add(1));
        for x in queries.iter().copied().chain(neighbours) {
            let present = keys.binary_search(&x).is_ok();
            prop_assert_eq!(index.contains(&keys, x), present, "x={}", x);
            prop_assert_eq!(find_in(&keys, bits, &start, x).is_some(), present, "x={}", x);
        }
    }

    #[test]
    fn prop_bits_do_not_change_answers(keys in sorted_keys(), x in any::<u64>()) {
        let queries = [x, x % 1_000, keys.first().copied().unwrap_or(0), keys.last().copied().unwrap_or(0)];
        let expected: Vec<bool> = queries.iter().map(|q| keys.binary_search(q).is_ok()).collect();
        for bits in [1u32, 2, 5, 8, 13, 16] {
            let index = BucketIndex::new(&keys, bits).unwrap();
            let got: Vec<bool> = queries.iter().map(|&q| index.contains(&keys, q)).collect();
            prop_assert_eq!(&got, &expected, "bits={}", bits);
        }
    }
}

#[test]
fn uniform_array_every_bit_count() {
    let keys = vec![123_456u64; 64];
    for bits in MIN_BITS..=MAX_BITS {
        let index = BucketIndex::new(&keys, bits).unwrap();
        let i = index.find(&keys, 123_456).expect("repeated key must be found");
        assert!(i < keys.len());
        assert_eq!(index.find(&keys, 123_455), None);
        assert_eq!(index.find(&keys, 123_457), None);
        assert_eq!(index.find(&keys, 0), None);
    }
}

#[test]
fn empty_array_every_bit_count() {
    for bits in MIN_BITS..=MAX_BITS {
        let index = BucketIndex::new(&[], bits).unwrap();
        assert!(index.starts().iter().all(|&s| s == 0));
        assert_eq!(index.find(&[], 0), None);
        assert_eq!(index.find(&[], u64::MAX), None);
    }
}
