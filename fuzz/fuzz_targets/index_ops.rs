//! Fuzz harness for the prefix-sum index
//!
//! Drives a `PrefixSumIndex` with byte-derived operations and compares every
//! sum against a plain Vec.

#![no_main]

use libfuzzer_sys::fuzz_target;
use prefixsum_fenwick::PrefixSumIndex;
use std::num::Wrapping;

fuzz_target!(|data: &[u8]| {
    let Some((&len, ops)) = data.split_first() else {
        return;
    };
    let len = usize::from(len % 64);
    let mut index: PrefixSumIndex<Wrapping<i64>> = PrefixSumIndex::new(len);
    let mut naive = vec![Wrapping(0i64); len];

    for chunk in ops.chunks_exact(4) {
        let i = usize::from(chunk[1]) % (len + 2);
        let j = usize::from(chunk[2]) % (len + 2);
        let v = Wrapping(i64::from(chunk[3] as i8));
        match chunk[0] % 5 {
            0 => {
                let ok = index.add(i, v).is_ok();
                assert_eq!(ok, i < len);
                if ok {
                    naive[i] += v;
                }
            }
            1 => {
                let ok = index.set(i, v).is_ok();
                assert_eq!(ok, i < len);
                if ok {
                    naive[i] = v;
                }
            }
            2 => match index.prefix_sum(i) {
                Ok(sum) => assert_eq!(sum, naive[..=i].iter().copied().sum()),
                Err(e) => assert!(e.is_out_of_range() && i >= len),
            },
            3 => match index.range_sum(i, j) {
                Ok(sum) => assert_eq!(sum, naive[i..=j].iter().copied().sum()),
                Err(e) => assert!(i > j || j >= len, "{e}"),
            },
            _ => assert_eq!(index.total(), naive.iter().copied().sum()),
        }
    }

    assert_eq!(index.values(), naive.as_slice());
});
