#![no_main]

use std::collections::VecDeque;

use acceptkit::policy::lru::LruCore;
use acceptkit::traits::{CoreCache, LruCacheTrait, MutableCache};
use libfuzzer_sys::fuzz_target;

// Arbitrary operation sequences on LruCore, checked against a VecDeque model
// ordered from most to least recently used.
fuzz_target!(|data: &[u8]| {
    let Some((&first, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(first % 16) + 1;
    let mut cache: LruCore<u8, u32> = LruCore::try_new(capacity).unwrap();
    let mut model: VecDeque<(u8, u32)> = VecDeque::new();

    for (step, chunk) in ops.chunks_exact(2).enumerate() {
        let op = chunk[0] % 7;
        let key = chunk[1] % 32;
        let value = step as u32;

        match op {
            0 | 1 => {
                // insert
                let previous = model.iter().position(|(k, _)| *k == key).map(|i| {
                    let (_, v) = model.remove(i).unwrap();
                    v
                });
                if previous.is_none() && model.len() == capacity {
                    model.pop_back();
                }
                model.push_front((key, value));
                assert_eq!(cache.insert(key, value), previous);
            },
            2 => {
                // get
                let expected = model.iter().position(|(k, _)| *k == key).map(|i| {
                    let entry = model.remove(i).unwrap();
                    model.push_front(entry);
                    entry.1
                });
                assert_eq!(cache.get(&key).copied(), expected);
            },
            3 => {
                // peek
                let expected = model.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);
                assert_eq!(cache.peek(&key).copied(), expected);
            },
            4 => {
                // remove
                let expected = model
                    .iter()
                    .position(|(k, _)| *k == key)
                    .and_then(|i| model.remove(i))
                    .map(|(_, v)| v);
                assert_eq!(cache.remove(&key), expected);
            },
            5 => {
                // touch
                let found = match model.iter().position(|(k, _)| *k == key) {
                    Some(i) => {
                        let entry = model.remove(i).unwrap();
                        model.push_front(entry);
                        true
                    },
                    None => false,
                };
                assert_eq!(cache.touch(&key), found);
            },
            _ => {
                // pop_lru
                assert_eq!(cache.pop_lru(), model.pop_back());
            },
        }

        assert_eq!(cache.len(), model.len());
        assert!(cache.len() <= capacity);
        assert!(cache.check_invariants().is_ok());
        assert!(cache.keys().copied().eq(model.iter().map(|(k, _)| *k)));
    }
});
