use ouroboros_ring::{AccessMode, ChannelBuilder, Consumed, Module, Registry, RingChannel};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn concurrent_writers_never_break_cursors() {
    let rb = Arc::new(RingChannel::with_defaults());
    let writers = 8;
    let per_writer = 1000;

    let mut handles = vec![];
    for w in 0..writers {
        let rb = rb.clone();
        handles.push(thread::spawn(move || {
            for i in 0..per_writer {
                rb.append(format!("{w}:{i}").as_bytes());
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    let c = rb.cursors();
    assert_eq!(c.count, 10);
    assert_eq!(c.head, c.tail);

    // survivors are intact, well-formed records
    while let Consumed::Record(bytes) = rb.consume() {
        let text = String::from_utf8(bytes).unwrap();
        let (w, i) = text.split_once(':').unwrap();
        assert!(w.parse::<usize>().unwrap() < writers);
        assert!(i.parse::<usize>().unwrap() < per_writer);
    }
}

#[test]
fn every_record_delivered_at_most_once() {
    let registry = Arc::new(Registry::new());
    let module = Arc::new(
        Module::load(registry.clone(), ChannelBuilder::new().with_capacity(64)).unwrap(),
    );
    let total = 4000;
    let done = Arc::new(AtomicBool::new(false));

    let producer = {
        let registry = registry.clone();
        let done = done.clone();
        thread::spawn(move || {
            for i in 0..total {
                let mut s = registry.open("ouroboros", AccessMode::WriteOnly).unwrap();
                s.write(format!("{i}").as_str()).unwrap();
            }
            done.store(true, Ordering::Release);
        })
    };

    let mut readers = vec![];
    for _ in 0..4 {
        let module = module.clone();
        let done = done.clone();
        readers.push(thread::spawn(move || {
            let mut seen = Vec::new();
            loop {
                let finished = done.load(Ordering::Acquire);
                let mut s = module.open(AccessMode::ReadOnly).unwrap();
                match s.read_record().unwrap() {
                    Some(bytes) => seen.push(String::from_utf8(bytes).unwrap()),
                    None if finished => break,
                    None => thread::yield_now(),
                }
            }
            seen
        }));
    }

    producer.join().unwrap();
    let mut all = HashSet::new();
    let mut delivered = 0;
    for r in readers {
        let seen = r.join().unwrap();
        // each reader sees records in increasing order
        let mut last = -1i64;
        for s in &seen {
            let v: i64 = s.parse().unwrap();
            assert!(v > last);
            last = v;
        }
        delivered += seen.len();
        all.extend(seen);
    }

    assert_eq!(all.len(), delivered, "a record was delivered twice");
    assert!(delivered <= total);
    assert!(module.channel().is_empty());
}
