use std::cell::UnsafeCell;
use std::hint::black_box;
use std::thread;

use bbclient_utils_rs::CriticalSection;
use criterion::{criterion_group, criterion_main, Criterion};

struct Counter(UnsafeCell<u64>);

// Only touched while the benchmark's critical section is held.
unsafe impl Sync for Counter {}

fn uncontended(c: &mut Criterion) {
  let mut cs: CriticalSection = CriticalSection::named("bench.uncontended");
  cs.init();

  c.bench_function("critical_section/lock_unlock", |b| {
    b.iter(|| {
      let guard = cs.lock();
      black_box(&guard);
      cs.unlock(guard);
    })
  });

  cs.shutdown();
}

fn contended(c: &mut Criterion) {
  const THREADS: usize = 4;
  const INCREMENTS: usize = 1_000;

  let mut cs: CriticalSection = CriticalSection::named("bench.contended");
  cs.init();
  let counter = Counter(UnsafeCell::new(0));

  c.bench_function("critical_section/4_threads_x_1000_increments", |b| {
    b.iter(|| {
      thread::scope(|s| {
        for _ in 0..THREADS {
          s.spawn(|| {
            for _ in 0..INCREMENTS {
              cs.with(|| unsafe { *counter.0.get() += 1 });
            }
          });
        }
      });
    })
  });

  black_box(cs.with(|| unsafe { *counter.0.get() }));
  cs.shutdown();
}

criterion_group!(benches, uncontended, contended);
criterion_main!(benches);
