use std::hint::black_box;
use std::time::{Duration, Instant};

use bench::{Distribution, apply_runtime_for_len, default_rng, generate_dataset};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::Rng;

const BENCH_SIZES: [usize; 4] = [4096, 16384, 65536, 262144];
const PAYLOAD_SIZES: [usize; 2] = [4096, 65536];

#[derive(Clone, Copy)]
enum Contender {
    Grail,
    StdStable,
    StdUnstable,
}

impl Contender {
    const ALL: [Contender; 3] = [Contender::Grail, Contender::StdStable, Contender::StdUnstable];

    fn label(self) -> &'static str {
        match self {
            Self::Grail => "grail_sort",
            Self::StdStable => "std_stable",
            Self::StdUnstable => "std_unstable",
        }
    }

    #[inline]
    fn run<T: Ord>(self, data: &mut [T]) {
        match self {
            Self::Grail => grail_sort::sort(data),
            Self::StdStable => data.sort(),
            Self::StdUnstable => data.sort_unstable(),
        }
    }
}

fn bench_sort(c: &mut Criterion) {
    for dist in Distribution::ALL {
        let mut group = c.benchmark_group(format!("sort/u64/{}", dist.label()));

        for &size in &BENCH_SIZES {
            apply_runtime_for_len(&mut group, size);
            let base = generate_dataset(dist, size, 0);

            for contender in Contender::ALL {
                group.bench_function(BenchmarkId::new(contender.label(), size), |bencher| {
                    bencher.iter_custom(|iters| timed(iters, &base, |data| contender.run(data)));
                });
            }
        }

        group.finish();
    }
}

/// Stable sorting of records heavier than their key, compared through a key
/// projection.
fn bench_sort_by_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_by/record");
    let mut rng = default_rng();

    for &size in &PAYLOAD_SIZES {
        apply_runtime_for_len(&mut group, size);
        let base: Vec<(u64, [u64; 3])> = generate_dataset(Distribution::FewDistinct, size, 1)
            .into_iter()
            .map(|key| (key, [rng.random(), rng.random(), rng.random()]))
            .collect();

        group.bench_function(BenchmarkId::new("grail_sort", size), |bencher| {
            bencher.iter_custom(|iters| {
                timed(iters, &base, |data| grail_sort::sort_by(data, |a, b| a.0.cmp(&b.0)))
            });
        });
        group.bench_function(BenchmarkId::new("std_stable", size), |bencher| {
            bencher.iter_custom(|iters| timed(iters, &base, |data| data.sort_by_key(|r| r.0)));
        });
    }

    group.finish();
}

fn timed<T: Clone>(iters: u64, base: &[T], mut sort: impl FnMut(&mut [T])) -> Duration {
    let mut total = Duration::ZERO;
    for _ in 0..iters {
        let mut data = base.to_vec();
        let start = Instant::now();
        sort(&mut data);
        total += start.elapsed();
        black_box(&data);
    }
    total
}

criterion_group!(benches, bench_sort, bench_sort_by_key);
criterion_main!(benches);
