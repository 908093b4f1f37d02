use std::time::Duration;

use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, SamplingMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const MEDIUM_RUNTIME_SAMPLE_SIZE: usize = 15;
const MEDIUM_RUNTIME_WARM_UP_MS: u64 = 500;
const MEDIUM_RUNTIME_MEASURE_MS: u64 = 1000;
const LARGE_RUNTIME_SAMPLE_SIZE: usize = 10;
const LARGE_RUNTIME_WARM_UP_MS: u64 = 800;
const LARGE_RUNTIME_MEASURE_MS: u64 = 1500;
const RNG_SEED: u64 = 0x5EED_2026;
const FEW_DISTINCT_VALUES: u64 = 16;

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.sampling_mode(SamplingMode::Auto);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

pub fn apply_medium_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(MEDIUM_RUNTIME_SAMPLE_SIZE);
    group.sampling_mode(SamplingMode::Flat);
    group.warm_up_time(Duration::from_millis(MEDIUM_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(MEDIUM_RUNTIME_MEASURE_MS));
}

pub fn apply_large_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(LARGE_RUNTIME_SAMPLE_SIZE);
    group.sampling_mode(SamplingMode::Flat);
    group.warm_up_time(Duration::from_millis(LARGE_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(LARGE_RUNTIME_MEASURE_MS));
}

/// Picks a runtime preset by input length.
pub fn apply_runtime_for_len<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, len: usize) {
    if len <= 16384 {
        apply_small_runtime_config(group);
    } else if len <= 65536 {
        apply_medium_runtime_config(group);
    } else {
        apply_large_runtime_config(group);
    }
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Distribution {
    RandomUniform,
    NearlySorted1pctSwaps,
    /// Values drawn from a handful of keys, so the sort runs short of
    /// distinct elements for its buffer.
    FewDistinct,
    Reversed,
}

impl Distribution {
    pub const ALL: [Distribution; 4] = [
        Distribution::RandomUniform,
        Distribution::NearlySorted1pctSwaps,
        Distribution::FewDistinct,
        Distribution::Reversed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::RandomUniform => "random_uniform",
            Self::NearlySorted1pctSwaps => "nearly_sorted_1pct_swaps",
            Self::FewDistinct => "few_distinct",
            Self::Reversed => "reversed",
        }
    }

    fn salt(self) -> u64 {
        match self {
            Self::RandomUniform => 11,
            Self::NearlySorted1pctSwaps => 12,
            Self::FewDistinct => 13,
            Self::Reversed => 14,
        }
    }
}

/// Deterministic input of `len` keys following `dist`.
pub fn generate_dataset(dist: Distribution, len: usize, salt: u64) -> Vec<u64> {
    let seed = mix_seed(RNG_SEED ^ (dist.salt() << 48) ^ (len as u64) ^ salt);
    let mut rng = StdRng::seed_from_u64(seed);

    match dist {
        Distribution::RandomUniform => (0..len).map(|_| rng.random::<u64>()).collect(),
        Distribution::NearlySorted1pctSwaps => {
            let mut data: Vec<u64> = (0..len as u64).collect();
            if len != 0 {
                for _ in 0..(len / 100).max(1) {
                    let a = rng.random_range(0..len);
                    let b = rng.random_range(0..len);
                    data.swap(a, b);
                }
            }
            data
        }
        Distribution::FewDistinct => (0..len)
            .map(|_| rng.random_range(0..FEW_DISTINCT_VALUES))
            .collect(),
        Distribution::Reversed => (0..len as u64).rev().collect(),
    }
}

#[inline]
pub fn mix_seed(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
