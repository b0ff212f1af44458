use std::hint::black_box;
use std::time::{Duration, Instant};

use bench::{
    apply_medium_runtime_config, apply_small_runtime_config, default_rng, iter_rng, seed_base,
};
use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, BenchmarkId};
use rand::Rng;

use linear::{LinkedList, Sequence, Vector};

const SIZES: [usize; 4] = [1_000, 4_000, 16_000, 64_000];
const OPS_PER_ITER: usize = 200;
const MIDDLE_SIZES: [usize; 3] = [1_000, 4_000, 16_000];

fn filled<S>(size: usize) -> S
where
    S: Sequence<Item = u64>,
{
    let mut rng = default_rng();
    let mut seq = S::new();
    for _ in 0..size {
        seq.append(rng.random());
    }
    seq
}

/// Queue traffic at both ends: push one side, pop the other.
pub fn bench_ends<S, T>(group: &mut BenchmarkGroup<'_, T>, label: &str)
where
    T: Measurement<Value = Duration>,
    S: Sequence<Item = u64>,
{
    for &size in &SIZES {
        apply_small_runtime_config(group);
        let base_seed = seed_base(1, size as u64);
        let mut seq = filled::<S>(size);

        group.bench_function(BenchmarkId::new(label, size), |bencher| {
            bencher.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for iter in 0..iters {
                    let mut rng = iter_rng(base_seed, iter);
                    let values: Vec<u64> = (0..OPS_PER_ITER).map(|_| rng.random()).collect();
                    let start = Instant::now();
                    for &value in &values {
                        if value & 1 == 0 {
                            seq.append(value);
                            black_box(seq.pop_first().ok());
                        } else {
                            seq.prepend(value);
                            black_box(seq.pop_last().ok());
                        }
                    }
                    black_box(seq.len());
                    total += start.elapsed();
                }
                total
            })
        });
    }
}

/// Insert then erase at random interior indices; positions are resolved by walking.
pub fn bench_middle<S, T>(group: &mut BenchmarkGroup<'_, T>, label: &str)
where
    T: Measurement<Value = Duration>,
    S: Sequence<Item = u64>,
{
    for &size in &MIDDLE_SIZES {
        apply_medium_runtime_config(group);
        let base_seed = seed_base(2, size as u64);
        let mut seq = filled::<S>(size);

        group.bench_function(BenchmarkId::new(label, size), |bencher| {
            bencher.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for iter in 0..iters {
                    let mut rng = iter_rng(base_seed, iter);
                    let ops: Vec<(usize, u64)> = (0..OPS_PER_ITER / 2)
                        .map(|_| (rng.random_range(0..=size), rng.random()))
                        .collect();
                    let start = Instant::now();
                    for &(index, value) in &ops {
                        if let Ok(at) = seq.position_at(index) {
                            if let Ok(inserted) = seq.insert(at, value) {
                                black_box(seq.erase(inserted).ok());
                            }
                        }
                    }
                    black_box(seq.len());
                    total += start.elapsed();
                }
                total
            })
        });
    }
}

/// One forward pass erasing every odd value in place.
pub fn bench_filter<S, T>(group: &mut BenchmarkGroup<'_, T>, label: &str)
where
    T: Measurement<Value = Duration>,
    S: Sequence<Item = u64>,
{
    for &size in &MIDDLE_SIZES {
        apply_medium_runtime_config(group);

        group.bench_function(BenchmarkId::new(label, size), |bencher| {
            bencher.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for _ in 0..iters {
                    let mut work = filled::<S>(size);
                    let start = Instant::now();
                    let mut pos = work.begin();
                    while pos != work.end() {
                        let odd = work.get(pos).map_or(false, |value| value & 1 == 1);
                        pos = if odd {
                            work.erase(pos)
                        } else {
                            work.next_position(pos)
                        }
                        .unwrap_or_else(|_| work.end());
                    }
                    black_box(work.len());
                    total += start.elapsed();
                }
                total
            })
        });
    }
}

pub fn bench_all_ends<T>(group: &mut BenchmarkGroup<'_, T>)
where
    T: Measurement<Value = Duration>,
{
    bench_ends::<Vector<u64>, _>(group, "vector");
    bench_ends::<LinkedList<u64>, _>(group, "linked_list");
}

pub fn bench_all_middle<T>(group: &mut BenchmarkGroup<'_, T>)
where
    T: Measurement<Value = Duration>,
{
    bench_middle::<Vector<u64>, _>(group, "vector");
    bench_middle::<LinkedList<u64>, _>(group, "linked_list");
}

pub fn bench_all_filter<T>(group: &mut BenchmarkGroup<'_, T>)
where
    T: Measurement<Value = Duration>,
{
    bench_filter::<Vector<u64>, _>(group, "vector");
    bench_filter::<LinkedList<u64>, _>(group, "linked_list");
}
