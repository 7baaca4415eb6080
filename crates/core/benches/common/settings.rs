//! Bench run settings read from the environment.
//!
//! `CELLGRID_BENCH_TIER=full` adds the larger entry populations and longer
//! measurement windows; `CELLGRID_BENCH_SEED` fixes the generated boxes.

use std::env;
use std::time::Duration;

use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, Throughput};

const DEFAULT_SEED: u64 = 0xC0FFEE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchTier {
    Quick,
    Full,
}

#[derive(Debug, Clone, Copy)]
pub struct BenchSettings {
    pub tier: BenchTier,
    pub seed: u64,
}

impl BenchSettings {
    pub fn from_env() -> Self {
        let tier = match env::var("CELLGRID_BENCH_TIER").as_deref() {
            Ok("full") => BenchTier::Full,
            _ => BenchTier::Quick,
        };
        let seed = env::var("CELLGRID_BENCH_SEED")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_SEED);
        Self { tier, seed }
    }

    /// Entry populations to run: `quick` always, `full` only on the full tier.
    pub fn populations(&self, quick: &[usize], full: &[usize]) -> Vec<usize> {
        match self.tier {
            BenchTier::Quick => quick.to_vec(),
            BenchTier::Full => quick.iter().chain(full).copied().collect(),
        }
    }

    pub fn configure<M: Measurement>(&self, group: &mut BenchmarkGroup<'_, M>) {
        let (sample_size, measurement) = match self.tier {
            BenchTier::Quick => (20, Duration::from_secs(3)),
            BenchTier::Full => (30, Duration::from_secs(5)),
        };
        group.sample_size(sample_size);
        group.measurement_time(measurement);
    }
}

/// Throughput counted in grid entries processed per iteration.
pub fn entries(n: usize) -> Throughput {
    Throughput::Elements(n as u64)
}
