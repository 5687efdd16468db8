use std::ops::RangeInclusive;

use rand::prelude::*;

use super::{ProcessId, ProcessSpec};
use crate::core::Ticks;

/// Parameters for a reproducible random workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub count: usize,
    pub seed: u64,
    pub arrival: RangeInclusive<Ticks>,
    pub burst: RangeInclusive<Ticks>,
    pub memory: RangeInclusive<u64>,
}

impl GeneratorConfig {
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            arrival: 0..=10,
            burst: 1..=10,
            memory: 1..=100,
        }
    }

    /// Same seed, same workload. Ids run from 1 in submission order.
    pub fn generate(&self) -> Vec<ProcessSpec> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (1..=self.count as ProcessId)
            .map(|id| {
                ProcessSpec::new(
                    id,
                    rng.random_range(self.arrival.clone()),
                    rng.random_range(self.burst.clone()),
                    rng.random_range(self.memory.clone()),
                )
            })
            .collect()
    }
}

pub fn generate_processes(count: usize, seed: u64) -> Vec<ProcessSpec> {
    GeneratorConfig::new(count, seed).generate()
}
