use rustc_hash::FxHashSet;

use super::ProcessSpec;
use crate::core::Ticks;
use crate::error::{ConfigError, SimError, SimResult};
use crate::scheduler::Policy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub policy: Policy,
    pub total_memory: u64,
}

impl SimConfig {
    pub fn new(policy: Policy, total_memory: u64) -> Self {
        Self {
            policy,
            total_memory,
        }
    }

    /// Rejects inputs the loop could not finish: bad descriptors up front,
    /// workloads whose clock could overflow, and any process that would
    /// never fit even in an empty pool.
    pub fn validate(&self, specs: &[ProcessSpec]) -> SimResult<()> {
        let mut seen = FxHashSet::default();
        for spec in specs {
            if !seen.insert(spec.id) {
                return Err(ConfigError::DuplicateId { id: spec.id }.into());
            }
            if spec.burst_time == 0 {
                return Err(ConfigError::ZeroBurst { id: spec.id }.into());
            }
            if spec.memory_required == 0 {
                return Err(ConfigError::ZeroMemory { id: spec.id }.into());
            }
        }

        // Every completion happens by the latest arrival plus all CPU demand
        horizon(specs).ok_or(ConfigError::HorizonOverflow)?;

        let oversized: Vec<_> = specs
            .iter()
            .filter(|spec| spec.memory_required > self.total_memory)
            .map(|spec| spec.id)
            .collect();
        if !oversized.is_empty() {
            return Err(SimError::Unschedulable {
                now: 0,
                stuck: oversized,
                largest_free_block: self.total_memory,
            });
        }

        Ok(())
    }
}

fn horizon(specs: &[ProcessSpec]) -> Option<Ticks> {
    let latest_arrival = specs.iter().map(|spec| spec.arrival_time).max().unwrap_or(0);
    specs
        .iter()
        .try_fold(latest_arrival, |acc, spec| acc.checked_add(spec.burst_time))
}
