pub mod config;
pub mod driver;
pub mod generate;
pub mod process;
pub mod report;

pub use config::SimConfig;
pub use driver::{Sim, Trace};
pub use generate::{GeneratorConfig, generate_processes};
pub use process::{Process, ProcessId, ProcessSpec};
pub use report::Summary;

use log::info;

use crate::core::SimEvent;
use crate::error::SimResult;
use crate::scheduler::{FcfsScheduler, Policy, RoundRobinScheduler, Scheduler, SjfScheduler};

/// Runs `specs` under the configured policy and memory pool.
///
/// Returns the processes in submission order with their metrics filled in.
pub fn simulate(specs: &[ProcessSpec], config: &SimConfig) -> SimResult<Vec<Process>> {
    config.validate(specs)?;
    info!(
        "simulating {} process(es) under {} with {} units of memory",
        specs.len(),
        config.policy,
        config.total_memory
    );

    match config.policy {
        Policy::Fcfs => run_to_completion(specs, config, FcfsScheduler::new()),
        Policy::Sjf => run_to_completion(specs, config, SjfScheduler::new()),
        Policy::RoundRobin { quantum } => {
            run_to_completion(specs, config, RoundRobinScheduler::new(quantum))
        }
    }
}

/// Lazy event stream for the configured policy.
pub fn trace(
    specs: &[ProcessSpec],
    config: &SimConfig,
) -> SimResult<Box<dyn Iterator<Item = SimResult<SimEvent>>>> {
    config.validate(specs)?;
    let total = config.total_memory;
    let events: Box<dyn Iterator<Item = SimResult<SimEvent>>> = match config.policy {
        Policy::Fcfs => Box::new(Sim::new(specs, total, FcfsScheduler::new()).trace()),
        Policy::Sjf => Box::new(Sim::new(specs, total, SjfScheduler::new()).trace()),
        Policy::RoundRobin { quantum } => {
            Box::new(Sim::new(specs, total, RoundRobinScheduler::new(quantum)).trace())
        }
    };
    Ok(events)
}

fn run_to_completion<S: Scheduler>(
    specs: &[ProcessSpec],
    config: &SimConfig,
    scheduler: S,
) -> SimResult<Vec<Process>> {
    let mut sim = Sim::new(specs, config.total_memory, scheduler);
    sim.run()?;
    info!(
        "all processes completed at t={} after {} step(s)",
        sim.core.now(),
        sim.core.observer().steps()
    );
    Ok(sim.into_processes())
}
