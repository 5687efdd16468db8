use std::collections::VecDeque;
use std::iter::FusedIterator;

use log::trace;

use super::process::{Process, ProcessSpec};
use crate::{
    core::{SimEvent, Slot, driver::SchedCore},
    error::{SimError, SimResult},
    scheduler::Scheduler,
};

#[derive(Debug, Clone)]
pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    // Slots sorted by (arrival_time, submission order)
    arrival_order: Vec<Slot>,
    arrival_cursor: usize,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(specs: &[ProcessSpec], total_memory: u64, scheduler: S) -> Self {
        let mut arrival_order: Vec<Slot> = (0..specs.len()).collect();
        arrival_order.sort_by_key(|&slot| (specs[slot].arrival_time, slot));

        Self {
            core: SchedCore::new(specs, total_memory, scheduler),
            arrival_order,
            arrival_cursor: 0,
        }
    }

    /// Advances the simulation by one dispatch point (or one idle tick).
    pub fn step(&mut self) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();
        self.step_into(&mut events)?;
        Ok(events)
    }

    // Events recorded before a failure stay in `events`
    fn step_into(&mut self, events: &mut Vec<SimEvent>) -> SimResult<()> {
        if self.all_completed() {
            return Ok(());
        }

        self.handle_arrivals(events);

        if self.core.scheduler.is_empty() {
            self.core.idle(events);
        } else {
            let snapshot = self.core.snapshot();
            trace!("{snapshot:?}");
            events.push(snapshot);

            let slot = self.core.dispatch(events)?;
            let completed = self.core.execute(slot, events);
            // Arrivals during the slice queue up ahead of a preempted process
            self.handle_arrivals(events);
            self.core.retire(slot, completed, events);
        }

        self.handle_arrivals(events);
        self.core.observe();
        Ok(())
    }

    /// Steps until every process has completed.
    ///
    /// An idle CPU advances one tick per step, so a workload whose next
    /// arrival is far in the future costs one step per tick of the gap.
    pub fn run(&mut self) -> SimResult<()> {
        while !self.all_completed() {
            self.step()?;
        }
        Ok(())
    }

    fn handle_arrivals(&mut self, events: &mut Vec<SimEvent>) {
        let now = self.core.now();
        while let Some(&slot) = self.arrival_order.get(self.arrival_cursor) {
            if self.core.ctx.process(slot).spec.arrival_time > now {
                break;
            }
            self.core.admit(slot, events);
            self.arrival_cursor += 1;
        }
    }

    pub fn all_completed(&self) -> bool {
        self.core.ctx.all_completed()
    }

    /// Processes in submission order.
    pub fn processes(&self) -> &[Process] {
        &self.core.ctx.processes
    }

    pub fn into_processes(self) -> Vec<Process> {
        self.core.ctx.processes
    }

    /// Lazily replays the simulation from its current state.
    ///
    /// The trace steps a clone, so `self` is left untouched and every call
    /// yields the same sequence.
    pub fn trace(&self) -> Trace<S>
    where
        S: Clone,
    {
        Trace {
            sim: self.clone(),
            pending: VecDeque::new(),
            error: None,
            failed: false,
        }
    }
}

/// Event stream produced by stepping a simulation on demand.
#[derive(Debug, Clone)]
pub struct Trace<S: Scheduler> {
    sim: Sim<S>,
    pending: VecDeque<SimEvent>,
    error: Option<SimError>,
    failed: bool,
}

impl<S: Scheduler> Iterator for Trace<S> {
    type Item = SimResult<SimEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            // Reported once, after the events the failing step recorded
            if let Some(err) = self.error.take() {
                return Some(Err(err));
            }
            if self.failed || self.sim.all_completed() {
                return None;
            }

            let mut events = Vec::new();
            if let Err(err) = self.sim.step_into(&mut events) {
                self.failed = true;
                self.error = Some(err);
            }
            self.pending.extend(events);
        }
    }
}

impl<S: Scheduler> FusedIterator for Trace<S> {}
