use log::{debug, info, warn};

use super::{
    event::SimEvent,
    observer::Observer,
    state::{ProcessState, SimCtx, Slot, Ticks},
};
use crate::error::{SimError, SimResult};
use crate::scheduler::{ENQ_ARRIVAL, ENQ_REQUEUE, Scheduler};
use crate::sim::ProcessSpec;

#[derive(Debug, Clone)]
pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(specs: &[ProcessSpec], total_memory: u64, scheduler: S) -> Self {
        Self {
            ctx: SimCtx::new(specs, total_memory),
            scheduler,
            observer: Observer::new(),
        }
    }

    /// Hands an arrived process to the policy queue.
    pub fn admit(&mut self, slot: Slot, events: &mut Vec<SimEvent>) {
        self.transition(slot, ProcessState::Ready, events);
        self.scheduler.enqueue(&self.ctx, slot, ENQ_ARRIVAL);
    }

    /// Nothing is ready: the CPU sits idle for one tick.
    pub fn idle(&mut self, events: &mut Vec<SimEvent>) {
        events.push(SimEvent::CpuIdle { now: self.ctx.now });
        self.ctx.advance_time(1);
    }

    pub fn snapshot(&self) -> SimEvent {
        let queued = self.scheduler.queued(&self.ctx);
        let ids_in = |state: ProcessState| {
            queued
                .iter()
                .filter(|&&slot| self.ctx.state(slot) == state)
                .map(|&slot| self.ctx.id(slot))
                .collect::<Vec<_>>()
        };

        SimEvent::Snapshot {
            now: self.ctx.now,
            ready: ids_in(ProcessState::Ready),
            waiting_for_memory: ids_in(ProcessState::WaitingForMemory),
            unarrived: self
                .ctx
                .slots_in(ProcessState::Unarrived)
                .map(|slot| self.ctx.id(slot))
                .collect(),
        }
    }

    /// Asks the policy for candidates until one obtains memory.
    ///
    /// Candidates that do not fit are parked in `WaitingForMemory` and skipped
    /// by the policy until the next release. When every queued process is
    /// parked and nothing holds memory, no future release can ever help.
    pub fn dispatch(&mut self, events: &mut Vec<SimEvent>) -> SimResult<Slot> {
        loop {
            let Some(slot) = self.scheduler.select(&self.ctx) else {
                return Err(self.unschedulable());
            };

            let process = self.ctx.id(slot);
            events.push(SimEvent::Selected { process });

            let fresh = !self.ctx.holds_memory(slot);
            if self.ctx.try_allocate(slot) {
                if fresh {
                    events.push(SimEvent::Allocated {
                        process,
                        size: self.ctx.process(slot).spec.memory_required,
                        free_blocks: self.ctx.memory.free_blocks().to_vec(),
                    });
                }
                let taken = self.scheduler.take(slot);
                debug_assert!(taken, "Selected process {process} missing from policy queue");
                self.transition(slot, ProcessState::Running, events);
                return Ok(slot);
            }

            let required = self.ctx.process(slot).spec.memory_required;
            let largest_free_block = self.ctx.memory.largest_free_block();
            warn!(
                "t={} process {process} needs {required}, largest free block is {largest_free_block}; deferring",
                self.ctx.now
            );
            events.push(SimEvent::AllocationDeferred {
                process,
                required,
                largest_free_block,
            });
            self.transition(slot, ProcessState::WaitingForMemory, events);
        }
    }

    /// Runs one policy slice of `slot`. Returns true when its burst is exhausted.
    pub fn execute(&mut self, slot: Slot, events: &mut Vec<SimEvent>) -> bool {
        let slice = self.scheduler.slice(&self.ctx, slot);
        let arrival = self.ctx.process(slot).spec.arrival_time;
        self.ctx.now = self.ctx.now.max(arrival);

        let start = self.ctx.now;
        let process = self.ctx.process_mut(slot);
        process.mark_started(start);
        let completed = process.run_for(slice);
        let remaining = process.remaining_time;
        let id = process.spec.id;
        self.ctx.advance_time(slice);

        debug!("t={start} process {id} runs {slice} tick(s), {remaining} left");
        events.push(SimEvent::Executed {
            process: id,
            start,
            end: self.ctx.now,
            remaining,
        });
        completed
    }

    /// Completes `slot` and frees its memory, or puts it back in the queue.
    pub fn retire(&mut self, slot: Slot, completed: bool, events: &mut Vec<SimEvent>) {
        if !completed {
            self.transition(slot, ProcessState::Ready, events);
            self.scheduler.enqueue(&self.ctx, slot, ENQ_REQUEUE);
            return;
        }

        let now = self.ctx.now;
        let id = self.ctx.id(slot);
        self.ctx.process_mut(slot).mark_completed(now);
        events.push(SimEvent::ProcessStateChange {
            process: id,
            from: ProcessState::Running,
            to: ProcessState::Completed,
        });
        info!("t={now} process {id} completed");

        if let Some(size) = self.ctx.release(slot) {
            events.push(SimEvent::MemoryReleased {
                process: id,
                size,
                free_blocks: self.ctx.memory.free_blocks().to_vec(),
            });
            self.wake_waiting(events);
        }
    }

    pub fn observe(&mut self) {
        self.observer.observe(&self.ctx);
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    // Freed memory may satisfy anything that was parked
    fn wake_waiting(&mut self, events: &mut Vec<SimEvent>) {
        let waiting: Vec<Slot> = self.ctx.slots_in(ProcessState::WaitingForMemory).collect();
        for slot in waiting {
            self.transition(slot, ProcessState::Ready, events);
        }
    }

    fn transition(&mut self, slot: Slot, to: ProcessState, events: &mut Vec<SimEvent>) {
        let from = self.ctx.set_state(slot, to);
        if from != to {
            events.push(SimEvent::ProcessStateChange {
                process: self.ctx.id(slot),
                from,
                to,
            });
        }
    }

    fn unschedulable(&self) -> SimError {
        debug_assert_eq!(
            self.ctx.held_memory(),
            0,
            "Memory is held but no queued process can be selected"
        );
        let stuck = self
            .ctx
            .slots_in(ProcessState::WaitingForMemory)
            .map(|slot| self.ctx.id(slot))
            .collect::<Vec<_>>();
        let largest_free_block = self.ctx.memory.largest_free_block();
        warn!(
            "t={} processes {stuck:?} can never fit in the largest free block ({largest_free_block})",
            self.ctx.now
        );
        SimError::Unschedulable {
            now: self.ctx.now,
            stuck,
            largest_free_block,
        }
    }
}
