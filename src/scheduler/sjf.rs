use std::cmp::Ordering;

use keyed_priority_queue::KeyedPriorityQueue;

use super::{EnqueueFlags, Scheduler, SimCtx, Slot, is_eligible};
use crate::core::Ticks;

/// Dispatch key: shortest burst, then earliest arrival, then submission order.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct ShortestJob {
    pub burst_time: Ticks,
    pub arrival_time: Ticks,
    pub slot: Slot,
}

impl ShortestJob {
    fn key(&self) -> (Ticks, Ticks, Slot) {
        (self.burst_time, self.arrival_time, self.slot)
    }
}

// KeyedPriorityQueue is a max-heap, so the smallest key has to compare greatest
impl PartialOrd for ShortestJob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ShortestJob {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// Non-preemptive shortest-job-first, re-evaluated at every dispatch point.
#[derive(Debug, Clone)]
pub struct SjfScheduler {
    queue: KeyedPriorityQueue<Slot, ShortestJob>,
}

impl SjfScheduler {
    pub fn new() -> Self {
        Self {
            queue: KeyedPriorityQueue::new(),
        }
    }
}

impl Default for SjfScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SjfScheduler {
    fn enqueue(&mut self, ctx: &SimCtx, slot: Slot, _flags: EnqueueFlags) {
        let spec = ctx.process(slot).spec;
        self.queue.push(
            slot,
            ShortestJob {
                burst_time: spec.burst_time,
                arrival_time: spec.arrival_time,
                slot,
            },
        );
    }

    fn select(&self, ctx: &SimCtx) -> Option<Slot> {
        match self.queue.peek() {
            Some((&slot, _)) if is_eligible(ctx, slot) => Some(slot),
            _ => self
                .queue
                .iter()
                .filter(|(slot, _)| is_eligible(ctx, **slot))
                .max_by_key(|(_, job)| **job)
                .map(|(slot, _)| *slot),
        }
    }

    fn take(&mut self, slot: Slot) -> bool {
        self.queue.remove(&slot).is_some()
    }

    fn queued(&self, _ctx: &SimCtx) -> Vec<Slot> {
        let mut jobs: Vec<ShortestJob> = self.queue.iter().map(|(_, job)| *job).collect();
        jobs.sort_unstable_by(|a, b| b.cmp(a));
        jobs.into_iter().map(|job| job.slot).collect()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProcessState;
    use crate::scheduler::ENQ_ARRIVAL;
    use crate::sim::ProcessSpec;

    fn ready_ctx(specs: &[ProcessSpec]) -> (SimCtx, SjfScheduler) {
        let mut ctx = SimCtx::new(specs, 100);
        let mut sjf = SjfScheduler::new();
        for slot in 0..specs.len() {
            ctx.set_state(slot, ProcessState::Ready);
            sjf.enqueue(&ctx, slot, ENQ_ARRIVAL);
        }
        (ctx, sjf)
    }

    #[test]
    fn dispatches_shortest_burst_first() {
        let (ctx, mut sjf) = ready_ctx(&[
            ProcessSpec::new(b'A' as u64, 0, 5, 1),
            ProcessSpec::new(b'B' as u64, 0, 3, 1),
            ProcessSpec::new(b'C' as u64, 0, 1, 1),
        ]);

        let mut order = Vec::new();
        while let Some(slot) = sjf.select(&ctx) {
            assert!(sjf.take(slot));
            order.push(ctx.id(slot));
        }
        assert_eq!(order, vec![b'C' as u64, b'B' as u64, b'A' as u64]);
    }

    #[test]
    fn ties_break_on_arrival_then_submission() {
        let (ctx, sjf) = ready_ctx(&[
            ProcessSpec::new(1, 2, 4, 1),
            ProcessSpec::new(2, 1, 4, 1),
            ProcessSpec::new(3, 1, 4, 1),
        ]);
        assert_eq!(sjf.queued(&ctx), vec![1, 2, 0]);
        assert_eq!(sjf.select(&ctx), Some(1));
    }

    #[test]
    fn deferred_head_yields_to_next_shortest() {
        let (mut ctx, sjf) = ready_ctx(&[
            ProcessSpec::new(1, 0, 1, 90),
            ProcessSpec::new(2, 0, 2, 1),
            ProcessSpec::new(3, 0, 3, 1),
        ]);
        ctx.set_state(0, ProcessState::WaitingForMemory);
        assert_eq!(sjf.select(&ctx), Some(1));
        ctx.set_state(1, ProcessState::WaitingForMemory);
        ctx.set_state(2, ProcessState::WaitingForMemory);
        assert_eq!(sjf.select(&ctx), None);
    }
}
