use std::num::NonZeroU64;

use super::{ENQ_REQUEUE, EnqueueFlags, Scheduler, SimCtx, Slot, fifo::FifoQueue};
use crate::core::Ticks;

/// Circular ready queue with a fixed time quantum.
///
/// New arrivals join the tail in arrival order; a preempted process is
/// re-appended behind anything that arrived during its slice.
#[derive(Debug, Clone)]
pub struct RoundRobinScheduler {
    queue: FifoQueue,
    quantum: NonZeroU64,
}

impl RoundRobinScheduler {
    pub fn new(quantum: NonZeroU64) -> Self {
        Self {
            queue: FifoQueue::new(),
            quantum,
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    fn enqueue(&mut self, ctx: &SimCtx, slot: Slot, flags: EnqueueFlags) {
        debug_assert!(
            flags & ENQ_REQUEUE == 0 || ctx.process(slot).remaining_time > 0,
            "Requeued process {} has no CPU time left",
            ctx.id(slot)
        );
        self.queue.push_back(slot);
    }

    fn select(&self, ctx: &SimCtx) -> Option<Slot> {
        self.queue.select(ctx)
    }

    fn take(&mut self, slot: Slot) -> bool {
        self.queue.take(slot)
    }

    fn queued(&self, _ctx: &SimCtx) -> Vec<Slot> {
        self.queue.queued()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn slice(&self, ctx: &SimCtx, slot: Slot) -> Ticks {
        ctx.process(slot).remaining_time.min(self.quantum.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProcessState;
    use crate::scheduler::ENQ_ARRIVAL;
    use crate::sim::ProcessSpec;

    #[test]
    fn slice_is_capped_by_quantum_and_remaining_time() {
        let mut ctx = SimCtx::new(&[ProcessSpec::new(1, 0, 5, 1)], 10);
        let rr = RoundRobinScheduler::new(NonZeroU64::new(2).unwrap());
        assert_eq!(rr.slice(&ctx, 0), 2);
        ctx.process_mut(0).remaining_time = 1;
        assert_eq!(rr.slice(&ctx, 0), 1);
    }

    #[test]
    fn requeued_process_goes_to_the_tail() {
        let mut ctx = SimCtx::new(
            &[
                ProcessSpec::new(1, 0, 5, 1),
                ProcessSpec::new(2, 0, 5, 1),
                ProcessSpec::new(3, 1, 5, 1),
            ],
            10,
        );
        let mut rr = RoundRobinScheduler::new(NonZeroU64::new(2).unwrap());
        for slot in 0..2 {
            ctx.set_state(slot, ProcessState::Ready);
            rr.enqueue(&ctx, slot, ENQ_ARRIVAL);
        }

        let first = rr.select(&ctx).unwrap();
        assert!(rr.take(first));
        ctx.set_state(2, ProcessState::Ready);
        rr.enqueue(&ctx, 2, ENQ_ARRIVAL);
        rr.enqueue(&ctx, first, ENQ_REQUEUE);

        assert_eq!(rr.queued(&ctx), vec![1, 2, 0]);
    }
}
