use super::{EnqueueFlags, Scheduler, SimCtx, Slot, fifo::FifoQueue};

/// First-come-first-served. Slots are admitted in arrival order, so the
/// queue is already sorted by `(arrival_time, submission order)`.
#[derive(Debug, Clone, Default)]
pub struct FcfsScheduler {
    queue: FifoQueue,
}

impl FcfsScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for FcfsScheduler {
    fn enqueue(&mut self, _ctx: &SimCtx, slot: Slot, _flags: EnqueueFlags) {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProcessState;
    use crate::scheduler::ENQ_ARRIVAL;
    use crate::sim::ProcessSpec;

    #[test]
    fn runs_each_process_to_completion_in_queue_order() {
        let mut ctx = SimCtx::new(
            &[
                ProcessSpec::new(1, 0, 5, 8),
                ProcessSpec::new(2, 1, 3, 1),
            ],
            10,
        );
        let mut fcfs = FcfsScheduler::new();
        for slot in 0..2 {
            ctx.set_state(slot, ProcessState::Ready);
            fcfs.enqueue(&ctx, slot, ENQ_ARRIVAL);
        }

        assert_eq!(fcfs.select(&ctx), Some(0));
        assert_eq!(fcfs.slice(&ctx, 0), 5);
        assert!(fcfs.take(0));
        assert_eq!(fcfs.queued(&ctx), vec![1]);
        assert_eq!(fcfs.select(&ctx), Some(1));
    }
}
