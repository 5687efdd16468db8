use std::collections::VecDeque;

use super::{SimCtx, Slot, is_eligible};

/// Slots in the order they were queued. Shared by the FIFO-ordered policies.
#[derive(Debug, Clone, Default)]
pub struct FifoQueue {
    queue: VecDeque<Slot>,
}

impl FifoQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, slot: Slot) {
        self.queue.push_back(slot);
    }

    /// First queued slot that is not deferred for memory.
    pub fn select(&self, ctx: &SimCtx) -> Option<Slot> {
        self.queue.iter().copied().find(|&slot| is_eligible(ctx, slot))
    }

    pub fn take(&mut self, slot: Slot) -> bool {
        match self.queue.iter().position(|&s| s == slot) {
            Some(index) => self.queue.remove(index).is_some(),
            None => false,
        }
    }

    pub fn queued(&self) -> Vec<Slot> {
        self.queue.iter().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
