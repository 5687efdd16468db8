use rustc_hash::FxHashMap;

use super::memory::MemoryManager;
use crate::sim::{Process, ProcessId, ProcessSpec};

// Index into the process table, in submission order
pub type Slot = usize;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessState {
    Unarrived,
    Ready,
    WaitingForMemory,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct SimCtx {
    pub now: Ticks,
    pub processes: Vec<Process>,
    pub memory: MemoryManager,
    // Memory held by each process from its first dispatch until completion
    pub held: FxHashMap<Slot, u64>,
}

impl SimCtx {
    pub fn new(specs: &[ProcessSpec], total_memory: u64) -> Self {
        Self {
            now: 0,
            processes: specs.iter().copied().map(Process::new).collect(),
            memory: MemoryManager::new(total_memory),
            held: FxHashMap::default(),
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn process(&self, slot: Slot) -> &Process {
        &self.processes[slot]
    }

    pub fn process_mut(&mut self, slot: Slot) -> &mut Process {
        &mut self.processes[slot]
    }

    pub fn id(&self, slot: Slot) -> ProcessId {
        self.processes[slot].spec.id
    }

    pub fn state(&self, slot: Slot) -> ProcessState {
        self.processes[slot].state
    }

    // Returns the previous state
    pub fn set_state(&mut self, slot: Slot, state: ProcessState) -> ProcessState {
        let process = self.process_mut(slot);
        debug_assert!(
            process.state != ProcessState::Completed,
            "Completed process {} cannot change state",
            process.spec.id
        );
        std::mem::replace(&mut process.state, state)
    }

    pub fn holds_memory(&self, slot: Slot) -> bool {
        self.held.contains_key(&slot)
    }

    pub fn held_memory(&self) -> u64 {
        self.held.values().sum()
    }

    /// Reserves memory for `slot` unless it already holds some.
    pub fn try_allocate(&mut self, slot: Slot) -> bool {
        if self.holds_memory(slot) {
            return true;
        }

        let size = self.process(slot).spec.memory_required;
        if !self.memory.allocate(size) {
            return false;
        }

        self.held.insert(slot, size);
        true
    }

    /// Hands memory held by `slot` back to the pool. Returns the released size.
    pub fn release(&mut self, slot: Slot) -> Option<u64> {
        let size = self.held.remove(&slot)?;
        self.memory.deallocate(size);
        Some(size)
    }

    pub fn slots_in(&self, state: ProcessState) -> impl Iterator<Item = Slot> + '_ {
        self.processes
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.state == state)
            .map(|(slot, _)| slot)
    }

    pub fn all_completed(&self) -> bool {
        self.processes.iter().all(Process::is_completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> SimCtx {
        SimCtx::new(
            &[ProcessSpec::new(10, 0, 3, 6), ProcessSpec::new(11, 0, 3, 5)],
            10,
        )
    }

    #[test]
    fn allocation_is_held_until_released() {
        let mut ctx = ctx();
        assert!(ctx.try_allocate(0));
        assert!(ctx.holds_memory(0));
        // A second request from the same holder is free
        assert!(ctx.try_allocate(0));
        assert_eq!(ctx.held_memory(), 6);
        assert_eq!(ctx.memory.free_memory(), 4);

        assert!(!ctx.try_allocate(1));
        assert!(!ctx.holds_memory(1));

        assert_eq!(ctx.release(0), Some(6));
        assert_eq!(ctx.release(0), None);
        assert_eq!(ctx.held_memory(), 0);
        assert_eq!(ctx.memory.free_blocks(), &[4, 6]);
    }

    #[test]
    fn release_without_allocation_leaves_pool_untouched() {
        let mut ctx = ctx();
        assert_eq!(ctx.release(1), None);
        assert_eq!(ctx.memory.free_blocks(), &[10]);

        assert!(ctx.try_allocate(1));
        assert_eq!(ctx.held.get(&1), Some(&5));
        assert_eq!(ctx.release(0), None);
        assert_eq!(ctx.held_memory(), 5);
        assert_eq!(ctx.memory.free_blocks(), &[5]);
    }

    #[test]
    fn state_transitions_report_previous_state() {
        let mut ctx = ctx();
        assert_eq!(ctx.set_state(1, ProcessState::Ready), ProcessState::Unarrived);
        assert_eq!(ctx.slots_in(ProcessState::Ready).collect::<Vec<_>>(), vec![1]);
        assert_eq!(ctx.id(1), 11);
    }
}
