use crate::core::{ProcessState, Ticks};
use crate::sim::ProcessId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    // Queue contents at the start of a dispatch point
    Snapshot {
        now: Ticks,
        ready: Vec<ProcessId>,
        waiting_for_memory: Vec<ProcessId>,
        unarrived: Vec<ProcessId>,
    },
    ProcessStateChange {
        process: ProcessId,
        from: ProcessState,
        to: ProcessState,
    },
    Selected {
        process: ProcessId,
    },
    Allocated {
        process: ProcessId,
        size: u64,
        free_blocks: Vec<u64>,
    },
    AllocationDeferred {
        process: ProcessId,
        required: u64,
        largest_free_block: u64,
    },
    // One execution window [start, end)
    Executed {
        process: ProcessId,
        start: Ticks,
        end: Ticks,
        remaining: Ticks,
    },
    MemoryReleased {
        process: ProcessId,
        size: u64,
        free_blocks: Vec<u64>,
    },
    // Nothing has arrived yet; time advances by one tick
    CpuIdle {
        now: Ticks,
    },
}
